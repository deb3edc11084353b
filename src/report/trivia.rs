/// Single-roster trivia layout.
///
/// Both species share the headline questions (count, HP, attack, defense,
/// speed); digimon rosters add stage and type breakdowns.

use super::layout::Block;
use crate::error::Result;
use crate::stats::{DIGIMON_STAGES, DIGIMON_TYPES, HEADLINE_STATS};
use crate::types::{ReportKind, ResultMap, Species};

/// (stat key prefix, question, unit suffix) for the headline stats
const HEADLINE_QUESTIONS: &[(&str, &str, &str)] = &[
    ("hp", "The {} with the highest HP point is:", "HP points"),
    ("atk", "Which one has the strongest attack:", "attack points."),
    ("def", "Which one has the strongest defense:", "defense points."),
    ("spd", "Which one is the fastest:", "speed points."),
];

pub fn required_keys(species: Species) -> Vec<String> {
    let mut keys = vec!["total_trivia".to_string()];
    for (key, _) in HEADLINE_STATS {
        keys.push(format!("{}_trivia_name", key));
        keys.push(format!("{}_trivia_points", key));
    }
    if species == Species::Digimon {
        keys.extend(["stages_sum", "digimon_stages", "types_sum", "digimon_types"].map(String::from));
        for (key, _) in DIGIMON_STAGES.iter().chain(DIGIMON_TYPES) {
            keys.push(format!("total_{}", key));
            keys.push(format!("{}_strongest", key));
            keys.push(format!("{}_attack", key));
        }
        for prefix in ["lowest", "highest"] {
            for field in ["name", "stage", "type"] {
                keys.push(format!("{}_atk_{}", prefix, field));
            }
        }
    }
    keys
}

/// Numbered question followed by its answer lines
struct Questions<'a> {
    block: &'a mut Block,
    next: usize,
}

impl<'a> Questions<'a> {
    fn ask(&mut self, question: &str, answers: &[String]) {
        self.block.text(format!("{}. {}", self.next, question));
        for answer in answers {
            self.block.text(format!("    > {}", answer));
        }
        self.block.blank();
        self.next += 1;
    }
}

pub fn layout(map: &ResultMap, species: Species, header: &str) -> Result<Block> {
    let kind = ReportKind::Trivia(species);
    let get = |key: &str| map.require(kind, key);
    let (noun, plural) = match species {
        Species::Pokemon => ("pokemon", "pokemons"),
        Species::Digimon => ("digimon", "digimon"),
    };

    let mut block = Block::new();
    block
        .blank()
        .text(header)
        .blank()
        .title('=', "Welcome to the Dex!")
        .blank()
        .text("Here we have some useful information gathered from the list you provided us:")
        .blank();

    let mut questions = Questions { block: &mut block, next: 1 };
    questions.ask(
        &format!("How many {} there is in this list:", plural),
        &[format!("{} {}", get("total_trivia")?, plural)],
    );

    for (key, question, unit) in HEADLINE_QUESTIONS {
        let answer = format!(
            "{} with {} {}",
            get(&format!("{}_trivia_name", key))?,
            get(&format!("{}_trivia_points", key))?,
            unit
        );
        questions.ask(&question.replace("{}", noun), &[answer]);
    }

    if species == Species::Digimon {
        questions.ask(
            "How many different stages a digimon have?",
            &[format!("In this list we have {} stages of digimon, they're {}", get("stages_sum")?, get("digimon_stages")?)],
        );
        questions.ask("How many digimon in each stage there are?", &group_totals(map, kind, DIGIMON_STAGES, " digimon")?);
        questions.ask(
            "The strongest digimon in each stage based on the Atk attribute is:",
            &group_strongest(map, kind, DIGIMON_STAGES)?,
        );
        questions.ask(
            "How many different types of digimon there is?",
            &[format!("In this list we have {} types of digimon, they're {}", get("types_sum")?, get("digimon_types")?)],
        );
        questions.ask("How many digimon in each type there is:", &group_totals(map, kind, DIGIMON_TYPES, "")?);
        questions.ask(
            "The strongest digimon in each type based on the Atk attribute is:",
            &group_strongest(map, kind, DIGIMON_TYPES)?,
        );
        for (prefix, adjective) in [("lowest", "weakest"), ("highest", "strongest")] {
            let answer = format!(
                "{}, on {} stage, {} type.",
                get(&format!("{}_atk_name", prefix))?,
                get(&format!("{}_atk_stage", prefix))?,
                get(&format!("{}_atk_type", prefix))?
            );
            questions.ask(&format!("Which is the {} digimon of all, based on the Atk attribute is:", adjective), &[answer]);
        }
    }

    block.text("Thanks for using this Dex!").blanks(3);
    Ok(block)
}

/// `Label: count[suffix]` per group
fn group_totals(map: &ResultMap, kind: ReportKind, groups: &[(&str, &str)], suffix: &str) -> Result<Vec<String>> {
    groups
        .iter()
        .map(|(key, label)| -> Result<String> {
            Ok(format!("{}: {}{}", label, map.require(kind, &format!("total_{}", key))?, suffix))
        })
        .collect()
}

/// `Label: name, attack` per group
fn group_strongest(map: &ResultMap, kind: ReportKind, groups: &[(&str, &str)]) -> Result<Vec<String>> {
    groups
        .iter()
        .map(|(key, label)| -> Result<String> {
            Ok(format!(
                "{}: {}, {}",
                label,
                map.require(kind, &format!("{}_strongest", key))?,
                map.require(kind, &format!("{}_attack", key))?
            ))
        })
        .collect()
}
