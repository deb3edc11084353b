/// Tests for config module
#[cfg(test)]
mod tests {
    use crate::cli::{CliArgs, OnExists};
    use crate::config::{ConfigFile, DEFAULT_BATTLE_SIZE, Mode, build_run_plan, load_config_file};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn battle_args() -> CliArgs {
        CliArgs {
            player1: Some(PathBuf::from("p1.json")),
            player2: Some(PathBuf::from("p2.csv")),
            battle: true,
            config: Some(PathBuf::from("/nonexistent/dex.toml")),
            ..Default::default()
        }
    }

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("dex.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let args = CliArgs {
            trivia: Some(PathBuf::from("p.yaml")),
            config: Some(write_config(&dir, "")),
            ..Default::default()
        };

        let plan = build_run_plan(&args).expect("Should build plan");
        assert_eq!(plan.mode, Mode::Trivia { roster: PathBuf::from("p.yaml") });
        assert_eq!(plan.id, "0");
        assert_eq!(plan.output_dir, PathBuf::from("."));
        assert_eq!(plan.on_exists, OnExists::Ask);
        assert!(plan.save);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = build_run_plan(&battle_args()).unwrap_err();
        assert!(err.contains("Failed to read config"), "got: {}", err);
    }

    #[test]
    fn test_config_values_apply() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "output_dir = \"reports\"\nbattle_size = 2\non_exists = \"append\"\nid = \"league\"\n",
        );
        let args = CliArgs { config: Some(path), ..battle_args() };

        let plan = build_run_plan(&args).unwrap();
        assert_eq!(
            plan.mode,
            Mode::Battle { player1: PathBuf::from("p1.json"), player2: PathBuf::from("p2.csv"), size: 2 }
        );
        assert_eq!(plan.output_dir, PathBuf::from("reports"));
        assert_eq!(plan.on_exists, OnExists::Append);
        assert_eq!(plan.id, "league");
    }

    #[test]
    fn test_cli_flags_override_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "battle_size = 2\non_exists = \"append\"\nid = \"league\"\n");
        let args = CliArgs {
            config: Some(path),
            battle_size: Some(1),
            on_exists: Some(OnExists::Overwrite),
            id: Some("9".to_string()),
            no_save: true,
            ..battle_args()
        };

        let plan = build_run_plan(&args).unwrap();
        assert!(matches!(plan.mode, Mode::Battle { size: 1, .. }));
        assert_eq!(plan.on_exists, OnExists::Overwrite);
        assert_eq!(plan.id, "9");
        assert!(!plan.save);
    }

    #[test]
    fn test_default_battle_size() {
        let dir = TempDir::new().unwrap();
        let args = CliArgs { config: Some(write_config(&dir, "id = \"x\"\n")), ..battle_args() };
        assert!(matches!(build_run_plan(&args).unwrap().mode, Mode::Battle { size: DEFAULT_BATTLE_SIZE, .. }));
    }

    #[test]
    fn test_config_rejects_unknown_keys_and_zero_size() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "colour = \"red\"\n");
        assert!(load_config_file(&path).unwrap_err().contains("Invalid config"));

        let path = write_config(&dir, "battle_size = 0\n");
        assert_eq!(load_config_file(&path).unwrap(), ConfigFile { battle_size: Some(0), ..Default::default() });
        let args = CliArgs { config: Some(path), ..battle_args() };
        assert!(build_run_plan(&args).is_err());
    }
}
