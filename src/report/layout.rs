/// Fixed-layout text blocks.
///
/// A `Block` is a list of abstract lines rendered against one frame width:
/// `max(MIN_WIDTH, widest line)`. Every line is padded out to that width, so
/// padding is computed from real content and can never go negative; long
/// values widen the whole block instead of breaking alignment.

use unicode_width::UnicodeWidthStr;

/// Frame width of the classic 80-column layout
pub const MIN_WIDTH: usize = 80;

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad with spaces to exactly `width` columns (no-op if already wider)
pub fn pad_right(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(padding))
}

/// Center `s` in `width` columns using `fill`; odd remainders go right
pub fn center(s: &str, width: usize, fill: char) -> String {
    let rest = width.saturating_sub(display_width(s));
    let left = rest / 2;
    let right = rest - left;
    format!("{}{}{}", fill.to_string().repeat(left), s, fill.to_string().repeat(right))
}

/// Control characters would break or misalign a frame line; show them as spaces
fn printable(s: impl Into<String>) -> String {
    let s = s.into();
    if s.chars().any(char::is_control) { s.chars().map(|c| if c.is_control() { ' ' } else { c }).collect() } else { s }
}

#[derive(Debug, Clone, PartialEq)]
enum Line {
    /// Left-aligned text
    Text(String),
    /// A line of spaces
    Blank,
    /// `====== title ======`
    Title { fill: char, title: String },
    /// `|   content   |` with edge characters and a centered body
    Framed { left: char, fill: char, right: char, content: String },
}

impl Line {
    fn min_width(&self) -> usize {
        match self {
            Line::Text(text) => display_width(text),
            Line::Blank => 0,
            Line::Title { title, .. } => display_width(title) + 2,
            Line::Framed { content, .. } => display_width(content) + 2,
        }
    }

    fn render(&self, width: usize) -> String {
        match self {
            Line::Text(text) => pad_right(text, width),
            Line::Blank => " ".repeat(width),
            Line::Title { fill, title } => center(&format!(" {} ", title), width, *fill),
            Line::Framed { left, fill, right, content } => {
                format!("{}{}{}", left, center(content, width - 2, *fill), right)
            }
        }
    }
}

/// Builder for one report block
#[derive(Debug, Clone, Default)]
pub struct Block {
    lines: Vec<Line>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Text(printable(text)));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(Line::Blank);
        self
    }

    pub fn blanks(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.blank();
        }
        self
    }

    pub fn title(&mut self, fill: char, title: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Title { fill, title: printable(title) });
        self
    }

    pub fn framed(&mut self, left: char, fill: char, right: char, content: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Framed { left, fill, right, content: printable(content) });
        self
    }

    /// Frame width every line is padded to
    pub fn width(&self) -> usize {
        self.lines.iter().map(Line::min_width).max().unwrap_or(0).max(MIN_WIDTH)
    }

    pub fn render(&self) -> String {
        let width = self.width();
        let mut out = String::with_capacity((width + 1) * self.lines.len());
        for line in &self.lines {
            out.push_str(&line.render(width));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_unicode() {
        assert_eq!(display_width("Pokémon"), 7);
        assert_eq!(display_width("ポケモン"), 8);
    }

    #[test]
    fn test_pad_right_never_truncates() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_center_odd_remainder_goes_right() {
        assert_eq!(center("7", 78, ' '), format!("{}7{}", " ".repeat(38), " ".repeat(39)));
        assert_eq!(center("ab", 6, '-'), "--ab--");
    }

    #[test]
    fn test_title_matches_classic_rule() {
        let mut block = Block::new();
        block.title('=', "Welcome to the Dex!");
        let expected = format!("{} Welcome to the Dex! {}\n", "=".repeat(29), "=".repeat(30));
        assert_eq!(block.render(), expected);
    }

    #[test]
    fn test_every_line_has_frame_width() {
        let mut block = Block::new();
        block.blank().text("short").framed('|', ' ', '|', "mid").title('=', "t");
        for line in block.render().lines() {
            assert_eq!(display_width(line), MIN_WIDTH);
        }
    }

    #[test]
    fn test_control_characters_keep_frame_intact() {
        let mut block = Block::new();
        block.text("a\tb").framed('|', ' ', '|', "Mr.\nMime").title('=', "x\ry");
        let rendered = block.render();
        assert_eq!(rendered.lines().count(), 3);
        for line in rendered.lines() {
            assert_eq!(display_width(line), MIN_WIDTH, "{:?}", line);
        }
        assert!(rendered.contains("Mr. Mime"));
    }

    #[test]
    fn test_long_line_widens_block() {
        let long = "x".repeat(100);
        let mut block = Block::new();
        block.text(&long).framed('|', ' ', '|', "ok").blank();
        assert_eq!(block.width(), 100);
        for line in block.render().lines() {
            assert_eq!(display_width(line), 100);
        }
    }
}
