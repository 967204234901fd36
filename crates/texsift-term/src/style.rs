use texsift_log::StyleClass;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const UNDERLINE: &str = "\x1b[4m";
const REVERSE: &str = "\x1b[7m";

/// The eight standard terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    fn foreground(self) -> u8 {
        30 + self as u8
    }

    fn background(self) -> u8 {
        40 + self as u8
    }
}

/// A set of terminal attributes. The default is unstyled text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl Style {
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Wraps `text` in the escape sequences for `style`. Plain styles and
/// empty text come back unchanged.
pub fn paint(text: &str, style: Style) -> String {
    if style.is_plain() || text.is_empty() {
        return text.to_string();
    }
    let mut styled = String::new();
    if style.bold {
        styled.push_str(BOLD);
    }
    if style.underline {
        styled.push_str(UNDERLINE);
    }
    if style.reverse {
        styled.push_str(REVERSE);
    }
    if let Some(color) = style.fg {
        styled.push_str(&format!("\x1b[{}m", color.foreground()));
    }
    if let Some(color) = style.bg {
        styled.push_str(&format!("\x1b[{}m", color.background()));
    }
    styled.push_str(text);
    styled.push_str(RESET);
    styled
}

/// The fixed attribute table mapping chunk classes to display styles.
pub fn style_for(class: StyleClass) -> Style {
    match class {
        StyleClass::Plain => Style::default(),
        StyleClass::Rule => Style::fg(Color::Blue),
        StyleClass::Location => Style::fg(Color::Blue).bold(),
        StyleClass::Warning => Style::fg(Color::Yellow),
        StyleClass::Error => Style::fg(Color::Red).bold(),
        StyleClass::BoxReport => Style::fg(Color::Cyan),
    }
}

/// Whether styling should be applied at all. `NO_COLOR` wins over
/// everything except an explicit flag.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    std::env::var_os("NO_COLOR").is_none()
}
