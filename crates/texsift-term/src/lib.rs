//! Terminal output for texsift: a pure ANSI decorator over the engine's
//! chunk classes and a fan-out writer for mirroring the rendered stream
//! into a transcript file.

use texsift_log::Chunk;

pub mod sink;
pub mod style;

pub use sink::TeeWriter;
pub use style::{colors_enabled, paint, style_for, Color, Style};

/// Renders one chunk as a terminal line, styled when `color` is on.
pub fn render_line(chunk: &Chunk, color: bool) -> String {
    let text = if color {
        paint(&chunk.text, style_for(chunk.class))
    } else {
        chunk.text.clone()
    };
    text + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use texsift_log::StyleClass;

    #[test]
    fn render_appends_newline() {
        let chunk = Chunk::new(StyleClass::Plain, "text");
        assert_eq!(render_line(&chunk, true), "text\n");
        assert_eq!(render_line(&chunk, false), "text\n");
    }

    #[test]
    fn render_styles_only_when_enabled() {
        let chunk = Chunk::new(StyleClass::Error, "! boom");
        assert_eq!(render_line(&chunk, false), "! boom\n");
        assert!(render_line(&chunk, true).starts_with("\x1b["));
    }
}
