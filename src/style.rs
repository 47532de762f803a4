use termion::{color, style};

/// Terminal looks used across the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Title,
    Label,
    Success,
    Failure,
    Border,
    Value,
    Header,
}

impl Style {
    /// Wraps `text` in escape codes. With `colored == false` the text is returned untouched.
    pub fn paint(self, text: &str, colored: bool) -> String {
        if !colored || text.is_empty() {
            return text.to_owned();
        }
        match self {
            Style::Plain => text.to_owned(),
            Style::Title => bold(color::AnsiValue(190), text),
            Style::Label => bold(color::AnsiValue(178), text),
            Style::Success => fg(color::Green, text),
            Style::Failure => fg(color::AnsiValue(202), text),
            Style::Border => fg(color::AnsiValue(44), text),
            Style::Value => fg(color::Green, text),
            Style::Header => format!("{}{}{}", style::Bold, text, style::Reset),
        }
    }
}

fn fg<C: color::Color>(c: C, text: &str) -> String {
    format!("{}{}{}", color::Fg(c), text, style::Reset)
}

fn bold<C: color::Color>(c: C, text: &str) -> String {
    format!("{}{}{}{}", style::Bold, color::Fg(c), text, style::Reset)
}

/// A piece of text and the look it should be printed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styled {
    pub text: String,
    pub style: Style,
}

impl Styled {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn paint(&self, colored: bool) -> String {
        self.style.paint(&self.text, colored)
    }
}
