pub use colored::{Color, Colorize};
use crate::routes::Confidence;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct ColorScheme {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Dark,
    Light,
    Monochrome,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: ColorScheme,
    pub high: ColorScheme,
    pub medium: ColorScheme,
    pub low: ColorScheme,
    pub warning: ColorScheme,
    pub muted: ColorScheme,
}

fn fg(color: Color, bold: bool) -> ColorScheme {
    ColorScheme {
        foreground: Some(color),
        background: None,
        bold,
        underline: false,
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: fg(Color::Blue, true),
            high: fg(Color::Green, true),
            medium: fg(Color::Yellow, false),
            low: fg(Color::Cyan, false),
            warning: fg(Color::Red, true),
            muted: fg(Color::BrightBlack, false),
        }
    }
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
            ThemeName::Monochrome => Self::monochrome(),
        }
    }

    pub fn dark() -> Self {
        Self::default()
    }

    pub fn light() -> Self {
        Self {
            header: fg(Color::BrightBlue, true),
            high: fg(Color::BrightGreen, true),
            medium: fg(Color::BrightYellow, false),
            low: fg(Color::BrightCyan, false),
            warning: fg(Color::BrightRed, true),
            muted: fg(Color::Black, false),
        }
    }

    pub fn monochrome() -> Self {
        Self {
            header: ColorScheme {
                bold: true,
                underline: true,
                ..Default::default()
            },
            high: ColorScheme {
                bold: true,
                ..Default::default()
            },
            medium: ColorScheme::default(),
            low: ColorScheme::default(),
            warning: ColorScheme {
                bold: true,
                underline: true,
                ..Default::default()
            },
            muted: ColorScheme::default(),
        }
    }

    pub fn confidence(&self, confidence: Confidence) -> &ColorScheme {
        match confidence {
            Confidence::High => &self.high,
            Confidence::Medium => &self.medium,
            Confidence::Low => &self.low,
        }
    }
}

impl ColorScheme {
    pub fn apply(&self, text: &str) -> colored::ColoredString {
        let mut colored_text: colored::ColoredString = text.into();

        if let Some(fg) = &self.foreground {
            colored_text = colored_text.color(*fg);
        }
        if let Some(bg) = &self.background {
            colored_text = colored_text.on_color(*bg);
        }
        if self.bold {
            colored_text = colored_text.bold();
        }
        if self.underline {
            colored_text = colored_text.underline();
        }

        colored_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_themes() {
        let light = Theme::named(ThemeName::Light);
        assert_eq!(light.high.foreground, Some(Color::BrightGreen));
        assert!(Theme::named(ThemeName::Monochrome).header.underline);
    }

    #[test]
    fn test_confidence_styles_differ() {
        let theme = Theme::dark();
        assert!(theme.confidence(Confidence::High).bold);
        assert!(!theme.confidence(Confidence::Low).bold);
    }

    #[test]
    fn test_monochrome_has_no_colors() {
        let theme = Theme::monochrome();
        for confidence in [Confidence::High, Confidence::Medium, Confidence::Low] {
            assert!(theme.confidence(confidence).foreground.is_none());
        }
    }
}
