use std::fmt::Write;
use std::str::FromStr;

use crate::dictionary::WordEntry;

/// Lower and upper bound of the green channel in `colors` hints
pub const MIN_PERCENT: u32 = 55;
pub const MAX_PERCENT: u32 = 244;

const STAR_COLOR: &str = "FFF400";

/// Visual style of the appended translation hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintStyle {
    /// Word tinted by how often it appears
    #[default]
    Colors,
    /// Fixed color, frequency shown as up to three stars
    Stars,
    /// Unrecognized style name; renders nothing
    Disabled,
}

impl HintStyle {
    /// Style for a configured name; unknown names disable hints
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "colors" => HintStyle::Colors,
            "stars" => HintStyle::Stars,
            _ => HintStyle::Disabled,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HintStyle::Colors => "colors",
            HintStyle::Stars => "stars",
            HintStyle::Disabled => "disabled",
        }
    }
}

impl FromStr for HintStyle {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Green channel for an occurrence count, saturated to
/// [`MIN_PERCENT`]..=[`MAX_PERCENT`]
pub fn percent(occurrence_count: u32) -> u32 {
    occurrence_count.clamp(MIN_PERCENT, MAX_PERCENT)
}

/// `b9XX00` color, `XX` being the lowercase hex percent
pub fn frequency_color(occurrence_count: u32) -> String {
    format!("b9{:02x}00", percent(occurrence_count))
}

pub fn star_suffix(occurrence_count: u32) -> &'static str {
    match occurrence_count {
        0..=9 => "",
        10..=99 => "*",
        100..=999 => "**",
        _ => "***",
    }
}

/// Hint appended to a text node for the matched `entries`
pub fn render(entries: &[&WordEntry], style: HintStyle) -> String {
    if style == HintStyle::Disabled {
        return String::new();
    }

    let mut hint = String::from(" \"");
    for entry in entries {
        // Writing into a String cannot fail
        let _ = match style {
            HintStyle::Colors => write!(
                hint,
                "<font color=\"{}\">{}</font>|<i>{}</i> ",
                frequency_color(entry.occurrence_count),
                entry.key,
                entry.display_translation()
            ),
            HintStyle::Stars => write!(
                hint,
                "<font color=\"{}\">{}</font>/<i>{}</i>{} ",
                STAR_COLOR,
                entry.key,
                entry.display_translation(),
                star_suffix(entry.occurrence_count)
            ),
            HintStyle::Disabled => Ok(()),
        };
    }
    hint.push('"');

    hint
}
