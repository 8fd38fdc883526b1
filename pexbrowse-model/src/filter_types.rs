//! Typed search filter values.
//!
//! Every filter parses from the string form the UI hands over, with the
//! empty string meaning "unset".

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// The four filter dimensions a search can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FilterDimension {
    Orientation,
    Color,
    Size,
    Locale,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 4] =
        [Self::Orientation, Self::Color, Self::Size, Self::Locale];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Orientation => "orientation",
            Self::Color => "color",
            Self::Size => "size",
            Self::Locale => "locale",
        }
    }
}

impl Display for FilterDimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDimension {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dim| dim.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::InvalidFilter {
                dimension: "dimension",
                value: s.to_string(),
            })
    }
}

/// A new value for one filter dimension; `None` clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSetting {
    Orientation(Option<Orientation>),
    Color(Option<ColorFilter>),
    Size(Option<SizeFilter>),
    Locale(Option<Locale>),
}

impl FilterSetting {
    /// Parse the raw UI value for `dimension`. An empty (or blank) value
    /// clears the filter.
    pub fn parse(dimension: FilterDimension, raw: &str) -> Result<Self, ModelError> {
        let raw = raw.trim();
        let setting = match dimension {
            FilterDimension::Orientation => {
                Self::Orientation(parse_optional(raw)?)
            }
            FilterDimension::Color => Self::Color(parse_optional(raw)?),
            FilterDimension::Size => Self::Size(parse_optional(raw)?),
            FilterDimension::Locale => Self::Locale(parse_optional(raw)?),
        };
        Ok(setting)
    }

    pub fn cleared(dimension: FilterDimension) -> Self {
        match dimension {
            FilterDimension::Orientation => Self::Orientation(None),
            FilterDimension::Color => Self::Color(None),
            FilterDimension::Size => Self::Size(None),
            FilterDimension::Locale => Self::Locale(None),
        }
    }

    pub fn dimension(&self) -> FilterDimension {
        match self {
            Self::Orientation(_) => FilterDimension::Orientation,
            Self::Color(_) => FilterDimension::Color,
            Self::Size(_) => FilterDimension::Size,
            Self::Locale(_) => FilterDimension::Locale,
        }
    }
}

fn parse_optional<T: FromStr<Err = ModelError>>(
    raw: &str,
) -> Result<Option<T>, ModelError> {
    if raw.is_empty() {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    pub const ALL: [Orientation; 3] =
        [Self::Landscape, Self::Portrait, Self::Square];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Square => "square",
        }
    }
}

impl FromStr for Orientation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            // Older option lists used the "squarish" label.
            "square" | "squarish" => Ok(Self::Square),
            _ => Err(ModelError::InvalidFilter {
                dimension: "orientation",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named colours accepted by the provider's colour filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NamedColor {
    Red,
    Orange,
    Yellow,
    Green,
    Turquoise,
    Blue,
    Violet,
    Pink,
    Brown,
    Black,
    Gray,
    White,
}

impl NamedColor {
    pub const ALL: [NamedColor; 12] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Turquoise,
        Self::Blue,
        Self::Violet,
        Self::Pink,
        Self::Brown,
        Self::Black,
        Self::Gray,
        Self::White,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Turquoise => "turquoise",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Pink => "pink",
            Self::Brown => "brown",
            Self::Black => "black",
            Self::Gray => "gray",
            Self::White => "white",
        }
    }
}

/// Colour filter: a named colour or a `#rrggbb` hex code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorFilter {
    Named(NamedColor),
    /// Lower-case hex code including the leading `#`
    Hex(String),
}

impl ColorFilter {
    pub fn as_str(&self) -> &str {
        match self {
            ColorFilter::Named(color) => color.as_str(),
            ColorFilter::Hex(hex) => hex,
        }
    }
}

impl FromStr for ColorFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        if let Some(named) = NamedColor::ALL
            .into_iter()
            .find(|color| color.as_str() == value)
        {
            return Ok(ColorFilter::Named(named));
        }
        if value == "grey" {
            return Ok(ColorFilter::Named(NamedColor::Gray));
        }

        let digits = value.strip_prefix('#').unwrap_or(&value);
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(ColorFilter::Hex(format!("#{digits}")));
        }

        Err(ModelError::InvalidFilter {
            dimension: "color",
            value: s.to_string(),
        })
    }
}

impl Display for ColorFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum source size: large (24MP), medium (12MP) or small (4MP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SizeFilter {
    Large,
    Medium,
    Small,
}

impl SizeFilter {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
        }
    }
}

impl FromStr for SizeFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large" => Ok(Self::Large),
            "medium" => Ok(Self::Medium),
            "small" => Ok(Self::Small),
            _ => Err(ModelError::InvalidFilter {
                dimension: "size",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for SizeFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search locale supported by the provider, e.g. `en-US`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale(&'static str);

impl Locale {
    pub const SUPPORTED: [&'static str; 28] = [
        "en-US", "pt-BR", "es-ES", "ca-ES", "de-DE", "it-IT", "fr-FR",
        "sv-SE", "id-ID", "pl-PL", "ja-JP", "zh-TW", "zh-CN", "ko-KR",
        "th-TH", "nl-NL", "hu-HU", "vi-VN", "cs-CZ", "da-DK", "fi-FI",
        "uk-UA", "el-GR", "ro-RO", "nb-NO", "sk-SK", "tr-TR", "ru-RU",
    ];

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl FromStr for Locale {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Self::SUPPORTED
            .into_iter()
            .find(|code| code.eq_ignore_ascii_case(&wanted))
            .map(Locale)
            .ok_or_else(|| ModelError::InvalidFilter {
                dimension: "locale",
                value: s.to_string(),
            })
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_clears_the_dimension() {
        assert_eq!(
            FilterSetting::parse(FilterDimension::Color, ""),
            Ok(FilterSetting::Color(None))
        );
        assert_eq!(
            FilterSetting::parse(FilterDimension::Locale, "  "),
            Ok(FilterSetting::Locale(None))
        );
    }

    #[test]
    fn parses_each_dimension() {
        assert_eq!(
            FilterSetting::parse(FilterDimension::Orientation, "squarish"),
            Ok(FilterSetting::Orientation(Some(Orientation::Square)))
        );
        assert_eq!(
            FilterSetting::parse(FilterDimension::Color, "Red"),
            Ok(FilterSetting::Color(Some(ColorFilter::Named(NamedColor::Red))))
        );
        assert_eq!(
            FilterSetting::parse(FilterDimension::Size, "small"),
            Ok(FilterSetting::Size(Some(SizeFilter::Small)))
        );
        let locale = FilterSetting::parse(FilterDimension::Locale, "pt_br");
        assert!(matches!(locale, Ok(FilterSetting::Locale(Some(l))) if l.as_str() == "pt-BR"));
    }

    #[test]
    fn hex_colours_are_normalised() {
        assert_eq!(
            "FFAA00".parse::<ColorFilter>(),
            Ok(ColorFilter::Hex("#ffaa00".into()))
        );
        assert_eq!(
            "#123abc".parse::<ColorFilter>().map(|c| c.to_string()),
            Ok("#123abc".to_string())
        );
        assert!("#12345".parse::<ColorFilter>().is_err());
        assert!("magenta".parse::<ColorFilter>().is_err());
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(FilterSetting::parse(FilterDimension::Orientation, "diagonal").is_err());
        assert!(FilterSetting::parse(FilterDimension::Size, "huge").is_err());
        assert!(FilterSetting::parse(FilterDimension::Locale, "xx-YY").is_err());
        assert!("colour".parse::<FilterDimension>().is_err());
    }
}
