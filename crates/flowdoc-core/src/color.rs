//! CSS colors for fills, strokes and text.
//!
//! Configuration files and palettes write colors as CSS strings (`"#4CAF50"`,
//! `"gray"`, `"rgb(255 0 0 / 50%)"`); [`Color`] parses them with the `color`
//! crate and prints them back in CSS syntax.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use serde::{Deserialize, Serialize};

/// A parsed CSS color with an alpha channel.
///
/// ```
/// use flowdoc_core::color::Color;
///
/// let decision: Color = "#FF9800".parse().unwrap();
/// assert_eq!(decision.alpha(), 1.0);
/// assert_eq!(decision.with_alpha(0.5).alpha(), 0.5);
/// assert!("not-a-color".parse::<Color>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(DynamicColor);

impl Color {
    /// Parse a CSS color string.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected input.
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(Self)
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self(self.0.with_alpha(alpha))
    }

    /// Opacity between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.0.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("`black` is a CSS named color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_print_by_name() {
        assert_eq!(Color::default().to_string(), "black");
        assert_eq!(Color::new("gray").unwrap().to_string(), "gray");
    }

    #[test]
    fn test_invalid_color_message() {
        let err = Color::new("sprocket").unwrap_err();
        assert!(err.starts_with("invalid color `sprocket`"));
    }

    #[test]
    fn test_string_round_trip() {
        let color = Color::new("#2196F3").unwrap().with_alpha(0.8);
        let parsed = Color::try_from(String::from(color)).unwrap();
        assert_eq!(parsed, color);
    }
}
