//! Semantic RGBA colors and their `rgba(r, g, b, a)` string form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// An 8-bit-per-channel color with a real-valued alpha.
///
/// Alpha is deliberately not clamped: the age model writes ages straight
/// into it, and a front-end clamps when converting to pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same channels, alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (body, expected) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest, 4)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest, 3)
        } else {
            return Err(ColorParseError::BadSyntax(s.to_string()));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ColorParseError::BadSyntax(s.to_string()))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != expected {
            return Err(ColorParseError::ComponentCount {
                input: s.to_string(),
                expected,
                found: parts.len(),
            });
        }

        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|_| ColorParseError::InvalidChannel(p.to_string()))
        };
        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;

        let a = match parts.get(3) {
            Some(p) => match p.parse::<f32>() {
                Ok(a) if a.is_finite() => a,
                _ => return Err(ColorParseError::InvalidAlpha(p.to_string())),
            },
            None => 1.0,
        };

        Ok(Self { r, g, b, a })
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}
