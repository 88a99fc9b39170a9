use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color '{0}': expected a hex code such as #000000 or #fff")]
pub struct InvalidColor(pub String);

/// An sRGB color given as `#RRGGBB` or `#RGB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    #[must_use]
    pub const fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl FromStr for HexColor {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("Invalid regex")
        });

        let caps = re
            .captures(s.trim())
            .ok_or_else(|| InvalidColor(s.to_string()))?;
        let digits = caps.get(1).map_or("", |m| m.as_str());

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| InvalidColor(s.to_string()));

        if digits.len() == 3 {
            // #abc expands to #aabbcc
            let expand = |i: usize| channel(&digits[i..=i].repeat(2));
            Ok(Self {
                r: expand(0)?,
                g: expand(1)?,
                b: expand(2)?,
            })
        } else {
            Ok(Self {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
            })
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
