use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;

/// Kind of payload encoded into a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    Url,
    Text,
    Vcard,
    Json,
    Csv,
}

impl DataType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Text => "TEXT",
            Self::Vcard => "VCARD",
            Self::Json => "JSON",
            Self::Csv => "CSV",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "URL" => Ok(Self::Url),
            "TEXT" => Ok(Self::Text),
            "VCARD" => Ok(Self::Vcard),
            "JSON" => Ok(Self::Json),
            "CSV" => Ok(Self::Csv),
            _ => Err(UnknownVariant::new("data type", s)),
        }
    }
}

/// QR redundancy level. Accepts both the long names and the single-letter
/// forms (`L`, `M`, `Q`, `H`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorCorrection {
    #[serde(alias = "L")]
    Low,
    #[serde(alias = "M")]
    Medium,
    #[serde(alias = "Q")]
    Quartile,
    #[serde(alias = "H")]
    High,
}

impl ErrorCorrection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::Quartile => "QUARTILE",
            Self::High => "HIGH",
        }
    }

    #[must_use]
    pub const fn ec_level(self) -> qrcode::EcLevel {
        match self {
            Self::Low => qrcode::EcLevel::L,
            Self::Medium => qrcode::EcLevel::M,
            Self::Quartile => qrcode::EcLevel::Q,
            Self::High => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCorrection {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(Self::Low),
            "M" | "MEDIUM" => Ok(Self::Medium),
            "Q" | "QUARTILE" => Ok(Self::Quartile),
            "H" | "HIGH" => Ok(Self::High),
            _ => Err(UnknownVariant::new("error correction level", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Png,
}

impl OutputFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "PNG",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
        }
    }
}

/// Lifecycle of a batch. Nothing advances a batch past `Queued` yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BatchStatus {
    #[default]
    Queued,
}

impl BatchStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_correction_accepts_short_forms() {
        assert_eq!("q".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Quartile);
        assert_eq!("HIGH".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::High);

        let parsed: ErrorCorrection = serde_json::from_str("\"L\"").unwrap();
        assert_eq!(parsed, ErrorCorrection::Low);
        assert!("X".parse::<ErrorCorrection>().is_err());
    }

    #[test]
    fn data_type_round_trips_through_its_name() {
        for dt in [
            DataType::Url,
            DataType::Text,
            DataType::Vcard,
            DataType::Json,
            DataType::Csv,
        ] {
            assert_eq!(dt.as_str().parse::<DataType>().unwrap(), dt);
        }
    }

    #[test]
    fn unknown_data_type_names_the_kind() {
        let err = "BINARY".parse::<DataType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown data type: 'BINARY'");
    }
}
