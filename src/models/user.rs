use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    PremiumUser,
    Administrator,
}

impl Role {
    /// Database and wire representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use qrforge::models::Role;
    ///
    /// assert_eq!(Role::PremiumUser.as_str(), "PREMIUMUSER");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::PremiumUser => "PREMIUMUSER",
            Self::Administrator => "ADMINISTRATOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "PREMIUMUSER" | "PREMIUM_USER" | "PREMIUM" => Ok(Self::PremiumUser),
            "ADMINISTRATOR" | "ADMIN" => Ok(Self::Administrator),
            _ => Err(UnknownVariant::new("role", s)),
        }
    }
}
