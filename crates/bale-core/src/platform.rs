//! Target platform identifiers for bale specifications.
//!
//! Platform names double as keys of per-platform override blocks inside a
//! specification's attributes hash, so the string forms here must match what
//! authors write in manifests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// A platform a specification can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Osx,
    Tvos,
    Watchos,
}

impl Platform {
    /// Every platform the toolchain knows, in canonical order.
    pub const ALL: [Platform; 4] = [
        Platform::Ios,
        Platform::Osx,
        Platform::Tvos,
        Platform::Watchos,
    ];

    /// The attribute-hash key form of this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Osx => "osx",
            Platform::Tvos => "tvos",
            Platform::Watchos => "watchos",
        }
    }

    /// Whether `key` names any known platform.
    pub fn is_platform_key(key: &str) -> bool {
        Platform::ALL.iter().any(|p| p.as_str() == key)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SpecError::UnknownPlatform {
                name: s.to_string(),
            })
    }
}
