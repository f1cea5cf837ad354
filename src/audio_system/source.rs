//! Asset categories and faction variants
//!
//! Identifies which precache table a sound lives in.

use std::fmt;

/// Precache table categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    /// Short sound effects, cached per faction
    Effect,

    /// EVA speech lines
    Speech,

    /// Theme music tracks
    Music,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCategory::Effect => write!(f, "effect"),
            AssetCategory::Speech => write!(f, "speech"),
            AssetCategory::Music => write!(f, "music"),
        }
    }
}

/// Faction variant of a sound effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    /// Shared asset, used by every side
    Neutral,

    /// Allied variant
    Allied,

    /// Soviet variant
    Soviet,
}

impl Faction {
    pub const ALL: [Faction; 3] = [Faction::Neutral, Faction::Allied, Faction::Soviet];

    /// Sub-directory of the sound root holding this variant
    pub fn dir_name(&self) -> Option<&'static str> {
        match self {
            Faction::Neutral => None,
            Faction::Allied => Some("alied"),
            Faction::Soviet => Some("russian"),
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Faction::Neutral => 0,
            Faction::Allied => 1,
            Faction::Soviet => 2,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Neutral => write!(f, "Neutral"),
            Faction::Allied => write!(f, "Allied"),
            Faction::Soviet => write!(f, "Soviet"),
        }
    }
}
