//! Error types for player actions, the weapon catalog and config loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::weapon::WeaponCategory;

/// Rule violations raised by [`crate::PlayerState`]. All of them are
/// recoverable; the state is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// The action needs a living player.
    #[error("player is eliminated")]
    NotAlive,

    /// A weapon of this category is already held.
    #[error("already holding a {category} weapon")]
    DuplicateCategory { category: WeaponCategory },

    /// The weapon costs more than the player holds.
    #[error("not enough money: need {required}, have {available}")]
    InsufficientFunds { required: i32, available: i32 },

    /// Kill credited to a category the player does not hold.
    #[error("no {category} weapon held")]
    NoSuchWeapon { category: WeaponCategory },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("weapon '{name}' is already registered")]
    DuplicateName { name: String },

    #[error("weapon '{name}' is invalid: {reason}")]
    InvalidWeapon { name: String, reason: &'static str },
}

/// Errors that can occur when loading an economy config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("starting weapon '{name}' is not in the weapon list")]
    UnknownStartingWeapon { name: String },

    #[error("{field} must not be negative, got {value}")]
    InvalidLimit { field: &'static str, value: i32 },
}
