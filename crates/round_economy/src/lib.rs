//! Round-based shooter economy: one player's health, money, weapons and
//! kill/death counters, plus the config and replay plumbing around it.

pub mod config;
pub mod error;
pub mod player;
pub mod replay;
pub mod settings;
pub mod snapshot;
pub mod weapon;

pub use config::EconomyConfig;
pub use error::{CatalogError, ConfigError, PlayerError};
pub use player::{PlayerState, MAX_HEALTH};
pub use replay::{
    apply_event, replay, ReplayOutcome, ReplayRejection, ReplayScript, RoundEvent, ScriptError,
    StepRecord, StepStatus,
};
pub use settings::Settings;
pub use snapshot::PlayerSnapshot;
pub use weapon::{Weapon, WeaponCatalog, WeaponCategory};
