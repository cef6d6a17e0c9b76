//! Scripted event replay against a single player.
//!
//! A rejected step is recorded and the run continues, the same way a round
//! driver would show "not enough money" and carry on.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::PlayerError;
use crate::player::PlayerState;
use crate::snapshot::PlayerSnapshot;
use crate::weapon::{WeaponCatalog, WeaponCategory};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    Reset,
    Damage { amount: i32 },
    Purchase { weapon: String },
    Kill { category: WeaponCategory },
    RoundWon,
    RoundLost,
    Tick { millis: u64 },
}

impl fmt::Display for RoundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundEvent::Reset => f.write_str("reset"),
            RoundEvent::Damage { amount } => write!(f, "damage {amount}"),
            RoundEvent::Purchase { weapon } => write!(f, "purchase {weapon}"),
            RoundEvent::Kill { category } => write!(f, "kill with {category}"),
            RoundEvent::RoundWon => f.write_str("round won"),
            RoundEvent::RoundLost => f.write_str("round lost"),
            RoundEvent::Tick { millis } => write!(f, "tick {millis}ms"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub events: Vec<RoundEvent>,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script '{}'", path.display())]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse script")]
    Parse(#[from] serde_json::Error),
}

impl ReplayScript {
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let data = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Why a step was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayRejection {
    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error("unknown weapon '{0}'")]
    UnknownWeapon(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Applied,
    Eliminated,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub index: usize,
    pub event: RoundEvent,
    pub status: StepStatus,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub steps: Vec<StepRecord>,
    pub snapshot: PlayerSnapshot,
}

impl ReplayOutcome {
    pub fn rejected_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Rejected)
            .count()
    }
}

/// Applies a single event. `Ok(true)` means the player was eliminated by it.
pub fn apply_event(
    player: &mut PlayerState,
    catalog: &WeaponCatalog,
    event: &RoundEvent,
) -> Result<bool, ReplayRejection> {
    match event {
        RoundEvent::Reset => player.reset(),
        RoundEvent::Damage { amount } => return Ok(player.apply_damage(*amount)?),
        RoundEvent::Purchase { weapon } => {
            let weapon = catalog
                .get(weapon)
                .ok_or_else(|| ReplayRejection::UnknownWeapon(weapon.clone()))?;
            player.purchase(weapon)?;
        }
        RoundEvent::Kill { category } => player.register_kill(*category)?,
        RoundEvent::RoundWon => player.on_round_won(),
        RoundEvent::RoundLost => player.on_round_lost(),
        RoundEvent::Tick { millis } => player.advance_time(Duration::from_millis(*millis)),
    }
    Ok(false)
}

pub fn replay<'a>(
    player: &mut PlayerState,
    catalog: &WeaponCatalog,
    events: impl IntoIterator<Item = &'a RoundEvent>,
) -> ReplayOutcome {
    let mut steps = Vec::new();
    for (index, event) in events.into_iter().enumerate() {
        let (status, detail) = match apply_event(player, catalog, event) {
            Ok(true) => (StepStatus::Eliminated, None),
            Ok(false) => (StepStatus::Applied, None),
            Err(rejection) => {
                warn!(
                    target: "round_economy.replay",
                    index,
                    %event,
                    reason = %rejection,
                    "step rejected"
                );
                (StepStatus::Rejected, Some(rejection.to_string()))
            }
        };
        steps.push(StepRecord {
            index,
            event: event.clone(),
            status,
            detail,
        });
    }

    debug!(
        target: "round_economy.replay",
        steps = steps.len(),
        "replay finished"
    );
    ReplayOutcome {
        steps,
        snapshot: player.snapshot(),
    }
}
