use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::weapon::WeaponCategory;

/// Point-in-time view of a player, for reports and regression goldens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub health: i32,
    pub money: i32,
    pub kills: u32,
    pub deaths: u32,
    pub alive: bool,
    pub elapsed_ms: u64,
    #[serde(default)]
    pub weapons: BTreeMap<WeaponCategory, String>,
}
