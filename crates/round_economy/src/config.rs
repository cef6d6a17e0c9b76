use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::settings::{Settings, DEFAULT_LOST_MONEY, DEFAULT_MAX_MONEY, DEFAULT_WON_MONEY};
use crate::weapon::{Weapon, WeaponCatalog, WeaponCategory};

#[derive(Debug, Deserialize)]
pub struct EconomyConfig {
    pub economy: EconomySection,
    #[serde(default)]
    pub weapons: Vec<WeaponEntry>,
}

impl EconomyConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let cfg: EconomyConfig = toml::from_str(data)?;
        Ok(cfg)
    }

    /// Validates the config and builds the shared settings and the catalog.
    /// The starting weapon in the returned settings is the catalog's handle.
    pub fn build(&self) -> Result<(Arc<Settings>, WeaponCatalog), ConfigError> {
        let economy = &self.economy;
        for (field, value) in [
            ("max_money", economy.max_money),
            ("won_money", economy.won_money),
            ("lost_money", economy.lost_money),
        ] {
            if value < 0 {
                return Err(ConfigError::InvalidLimit { field, value });
            }
        }

        let mut catalog = WeaponCatalog::new();
        for entry in &self.weapons {
            catalog.add(Weapon::new(
                entry.name.clone(),
                entry.category,
                entry.price,
                entry.kill_reward,
            )?)?;
        }

        let starting_weapon = catalog.get(&economy.starting_weapon).ok_or_else(|| {
            ConfigError::UnknownStartingWeapon {
                name: economy.starting_weapon.clone(),
            }
        })?;

        debug!(
            target: "round_economy.config",
            weapons = catalog.len(),
            starting_weapon = %economy.starting_weapon,
            max_money = economy.max_money,
            "economy config loaded"
        );

        let settings = Settings::new(starting_weapon)
            .with_round_money(economy.won_money, economy.lost_money)
            .with_max_money(economy.max_money);
        Ok((Arc::new(settings), catalog))
    }
}

#[derive(Debug, Deserialize)]
pub struct EconomySection {
    pub starting_weapon: String,
    #[serde(default = "default_max_money")]
    pub max_money: i32,
    #[serde(default = "default_won_money")]
    pub won_money: i32,
    #[serde(default = "default_lost_money")]
    pub lost_money: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeaponEntry {
    pub name: String,
    pub category: WeaponCategory,
    pub price: i32,
    #[serde(default)]
    pub kill_reward: i32,
}

fn default_max_money() -> i32 {
    DEFAULT_MAX_MONEY
}

fn default_won_money() -> i32 {
    DEFAULT_WON_MONEY
}

fn default_lost_money() -> i32 {
    DEFAULT_LOST_MONEY
}
