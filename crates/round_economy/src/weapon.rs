use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Slot a weapon occupies. A player holds at most one weapon per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponCategory {
    Sidearm,
    Heavy,
}

impl WeaponCategory {
    pub const ALL: [WeaponCategory; 2] = [WeaponCategory::Sidearm, WeaponCategory::Heavy];
}

impl fmt::Display for WeaponCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeaponCategory::Sidearm => "sidearm",
            WeaponCategory::Heavy => "heavy",
        };
        f.pad(name)
    }
}

/// Immutable weapon definition. Players only ever see it through `Arc`.
///
/// Price and kill reward are never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Weapon {
    name: String,
    category: WeaponCategory,
    price: i32,
    kill_reward: i32,
}

impl Weapon {
    pub fn new(
        name: impl Into<String>,
        category: WeaponCategory,
        price: i32,
        kill_reward: i32,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        if price < 0 {
            return Err(CatalogError::InvalidWeapon {
                name,
                reason: "price must not be negative",
            });
        }
        if kill_reward < 0 {
            return Err(CatalogError::InvalidWeapon {
                name,
                reason: "kill reward must not be negative",
            });
        }
        Ok(Self {
            name,
            category,
            price,
            kill_reward,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> WeaponCategory {
        self.category
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn kill_reward(&self) -> i32 {
        self.kill_reward
    }
}

/// Registry owning every weapon definition for a session.
///
/// Handles returned from the catalog are shared, so a weapon stays alive as
/// long as any player still holds it.
#[derive(Debug, Default, Clone)]
pub struct WeaponCatalog {
    weapons: Vec<Arc<Weapon>>,
}

impl WeaponCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, weapon: Weapon) -> Result<Arc<Weapon>, CatalogError> {
        if self.weapons.iter().any(|w| w.name == weapon.name) {
            return Err(CatalogError::DuplicateName { name: weapon.name });
        }

        let weapon = Arc::new(weapon);
        self.weapons.push(Arc::clone(&weapon));
        Ok(weapon)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Weapon>> {
        self.weapons.iter().find(|w| w.name == name).cloned()
    }

    pub fn in_category(&self, category: WeaponCategory) -> impl Iterator<Item = &Arc<Weapon>> {
        self.weapons.iter().filter(move |w| w.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Weapon>> {
        self.weapons.iter()
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}
