use std::sync::Arc;

use crate::weapon::Weapon;

pub const DEFAULT_MAX_MONEY: i32 = 16_000;
pub const DEFAULT_WON_MONEY: i32 = 3_250;
pub const DEFAULT_LOST_MONEY: i32 = 1_400;

/// Round economy rules shared by every player of a session.
#[derive(Debug, Clone)]
pub struct Settings {
    starting_weapon: Arc<Weapon>,
    won_money: i32,
    lost_money: i32,
    max_money: i32,
}

impl Settings {
    pub fn new(starting_weapon: Arc<Weapon>) -> Self {
        Self {
            starting_weapon,
            won_money: DEFAULT_WON_MONEY,
            lost_money: DEFAULT_LOST_MONEY,
            max_money: DEFAULT_MAX_MONEY,
        }
    }

    pub fn with_round_money(mut self, won: i32, lost: i32) -> Self {
        self.won_money = won;
        self.lost_money = lost;
        self
    }

    pub fn with_max_money(mut self, max_money: i32) -> Self {
        self.max_money = max_money;
        self
    }

    pub fn starting_weapon(&self) -> &Arc<Weapon> {
        &self.starting_weapon
    }

    pub fn won_money(&self) -> i32 {
        self.won_money
    }

    pub fn lost_money(&self) -> i32 {
        self.lost_money
    }

    pub fn max_money(&self) -> i32 {
        self.max_money
    }
}
