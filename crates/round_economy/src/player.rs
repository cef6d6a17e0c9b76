//! Per-player round state: health, money, weapons and kill/death counters.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::PlayerError;
use crate::settings::Settings;
use crate::snapshot::PlayerSnapshot;
use crate::weapon::{Weapon, WeaponCategory};

pub const MAX_HEALTH: i32 = 100;

/// One player's economy and combat state.
///
/// Elimination is a state, not the end of the value: `reset` revives the
/// player for the next round while money and counters carry over.
#[derive(Debug, Clone)]
pub struct PlayerState {
    health: i32,
    money: i32,
    kills: u32,
    deaths: u32,
    elapsed: Duration,
    weapons: BTreeMap<WeaponCategory, Arc<Weapon>>,
    settings: Arc<Settings>,
}

impl PlayerState {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            health: MAX_HEALTH,
            money: 0,
            kills: 0,
            deaths: 0,
            elapsed: Duration::ZERO,
            weapons: BTreeMap::new(),
            settings,
        }
    }

    /// Starts with an opening balance, clamped like any other credit.
    pub fn with_money(settings: Arc<Settings>, money: i32) -> Self {
        let mut player = Self::new(settings);
        player.credit_money(money);
        player
    }

    pub fn reset(&mut self) {
        self.health = MAX_HEALTH;
        let start = Arc::clone(self.settings.starting_weapon());
        debug!(
            target: "round_economy.player",
            weapon = start.name(),
            "player reset"
        );
        self.weapons.insert(start.category(), start);
    }

    /// Returns `Ok(true)` when this hit eliminated the player. Negative
    /// amounts heal, up to [`MAX_HEALTH`].
    pub fn apply_damage(&mut self, amount: i32) -> Result<bool, PlayerError> {
        if !self.is_alive() {
            return Err(PlayerError::NotAlive);
        }

        let remaining = self.health.saturating_sub(amount);
        if remaining <= 0 {
            self.health = 0;
            self.deaths += 1;
            self.weapons.clear();
            info!(
                target: "round_economy.player",
                deaths = self.deaths,
                "player eliminated"
            );
            return Ok(true);
        }

        self.health = remaining.min(MAX_HEALTH);
        debug!(target: "round_economy.player", health = self.health, "health updated");
        Ok(false)
    }

    /// Checks, in order: alive, free category, affordable.
    pub fn can_purchase(&self, weapon: &Weapon) -> Result<(), PlayerError> {
        if !self.is_alive() {
            return Err(PlayerError::NotAlive);
        }
        if self.has_weapon(weapon.category()) {
            return Err(PlayerError::DuplicateCategory {
                category: weapon.category(),
            });
        }
        if weapon.price() > self.money {
            return Err(PlayerError::InsufficientFunds {
                required: weapon.price(),
                available: self.money,
            });
        }
        Ok(())
    }

    pub fn purchase(&mut self, weapon: Arc<Weapon>) -> Result<(), PlayerError> {
        self.can_purchase(&weapon)?;
        self.money = self.money.saturating_sub(weapon.price());
        debug!(
            target: "round_economy.player",
            weapon = weapon.name(),
            price = weapon.price(),
            money = self.money,
            "weapon purchased"
        );
        self.weapons.insert(weapon.category(), weapon);
        Ok(())
    }

    pub fn register_kill(&mut self, category: WeaponCategory) -> Result<(), PlayerError> {
        let reward = self
            .weapons
            .get(&category)
            .map(|w| w.kill_reward())
            .ok_or(PlayerError::NoSuchWeapon { category })?;
        self.kills += 1;
        self.credit_money(reward);
        debug!(
            target: "round_economy.player",
            %category,
            kills = self.kills,
            reward,
            "kill registered"
        );
        Ok(())
    }

    /// Adds `amount` and clamps the balance into `[0, max_money]`.
    pub fn credit_money(&mut self, amount: i32) {
        self.money = self
            .money
            .saturating_add(amount)
            .clamp(0, self.settings.max_money().max(0));
    }

    pub fn on_round_won(&mut self) {
        self.credit_money(self.settings.won_money());
        info!(target: "round_economy.player", money = self.money, "round won");
    }

    pub fn on_round_lost(&mut self) {
        self.credit_money(self.settings.lost_money());
        info!(target: "round_economy.player", money = self.money, "round lost");
    }

    pub fn advance_time(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn money(&self) -> i32 {
        self.money
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_weapon(&self, category: WeaponCategory) -> bool {
        self.weapons.contains_key(&category)
    }

    pub fn weapon_for(&self, category: WeaponCategory) -> Option<&Weapon> {
        self.weapons.get(&category).map(Arc::as_ref)
    }

    pub fn weapons(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values().map(Arc::as_ref)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            health: self.health,
            money: self.money,
            kills: self.kills,
            deaths: self.deaths,
            alive: self.is_alive(),
            elapsed_ms: u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
            weapons: self
                .weapons
                .iter()
                .map(|(category, weapon)| (*category, weapon.name().to_owned()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glock() -> Arc<Weapon> {
        Arc::new(Weapon::new("glock", WeaponCategory::Sidearm, 200, 300).unwrap())
    }

    fn ak47() -> Arc<Weapon> {
        Arc::new(Weapon::new("ak47", WeaponCategory::Heavy, 2700, 300).unwrap())
    }

    fn settings(max_money: i32) -> Arc<Settings> {
        Arc::new(
            Settings::new(glock())
                .with_round_money(3000, 1000)
                .with_max_money(max_money),
        )
    }

    fn fresh_player(money: i32) -> PlayerState {
        let mut player = PlayerState::with_money(settings(16_000), money);
        player.reset();
        player
    }

    #[test]
    fn reset_grants_only_the_starting_weapon() {
        let player = fresh_player(0);
        assert_eq!(player.health(), MAX_HEALTH);
        assert!(player.is_alive());
        assert_eq!(player.weapons().count(), 1);
        assert_eq!(
            player.weapon_for(WeaponCategory::Sidearm).map(Weapon::name),
            Some("glock")
        );
        assert!(!player.has_weapon(WeaponCategory::Heavy));
    }

    #[test]
    fn reset_overwrites_held_sidearm_and_keeps_heavy() {
        let mut player = fresh_player(5000);
        player.apply_damage(10).unwrap();
        let deagle = Weapon::new("deagle", WeaponCategory::Sidearm, 700, 300).unwrap();
        player
            .weapons
            .insert(WeaponCategory::Sidearm, Arc::new(deagle));
        player.purchase(ak47()).unwrap();

        player.reset();
        assert_eq!(player.health(), MAX_HEALTH);
        assert_eq!(
            player.weapon_for(WeaponCategory::Sidearm).map(Weapon::name),
            Some("glock")
        );
        assert!(player.has_weapon(WeaponCategory::Heavy));
        assert_eq!(player.money(), 2300);
    }

    #[test]
    fn reset_revives_an_eliminated_player() {
        let mut player = fresh_player(0);
        assert!(player.apply_damage(150).unwrap());
        player.reset();
        assert!(player.is_alive());
        assert_eq!(player.health(), MAX_HEALTH);
        assert_eq!(player.weapons().count(), 1);
        assert_eq!(player.deaths(), 1);
    }

    #[test]
    fn lethal_damage_eliminates() {
        let mut player = fresh_player(0);
        player.apply_damage(70).unwrap();
        assert_eq!(player.health(), 30);

        assert!(player.apply_damage(30).unwrap());
        assert_eq!(player.health(), 0);
        assert!(!player.is_alive());
        assert_eq!(player.deaths(), 1);
        for category in WeaponCategory::ALL {
            assert!(!player.has_weapon(category));
        }
    }

    #[test]
    fn non_lethal_damage_keeps_weapons() {
        let mut player = fresh_player(0);
        player.apply_damage(70).unwrap();
        assert!(!player.apply_damage(10).unwrap());
        assert_eq!(player.health(), 20);
        assert!(player.has_weapon(WeaponCategory::Sidearm));
        assert_eq!(player.deaths(), 0);
    }

    #[test]
    fn overkill_clamps_to_zero() {
        let mut player = fresh_player(0);
        assert!(player.apply_damage(i32::MAX).unwrap());
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn damage_on_eliminated_player_fails_without_mutation() {
        let mut player = fresh_player(800);
        player.apply_damage(100).unwrap();
        let before = player.snapshot();

        assert_eq!(player.apply_damage(10), Err(PlayerError::NotAlive));
        assert_eq!(player.apply_damage(-50), Err(PlayerError::NotAlive));
        assert_eq!(player.snapshot(), before);
    }

    #[test]
    fn purchase_while_eliminated_fails_without_mutation() {
        let mut player = fresh_player(5000);
        assert!(player.apply_damage(100).unwrap());
        let heavy = ak47();

        assert_eq!(player.can_purchase(&heavy), Err(PlayerError::NotAlive));
        assert_eq!(player.purchase(heavy), Err(PlayerError::NotAlive));
        assert_eq!(player.money(), 5000);
        assert_eq!(player.weapons().count(), 0);
        for category in WeaponCategory::ALL {
            assert!(!player.has_weapon(category));
        }
    }

    #[test]
    fn healing_is_capped() {
        let mut player = fresh_player(0);
        player.apply_damage(40).unwrap();
        assert!(!player.apply_damage(-25).unwrap());
        assert_eq!(player.health(), 85);
        player.apply_damage(-500).unwrap();
        assert_eq!(player.health(), MAX_HEALTH);
    }

    #[test]
    fn credit_is_capped_at_max_money() {
        let mut player = PlayerState::new(settings(1000));
        assert_eq!(player.money(), 0);
        player.credit_money(1500);
        assert_eq!(player.money(), 1000);
    }

    #[test]
    fn negative_credit_floors_at_zero() {
        let mut player = fresh_player(300);
        player.credit_money(-1000);
        assert_eq!(player.money(), 0);
        player.credit_money(i32::MIN);
        assert_eq!(player.money(), 0);
    }

    #[test]
    fn opening_balance_is_clamped() {
        let player = PlayerState::with_money(settings(1000), 50_000);
        assert_eq!(player.money(), 1000);
    }

    #[test]
    fn purchase_then_duplicate_category_fails() {
        let mut player = fresh_player(3000);
        let heavy = ak47();
        assert_eq!(player.can_purchase(&heavy), Ok(()));
        player.purchase(Arc::clone(&heavy)).unwrap();
        assert_eq!(player.money(), 300);

        let err = player.can_purchase(&heavy).unwrap_err();
        assert_eq!(
            err,
            PlayerError::DuplicateCategory {
                category: WeaponCategory::Heavy
            }
        );
        assert_eq!(player.purchase(heavy), Err(err));
        assert_eq!(player.money(), 300);
        assert_eq!(player.weapons().count(), 2);
    }

    #[test]
    fn duplicate_category_is_checked_before_funds() {
        let player = fresh_player(0);
        let deagle = Weapon::new("deagle", WeaponCategory::Sidearm, 700, 300).unwrap();
        assert_eq!(
            player.can_purchase(&deagle),
            Err(PlayerError::DuplicateCategory {
                category: WeaponCategory::Sidearm
            })
        );
    }

    #[test]
    fn insufficient_funds_reports_amounts() {
        let mut player = fresh_player(1000);
        let err = player.purchase(ak47()).unwrap_err();
        assert_eq!(
            err,
            PlayerError::InsufficientFunds {
                required: 2700,
                available: 1000
            }
        );
        assert_eq!(err.to_string(), "not enough money: need 2700, have 1000");
        assert_eq!(player.money(), 1000);
        assert!(!player.has_weapon(WeaponCategory::Heavy));
    }

    #[test]
    fn exact_price_is_affordable() {
        let mut player = fresh_player(2700);
        player.purchase(ak47()).unwrap();
        assert_eq!(player.money(), 0);
    }

    #[test]
    fn kill_with_held_weapon_credits_reward() {
        let mut player = fresh_player(0);
        player.register_kill(WeaponCategory::Sidearm).unwrap();
        assert_eq!(player.kills(), 1);
        assert_eq!(player.money(), 300);
    }

    #[test]
    fn kill_reward_is_clamped() {
        let mut player = PlayerState::with_money(settings(1000), 900);
        player.reset();
        player.register_kill(WeaponCategory::Sidearm).unwrap();
        assert_eq!(player.kills(), 1);
        assert_eq!(player.money(), 1000);
    }

    #[test]
    fn kill_with_unheld_category_fails() {
        let mut player = fresh_player(100);
        let err = player.register_kill(WeaponCategory::Heavy).unwrap_err();
        assert_eq!(
            err,
            PlayerError::NoSuchWeapon {
                category: WeaponCategory::Heavy
            }
        );
        assert_eq!(err.to_string(), "no heavy weapon held");
        assert_eq!(player.kills(), 0);
        assert_eq!(player.money(), 100);
    }

    #[test]
    fn round_awards_use_settings() {
        let mut player = fresh_player(0);
        player.on_round_won();
        assert_eq!(player.money(), 3000);
        player.on_round_lost();
        assert_eq!(player.money(), 4000);
    }

    #[test]
    fn elapsed_time_accumulates() {
        let mut player = fresh_player(0);
        assert_eq!(player.elapsed(), Duration::ZERO);
        player.advance_time(Duration::from_millis(1500));
        player.advance_time(Duration::from_millis(500));
        assert_eq!(player.elapsed(), Duration::from_secs(2));
        assert_eq!(player.snapshot().elapsed_ms, 2000);
    }

    #[test]
    fn snapshot_lists_weapons_by_category() {
        let mut player = fresh_player(3000);
        player.purchase(ak47()).unwrap();
        let snapshot = player.snapshot();
        let names: Vec<_> = snapshot
            .weapons
            .iter()
            .map(|(c, n)| (*c, n.as_str()))
            .collect();
        assert_eq!(
            names,
            [
                (WeaponCategory::Sidearm, "glock"),
                (WeaponCategory::Heavy, "ak47")
            ]
        );
        assert!(snapshot.alive);
    }
}
