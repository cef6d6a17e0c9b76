//! Helpers for deterministic regression tests.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use round_economy::{RoundEvent, Settings, Weapon, WeaponCatalog, WeaponCategory};

pub const DEFAULT_SEED: u64 = 42;
pub const TEST_MAX_MONEY: i32 = 10_000;

/// Small fixed catalog: two sidearms and two heavies.
pub fn sample_economy() -> (Arc<Settings>, WeaponCatalog) {
    let mut catalog = WeaponCatalog::new();
    let mut add = |name: &str, category, price, reward| {
        catalog
            .add(Weapon::new(name, category, price, reward).expect("sample weapons are valid"))
            .expect("sample weapon names are unique")
    };
    let glock = add("glock", WeaponCategory::Sidearm, 200, 300);
    add("deagle", WeaponCategory::Sidearm, 700, 300);
    add("ak47", WeaponCategory::Heavy, 2700, 300);
    add("awp", WeaponCategory::Heavy, 4750, 100);

    let settings = Settings::new(glock)
        .with_round_money(3250, 1400)
        .with_max_money(TEST_MAX_MONEY);
    (Arc::new(settings), catalog)
}

/// Generates `len` random events for the weapons in `catalog`. With an empty
/// catalog no purchases are generated.
pub fn random_events(seed: u64, len: usize, catalog: &WeaponCatalog) -> Vec<RoundEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = catalog.iter().map(|w| w.name().to_owned()).collect();

    (0..len)
        .map(|_| match rng.gen_range(0..10) {
            0 => RoundEvent::Reset,
            1..=3 => RoundEvent::Damage {
                amount: rng.gen_range(-40..=120),
            },
            4 | 5 if !names.is_empty() => RoundEvent::Purchase {
                weapon: names[rng.gen_range(0..names.len())].clone(),
            },
            4 | 5 => RoundEvent::RoundLost,
            6 => RoundEvent::Kill {
                category: WeaponCategory::ALL[rng.gen_range(0..WeaponCategory::ALL.len())],
            },
            7 => RoundEvent::RoundWon,
            8 => RoundEvent::RoundLost,
            _ => RoundEvent::Tick {
                millis: rng.gen_range(0..5_000),
            },
        })
        .collect()
}
