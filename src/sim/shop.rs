//! Upgrade shop
//!
//! Prices inflate 15% per shop visit and by each item's own scaling per unit
//! owned. Purchases debit the score and apply their effect immediately.

use serde::Serialize;
use thiserror::Error;

use super::fuel;
use super::state::{GameState, RunPhase};

pub const SHOP_ITEM_COUNT: usize = 6;
/// Price growth per shop visit after the first
pub const VISIT_INFLATION: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShopItemId {
    FuelTank,
    LightRange,
    FuelEfficiency,
    ShipScanner,
    EmergencyFuel,
    AutoBeacon,
}

impl ShopItemId {
    pub const ALL: [ShopItemId; SHOP_ITEM_COUNT] = [
        ShopItemId::FuelTank,
        ShopItemId::LightRange,
        ShopItemId::FuelEfficiency,
        ShopItemId::ShipScanner,
        ShopItemId::EmergencyFuel,
        ShopItemId::AutoBeacon,
    ];

    /// Slot in `GameState::owned`
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShopItemId::FuelTank => "fuelTank",
            ShopItemId::LightRange => "lightRange",
            ShopItemId::FuelEfficiency => "fuelEfficiency",
            ShopItemId::ShipScanner => "shipScanner",
            ShopItemId::EmergencyFuel => "emergencyFuel",
            ShopItemId::AutoBeacon => "autoBeacon",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    pub fn item(&self) -> &'static ShopItem {
        &SHOP_ITEMS[self.index()]
    }
}

/// Static shop entry
#[derive(Debug, Clone, Copy)]
pub struct ShopItem {
    pub id: ShopItemId,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: u64,
    /// Price multiplier per unit already owned
    pub scaling: f64,
    pub max_purchases: u32,
    /// Hidden from the listing once owned
    pub one_time: bool,
}

pub const SHOP_ITEMS: [ShopItem; SHOP_ITEM_COUNT] = [
    ShopItem {
        id: ShopItemId::FuelTank,
        name: "Fuel Tank Upgrade",
        description: "+25 max fuel capacity",
        base_cost: 50,
        scaling: 1.2,
        max_purchases: 5,
        one_time: false,
    },
    ShopItem {
        id: ShopItemId::LightRange,
        name: "Lighthouse Range",
        description: "+15% beam range",
        base_cost: 75,
        scaling: 1.2,
        max_purchases: 4,
        one_time: false,
    },
    ShopItem {
        id: ShopItemId::FuelEfficiency,
        name: "Fuel Efficiency",
        description: "-20% fuel consumption",
        base_cost: 100,
        scaling: 1.2,
        max_purchases: 3,
        one_time: false,
    },
    ShopItem {
        id: ShopItemId::ShipScanner,
        name: "Ship Scanner",
        description: "Shows ship point values",
        base_cost: 50,
        scaling: 1.0,
        max_purchases: 1,
        one_time: true,
    },
    ShopItem {
        id: ShopItemId::EmergencyFuel,
        name: "Emergency Reserves",
        description: "+25 fuel instantly",
        base_cost: 25,
        scaling: 1.4,
        max_purchases: 99,
        one_time: false,
    },
    ShopItem {
        id: ShopItemId::AutoBeacon,
        name: "Auto Beacon",
        description: "Periodic free light pulses",
        base_cost: 150,
        scaling: 1.2,
        max_purchases: 1,
        one_time: true,
    },
];

const FUEL_TANK_BONUS: f32 = 25.0;
const EMERGENCY_FUEL: f32 = 25.0;
const RANGE_STEP: f32 = 0.15;
const EFFICIENCY_FACTOR: f32 = 0.8;

/// Price of `item` on shop visit `visits` with `owned` units already bought
pub fn cost(item: &ShopItem, visits: u32, owned: u32) -> u64 {
    let visit_factor = VISIT_INFLATION.powi(visits as i32 - 1);
    let owned_factor = item.scaling.powi(owned as i32);
    (item.base_cost as f64 * visit_factor * owned_factor).floor() as u64
}

pub fn current_cost(state: &GameState, id: ShopItemId) -> u64 {
    cost(id.item(), state.shop_visit_count, state.owned[id.index()])
}

/// Why a purchase was refused
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("unknown shop item {0:?}")]
    UnknownItem(String),
    #[error("the shop is not open")]
    ShopClosed,
    #[error("{0} is sold out")]
    SoldOut(&'static str),
    #[error("{name} costs {cost}, only {score} points available")]
    InsufficientScore {
        name: &'static str,
        cost: u64,
        score: u64,
    },
}

/// Buy one unit of `item_id`, returning the price paid
pub fn try_purchase(state: &mut GameState, item_id: &str) -> Result<u64, PurchaseError> {
    let id = ShopItemId::parse(item_id)
        .ok_or_else(|| PurchaseError::UnknownItem(item_id.to_string()))?;
    if state.phase != RunPhase::Shop {
        return Err(PurchaseError::ShopClosed);
    }
    let item = id.item();
    if state.owned[id.index()] >= item.max_purchases {
        return Err(PurchaseError::SoldOut(item.name));
    }
    let price = current_cost(state, id);
    if state.score < price {
        return Err(PurchaseError::InsufficientScore {
            name: item.name,
            cost: price,
            score: state.score,
        });
    }

    state.score -= price;
    state.owned[id.index()] += 1;
    apply_upgrade(state, id);
    log::info!("Bought {} for {} (score {})", item.name, price, state.score);
    Ok(price)
}

/// Buy one unit of `item_id`; false when the purchase is refused
pub fn purchase(state: &mut GameState, item_id: &str) -> bool {
    match try_purchase(state, item_id) {
        Ok(_) => true,
        Err(e) => {
            log::debug!("Purchase refused: {e}");
            false
        }
    }
}

fn apply_upgrade(state: &mut GameState, id: ShopItemId) {
    match id {
        ShopItemId::FuelTank => {
            state.max_fuel += FUEL_TANK_BONUS;
            fuel::refill(state, FUEL_TANK_BONUS);
        }
        ShopItemId::LightRange => state.upgrades.range_multiplier += RANGE_STEP,
        ShopItemId::FuelEfficiency => state.upgrades.fuel_efficiency_multiplier *= EFFICIENCY_FACTOR,
        ShopItemId::ShipScanner => state.upgrades.has_scanner = true,
        ShopItemId::EmergencyFuel => fuel::refill(state, EMERGENCY_FUEL),
        ShopItemId::AutoBeacon => state.upgrades.has_auto_beacon = true,
    }
}

/// One row of the shop screen
#[derive(Debug, Clone, Serialize)]
pub struct ShopListing {
    pub id: ShopItemId,
    pub name: &'static str,
    pub description: String,
    pub cost: u64,
    pub owned: u32,
    pub max_purchases: u32,
    pub affordable: bool,
    pub purchasable: bool,
}

/// Items to show on the shop screen; one-time items disappear once owned
pub fn listing(state: &GameState) -> Vec<ShopListing> {
    SHOP_ITEMS
        .iter()
        .filter(|item| !(item.one_time && state.owned[item.id.index()] > 0))
        .map(|item| {
            let owned = state.owned[item.id.index()];
            let cost = current_cost(state, item.id);
            let description = if item.id == ShopItemId::EmergencyFuel {
                format!("+25 fuel instantly ({owned} used)")
            } else {
                item.description.to_string()
            };
            let affordable = state.score >= cost;
            ShopListing {
                id: item.id,
                name: item.name,
                description,
                cost,
                owned,
                max_purchases: item.max_purchases,
                affordable,
                purchasable: affordable && owned < item.max_purchases,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn in_shop(score: u64) -> GameState {
        let mut state = GameState::new(4, &Settings::default());
        state.phase = RunPhase::Shop;
        state.shop_visit_count = 1;
        state.score = score;
        state
    }

    #[test]
    fn test_table_matches_ids() {
        for (i, item) in SHOP_ITEMS.iter().enumerate() {
            assert_eq!(item.id.index(), i);
            assert_eq!(ShopItemId::parse(item.id.as_str()), Some(item.id));
        }
        assert_eq!(ShopItemId::parse("laser"), None);
    }

    #[test]
    fn test_cost_inflation() {
        let tank = ShopItemId::FuelTank.item();
        assert_eq!(cost(tank, 1, 0), 50);
        let expected = (50.0 * 1.15f64.powi(2) * 1.2f64.powi(2)).floor() as u64;
        assert_eq!(cost(tank, 3, 2), expected);
        assert_eq!(expected, 95);
    }

    #[test]
    fn test_purchase_debits_and_applies() {
        let mut state = in_shop(200);
        state.fuel = 60.0;
        assert!(purchase(&mut state, "fuelTank"));
        assert_eq!(state.score, 150);
        assert_eq!(state.max_fuel, 125.0);
        assert_eq!(state.fuel, 85.0);
        assert_eq!(state.owned[ShopItemId::FuelTank.index()], 1);
        // Second unit costs 20% more
        assert_eq!(current_cost(&state, ShopItemId::FuelTank), 60);
    }

    #[test]
    fn test_upgrade_effects() {
        let mut state = in_shop(10_000);
        assert!(purchase(&mut state, "lightRange"));
        assert!(purchase(&mut state, "fuelEfficiency"));
        assert!(purchase(&mut state, "fuelEfficiency"));
        assert!(purchase(&mut state, "shipScanner"));
        assert!(purchase(&mut state, "autoBeacon"));
        assert!((state.upgrades.range_multiplier - 1.15).abs() < 1e-6);
        assert!((state.upgrades.fuel_efficiency_multiplier - 0.64).abs() < 1e-6);
        assert!(state.upgrades.has_scanner);
        assert!(state.upgrades.has_auto_beacon);
    }

    #[test]
    fn test_refusals_leave_state_untouched() {
        let mut state = in_shop(10);
        assert_eq!(
            try_purchase(&mut state, "lightRange"),
            Err(PurchaseError::InsufficientScore {
                name: "Lighthouse Range",
                cost: 75,
                score: 10
            })
        );
        assert!(matches!(
            try_purchase(&mut state, "nope"),
            Err(PurchaseError::UnknownItem(_))
        ));
        assert_eq!(state.score, 10);

        state.phase = RunPhase::Paused;
        state.score = 1000;
        assert_eq!(try_purchase(&mut state, "fuelTank"), Err(PurchaseError::ShopClosed));
        assert_eq!(state.score, 1000);
    }

    #[test]
    fn test_capped_item_always_fails() {
        let mut state = in_shop(u64::MAX / 2);
        assert!(purchase(&mut state, "shipScanner"));
        let score = state.score;
        assert!(!purchase(&mut state, "shipScanner"));
        assert_eq!(state.score, score);
        for _ in 0..5 {
            assert!(purchase(&mut state, "fuelTank"));
        }
        assert!(!purchase(&mut state, "fuelTank"));
    }

    #[test]
    fn test_emergency_fuel_respects_capacity() {
        let mut state = in_shop(1000);
        state.fuel = 90.0;
        assert!(purchase(&mut state, "emergencyFuel"));
        assert_eq!(state.fuel, 100.0);
    }

    #[test]
    fn test_listing_hides_owned_one_time_items() {
        let mut state = in_shop(60);
        let rows = listing(&state);
        assert_eq!(rows.len(), 6);
        let beacon = rows.iter().find(|r| r.id == ShopItemId::AutoBeacon).unwrap();
        assert!(!beacon.affordable && !beacon.purchasable);

        assert!(purchase(&mut state, "shipScanner"));
        let rows = listing(&state);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.id != ShopItemId::ShipScanner));
        let emergency = rows.iter().find(|r| r.id == ShopItemId::EmergencyFuel).unwrap();
        assert_eq!(emergency.description, "+25 fuel instantly (0 used)");
    }
}
