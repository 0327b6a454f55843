//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod difficulty;
pub mod events;
pub mod fuel;
pub mod schedule;
pub mod scoring;
pub mod shop;
pub mod spawn;
pub mod state;
pub mod storm;
pub mod tick;

pub use collision::{in_light_cone, ship_illuminated};
pub use events::{GameEvent, RunSummary};
pub use schedule::{Effect, Schedule};
pub use shop::{PurchaseError, ShopItemId, ShopListing};
pub use state::{
    GameState, Lighthouse, Particle, ParticleKind, RunPhase, Ship, ShipKind, ShipStatus, Upgrades,
};
pub use tick::{TickInput, end_run, exit_shop, tick, toggle_pause};
