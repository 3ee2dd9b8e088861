mod health_bar;
mod state;

pub use health_bar::{HealthBar, HealthBars};
pub use state::{Damage, Health, Movement, PlayerSpawn, PlayerState, Team, Weapon, WeaponKind};
