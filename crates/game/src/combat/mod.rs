mod projectile;
mod resolver;

pub use projectile::{Projectile, ProjectileSpawn};
pub use resolver::{CollisionResolver, HitOutcome};
