use glam::Vec2;

use crate::entity::BodyHandle;
use crate::pool::Poolable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub position: Vec2,
    pub facing_left: bool,
    pub owner_is_enemy: bool,
    pub lifetime_ms: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub facing_left: bool,
    /// Fired by the other client, so it can hurt the local player.
    pub owner_is_enemy: bool,
    pub remaining_lifetime_ms: f32,
    pub body: Option<BodyHandle>,
}

impl Projectile {
    pub fn direction(&self) -> f32 {
        if self.facing_left { -1.0 } else { 1.0 }
    }

    /// Moves the projectile along its facing and burns lifetime. Returns
    /// whether it is still alive afterwards.
    pub fn advance(&mut self, delta_ms: f32, speed_per_ms: f32) -> bool {
        self.position.x += self.direction() * speed_per_ms * delta_ms;
        self.remaining_lifetime_ms -= delta_ms;
        self.remaining_lifetime_ms > 0.0
    }
}

impl Poolable for Projectile {
    type Spawn = ProjectileSpawn;

    fn spawn(args: ProjectileSpawn) -> Self {
        Self {
            position: args.position,
            facing_left: args.facing_left,
            owner_is_enemy: args.owner_is_enemy,
            remaining_lifetime_ms: args.lifetime_ms,
            body: None,
        }
    }

    // The body handle survives reuse; the visual layer recycles it too.
    fn respawn(&mut self, args: ProjectileSpawn) {
        self.position = args.position;
        self.facing_left = args.facing_left;
        self.owner_is_enemy = args.owner_is_enemy;
        self.remaining_lifetime_ms = args.lifetime_ms;
    }
}
