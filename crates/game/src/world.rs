use crate::combat::Projectile;
use crate::config::TuningConfig;
use crate::entity::{BodyHandle, EntityRef};
use crate::player::{HealthBars, PlayerState};
use crate::pool::EntityPool;
use crate::registry::RemoteRegistry;

/// Everything the session mutates: the local avatar, the network-driven
/// entities, the projectile pool and the two health bars.
#[derive(Debug)]
pub struct World {
    pub(crate) local: Option<PlayerState>,
    pub(crate) remotes: RemoteRegistry,
    pub(crate) projectiles: EntityPool<Projectile>,
    pub(crate) health_bars: HealthBars,
}

impl World {
    pub fn new(config: &TuningConfig) -> Self {
        Self {
            local: None,
            remotes: RemoteRegistry::new(config.max_health),
            projectiles: EntityPool::new(),
            health_bars: HealthBars::new(&config.health_bar),
        }
    }

    pub fn local(&self) -> Option<&PlayerState> {
        self.local.as_ref()
    }

    pub fn remotes(&self) -> &RemoteRegistry {
        &self.remotes
    }

    pub fn projectiles(&self) -> &EntityPool<Projectile> {
        &self.projectiles
    }

    pub fn health_bars(&self) -> &HealthBars {
        &self.health_bars
    }

    /// Links an entity to the render/physics body that represents it.
    /// Returns false if the entity does not exist (or is inactive).
    pub fn attach_body(&mut self, entity: &EntityRef, body: BodyHandle) -> bool {
        let slot = match entity {
            EntityRef::LocalPlayer => self.local.as_mut().map(|p| &mut p.body),
            EntityRef::RemotePlayer(id) => self.remotes.player_mut(id).map(|p| &mut p.body),
            EntityRef::Pickup(id) => self.remotes.pickup_mut(*id).map(|p| &mut p.body),
            EntityRef::Projectile(handle) => self.projectiles.get_mut(*handle).map(|p| &mut p.body),
            EntityRef::StaticGeometry => None,
        };

        match slot {
            Some(slot) => {
                *slot = Some(body);
                true
            }
            None => false,
        }
    }

    pub fn body_of(&self, entity: &EntityRef) -> Option<BodyHandle> {
        match entity {
            EntityRef::LocalPlayer => self.local.as_ref()?.body,
            EntityRef::RemotePlayer(id) => self.remotes.player(id)?.body,
            EntityRef::Pickup(id) => self.remotes.pickup(*id)?.body,
            EntityRef::Projectile(handle) => self.projectiles.get(*handle)?.body,
            EntityRef::StaticGeometry => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::combat::ProjectileSpawn;
    use crate::player::{PlayerSpawn, Team};

    #[test]
    fn attaches_bodies_to_live_entities_only() {
        let config = TuningConfig::default();
        let mut world = World::new(&config);

        assert!(!world.attach_body(&EntityRef::LocalPlayer, BodyHandle(1)));

        world.local = Some(PlayerState::from_spawn(
            PlayerSpawn {
                player_id: "a".into(),
                position: Vec2::ZERO,
                facing_left: false,
                team: Team::Blue,
            },
            config.max_health,
        ));
        world.remotes.spawn_pickup(1, Vec2::new(100.0, 100.0));
        let bullet = world.projectiles.acquire(ProjectileSpawn {
            position: Vec2::ZERO,
            facing_left: false,
            owner_is_enemy: false,
            lifetime_ms: 900.0,
        });

        assert!(world.attach_body(&EntityRef::LocalPlayer, BodyHandle(1)));
        assert!(world.attach_body(&EntityRef::Pickup(1), BodyHandle(2)));
        assert!(world.attach_body(&EntityRef::Projectile(bullet), BodyHandle(3)));
        assert!(!world.attach_body(&EntityRef::RemotePlayer("ghost".into()), BodyHandle(4)));
        assert!(!world.attach_body(&EntityRef::StaticGeometry, BodyHandle(5)));

        assert_eq!(world.body_of(&EntityRef::Pickup(1)), Some(BodyHandle(2)));

        world.projectiles.release(bullet);
        assert!(!world.attach_body(&EntityRef::Projectile(bullet), BodyHandle(6)));
    }
}
