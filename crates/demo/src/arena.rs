use glam::Vec2;
use skirmish::{EntityRef, Overlap, World};

pub const GROUND_Y: f32 = 450.0;
pub const ARENA_WIDTH: f32 = 1000.0;

const TOUCH_RADIUS: f32 = 20.0;

fn touching(a: Vec2, b: Vec2) -> bool {
    a.distance_squared(b) <= TOUCH_RADIUS * TOUCH_RADIUS
}

/// Stand-in for the physics overlap notifier: distance checks against the
/// arena walls, both players and the pickups.
pub fn detect_overlaps(world: &World, local_position: Vec2) -> Vec<Overlap> {
    let mut overlaps = Vec::new();

    for pickup in world.remotes().active_pickups() {
        if touching(local_position, pickup.position) {
            overlaps.push(Overlap::new(EntityRef::LocalPlayer, EntityRef::Pickup(pickup.id)));
        }
    }

    for (handle, projectile) in world.projectiles().iter_active() {
        let bullet = EntityRef::Projectile(handle);

        if projectile.position.x <= 0.0 || projectile.position.x >= ARENA_WIDTH {
            overlaps.push(Overlap::new(bullet.clone(), EntityRef::StaticGeometry));
        }

        if touching(projectile.position, local_position) {
            overlaps.push(Overlap::new(EntityRef::LocalPlayer, bullet.clone()));
        }

        for remote in world.remotes().players() {
            if touching(projectile.position, remote.position) {
                overlaps.push(Overlap::new(
                    EntityRef::RemotePlayer(remote.player_id.clone()),
                    bullet.clone(),
                ));
            }
        }
    }

    overlaps
}
