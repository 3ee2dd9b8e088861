use crate::entity::{EntityKind, EntityRef, Overlap, PlayerId};
use crate::player::Damage;
use crate::pool::PoolHandle;
use crate::world::World;

#[derive(Debug, Clone, PartialEq)]
pub enum HitOutcome {
    /// Not a projectile pair, or the projectile was already spent.
    Ignored,
    /// Stopped by static geometry.
    Absorbed,
    OpponentHit { player_id: PlayerId, damage: Damage },
    LocalHit { damage: Damage },
    /// A projectile touching something it cannot hurt.
    PassThrough,
}

impl HitOutcome {
    pub fn damage(&self) -> Option<Damage> {
        match self {
            Self::OpponentHit { damage, .. } | Self::LocalHit { damage } => Some(*damage),
            _ => None,
        }
    }

    pub fn is_defeat(&self) -> bool {
        self.damage().is_some_and(|d| d.defeated)
    }
}

/// Turns projectile overlaps into damage. Each projectile hurts at most once
/// per life: every outcome other than a pass-through releases it.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    damage: i32,
}

impl CollisionResolver {
    pub fn new(damage: i32) -> Self {
        Self { damage }
    }

    /// Projectile pairs of one tick in resolution order: geometry first, so
    /// a projectile that reaches a wall and a player in the same tick is
    /// stopped before it can hurt anyone.
    pub fn order(overlaps: &[Overlap]) -> Vec<&Overlap> {
        let (mut geometry, others): (Vec<&Overlap>, Vec<&Overlap>) = overlaps
            .iter()
            .filter(|overlap| overlap.projectile_pair().is_some())
            .partition(|overlap| {
                overlap
                    .projectile_pair()
                    .is_some_and(|(other, _)| other.kind() == EntityKind::StaticGeometry)
            });
        geometry.extend(others);
        geometry
    }

    pub fn resolve_all(&self, world: &mut World, overlaps: &[Overlap]) -> Vec<HitOutcome> {
        Self::order(overlaps)
            .into_iter()
            .map(|overlap| self.resolve(world, overlap))
            .collect()
    }

    pub fn resolve(&self, world: &mut World, overlap: &Overlap) -> HitOutcome {
        match overlap.projectile_pair() {
            Some((other, handle)) => self.resolve_projectile(world, other, handle),
            None => HitOutcome::Ignored,
        }
    }

    fn resolve_projectile(&self, world: &mut World, other: &EntityRef, handle: PoolHandle) -> HitOutcome {
        let Some(projectile) = world.projectiles.get(handle) else {
            return HitOutcome::Ignored;
        };
        let owner_is_enemy = projectile.owner_is_enemy;

        let outcome = match other {
            EntityRef::StaticGeometry => HitOutcome::Absorbed,
            EntityRef::RemotePlayer(id) if !owner_is_enemy => {
                match world.remotes.player_mut(id) {
                    Some(player) => {
                        let damage = player.health.apply_damage(self.damage);
                        world.health_bars.opponent.shrink(damage.applied);
                        HitOutcome::OpponentHit {
                            player_id: id.clone(),
                            damage,
                        }
                    }
                    None => {
                        log::debug!("projectile hit unknown player {}", id);
                        HitOutcome::PassThrough
                    }
                }
            }
            EntityRef::LocalPlayer if owner_is_enemy => match world.local.as_mut() {
                Some(local) => {
                    let damage = local.health.apply_damage(self.damage);
                    world.health_bars.local.shrink(damage.applied);
                    HitOutcome::LocalHit { damage }
                }
                None => HitOutcome::PassThrough,
            },
            _ => HitOutcome::PassThrough,
        };

        if outcome != HitOutcome::PassThrough {
            world.projectiles.release(handle);
        }
        outcome
    }
}
