use crate::pool::PoolHandle;

pub type PlayerId = String;
pub type PickupId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntityKind {
    LocalPlayer = 0,
    RemotePlayer = 1,
    Pickup = 2,
    Projectile = 3,
    StaticGeometry = 4,
}

impl EntityKind {
    pub fn is_player(self) -> bool {
        matches!(self, Self::LocalPlayer | Self::RemotePlayer)
    }
}

/// Names one participant of an overlap reported by the physics layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    LocalPlayer,
    RemotePlayer(PlayerId),
    Pickup(PickupId),
    Projectile(PoolHandle),
    StaticGeometry,
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::LocalPlayer => EntityKind::LocalPlayer,
            Self::RemotePlayer(_) => EntityKind::RemotePlayer,
            Self::Pickup(_) => EntityKind::Pickup,
            Self::Projectile(_) => EntityKind::Projectile,
            Self::StaticGeometry => EntityKind::StaticGeometry,
        }
    }

    pub fn projectile(&self) -> Option<PoolHandle> {
        match self {
            Self::Projectile(handle) => Some(*handle),
            _ => None,
        }
    }
}

/// Opaque handle into the render/physics collaborator that draws and moves
/// an entity. Assigned by that layer, never interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub a: EntityRef,
    pub b: EntityRef,
}

impl Overlap {
    pub fn new(a: EntityRef, b: EntityRef) -> Self {
        Self { a, b }
    }

    /// Splits the pair into `(other, projectile)` when exactly one side is a
    /// projectile.
    pub fn projectile_pair(&self) -> Option<(&EntityRef, PoolHandle)> {
        match (self.a.projectile(), self.b.projectile()) {
            (Some(handle), None) => Some((&self.b, handle)),
            (None, Some(handle)) => Some((&self.a, handle)),
            _ => None,
        }
    }

    /// Returns the pickup id when the pair is the local player touching a
    /// pickup.
    pub fn local_pickup(&self) -> Option<PickupId> {
        match (&self.a, &self.b) {
            (EntityRef::LocalPlayer, EntityRef::Pickup(id))
            | (EntityRef::Pickup(id), EntityRef::LocalPlayer) => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{EntityPool, Poolable};

    struct Dummy;

    impl Poolable for Dummy {
        type Spawn = ();
        fn spawn(_: ()) -> Self {
            Dummy
        }
        fn respawn(&mut self, _: ()) {}
    }

    #[test]
    fn projectile_pair_is_order_independent() {
        let mut pool = EntityPool::<Dummy>::new();
        let handle = pool.acquire(());

        let forward = Overlap::new(EntityRef::StaticGeometry, EntityRef::Projectile(handle));
        let reverse = Overlap::new(EntityRef::Projectile(handle), EntityRef::StaticGeometry);

        assert_eq!(
            forward.projectile_pair(),
            Some((&EntityRef::StaticGeometry, handle))
        );
        assert_eq!(forward.projectile_pair(), reverse.projectile_pair());
    }

    #[test]
    fn non_projectile_pairs() {
        let touch = Overlap::new(EntityRef::Pickup(3), EntityRef::LocalPlayer);
        assert_eq!(touch.projectile_pair(), None);
        assert_eq!(touch.local_pickup(), Some(3));

        let remote = Overlap::new(EntityRef::RemotePlayer("b".into()), EntityRef::Pickup(3));
        assert_eq!(remote.local_pickup(), None);
        assert!(remote.a.kind().is_player());
    }
}
