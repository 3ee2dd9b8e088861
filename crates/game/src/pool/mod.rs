/// Types that live in an [`EntityPool`] and can be brought back to life
/// without reallocating.
pub trait Poolable {
    type Spawn;

    fn spawn(args: Self::Spawn) -> Self;

    fn respawn(&mut self, args: Self::Spawn);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle(u32);

impl PoolHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    item: T,
    active: bool,
}

/// Fixed-identity, variable-liveness storage for short-lived entities.
///
/// Members are never removed: releasing a handle only marks its slot dead so
/// the next `acquire` can reinitialize it. The pool therefore grows to the
/// peak number of simultaneously live members and stays there.
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityPool<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn release(&mut self, handle: PoolHandle) -> bool {
        match self.slots.get_mut(handle.index()) {
            Some(slot) if slot.active => {
                slot.active = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, handle: PoolHandle) -> bool {
        self.slots
            .get(handle.index())
            .is_some_and(|slot| slot.active)
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.active)
            .map(|slot| &slot.item)
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.active)
            .map(|slot| &mut slot.item)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| (PoolHandle(index as u32), &slot.item))
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (PoolHandle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| (PoolHandle(index as u32), &mut slot.item))
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    /// Total number of members ever constructed, live or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T: Poolable> EntityPool<T> {
    pub fn acquire(&mut self, args: T::Spawn) -> PoolHandle {
        if let Some(index) = self.slots.iter().position(|slot| !slot.active) {
            let slot = &mut self.slots[index];
            slot.item.respawn(args);
            slot.active = true;
            return PoolHandle(index as u32);
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            item: T::spawn(args),
            active: true,
        });
        PoolHandle(index as u32)
    }
}
