use super::{Object, ObjectId};

/// Owner of every live object.
///
/// Objects are stored in slots addressed by [`ObjectId`].
/// Vacant slots are kept on a free list and reused by [`insert`].
///
/// [`insert`]: `Self::insert`
#[derive(Debug, Default)]
pub struct Registry
{
    slots: Vec<Slot>,

    /// Indices of vacant slots.
    free: Vec<u32>,

    // INVARIANT: Equals the number of occupied slots.
    len: usize,
}

#[derive(Debug)]
struct Slot
{
    generation: u32,
    object: Option<Object>,
}

impl Registry
{
    /// Create an empty registry.
    pub fn new() -> Self
    {
        Self::default()
    }

    /// The number of live objects.
    pub fn len(&self) -> usize
    {
        self.len
    }

    /// Whether there are no live objects.
    pub fn is_empty(&self) -> bool
    {
        self.len == 0
    }

    /// Take ownership of an object and return its identifier.
    ///
    /// # Panics
    ///
    /// Panics if the number of slots would exceed [`u32::MAX`].
    pub fn insert(&mut self, object: Object) -> ObjectId
    {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = u32::try_from(self.slots.len())
                    .expect("Too many objects");
                self.slots.push(Slot{generation: 0, object: None});
                index
            },
        };

        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.object.is_none(), "Free slot is occupied");
        slot.object = Some(object);
        self.len += 1;

        ObjectId{index, generation: slot.generation}
    }

    /// Look up a live object.
    ///
    /// Returns [`None`] if the object was freed.
    pub fn get(&self, id: ObjectId) -> Option<&Object>
    {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.object.as_ref()
    }

    /// Look up a live object for mutation.
    ///
    /// Returns [`None`] if the object was freed.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object>
    {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.object.as_mut()
    }

    /// Free an object and return it.
    ///
    /// Returns [`None`] if the object was already freed.
    pub fn remove(&mut self, id: ObjectId) -> Option<Object>
    {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let object = slot.object.take()?;
        Self::vacate(&mut self.free, &mut self.len, slot, id.index);
        Some(object)
    }

    /// Iterate over all live objects, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)>
    {
        self.slots.iter().zip(0 ..).filter_map(|(slot, index)| {
            let id = ObjectId{index, generation: slot.generation};
            slot.object.as_ref().map(|object| (id, object))
        })
    }

    /// Visit every live object once, freeing those for which `f` is false.
    ///
    /// Returns the number of objects freed.
    pub fn retain<F>(&mut self, mut f: F) -> usize
        where F: FnMut(ObjectId, &mut Object) -> bool
    {
        let mut freed = 0;
        for (slot, index) in self.slots.iter_mut().zip(0 ..) {
            let id = ObjectId{index, generation: slot.generation};
            let keep = match &mut slot.object {
                Some(object) => f(id, object),
                None => continue,
            };
            if !keep {
                slot.object = None;
                Self::vacate(&mut self.free, &mut self.len, slot, index);
                freed += 1;
            }
        }
        freed
    }

    /// Bookkeeping for a slot whose object was just taken.
    fn vacate(free: &mut Vec<u32>, len: &mut usize, slot: &mut Slot, index: u32)
    {
        // Wrapping is fine: an identifier would have to survive
        // 2^32 reuses of its slot to alias a new object.
        slot.generation = slot.generation.wrapping_add(1);
        free.push(index);
        *len -= 1;
    }
}

#[cfg(test)]
mod tests
{
    use {super::*, super::super::ObjectKind};

    #[test]
    fn insert_and_get()
    {
        let mut registry = Registry::new();
        let a = registry.insert(Object::integer(1));
        let b = registry.insert(Object::pair(a, a));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(a).map(Object::kind), Some(&ObjectKind::Integer(1)));
        assert!(matches!(registry.get(b).map(Object::kind), Some(ObjectKind::Pair(_))));
    }

    #[test]
    fn removed_ids_do_not_resolve_after_slot_reuse()
    {
        let mut registry = Registry::new();
        let a = registry.insert(Object::integer(1));
        assert!(registry.remove(a).is_some());
        assert!(registry.is_empty());

        let b = registry.insert(Object::integer(2));
        assert_eq!(a.index, b.index, "Slot should be reused");
        assert!(registry.get(a).is_none());
        assert!(registry.remove(a).is_none());
        assert_eq!(registry.get(b).map(Object::kind), Some(&ObjectKind::Integer(2)));
    }

    #[test]
    fn retain_removes_during_traversal()
    {
        let mut registry = Registry::new();
        let ids: Vec<_> = (0 .. 10).map(|i| registry.insert(Object::integer(i))).collect();

        let mut visited = 0;
        let freed = registry.retain(|_, object| {
            visited += 1;
            matches!(object.kind(), ObjectKind::Integer(i) if i % 2 == 0)
        });

        assert_eq!(visited, 10);
        assert_eq!(freed, 5);
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.iter().count(), 5);
        for (i, id) in ids.into_iter().enumerate() {
            assert_eq!(registry.get(id).is_some(), i % 2 == 0);
        }
    }
}
