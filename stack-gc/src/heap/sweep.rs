use super::Registry;

/// Free every unmarked object and unmark every surviving object.
///
/// Returns the number of objects freed.
pub fn sweep(registry: &mut Registry) -> usize
{
    registry.retain(|_, object| {
        let reached = object.marked;
        object.marked = false;
        reached
    })
}

#[cfg(test)]
mod tests
{
    use {super::*, super::super::{Object, mark}};

    #[test]
    fn sweep_frees_unmarked_and_resets_survivors()
    {
        let mut registry = Registry::new();
        let a = registry.insert(Object::integer(1));
        let b = registry.insert(Object::integer(2));
        let p = registry.insert(Object::pair(a, a));

        mark(&mut registry, p);
        assert_eq!(sweep(&mut registry), 1);

        assert_eq!(registry.len(), 2);
        assert!(registry.get(b).is_none());
        assert!(registry.iter().all(|(_, object)| !object.is_marked()));
    }

    #[test]
    fn sweep_without_marking_frees_everything()
    {
        let mut registry = Registry::new();
        for i in 0 .. 20 {
            registry.insert(Object::integer(i));
        }
        assert_eq!(sweep(&mut registry), 20);
        assert!(registry.is_empty());
    }
}
