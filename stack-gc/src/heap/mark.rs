use {super::{ObjectId, Registry}, smallvec::SmallVec};

/// Objects pending a visit by the marker.
///
/// Most graphs are shallow enough that the worklist never spills.
type Worklist = SmallVec<[ObjectId; 32]>;

/// Mark every object reachable from `root`.
///
/// Objects that are already marked are not visited again,
/// which is what makes marking terminate on cyclic graphs.
/// Identifiers of freed objects are skipped.
///
/// Returns the number of objects that were newly marked.
pub fn mark(registry: &mut Registry, root: ObjectId) -> usize
{
    let mut worklist = Worklist::new();
    worklist.push(root);
    drain(registry, &mut worklist)
}

/// Mark every object reachable from any of the given roots.
///
/// The order of the roots does not affect the set of marked objects.
/// Returns the number of objects that were newly marked.
pub fn mark_all<'a, I>(registry: &mut Registry, roots: I) -> usize
    where I: IntoIterator<Item = &'a ObjectId>
{
    let mut worklist: Worklist = roots.into_iter().copied().collect();
    drain(registry, &mut worklist)
}

fn drain(registry: &mut Registry, worklist: &mut Worklist) -> usize
{
    let mut marked = 0;
    while let Some(id) = worklist.pop() {
        let Some(object) = registry.get_mut(id) else { continue };
        if object.marked {
            continue;
        }
        object.marked = true;
        marked += 1;
        worklist.extend(object.children());
    }
    marked
}
