use std::fmt;

/// Non-owning reference to an object in a [registry][`super::Registry`].
///
/// See the [module documentation][`super`] for the meaning of generations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ObjectId
{
    pub (super) index: u32,
    pub (super) generation: u32,
}

impl fmt::Display for ObjectId
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "#{}:{}", self.index, self.generation)
    }
}

/// Heap-allocated object.
#[derive(Debug)]
pub struct Object
{
    pub (crate) kind: ObjectKind,

    // INVARIANT: False outside of a collection cycle.
    pub (super) marked: bool,
}

/// Type and payload of an object.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObjectKind
{
    /// Leaf object without outgoing references.
    Integer(i64),

    /// Object with two outgoing references.
    Pair(Pair),
}

/// Payload of a pair object.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pair
{
    pub head: ObjectId,
    pub tail: ObjectId,
}

impl Object
{
    /// Create an unmarked object.
    pub fn new(kind: ObjectKind) -> Self
    {
        Self{kind, marked: false}
    }

    /// Create an unmarked integer object.
    pub fn integer(value: i64) -> Self
    {
        Self::new(ObjectKind::Integer(value))
    }

    /// Create an unmarked pair object.
    pub fn pair(head: ObjectId, tail: ObjectId) -> Self
    {
        Self::new(ObjectKind::Pair(Pair{head, tail}))
    }

    /// The type and payload of the object.
    pub fn kind(&self) -> &ObjectKind
    {
        &self.kind
    }

    /// Whether the current collection cycle found the object reachable.
    ///
    /// This is always false outside of a collection cycle.
    pub fn is_marked(&self) -> bool
    {
        self.marked
    }

    /// The objects this object references, in head-then-tail order.
    pub fn children(&self) -> impl Iterator<Item = ObjectId>
    {
        let children = match self.kind {
            ObjectKind::Integer(_) => None,
            ObjectKind::Pair(Pair{head, tail}) => Some([head, tail]),
        };
        children.into_iter().flatten()
    }
}
