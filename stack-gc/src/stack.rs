use {crate::{Error, heap::ObjectId}, std::slice};

/// Bounded operand stack of object references.
///
/// Every entry is a root for the garbage collector.
/// The order of entries matters for pushing and popping,
/// but not for reachability.
#[derive(Debug)]
pub struct RootStack
{
    // INVARIANT: entries.len() <= capacity.
    entries: Vec<ObjectId>,
    capacity: usize,
}

impl RootStack
{
    /// Create an empty stack that holds at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self
    {
        Self{entries: Vec::with_capacity(capacity), capacity}
    }

    /// The number of entries on the stack.
    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    /// Whether the stack has no entries.
    pub fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }

    /// The maximum number of entries on the stack.
    pub fn capacity(&self) -> usize
    {
        self.capacity
    }

    /// Whether another entry can be pushed.
    pub fn is_full(&self) -> bool
    {
        self.entries.len() >= self.capacity
    }

    /// The entries, from bottom to top.
    pub fn as_slice(&self) -> &[ObjectId]
    {
        &self.entries
    }

    /// Iterate over the entries, from bottom to top.
    pub fn iter(&self) -> slice::Iter<ObjectId>
    {
        self.entries.iter()
    }

    /// Push an entry, failing if the stack is full.
    pub fn try_push(&mut self, id: ObjectId) -> Result<(), Error>
    {
        if self.is_full() {
            return Err(Error::StackOverflow);
        }
        self.entries.push(id);
        Ok(())
    }

    /// Pop the most recently pushed entry, failing if the stack is empty.
    pub fn try_pop(&mut self) -> Result<ObjectId, Error>
    {
        self.entries.pop().ok_or(Error::StackUnderflow)
    }

    /// Push an entry.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::StackOverflow`] if the stack is full.
    pub fn push(&mut self, id: ObjectId)
    {
        self.try_push(id).unwrap_or_else(|err| panic!("{}", err));
    }

    /// Pop the most recently pushed entry.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::StackUnderflow`] if the stack is empty.
    pub fn pop(&mut self) -> ObjectId
    {
        self.try_pop().unwrap_or_else(|err| panic!("{}", err))
    }

    /// Remove every entry.
    pub fn clear(&mut self)
    {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a RootStack
{
    type Item = &'a ObjectId;
    type IntoIter = slice::Iter<'a, ObjectId>;

    fn into_iter(self) -> Self::IntoIter
    {
        self.iter()
    }
}

#[cfg(test)]
mod tests
{
    use {super::*, crate::heap::{Object, Registry}};

    fn ids(n: usize) -> Vec<ObjectId>
    {
        let mut registry = Registry::new();
        (0 .. n).map(|_| registry.insert(Object::integer(0))).collect()
    }

    #[test]
    fn pop_is_last_in_first_out()
    {
        let ids = ids(3);
        let mut stack = RootStack::with_capacity(3);
        for &id in &ids {
            stack.push(id);
        }
        assert_eq!(stack.as_slice(), &ids[..]);
        assert_eq!(stack.pop(), ids[2]);
        assert_eq!(stack.pop(), ids[1]);
        assert_eq!(stack.pop(), ids[0]);
        assert!(stack.is_empty());
    }

    #[test]
    fn try_push_reports_overflow()
    {
        let ids = ids(3);
        let mut stack = RootStack::with_capacity(2);
        assert_eq!(stack.try_push(ids[0]), Ok(()));
        assert_eq!(stack.try_push(ids[1]), Ok(()));
        assert!(stack.is_full());
        assert_eq!(stack.try_push(ids[2]), Err(Error::StackOverflow));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn try_pop_reports_underflow()
    {
        let mut stack = RootStack::with_capacity(1);
        assert_eq!(stack.try_pop(), Err(Error::StackUnderflow));
    }

    #[test]
    #[should_panic(expected = "Stack overflow")]
    fn push_panics_on_overflow()
    {
        let ids = ids(1);
        let mut stack = RootStack::with_capacity(0);
        stack.push(ids[0]);
    }

    #[test]
    #[should_panic(expected = "Stack underflow")]
    fn pop_panics_on_underflow()
    {
        RootStack::with_capacity(4).pop();
    }
}
