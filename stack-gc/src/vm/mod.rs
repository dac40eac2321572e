pub use self::display::*;

use {
    crate::{
        Error,
        RootStack,
        heap::{Object, ObjectId, ObjectKind, Pair, Registry, mark_all, sweep},
    },
    log::{debug, trace},
};

mod display;

/// Maximum number of entries on the root stack.
pub const STACK_MAX: usize = 256;

/// Number of live objects at which the first collection is triggered.
///
/// The threshold never drops below this value.
pub const DEFAULT_THRESHOLD: usize = 8;

/// Stack machine with a garbage-collected heap.
///
/// The operand stack is the root set:
/// an object survives a collection if and only if it is
/// reachable from the stack through the heads and tails of pairs.
///
/// Dropping the VM, or calling [`teardown`][`Self::teardown`],
/// clears the stack and runs one final collection,
/// which frees every object.
#[derive(Debug)]
pub struct Vm
{
    stack: RootStack,
    heap: Registry,

    // INVARIANT: Never below DEFAULT_THRESHOLD.
    threshold: usize,
}

/// Statistics of a collection cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Collection
{
    /// Number of objects freed by the cycle.
    pub collected: usize,

    /// Number of objects that survived the cycle.
    pub remaining: usize,
}

impl Vm
{
    /// Create a VM with an empty stack and an empty heap.
    pub fn new() -> Self
    {
        Self{
            stack: RootStack::with_capacity(STACK_MAX),
            heap: Registry::new(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// The number of live objects.
    pub fn num_objects(&self) -> usize
    {
        self.heap.len()
    }

    /// The number of live objects at which the next allocation
    /// triggers a collection.
    pub fn threshold(&self) -> usize
    {
        self.threshold
    }

    /// The roots, from bottom to top of the stack.
    pub fn stack(&self) -> &[ObjectId]
    {
        self.stack.as_slice()
    }

    /// Look up a live object.
    pub fn object(&self, id: ObjectId) -> Option<&Object>
    {
        self.heap.get(id)
    }

    /// Iterate over all live objects, reachable or not.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)>
    {
        self.heap.iter()
    }

    /// Allocate an object, collecting garbage first if needed.
    ///
    /// The threshold check happens before `build` is called,
    /// so `build` may pop operands off the stack:
    /// they are still roots if a collection is triggered.
    /// No collection can occur between `build` and the insertion.
    fn allocate<F>(&mut self, build: F) -> ObjectId
        where F: FnOnce(&mut RootStack) -> Object
    {
        if self.heap.len() >= self.threshold {
            trace!("Reached threshold of {} objects", self.threshold);
            self.collect();
        }
        let object = build(&mut self.stack);
        self.heap.insert(object)
    }

    /// Allocate an integer and push it onto the stack.
    ///
    /// Fails without allocating if the stack is full.
    pub fn try_push_integer(&mut self, value: i64) -> Result<ObjectId, Error>
    {
        if self.stack.is_full() {
            return Err(Error::StackOverflow);
        }
        let id = self.allocate(|_| Object::integer(value));
        self.stack.push(id);
        Ok(id)
    }

    /// Allocate an integer and push it onto the stack.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::StackOverflow`] if the stack is full.
    pub fn push_integer(&mut self, value: i64) -> ObjectId
    {
        self.try_push_integer(value).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Pop the top of the stack.
    ///
    /// The popped object is no longer a root,
    /// and may be freed by the next collection.
    pub fn try_pop(&mut self) -> Result<ObjectId, Error>
    {
        self.stack.try_pop()
    }

    /// Pop the top of the stack.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::StackUnderflow`] if the stack is empty.
    pub fn pop(&mut self) -> ObjectId
    {
        self.stack.pop()
    }

    /// Replace the top two entries of the stack with a pair of them.
    ///
    /// The topmost entry becomes the tail, the one below it the head.
    /// Fails without allocating if the stack has fewer than two entries.
    pub fn try_combine_pair(&mut self) -> Result<ObjectId, Error>
    {
        if self.stack.len() < 2 {
            return Err(Error::StackUnderflow);
        }
        let id = self.allocate(|stack| {
            let tail = stack.pop();
            let head = stack.pop();
            Object::pair(head, tail)
        });
        self.stack.push(id);
        Ok(id)
    }

    /// Replace the top two entries of the stack with a pair of them.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::StackUnderflow`]
    /// if the stack has fewer than two entries.
    pub fn combine_pair(&mut self) -> ObjectId
    {
        self.try_combine_pair().unwrap_or_else(|err| panic!("{}", err))
    }

    /// Make `value` the head of `pair`.
    pub fn set_head(&mut self, pair: ObjectId, value: ObjectId)
        -> Result<(), Error>
    {
        self.set_field(pair, value, |pair| &mut pair.head)
    }

    /// Make `value` the tail of `pair`.
    pub fn set_tail(&mut self, pair: ObjectId, value: ObjectId)
        -> Result<(), Error>
    {
        self.set_field(pair, value, |pair| &mut pair.tail)
    }

    fn set_field<F>(&mut self, pair: ObjectId, value: ObjectId, field: F)
        -> Result<(), Error>
        where F: FnOnce(&mut Pair) -> &mut ObjectId
    {
        let value_live = self.heap.get(value).is_some();
        let object = self.heap.get_mut(pair).ok_or(Error::Dangling(pair))?;
        let ObjectKind::Pair(payload) = &mut object.kind else {
            return Err(Error::NotAPair(pair));
        };
        if !value_live {
            return Err(Error::Dangling(value));
        }
        *field(payload) = value;
        Ok(())
    }

    /// Run a full collection cycle, regardless of the threshold.
    ///
    /// Afterwards the threshold is twice the number of survivors,
    /// but at least [`DEFAULT_THRESHOLD`].
    pub fn collect(&mut self) -> Collection
    {
        let before = self.heap.len();

        mark_all(&mut self.heap, &self.stack);
        let collected = sweep(&mut self.heap);
        let remaining = self.heap.len();
        debug_assert_eq!(before - collected, remaining);

        let threshold = remaining.saturating_mul(2).max(DEFAULT_THRESHOLD);
        if threshold != self.threshold {
            trace!("Threshold changed from {} to {}", self.threshold, threshold);
        }
        self.threshold = threshold;

        debug!("Collected {} objects, {} remaining.", collected, remaining);

        Collection{collected, remaining}
    }

    /// Destroy the VM, freeing every object.
    ///
    /// Returns the statistics of the final collection.
    pub fn teardown(mut self) -> Collection
    {
        self.reclaim()
    }

    fn reclaim(&mut self) -> Collection
    {
        self.stack.clear();
        self.collect()
    }
}

impl Default for Vm
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Drop for Vm
{
    fn drop(&mut self)
    {
        // Torn down VMs have nothing left to free.
        if !self.heap.is_empty() {
            self.reclaim();
        }
    }
}
