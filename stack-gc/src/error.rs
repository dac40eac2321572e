use {crate::heap::ObjectId, thiserror::Error};

/// Returned when a VM operation violates its contract.
///
/// The panicking operations on [`Vm`][`crate::Vm`] and
/// [`RootStack`][`crate::RootStack`] panic with these messages.
/// Their `try_` counterparts return them instead.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error
{
    /// The root stack is at capacity.
    #[error("Stack overflow")]
    StackOverflow,

    /// The root stack holds fewer entries than the operation consumes.
    #[error("Stack underflow")]
    StackUnderflow,

    /// The object is an integer where a pair was expected.
    #[error("Object {0} is not a pair")]
    NotAPair(ObjectId),

    /// The object was already freed by the garbage collector.
    #[error("Object {0} was freed")]
    Dangling(ObjectId),
}
