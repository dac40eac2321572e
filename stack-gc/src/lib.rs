//! Mark-and-sweep garbage collector for a toy stack machine.
//!
//! The [`Vm`] owns an operand stack of object references, which is the
//! only root set, and a registry of every live object.
//! Allocations that cross the collection threshold first run
//! a full stop-the-world collection, see [`Vm::collect`].

#![warn(missing_docs)]

pub use self::{error::*, heap::*, stack::*, vm::*};

mod error;
mod stack;
mod vm;

pub mod heap;
