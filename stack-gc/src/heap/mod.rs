//! Garbage-collected heap.
//!
//! # Design of the heap
//!
//! Objects do not point to each other with pointers.
//! Instead every object lives in a slot of the [registry][`Registry`],
//! and pairs refer to their head and tail by [`ObjectId`].
//! The registry is the sole owner of every object;
//! object identifiers are plain copyable values that own nothing.
//!
//! ## Object identifiers
//!
//! An object identifier consists of a slot index and a generation.
//! Freeing an object bumps the generation of its slot,
//! so an identifier of a freed object never resolves again,
//! not even after the slot is reused for a new object.
//!
//! ## Collection
//!
//! A collection cycle consists of two phases:
//!
//!  1. [`mark_all`] marks every object reachable from the roots.
//!     Marking uses an explicit worklist rather than recursion,
//!     so deep chains of pairs cannot exhaust the call stack.
//!  2. [`sweep`] frees every unmarked object
//!     and clears the mark bits of the survivors.
//!
//! Outside of a collection cycle every mark bit is clear.
//! Scheduling of collection cycles is up to the owner of the heap;
//! see [`Vm`][`crate::Vm`].

pub use self::{mark::*, object::*, registry::*, sweep::*};

mod mark;
mod object;
mod registry;
mod sweep;
