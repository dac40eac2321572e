//! Debug rendering of objects and the stack.
//!
//! Integers render as their decimal value and pairs as `(head, tail)`.
//! A pair that is already being rendered further up renders as `...`,
//! so that cyclic graphs render in finite space.

use {
    super::Vm,
    crate::heap::{ObjectId, ObjectKind, Pair, Registry},
    smallvec::SmallVec,
    std::fmt,
};

/// Displays an object, see [`Vm::dump_object`].
pub struct ObjectDump<'a>
{
    heap: &'a Registry,
    id: ObjectId,
}

/// Displays the stack, see [`Vm::dump_stack`].
pub struct StackDump<'a>
{
    vm: &'a Vm,
}

impl Vm
{
    /// Render an object and everything it references.
    pub fn dump_object(&self, id: ObjectId) -> ObjectDump
    {
        ObjectDump{heap: &self.heap, id}
    }

    /// Render every stack entry on its own line, bottom first.
    pub fn dump_stack(&self) -> StackDump
    {
        StackDump{vm: self}
    }
}

impl<'a> fmt::Display for ObjectDump<'a>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        render(f, self.heap, self.id, &mut SmallVec::new())
    }
}

impl<'a> fmt::Display for StackDump<'a>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        for (i, &id) in self.vm.stack().iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {}", i, self.vm.dump_object(id))?;
        }
        Ok(())
    }
}

/// `path` holds the pairs enclosing the object being rendered.
fn render(
    f: &mut fmt::Formatter,
    heap: &Registry,
    id: ObjectId,
    path: &mut SmallVec<[ObjectId; 8]>,
) -> fmt::Result
{
    let Some(object) = heap.get(id) else {
        return write!(f, "<freed>");
    };

    match *object.kind() {
        ObjectKind::Integer(value) =>
            write!(f, "{}", value),

        ObjectKind::Pair(Pair{head, tail}) => {
            if path.contains(&id) {
                return write!(f, "...");
            }
            path.push(id);
            write!(f, "(")?;
            render(f, heap, head, path)?;
            write!(f, ", ")?;
            render(f, heap, tail, path)?;
            write!(f, ")")?;
            path.pop();
            Ok(())
        },
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn dump_stack_renders_one_line_per_entry()
    {
        let mut vm = Vm::new();
        vm.push_integer(-7);
        vm.push_integer(1);
        vm.push_integer(2);
        vm.combine_pair();
        assert_eq!(vm.dump_stack().to_string(), "  0: -7\n  1: (1, 2)");
    }

    #[test]
    fn dump_stack_of_empty_stack_is_empty()
    {
        assert_eq!(Vm::new().dump_stack().to_string(), "");
    }

    #[test]
    fn shared_subgraphs_are_rendered_twice()
    {
        let mut vm = Vm::new();
        vm.push_integer(1);
        vm.push_integer(2);
        let p = vm.combine_pair();
        vm.push_integer(3);
        let q = vm.combine_pair();
        vm.set_tail(q, p).unwrap();
        vm.set_head(q, p).unwrap();
        assert_eq!(vm.dump_object(q).to_string(), "((1, 2), (1, 2))");
    }

    #[test]
    fn freed_objects_are_marked_as_such()
    {
        let mut vm = Vm::new();
        vm.push_integer(1);
        let id = vm.pop();
        vm.collect();
        assert_eq!(vm.dump_object(id).to_string(), "<freed>");
    }

    #[test]
    fn self_referencing_pair()
    {
        let mut vm = Vm::new();
        vm.push_integer(1);
        vm.push_integer(2);
        let p = vm.combine_pair();
        vm.set_tail(p, p).unwrap();
        assert_eq!(vm.dump_object(p).to_string(), "(1, ...)");
    }
}
