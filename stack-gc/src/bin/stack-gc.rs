use {
    log::{debug, info},
    stack_gc::Vm,
    std::env::args,
};

fn main()
{
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("debug"),
    ).init();

    objects_on_stack_are_preserved();
    unreached_objects_are_collected();
    nested_objects_are_reached();
    cycles_are_handled();
    cycles_are_collected();

    // The stress test is noisy; it logs a collection every few pushes.
    if args().skip(1).any(|arg| arg == "--stress") {
        stress();
    }
}

/// Run a scenario and check the number of live objects it leaves behind.
fn scenario<F>(number: u32, title: &str, expected: usize, f: F)
    where F: FnOnce(&mut Vm)
{
    info!("Test {}: {}", number, title);

    let mut vm = Vm::new();
    f(&mut vm);
    vm.collect();
    assert_eq!(vm.num_objects(), expected);

    info!("Test {}: Completed.", number);
    vm.teardown();
}

fn objects_on_stack_are_preserved()
{
    scenario(1, "Objects on stack are preserved.", 2, |vm| {
        vm.push_integer(1);
        vm.push_integer(2);
        debug!("Stack:\n{}", vm.dump_stack());
    });
}

fn unreached_objects_are_collected()
{
    scenario(2, "Unreached objects are collected.", 0, |vm| {
        vm.push_integer(1);
        vm.push_integer(2);
        vm.pop();
        vm.pop();
        debug!("Stack:\n{}", vm.dump_stack());
    });
}

fn nested_objects_are_reached()
{
    scenario(3, "Reach nested objects.", 7, |vm| {
        vm.push_integer(1);
        vm.push_integer(2);
        vm.combine_pair();
        vm.push_integer(3);
        vm.push_integer(4);
        vm.combine_pair();
        vm.combine_pair();
        debug!("Stack:\n{}", vm.dump_stack());
    });
}

/// Build pairs A and B on the stack with A -> B -> A through their tails.
fn push_cycle(vm: &mut Vm)
{
    vm.push_integer(1);
    vm.push_integer(2);
    let a = vm.combine_pair();
    vm.push_integer(3);
    vm.push_integer(4);
    let b = vm.combine_pair();

    // Both are freshly allocated pairs, so this cannot fail.
    vm.set_tail(a, b).and_then(|()| vm.set_tail(b, a))
        .unwrap_or_else(|err| panic!("{}", err));

    debug!("Stack:\n{}", vm.dump_stack());
}

fn cycles_are_handled()
{
    scenario(4, "Handle cycles.", 4, push_cycle);
}

fn cycles_are_collected()
{
    scenario(5, "Collect cycles.", 0, |vm| {
        push_cycle(vm);
        vm.pop();
        vm.pop();
    });
}

fn stress()
{
    scenario(6, "Stress test.", 0, |vm| {
        for i in 0 .. 1000 {
            for _ in 0 .. 20 {
                vm.push_integer(i);
            }
            for _ in 0 .. 20 {
                vm.pop();
            }
        }
    });
}
