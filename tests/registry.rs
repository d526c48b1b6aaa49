//! Integration tests for the driver-facing registry contract

mod common;

use std::fs;

use retask::{Registry, RetaskError, RunOutcome, Runner, Task, TaskContext, TaskDecl};

use common::workspace;

struct Hello;
impl Task for Hello {
    fn name(&self) -> &'static str {
        "Hello"
    }
    fn decl(&self) -> TaskDecl {
        TaskDecl::new("greetings", "hello.txt")
    }
    fn run(&self, ctx: &mut TaskContext) -> anyhow::Result<()> {
        fs::write(ctx.output_path(), b"hello")?;
        Ok(())
    }
}
fn hello() -> Box<dyn Task> {
    Box::new(Hello)
}

#[test]
fn run_by_name_through_registry() {
    let root = workspace();
    let runner = Runner::new(root.path());

    let mut registry = Registry::new();
    registry.register(hello).unwrap();

    let outcome = registry.run(&runner, "Hello").unwrap();
    assert_eq!(outcome, RunOutcome::Finished);
    assert!(root.path().join("greetings/OUTPUT/hello.txt").exists());
}

#[test]
fn unknown_name_fails_without_filesystem_side_effects() {
    let root = workspace();
    let runner = Runner::new(root.path());

    let mut registry = Registry::new();
    registry.register(hello).unwrap();

    let err = registry.run(&runner, "Goodbye").unwrap_err();
    assert!(matches!(err, RetaskError::Contract(_)));
    assert!(err.to_string().contains("Task 'Goodbye' is not defined"));

    // no runner invocation happened
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn names_are_sorted_for_listing() {
    let mut registry = Registry::new();

    struct Zeta;
    impl Task for Zeta {
        fn name(&self) -> &'static str {
            "Zeta"
        }
        fn decl(&self) -> TaskDecl {
            TaskDecl::new("d", "z.out")
        }
        fn run(&self, _ctx: &mut TaskContext) -> anyhow::Result<()> {
            Ok(())
        }
    }
    fn zeta() -> Box<dyn Task> {
        Box::new(Zeta)
    }

    registry.register(zeta).unwrap();
    registry.register(hello).unwrap();
    assert_eq!(registry.names(), vec!["Hello", "Zeta"]);
}
