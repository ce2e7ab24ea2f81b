//! Tests for decorator chaining, selectivity and argument threading

use std::sync::{Arc, Mutex};

use seam_application::{DecoratorOrder, Registry, RegistryOptions};
use seam_domain::{CapabilitySet, TypeToken};

use crate::test_utils::*;

fn two_decorator_registry(options: RegistryOptions) -> Registry {
    let mut registry = Registry::with_options(options);
    register_command_handler(&mut registry, || CommandHandler1);
    registry
        .register_named_decorator("d1", handler_family(), |_| true, tagged("d1"))
        .unwrap();
    registry
        .register_named_decorator("d2", handler_family(), |_| true, tagged("d2"))
        .unwrap();
    registry
}

#[test]
fn test_earliest_decorator_is_innermost_by_default() {
    let container = two_decorator_registry(RegistryOptions::default())
        .freeze()
        .unwrap();
    let handler = container
        .resolve_one_as::<SharedHandler<Command>>(&handler_key::<Command>())
        .unwrap();

    assert_eq!(chain(&handler), ["d2", "d1", "CommandHandler1"]);
    assert_eq!(handler.handle(&Command), "d2(d1(CommandHandler1))");
}

#[test]
fn test_latest_innermost_policy_reverses_nesting() {
    let options = RegistryOptions::default().with_decorator_order(DecoratorOrder::LatestInnermost);
    let container = two_decorator_registry(options).freeze().unwrap();
    let handler = container
        .resolve_one_as::<SharedHandler<Command>>(&handler_key::<Command>())
        .unwrap();

    assert_eq!(chain(&handler), ["d1", "d2", "CommandHandler1"]);
    let names: Vec<&str> = container
        .decorators(handler_family())
        .iter()
        .map(|d| d.name())
        .collect();
    assert_eq!(names, ["d2", "d1"]);
}

#[test]
fn test_positions_count_from_the_base_instance() {
    let positions: Arc<Mutex<Vec<(String, usize)>>> = Arc::default();
    let mut registry = Registry::new();
    register_command_handler(&mut registry, || CommandHandler1);
    for name in ["first", "second", "third"] {
        let positions = positions.clone();
        registry
            .register_named_decorator(name, handler_family(), |_| true, move |context, inner| {
                positions
                    .lock()
                    .unwrap()
                    .push((context.decorator_name().to_string(), context.position()));
                Ok(inner)
            })
            .unwrap();
    }

    registry
        .freeze()
        .unwrap()
        .resolve_sequence(&handler_key::<Command>())
        .unwrap();

    let positions = positions.lock().unwrap();
    assert_eq!(
        *positions,
        [
            ("first".to_string(), 0),
            ("second".to_string(), 1),
            ("third".to_string(), 2)
        ]
    );
}

#[test]
fn test_predicate_rejection_leaves_registration_undecorated() {
    let mut registry = Registry::new();
    register_command_handler(&mut registry, || CommandHandler1);
    // Declares only Handler<Command>, not CommandHandler<Command>
    registry
        .register_type::<LabelledHandler, _>(handler_key::<Command>(), CapabilitySet::new(), |_| {
            let handler: SharedHandler<Command> = Arc::new(LabelledHandler {
                label: "plain".to_string(),
            });
            Ok(seam_domain::Instance::new(handler))
        })
        .unwrap();
    register_command_handler(&mut registry, || CommandHandler2);
    registry
        .register_decorator(handler_family(), is_command_handler, tagged("decorated"))
        .unwrap();

    let handlers = registry
        .freeze()
        .unwrap()
        .resolve_sequence_as::<SharedHandler<Command>>(&handler_key::<Command>())
        .unwrap();

    assert_eq!(chain(&handlers[0]), ["decorated", "CommandHandler1"]);
    assert_eq!(chain(&handlers[1]), ["plain"]);
    assert_eq!(chain(&handlers[2]), ["decorated", "CommandHandler2"]);
}

#[test]
fn test_query_handlers_are_not_decorated_by_command_decorator() {
    let mut registry = Registry::new();
    register_command_handler(&mut registry, || CommandHandler1);
    register_query_handler(&mut registry);
    registry
        .register_decorator(handler_family(), is_command_handler, tagged("decorated"))
        .unwrap();
    let container = registry.freeze().unwrap();

    let queries = container
        .resolve_sequence_as::<SharedHandler<Query>>(&handler_key::<Query>())
        .unwrap();
    assert_eq!(chain(&queries[0]), ["QueryHandler1"]);
}

#[test]
fn test_one_generic_decorator_serves_every_argument() {
    let arguments: Arc<Mutex<Vec<TypeToken>>> = Arc::default();
    let recorder = arguments.clone();
    let wrap = tagged("audit");

    let mut registry = Registry::new();
    register_command_handler(&mut registry, || CommandHandler1);
    register_query_handler(&mut registry);
    registry
        .register_decorator(handler_family(), |_| true, move |context, inner| {
            recorder.lock().unwrap().push(context.argument());
            wrap(context, inner)
        })
        .unwrap();
    let container = registry.freeze().unwrap();

    let command = container
        .resolve_one_as::<SharedHandler<Command>>(&handler_key::<Command>())
        .unwrap();
    let query = container
        .resolve_one_as::<SharedHandler<Query>>(&handler_key::<Query>())
        .unwrap();

    assert_eq!(command.handle(&Command), "audit(CommandHandler1)");
    assert_eq!(query.handle(&Query), "audit(QueryHandler1)");
    assert_eq!(
        *arguments.lock().unwrap(),
        [TypeToken::of::<Command>(), TypeToken::of::<Query>()]
    );
}

#[test]
fn test_decorators_only_apply_to_their_target_family() {
    enum OtherContract {}

    let mut registry = Registry::new();
    register_command_handler(&mut registry, || CommandHandler1);
    registry
        .register_decorator(
            seam_domain::ContractFamily::of::<OtherContract>(),
            |_| true,
            tagged("never"),
        )
        .unwrap();

    let handler = registry
        .freeze()
        .unwrap()
        .resolve_one_as::<SharedHandler<Command>>(&handler_key::<Command>())
        .unwrap();
    assert_eq!(chain(&handler), ["CommandHandler1"]);
}
