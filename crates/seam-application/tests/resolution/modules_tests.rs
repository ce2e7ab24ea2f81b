//! Tests for registration modules and container introspection

use seam_application::{
    ModuleEntry, REGISTRATION_MODULES, Registry, RegistrationModule, install_linked_modules,
    list_linked_modules,
};
use seam_domain::{Error, Result};

use crate::test_utils::*;

fn install_command_handlers(registry: &mut Registry) -> Result<()> {
    register_command_handler(registry, || CommandHandler1);
    register_command_handler(registry, || CommandHandler2);
    registry.register_named_decorator(
        "CommandHandlerDecorator",
        handler_family(),
        is_command_handler,
        tagged("CommandHandlerDecorator"),
    )?;
    Ok(())
}

fn install_query_handlers(registry: &mut Registry) -> Result<()> {
    register_query_handler(registry);
    Ok(())
}

#[linkme::distributed_slice(REGISTRATION_MODULES)]
static COMMAND_HANDLERS: ModuleEntry = ModuleEntry {
    name: "command-handlers",
    description: "Command handlers with their decorator",
    install: install_command_handlers,
};

#[linkme::distributed_slice(REGISTRATION_MODULES)]
static QUERY_HANDLERS: ModuleEntry = ModuleEntry {
    name: "query-handlers",
    description: "Query handlers",
    install: install_query_handlers,
};

struct SingleHandlerModule;

impl RegistrationModule for SingleHandlerModule {
    fn name(&self) -> &str {
        "single-handler"
    }

    fn install(&self, registry: &mut Registry) -> Result<()> {
        register_command_handler(registry, || LabelledHandler {
            label: "from-module".to_string(),
        });
        Ok(())
    }
}

/// Registers a handler and a decorator, then fails
struct HalfInstalledModule;

impl RegistrationModule for HalfInstalledModule {
    fn name(&self) -> &str {
        "half-installed"
    }

    fn install(&self, registry: &mut Registry) -> Result<()> {
        register_command_handler(registry, || CommandHandler1);
        registry.register_named_decorator("orphan", handler_family(), |_| true, tagged("orphan"))?;
        Err(Error::configuration("handler settings missing"))
    }
}

#[test]
fn test_linked_modules_are_listed_by_name() {
    let modules = list_linked_modules();
    let names: Vec<&str> = modules.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["command-handlers", "query-handlers"]);
}

#[test]
fn test_scanned_registrations_behave_like_explicit_ones() {
    let mut registry = Registry::new();
    let installed = install_linked_modules(&mut registry, None).unwrap();
    assert_eq!(installed, ["command-handlers", "query-handlers"]);

    let container = registry.freeze().unwrap();
    let handlers = container
        .resolve_sequence_as::<SharedHandler<Command>>(&handler_key::<Command>())
        .unwrap();
    assert_eq!(chain(&handlers[0]), ["CommandHandlerDecorator", "CommandHandler1"]);
    assert_eq!(chain(&handlers[1]), ["CommandHandlerDecorator", "CommandHandler2"]);
}

#[test]
fn test_module_filter() {
    let mut registry = Registry::new();
    let only = vec!["query-handlers".to_string()];
    let installed = install_linked_modules(&mut registry, Some(&only)).unwrap();
    assert_eq!(installed, ["query-handlers"]);
    assert_eq!(registry.len(), 1);

    let unknown = vec!["missing".to_string()];
    let error = install_linked_modules(&mut registry, Some(&unknown)).unwrap_err();
    match error {
        Error::Configuration { message, .. } => {
            assert!(message.contains("missing"));
            assert!(message.contains("command-handlers"));
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_explicit_module_install() {
    let mut registry = Registry::new();
    registry.install(&SingleHandlerModule).unwrap();
    assert_eq!(registry.registrations_for(&handler_key::<Command>()).len(), 1);

    registry.freeze().unwrap();
    assert!(matches!(
        registry.install(&SingleHandlerModule),
        Err(Error::FrozenRegistryMutation { operation: "install" })
    ));
}

#[test]
fn test_container_summary() {
    let mut registry = Registry::new();
    install_command_handlers(&mut registry).unwrap();
    install_query_handlers(&mut registry).unwrap();
    let container = registry.freeze().unwrap();

    assert_eq!(container.len(), 3);
    assert_eq!(container.decorator_count(), 1);
    assert_eq!(container.keys().len(), 2);

    let summary = container.summary();
    let orders: Vec<u64> = summary.registrations.iter().map(|r| r.order).collect();
    assert_eq!(orders, [0, 1, 2]);
    assert_eq!(summary.decorators[0].name, "CommandHandlerDecorator");

    let text = summary.to_string();
    assert!(text.contains("#0 CommandHandler1 as HandlerContract<Command>"));
    assert!(text.contains("CommandHandlerDecorator over HandlerContract<_>"));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["decorator_order"], "earliest_innermost");
    assert_eq!(json["registrations"].as_array().unwrap().len(), 3);
}

#[test]
fn test_failed_module_leaves_no_registrations() {
    let mut registry = Registry::new();
    register_query_handler(&mut registry);

    let result = registry.install(&HalfInstalledModule);
    assert!(matches!(result, Err(Error::Configuration { .. })));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.decorator_count(), 0);
    assert!(registry.registrations_for(&handler_key::<Command>()).is_empty());

    // Released order indices are handed out again
    let next = register_command_handler(&mut registry, || CommandHandler2);
    assert_eq!(next.order(), 1);

    let container = registry.freeze().unwrap();
    let handlers = container
        .resolve_sequence_as::<SharedHandler<Command>>(&handler_key::<Command>())
        .unwrap();
    assert_eq!(handlers.len(), 1);
    assert_eq!(chain(&handlers[0]), ["CommandHandler2"]);
}
