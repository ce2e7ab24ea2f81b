//! Descriptor Tests

use seam_application::Registry;
use seam_domain::constants::ANONYMOUS_DECORATOR_NAME;
use seam_domain::{CapabilitySet, ContractFamily, ContractKey, ImplementationType, Instance};

enum Handler {}
enum CommandHandler {}
struct Command;
struct Impl;

fn key() -> ContractKey {
    ContractKey::of::<Handler, Command>()
}

#[test]
fn test_registration_descriptor_views() {
    let mut registry = Registry::new();
    let capabilities = CapabilitySet::new().with(ContractKey::of::<CommandHandler, Command>());
    let handle = registry
        .register_type::<Impl, _>(key(), capabilities, |_| Ok(Instance::new(())))
        .unwrap();
    let container = registry.freeze().unwrap();

    let descriptor = &container.registrations(&key())[0];
    assert_eq!(descriptor.handle(), handle);
    assert_eq!(descriptor.key(), key());
    assert_eq!(descriptor.implementation(), ImplementationType::of::<Impl>());
    assert_eq!(descriptor.capabilities().len(), 2);
    assert!(descriptor.capabilities().contains(&key()));
    assert!(
        descriptor
            .capabilities()
            .contains_family(ContractFamily::of::<CommandHandler>())
    );
}

#[test]
fn test_decorator_descriptor_views() {
    let mut registry = Registry::new();
    let anonymous = registry
        .register_decorator(
            ContractFamily::of::<Handler>(),
            |caps| caps.contains_family(ContractFamily::of::<CommandHandler>()),
            |_, inner| Ok(inner),
        )
        .unwrap();
    let named = registry
        .register_named_decorator("audit", ContractFamily::of::<Handler>(), |_| true, |_, inner| {
            Ok(inner)
        })
        .unwrap();
    assert_eq!(anonymous.order(), 0);
    assert_eq!(named.order(), 1);
    assert_eq!(registry.decorator_count(), 2);

    let container = registry.freeze().unwrap();
    let decorators = container.decorators(ContractFamily::of::<Handler>());
    assert_eq!(decorators[0].name(), ANONYMOUS_DECORATOR_NAME);
    assert_eq!(decorators[0].handle(), anonymous);
    assert_eq!(decorators[1].name(), "audit");
    assert_eq!(decorators[1].target(), ContractFamily::of::<Handler>());

    let plain = CapabilitySet::new().with(key());
    let command = plain.clone().with(ContractKey::of::<CommandHandler, Command>());
    assert!(!decorators[0].applies_to(&plain));
    assert!(decorators[0].applies_to(&command));
    assert!(decorators[1].applies_to(&plain));
}

#[test]
fn test_empty_container() {
    let container = Registry::new().freeze().unwrap();
    assert!(container.is_empty());
    assert!(container.keys().is_empty());
    assert!(container.registrations(&key()).is_empty());
    assert!(container.decorators(ContractFamily::of::<Handler>()).is_empty());
}
