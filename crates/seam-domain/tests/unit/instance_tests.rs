//! Unit tests for opaque instances

use std::sync::Arc;

use seam_domain::{Error, Instance};

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

#[test]
fn test_trait_object_round_trip() {
    let greeter: Arc<dyn Greeter> = Arc::new(English);
    let instance = Instance::new(greeter);

    assert!(instance.is::<Arc<dyn Greeter>>());
    let recovered = instance.downcast::<Arc<dyn Greeter>>().unwrap();
    assert_eq!(recovered.greet(), "hello");
}

#[test]
fn test_downcast_mismatch_reports_types() {
    let instance = Instance::new(42_u32);
    match instance.downcast::<String>() {
        Err(Error::InstanceTypeMismatch { expected, actual }) => {
            assert!(expected.contains("String"));
            assert_eq!(actual, "u32");
        }
        other => panic!("Expected InstanceTypeMismatch, got {other:?}"),
    }
}

#[test]
fn test_clones_share_value_but_new_instances_do_not() {
    let first = Instance::new(String::from("same"));
    let clone = first.clone();
    let second = Instance::new(String::from("same"));

    assert!(first.ptr_eq(&clone));
    assert!(!first.ptr_eq(&second));
}
