//! Unit tests for the WindowRegistry.

use lernova::managers::window_registry::{WindowRegistry, WindowRegistryTrait};
use lernova::types::errors::WindowError;
use lernova::types::window::WindowId;

#[test]
fn test_new_registry_is_empty() {
    let registry: WindowRegistry<&str> = WindowRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.ids().is_empty());
}

#[test]
fn test_add_assigns_unique_ids_in_creation_order() {
    let mut registry = WindowRegistry::new();
    let a = registry.add("main");
    let b = registry.add("popup");

    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.ids(), vec![a, b]);
    assert_eq!(registry.get(&a), Some(&"main"));
    assert_eq!(registry.get(&b), Some(&"popup"));
}

#[test]
fn test_remove_returns_handle_and_forgets_window() {
    let mut registry = WindowRegistry::new();
    let a = registry.add("main".to_string());
    let b = registry.add("popup".to_string());

    let removed = registry.remove(&a).unwrap();

    assert_eq!(removed, "main");
    assert!(registry.get(&a).is_none());
    assert_eq!(registry.ids(), vec![b]);
}

#[test]
fn test_remove_unknown_id_is_not_found() {
    let mut registry: WindowRegistry<u32> = WindowRegistry::new();
    let stranger = WindowId::new();

    match registry.remove(&stranger) {
        Err(WindowError::NotFound(id)) => assert_eq!(id, stranger.to_string()),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_remove_twice_fails_second_time() {
    let mut registry = WindowRegistry::new();
    let a = registry.add(1u32);

    assert!(registry.remove(&a).is_ok());
    assert!(registry.remove(&a).is_err());
    assert!(registry.is_empty());
}

#[test]
fn test_get_mut_updates_handle() {
    let mut registry = WindowRegistry::new();
    let a = registry.add(10u32);

    *registry.get_mut(&a).unwrap() += 5;

    assert_eq!(registry.get(&a), Some(&15));
}

#[test]
fn test_find_matches_first_in_creation_order() {
    let mut registry = WindowRegistry::new();
    let _a = registry.add(("main", 1));
    let b = registry.add(("popup", 2));
    let _c = registry.add(("popup", 3));

    assert_eq!(registry.find(|(kind, _)| *kind == "popup"), Some(b));
    assert_eq!(registry.find(|(kind, _)| *kind == "settings"), None);
}
