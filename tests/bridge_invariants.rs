//! Bridge Invariant Tests
//!
//! Behavioral guarantees of the four operations:
//! - Validation order is source, schema, key, then range
//! - A rejected write never mutates the store
//! - Array writes are all-or-nothing
//! - Unsupported tags are hard errors on both directions
//! - Error messages are stable

use settings_bridge::bridge::{BridgeErrorKind, SettingsBridge};
use settings_bridge::schema::{KeyRange, Schema, SchemaKey, SchemaLoader};
use settings_bridge::store::MemoryStore;
use settings_bridge::variant::{DynamicValue, Variant};

const DESKTOP: &str = "org.example.desktop";
const TERMINAL: &str = "org.example.terminal";

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_bridge() -> SettingsBridge<MemoryStore> {
    let mut loader = SchemaLoader::new();
    loader
        .register(Schema::new(
            DESKTOP,
            vec![
                SchemaKey::new("animations", Variant::Boolean(true)),
                SchemaKey::new("cursor-size", Variant::Int32(24)).with_range(KeyRange::Range {
                    min: Variant::Int32(8),
                    max: Variant::Int32(96),
                }),
                SchemaKey::new("idle-delay", Variant::UInt32(300)),
                SchemaKey::new("text-scale", Variant::Double(1.0)),
                SchemaKey::new("font", Variant::String("Sans 11".into())),
                SchemaKey::new("theme", Variant::String("light".into())).with_range(
                    KeyRange::Choices {
                        choices: vec!["light".into(), "dark".into()],
                    },
                ),
                SchemaKey::new("favorites", Variant::StringArray(vec!["files".into()])),
                SchemaKey::new(
                    "sources",
                    Variant::StringPairArray(vec![("xkb".into(), "us".into())]),
                ),
                SchemaKey::new("epoch", Variant::Int64(0)),
                SchemaKey::new("locked", Variant::Boolean(false)).read_only(),
            ],
        ))
        .unwrap();
    loader
        .register(Schema::new(
            TERMINAL,
            vec![SchemaKey::new("bell", Variant::Boolean(false))],
        ))
        .unwrap();
    SettingsBridge::new(MemoryStore::new(loader))
}

fn strings(items: &[&str]) -> DynamicValue {
    DynamicValue::from(items.to_vec())
}

fn user_value<'a>(bridge: &'a SettingsBridge<MemoryStore>, key: &str) -> Option<&'a Variant> {
    bridge.store().user_value(DESKTOP, key)
}

// =============================================================================
// Schema Gate Tests
// =============================================================================

/// Every operation reports a missing schema source the same way.
#[test]
fn test_no_schema_source_rejects_every_operation() {
    let mut bridge = SettingsBridge::new(MemoryStore::without_schema_source());

    let errors = [
        bridge.list_keys(DESKTOP).unwrap_err(),
        bridge.get(DESKTOP, "font").unwrap_err(),
        bridge.schema_exists(DESKTOP).unwrap_err(),
        bridge
            .set(DESKTOP, "font", &DynamicValue::from("Serif"))
            .unwrap_err(),
    ];

    for err in errors {
        assert_eq!(err.kind(), BridgeErrorKind::NoSchemaSource);
        assert_eq!(err.to_string(), "No schema source available!");
    }
}

/// Reads and writes against an uninstalled schema fail before the store.
#[test]
fn test_unknown_schema_rejected() {
    let mut bridge = setup_bridge();

    let err = bridge.get("org.example.absent", "font").unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::SchemaNotFound);
    assert_eq!(err.to_string(), "Schema is not installed!");

    let err = bridge
        .set("org.example.absent", "font", &DynamicValue::from("Serif"))
        .unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::SchemaNotFound);
}

/// An undeclared key is rejected, for reads and writes alike.
#[test]
fn test_unknown_key_rejected() {
    let mut bridge = setup_bridge();

    let err = bridge.get(DESKTOP, "wallpaper").unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::KeyNotFound);
    assert_eq!(err.to_string(), "Key does not exist!");

    let err = bridge
        .set(DESKTOP, "wallpaper", &DynamicValue::from("x.png"))
        .unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::KeyNotFound);
}

/// Key validation wins over value validation.
#[test]
fn test_key_checked_before_value() {
    let mut bridge = setup_bridge();
    let err = bridge
        .set(DESKTOP, "wallpaper", &DynamicValue::Undefined)
        .unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::KeyNotFound);
}

/// A key declared by another schema does not leak across schemas.
#[test]
fn test_keys_are_scoped_to_their_schema() {
    let bridge = setup_bridge();
    let err = bridge.get(TERMINAL, "font").unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::KeyNotFound);
    assert_eq!(bridge.get(TERMINAL, "bell").unwrap(), DynamicValue::Bool(false));
}

// =============================================================================
// Enumeration Tests
// =============================================================================

#[test]
fn test_list_keys_in_declaration_order() {
    let bridge = setup_bridge();
    let keys = bridge.list_keys(DESKTOP).unwrap();
    assert_eq!(keys.first().map(String::as_str), Some("animations"));
    assert_eq!(keys.last().map(String::as_str), Some("locked"));
    assert_eq!(keys.len(), 10);
}

/// Enumerating an uninstalled schema is a store-level failure.
#[test]
fn test_list_keys_unknown_schema_is_store_failure() {
    let bridge = setup_bridge();
    let err = bridge.list_keys("org.example.absent").unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::Store);
}

#[test]
fn test_schema_exists() {
    let bridge = setup_bridge();
    assert!(bridge.schema_exists(DESKTOP).unwrap());
    assert!(bridge.schema_exists(TERMINAL).unwrap());
    assert!(!bridge.schema_exists("org.example.absent").unwrap());
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_get_decodes_each_supported_type() {
    let bridge = setup_bridge();

    assert_eq!(bridge.get(DESKTOP, "animations").unwrap(), DynamicValue::Bool(true));
    assert_eq!(bridge.get(DESKTOP, "cursor-size").unwrap(), DynamicValue::Number(24.0));
    assert_eq!(bridge.get(DESKTOP, "idle-delay").unwrap(), DynamicValue::Number(300.0));
    assert_eq!(bridge.get(DESKTOP, "text-scale").unwrap(), DynamicValue::Number(1.0));
    assert_eq!(bridge.get(DESKTOP, "font").unwrap(), DynamicValue::from("Sans 11"));
    assert_eq!(bridge.get(DESKTOP, "favorites").unwrap(), strings(&["files"]));
    assert_eq!(
        bridge.get(DESKTOP, "sources").unwrap(),
        DynamicValue::Array(vec![strings(&["xkb", "us"])])
    );
}

/// A stored type the codec cannot read is an error, never a default.
#[test]
fn test_get_unsupported_type() {
    let bridge = setup_bridge();
    let err = bridge.get(DESKTOP, "epoch").unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::UnsupportedType);
    assert_eq!(err.to_string(), "Need to implement reading that value type");
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_set_then_get() {
    let mut bridge = setup_bridge();

    bridge
        .set(DESKTOP, "animations", &DynamicValue::Bool(false))
        .unwrap();
    bridge
        .set(DESKTOP, "cursor-size", &DynamicValue::Number(48.0))
        .unwrap();
    bridge
        .set(DESKTOP, "idle-delay", &DynamicValue::Number(4294967295.0))
        .unwrap();
    bridge
        .set(DESKTOP, "text-scale", &DynamicValue::Number(1.25))
        .unwrap();
    bridge
        .set(DESKTOP, "favorites", &strings(&["files", "terminal"]))
        .unwrap();

    assert_eq!(bridge.get(DESKTOP, "animations").unwrap(), DynamicValue::Bool(false));
    assert_eq!(bridge.get(DESKTOP, "cursor-size").unwrap(), DynamicValue::Number(48.0));
    assert_eq!(
        bridge.get(DESKTOP, "idle-delay").unwrap(),
        DynamicValue::Number(4294967295.0)
    );
    assert_eq!(bridge.get(DESKTOP, "text-scale").unwrap(), DynamicValue::Number(1.25));
    assert_eq!(
        bridge.get(DESKTOP, "favorites").unwrap(),
        strings(&["files", "terminal"])
    );
}

/// A wrongly typed value leaves the store untouched.
#[test]
fn test_type_mismatch_does_not_mutate() {
    let mut bridge = setup_bridge();

    let err = bridge
        .set(DESKTOP, "animations", &DynamicValue::from("yes"))
        .unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::TypeMismatch);
    assert_eq!(err.to_string(), "Key requires boolean value!");
    assert!(user_value(&bridge, "animations").is_none());
    assert!(!bridge.store().is_dirty());
}

#[test]
fn test_type_mismatch_messages() {
    let mut bridge = setup_bridge();
    let cases = [
        ("font", DynamicValue::Number(1.0), "Key requires string value!"),
        ("text-scale", DynamicValue::from("1.5"), "Key requires a number!"),
        ("cursor-size", DynamicValue::Number(24.5), "Key requires a integer number!"),
        (
            "idle-delay",
            DynamicValue::Number(-1.0),
            "Key requires a unsigned integer number!",
        ),
        ("favorites", DynamicValue::from("files"), "Key requires an array of strings!"),
    ];

    for (key, value, message) in cases {
        let err = bridge.set(DESKTOP, key, &value).unwrap_err();
        assert_eq!(err.kind(), BridgeErrorKind::TypeMismatch, "key {}", key);
        assert_eq!(err.to_string(), message);
        assert!(user_value(&bridge, key).is_none());
    }
}

/// Out-of-range values are rejected before anything is written.
#[test]
fn test_range_violation_does_not_mutate() {
    let mut bridge = setup_bridge();

    let err = bridge
        .set(DESKTOP, "cursor-size", &DynamicValue::Number(200.0))
        .unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::RangeViolation);
    assert_eq!(err.to_string(), "Invalid range or type!");
    assert!(user_value(&bridge, "cursor-size").is_none());

    let err = bridge
        .set(DESKTOP, "theme", &DynamicValue::from("solarized"))
        .unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::RangeViolation);
    assert!(user_value(&bridge, "theme").is_none());

    bridge
        .set(DESKTOP, "cursor-size", &DynamicValue::Number(96.0))
        .unwrap();
    bridge.set(DESKTOP, "theme", &DynamicValue::from("dark")).unwrap();
}

/// One bad element rejects the whole array.
#[test]
fn test_array_write_is_all_or_nothing() {
    let mut bridge = setup_bridge();

    let mixed = DynamicValue::Array(vec![
        DynamicValue::from("files"),
        DynamicValue::Number(7.0),
        DynamicValue::from("terminal"),
    ]);
    let err = bridge.set(DESKTOP, "favorites", &mixed).unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::ArrayElementType);
    assert_eq!(err.to_string(), "Array item have to be strings!");

    assert!(user_value(&bridge, "favorites").is_none());
    assert_eq!(bridge.get(DESKTOP, "favorites").unwrap(), strings(&["files"]));
}

#[test]
fn test_empty_array_is_written() {
    let mut bridge = setup_bridge();
    bridge
        .set(DESKTOP, "favorites", &DynamicValue::Array(vec![]))
        .unwrap();
    assert_eq!(
        user_value(&bridge, "favorites"),
        Some(&Variant::StringArray(vec![]))
    );
}

/// Types the codec cannot build are refused, including readable pair arrays.
#[test]
fn test_unimplemented_write_types() {
    let mut bridge = setup_bridge();

    let err = bridge
        .set(DESKTOP, "epoch", &DynamicValue::Number(1.0))
        .unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::UnimplementedType);
    assert_eq!(err.to_string(), "We haven't implemented this type yet!");

    let pairs = DynamicValue::Array(vec![strings(&["xkb", "de"])]);
    let err = bridge.set(DESKTOP, "sources", &pairs).unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::UnimplementedType);
    assert!(user_value(&bridge, "sources").is_none());
}

#[test]
fn test_write_protected_key() {
    let mut bridge = setup_bridge();

    let err = bridge
        .set(DESKTOP, "locked", &DynamicValue::Bool(true))
        .unwrap_err();
    assert_eq!(err.kind(), BridgeErrorKind::WriteProtected);
    assert_eq!(err.to_string(), "Failed to set gsetting! Key is write protected.");
    assert_eq!(bridge.get(DESKTOP, "locked").unwrap(), DynamicValue::Bool(false));
}

/// Repeating a rejected write gives the same answer every time.
#[test]
fn test_rejection_is_deterministic() {
    let mut bridge = setup_bridge();
    for _ in 0..50 {
        let err = bridge
            .set(DESKTOP, "cursor-size", &DynamicValue::Number(4.0))
            .unwrap_err();
        assert_eq!(err.code(), "SETTINGS_RANGE_VIOLATION");
    }
    assert!(user_value(&bridge, "cursor-size").is_none());
}
