use dictcast_host::{alloc, dict, error, HostErrorKind, Object};
use serde_json::json;

// ---------------------------------------------------------------------------
// JSON bridge
// ---------------------------------------------------------------------------

#[test]
fn json_objects_become_ordered_dicts() {
    let obj = Object::from_json(&json!({"z": [1, 2.5, null], "a": {"b": true}})).unwrap();
    assert_eq!(format!("{obj:?}"), "{'z': [1, 2.5, None], 'a': {'b': True}}");
    assert_eq!(obj.to_json().unwrap(), json!({"z": [1, 2.5, null], "a": {"b": true}}));
}

#[test]
fn oversized_json_integer_overflows() {
    let err = Object::from_json(&json!(u64::MAX)).unwrap_err();
    assert_eq!(err.kind, HostErrorKind::OverflowError);
    error::clear();
}

#[test]
fn non_string_keys_are_not_json() {
    let obj = dict::new().unwrap();
    dict::set_item(&obj, Object::int(1).unwrap(), Object::none().unwrap()).unwrap();
    let err = obj.to_json().unwrap_err();
    assert_eq!(err.message, "keys must be str, not int");
    error::clear();
}

// ---------------------------------------------------------------------------
// Enumeration under allocation pressure
// ---------------------------------------------------------------------------

#[test]
fn failed_snapshot_leaves_nothing_behind() {
    let src = Object::from_json(&json!({"a": 1, "b": 2})).unwrap();
    let base = alloc::live_objects();
    {
        // Room for the first pair tuple only.
        let _limit = alloc::limit(1);
        let err = dict::items(&src).unwrap_err();
        assert_eq!(err.kind, HostErrorKind::MemoryError);
    }
    assert!(error::take().is_some());
    assert_eq!(alloc::live_objects(), base);

    let items = dict::items(&src).unwrap();
    assert_eq!(format!("{items:?}"), "[('a', 1), ('b', 2)]");
}
