#![cfg(feature = "serde")]

// Snapshot round trips through serde_json.
//
// Both containers serialize as a JSON array in slot order; loading goes
// through the strict path and rejects a repeated key.
use probe_collections::{ProbeMap, ProbeSet};

// Test: a map survives a JSON round trip.
// Verifies: the encoded form is an array of pairs and the reload is equal.
#[test]
fn map_round_trip() {
    let m: ProbeMap<String, i32> = [("", 0), ("one", 1), ("two", 2)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let json = serde_json::to_string(&m).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(3));
    assert!(value.as_array().unwrap().contains(&serde_json::json!(["one", 1])));

    let back: ProbeMap<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

// Test: a repeated key in the input is an error.
#[test]
fn map_rejects_duplicate_key() {
    let err = serde_json::from_str::<ProbeMap<String, i32>>(r#"[["a",1],["a",2]]"#)
        .expect_err("duplicate key must fail");
    assert!(err.to_string().contains("duplicate key in snapshot"));
}

// Test: a set survives a JSON round trip and rejects repeats.
#[test]
fn set_round_trip_and_duplicates() {
    let s: ProbeSet<u32> = (0..40).collect();
    let json = serde_json::to_string(&s).unwrap();
    let back: ProbeSet<u32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);

    let empty: ProbeSet<u32> = serde_json::from_str("[]").unwrap();
    assert!(empty.is_empty());

    let err = serde_json::from_str::<ProbeSet<u32>>("[1,2,1]").expect_err("repeat must fail");
    assert!(err.to_string().contains("duplicate key in snapshot"));
}

// Sequence that claims an enormous exact length but yields nothing.
struct ClaimsHuge;
impl Iterator for ClaimsHuge {
    type Item = u32;
    fn next(&mut self) -> Option<u32> {
        None
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (1 << 40, Some(1 << 40))
    }
}

// Test: loading trusts elements, not a claimed length.
// Assumes: the deserializer forwards the iterator's exact size as its hint.
// Verifies: the load finishes without reserving a slot per claimed entry.
#[test]
fn claimed_length_is_not_preallocated() {
    use serde::de::value::{Error, SeqDeserializer};
    use serde::Deserialize;

    let de: SeqDeserializer<ClaimsHuge, Error> = SeqDeserializer::new(ClaimsHuge);
    let s = ProbeSet::<u32>::deserialize(de).unwrap();
    assert!(s.is_empty());
    assert!(s.capacity() <= 4096);
}
