use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use wasm_bitset::{BitSet, Offset};

#[derive(Serialize, Deserialize)]
struct Snapshot {
    name: String,
    members: BitSet,
}

#[test]
fn serializes_as_json_array() {
    let mut set = BitSet::new();
    set.add(&[1, 2, 3, 511]).unwrap();
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, "[1,2,3,511]");
    assert_eq!(json, set.to_serialized_form());

    let decoded: BitSet = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, set);
}

#[test]
fn deserialize_rejects_out_of_range() {
    let err = serde_json::from_str::<BitSet>("[1,-1]").unwrap_err();
    assert!(err.to_string().contains("out of range"), "{err}");
    assert!(serde_json::from_str::<BitSet>("[1.5]").is_err());
}

#[test]
fn embeds_in_other_documents() {
    let snapshot = Snapshot {
        name: "ports".into(),
        members: BitSet::from_values(&[443, 80]).unwrap(),
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    assert_eq!(json, r#"{"name":"ports","members":[80,443]}"#);

    let decoded: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.name, "ports");
    assert_eq!(decoded.members, snapshot.members);
}

#[test]
fn malformed_payload_keeps_existing_values() {
    let mut set = BitSet::from_values(&[1, 2, 3, 511]).unwrap();
    assert!(set.from_serialized_form("not-json").is_err());
    assert_eq!(set.values().collect::<Vec<_>>(), vec![1, 2, 3, 511]);
}

fn arb_offsets() -> impl Strategy<Value = Vec<Offset>> {
    proptest::collection::vec(0..100_000 as Offset, 0..64)
}

proptest! {
    #[test]
    fn text_round_trip(values in arb_offsets()) {
        let set = BitSet::from_values(&values).unwrap();
        let mut decoded = BitSet::from_values(&[7]).unwrap();
        decoded.from_serialized_form(&set.to_serialized_form()).unwrap();
        prop_assert_eq!(decoded.values().collect::<Vec<_>>(), set.values().collect::<Vec<_>>());
        prop_assert_eq!(decoded.len(), set.len());
    }

    #[test]
    fn values_are_strictly_ascending(values in arb_offsets()) {
        let set = BitSet::from_values(&values).unwrap();
        let members: Vec<Offset> = set.values().collect();
        prop_assert_eq!(members.len(), set.len());
        prop_assert!(members.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn order_and_spacing_do_not_matter(values in arb_offsets()) {
        let spaced: Vec<String> = values.iter().rev().map(ToString::to_string).collect();
        let payload = format!(" [ {} ]\n", spaced.join(" ,\t"));
        let parsed: BitSet = payload.parse().unwrap();
        prop_assert_eq!(parsed, BitSet::from_values(&values).unwrap());
    }
}
