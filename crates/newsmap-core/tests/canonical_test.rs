//! Tests for canonical event id derivation.

use newsmap_core::canonical::{
    canonical_event_id, canonical_event_id_from_abstract, is_canonical_event_id,
    AbstractDigestDeriver,
};
use newsmap_core::errors::PayloadError;
use newsmap_core::traits::EventIdDeriver;
use newsmap_core::types::EventPayload;
use proptest::prelude::*;

#[test]
fn known_vectors_match_event_store_convention() {
    let cases = [
        ("A", "c8b065d1585ee039cb72601623628c4c73cf3519"),
        (
            "Central bank raises rates",
            "08b83d54d6d04610d6cbfe7d5bfd215ad072506b",
        ),
        ("测试事件1", "3b4b35633e9bdd95e04867a7025125fd722d5a00"),
    ];
    for (text, expected) in cases {
        assert_eq!(canonical_event_id_from_abstract(text).unwrap(), expected, "{text}");
    }
}

#[test]
fn id_depends_only_on_abstract() {
    let bare = EventPayload::with_abstract("A");
    let mut rich = EventPayload::with_abstract("A").with_entities(["Fed", "ECB"]);
    rich.source = Some("reuters".to_string());
    rich.reported_at = Some("2025-12-19T10:00:00Z".to_string());
    rich.event_types = vec!["policy".to_string()];

    assert_eq!(
        canonical_event_id(&bare).unwrap(),
        canonical_event_id(&rich).unwrap()
    );
}

#[test]
fn case_is_significant() {
    assert_ne!(
        canonical_event_id_from_abstract("Rates rise").unwrap(),
        canonical_event_id_from_abstract("rates rise").unwrap()
    );
}

#[test]
fn missing_abstract_is_rejected() {
    let payload = EventPayload::default().with_entities(["Fed"]);
    assert_eq!(
        canonical_event_id(&payload),
        Err(PayloadError::MissingField { field: "abstract" })
    );
}

#[test]
fn blank_abstract_is_rejected() {
    let err = canonical_event_id(&EventPayload::with_abstract("   \t")).unwrap_err();
    assert!(matches!(err, PayloadError::InvalidField { field: "abstract", .. }));
}

#[test]
fn default_deriver_delegates_to_canonical_function() {
    let payload = EventPayload::with_abstract("A");
    let deriver = AbstractDigestDeriver;
    assert_eq!(
        deriver.derive(&payload).unwrap(),
        canonical_event_id(&payload).unwrap()
    );

    let shared: std::sync::Arc<dyn EventIdDeriver> = std::sync::Arc::new(AbstractDigestDeriver);
    assert_eq!(shared.derive(&payload).unwrap(), deriver.derive(&payload).unwrap());
}

proptest! {
    #[test]
    fn prop_derivation_is_deterministic(text in "[a-zA-Z0-9 ,.]{1,80}") {
        prop_assume!(!text.trim().is_empty());
        let first = canonical_event_id_from_abstract(&text).unwrap();
        let second = canonical_event_id(&EventPayload::with_abstract(text.clone())).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(is_canonical_event_id(&first));
    }

    #[test]
    fn prop_padding_does_not_change_id(text in "[a-z]{1,40}", pad in "[ \t\n]{0,5}") {
        let padded = format!("{pad}{text}{pad}");
        prop_assert_eq!(
            canonical_event_id_from_abstract(&padded).unwrap(),
            canonical_event_id_from_abstract(&text).unwrap()
        );
    }
}
