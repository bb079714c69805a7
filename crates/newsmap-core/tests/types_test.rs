//! Tests for news ids and event payload conversion.

use newsmap_core::errors::{MappingError, NewsmapErrorCode, PayloadError};
use newsmap_core::types::{validate_news_global_id, EventPayload, NewsGlobalId};
use serde_json::json;

#[test]
fn news_id_splits_at_first_separator() {
    let id = NewsGlobalId::parse("gdelt:2025:0001").unwrap();
    assert_eq!(id.source(), "gdelt");
    assert_eq!(id.local_id(), "2025:0001");
    assert_eq!(id.to_string(), "gdelt:2025:0001");
}

#[test]
fn news_id_roundtrips_through_from_str() {
    let id: NewsGlobalId = "src:1".parse().unwrap();
    assert_eq!(id, NewsGlobalId::new("src", "1").unwrap());
    assert_eq!(String::from(id), "src:1");
}

#[test]
fn news_id_rejects_bad_shapes() {
    for bad in ["", "nosep", ":1", "src:", "  :x"] {
        let err = NewsGlobalId::parse(bad).unwrap_err();
        assert!(matches!(err, MappingError::InvalidNewsId { .. }), "{bad:?}");
        assert_eq!(err.error_code(), "INVALID_NEWS_ID");
    }
    assert!(NewsGlobalId::new("a:b", "1").is_err());
}

#[test]
fn store_precondition_only_requires_non_blank() {
    assert!(validate_news_global_id("nosep").is_ok());
    assert!(validate_news_global_id("").is_err());
    assert!(validate_news_global_id("   ").is_err());
}

#[test]
fn payload_from_pipeline_json() {
    let value = json!({
        "abstract": "测试事件1",
        "event_summary": "这是一个测试事件的摘要",
        "entities": ["实体A", "实体B"],
        "entities_original": ["Entity A", "Entity B"],
        "event_types": ["测试类型"],
        "confidence": 0.9
    });
    let payload = EventPayload::from_json(&value).unwrap();
    assert_eq!(payload.abstract_text.as_deref(), Some("测试事件1"));
    assert_eq!(payload.entities, vec!["实体A", "实体B"]);
    assert_eq!(payload.entities_original.len(), 2);
    assert_eq!(payload.extra.get("confidence"), Some(&json!(0.9)));
}

#[test]
fn payload_without_abstract_still_parses() {
    let payload = EventPayload::from_json(&json!({"entities": ["X"]})).unwrap();
    assert!(payload.abstract_text.is_none());
}

#[test]
fn payload_rejects_non_object_and_bad_abstract() {
    assert_eq!(
        EventPayload::from_json(&json!(["A"])).unwrap_err(),
        PayloadError::NotAnObject { found: "an array" }
    );
    let err = EventPayload::from_json(&json!({"abstract": 42})).unwrap_err();
    assert!(matches!(err, PayloadError::InvalidField { field: "abstract", .. }));
    assert_eq!(err.error_code(), "MALFORMED_PAYLOAD");
}

#[test]
fn payload_serializes_abstract_under_its_wire_name() {
    let value = serde_json::to_value(EventPayload::with_abstract("A")).unwrap();
    assert_eq!(value, json!({"abstract": "A"}));
}
