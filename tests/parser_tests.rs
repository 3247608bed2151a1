use depview::parser::{
    decode_frame, normalize_batch, normalize_event, parse_batch, DecodePolicy, RawEvent,
};
use depview::utils::DecodeError;
use serde_json::json;

#[test]
fn test_decode_scenario_descriptor() {
    let frame = decode_frame("com.foo.Bar#baz()V").unwrap();
    assert_eq!(frame.package, "com.foo");
    assert_eq!(frame.class, "Bar");
    assert_eq!(frame.method, "baz");
}

#[test]
fn test_decode_error_names_frame() {
    let err = decode_frame("NoPackage#run()").unwrap_err();
    assert_eq!(err.frame(), "NoPackage#run()");
    assert!(err.to_string().contains("NoPackage#run()"));
}

#[test]
fn test_event_without_attributes_is_empty() {
    let event: RawEvent = serde_json::from_value(json!({ "type": "jdk.ThreadStart" })).unwrap();
    assert!(normalize_event(&event).unwrap().is_empty());
}

#[test]
fn test_event_with_other_attributes() {
    let event: RawEvent = serde_json::from_value(json!({
        "type": "jdk.ExecutionSample",
        "attributes": {
            "startTime": "2023-01-01T00:00:00Z",
            "sampledThread": { "javaName": "main" },
            "state": "STATE_RUNNABLE",
            "stackTrace": {
                "truncated": false,
                "frames": [
                    { "name": "java.lang.String#hashCode()", "line": 10, "type": "JIT compiled" },
                    { "name": "java.util.HashMap#hash(java.lang.Object)" }
                ]
            }
        }
    }))
    .unwrap();

    let attributes = event.attributes.as_ref().unwrap();
    assert_eq!(attributes.state, Some(json!("STATE_RUNNABLE")));
    assert!(attributes.thread.is_some());

    let stack = normalize_event(&event).unwrap();
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.frames()[0].package, "java.lang");
    assert_eq!(stack.frames()[1].method, "hash");
}

#[test]
fn test_strict_policy_reports_event_index() {
    let batch = parse_batch(&json!({
        "events": [
            { "type": "t" },
            { "type": "t", "attributes": { "stackTrace": { "frames": [
                { "name": "a.B#ok()" }, { "name": "broken" }
            ] } } }
        ]
    }))
    .unwrap();

    match normalize_batch(&batch, DecodePolicy::Strict) {
        Err(DecodeError::InEvent { index, source }) => {
            assert_eq!(index, 1);
            assert!(matches!(*source, DecodeError::MissingMethodSeparator { .. }));
        }
        other => panic!("expected InEvent error, got {:?}", other),
    }

    let stacks = normalize_batch(&batch, DecodePolicy::SkipEvent).unwrap();
    assert_eq!(stacks.len(), 1);
    assert!(stacks[0].is_empty());
}
