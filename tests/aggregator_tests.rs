use depview::aggregator::{
    build_diagram, build_edge_matrix, count_edges, truncate, Diagram, DiagramKind, DiagramOptions,
    Edge,
};
use depview::parser::{decode_frame, parse_batch, DecodedStack};
use pretty_assertions::assert_eq;
use serde_json::json;

fn stack(frames: &[&str]) -> DecodedStack {
    DecodedStack::new(frames.iter().map(|f| decode_frame(f).unwrap()).collect())
}

fn sample_stacks() -> Vec<DecodedStack> {
    vec![
        stack(&[
            "java.util.HashMap#get(Object)",
            "com.example.cache.Cache#lookup()",
            "com.example.web.Handler#handle()",
            "java.lang.Thread#run()",
        ]),
        stack(&[
            "java.util.HashMap#put(Object, Object)",
            "com.example.cache.Cache#store()",
            "com.example.web.Handler#handle()",
        ]),
        stack(&["java.lang.Thread#sleep(long)"]),
        DecodedStack::default(),
    ]
}

#[test]
fn test_single_event_self_loop() {
    let stacks = vec![stack(&["a.b.C#m()", "a.b.D#n()"])];
    let matrix = build_edge_matrix(&stacks, 2, 500);

    assert_eq!(matrix.edges, vec![Edge::new("a.b", "a.b", 1)]);
}

#[test]
fn test_cap_with_all_ties() {
    let stacks: Vec<DecodedStack> = (0..600)
        .map(|i| stack(&[&format!("callee{}.A#a()", i), &format!("caller{}.B#b()", i)]))
        .collect();

    let matrix = build_edge_matrix(&stacks, 1, 500);

    assert_eq!(matrix.edges.len(), 500);
    assert_eq!(matrix.distinct_pairs, 600);
    assert!(matrix.edges.iter().all(|e| e.value == 1));
    // first-seen order survives the cap
    assert_eq!(matrix.edges[0].source, "callee0");
    assert_eq!(matrix.edges[499].source, "callee499");
}

#[test]
fn test_sorted_non_increasing() {
    for levels in 0..5 {
        let matrix = build_edge_matrix(&sample_stacks(), levels, 500);
        assert!(matrix.edges.windows(2).all(|w| w[0].value >= w[1].value));
        assert!(matrix.edges.iter().all(|e| e.value >= 1));
    }
}

#[test]
fn test_conservation() {
    let stacks = sample_stacks();
    let expected: u64 = stacks
        .iter()
        .filter(|s| s.len() >= 2)
        .map(|s| (s.len() - 1) as u64)
        .sum();

    for levels in 0..5 {
        let total: u64 = count_edges(&stacks, levels).values().sum();
        assert_eq!(total, expected);
        assert_eq!(build_edge_matrix(&stacks, levels, 500).pairs_seen, expected);
    }
}

#[test]
fn test_heaviest_edge_first() {
    let matrix = build_edge_matrix(&sample_stacks(), 2, 500);

    // both request stacks call HashMap from Cache and Cache from Handler
    assert_eq!(
        matrix.edges,
        vec![
            Edge::new("java.util", "com.example", 2),
            Edge::new("com.example", "com.example", 2),
            Edge::new("com.example", "java.lang", 1),
        ]
    );
}

#[test]
fn test_edge_names_are_truncated() {
    let matrix = build_edge_matrix(&sample_stacks(), 3, 500);
    for edge in &matrix.edges {
        assert_eq!(truncate(&edge.source, 3), edge.source);
        assert_eq!(truncate(&edge.target, 3), edge.target);
    }
}

#[test]
fn test_no_stack_events_give_empty_chord() {
    let batch = parse_batch(&json!({
        "events": [ { "type": "jdk.GC" }, { "type": "jdk.CPULoad", "attributes": {} } ]
    }))
    .unwrap();

    match build_diagram(&batch, &DiagramOptions::default()).unwrap() {
        Diagram::Chord(chord) => {
            assert!(chord.edges.is_empty());
            assert_eq!(chord.pairs_seen, 0);
        }
        other => panic!("expected chord diagram, got {:?}", other.kind()),
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    let batch = parse_batch(&json!({
        "events": [
            { "type": "s", "attributes": { "stackTrace": { "frames": [
                { "name": "a.b.C#m()" }, { "name": "x.y.Z#n()" }, { "name": "x.y.Z#o()" }
            ] } } }
        ]
    }))
    .unwrap();
    let options = DiagramOptions::default();

    assert_eq!(
        build_diagram(&batch, &options).unwrap(),
        build_diagram(&batch, &options).unwrap()
    );
}

#[test]
fn test_bundling_pipeline_is_idempotent() {
    let batch = parse_batch(&json!({
        "events": [
            { "type": "s", "attributes": { "stackTrace": { "frames": [
                { "name": "a.b.C#m()" }, { "name": "x.y.Z#n()" }, { "name": "p.q.R#o()" }
            ] } } },
            { "type": "s", "attributes": { "stackTrace": { "frames": [
                { "name": "x.y.Z#n()" }, { "name": "a.b.C#m()" }
            ] } } }
        ]
    }))
    .unwrap();
    let options = DiagramOptions::new(2, DiagramKind::EdgeBundling);

    let first = serde_json::to_value(build_diagram(&batch, &options).unwrap()).unwrap();
    let second = serde_json::to_value(build_diagram(&batch, &options).unwrap()).unwrap();

    assert_eq!(first["kind"], "EDGE_BUNDLING");
    assert!(!first["links"].as_array().unwrap().is_empty());
    assert_eq!(first, second);
}
