#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;
use uuid::Uuid;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn store_with_frame(x: f64, y: f64, w: f64, h: f64) -> (FrameStore, FrameId) {
    let mut store = FrameStore::new();
    let id = store.add_frame(FrameSpec::at(x, y, w, h));
    (store, id)
}

fn text_spec(content: &str) -> ElementSpec {
    ElementSpec::new(ElementKind::Text, content, 10.0, 20.0, 100.0, 40.0)
}

fn element_ids(store: &FrameStore, frame: &FrameId) -> Vec<ElementId> {
    store.get(frame).unwrap().elements.iter().map(|e| e.id).collect()
}

// =============================================================
// Serde shape
// =============================================================

#[test]
fn element_kind_serializes_lowercase() {
    let cases = [
        (ElementKind::Text, "\"text\""),
        (ElementKind::Shape, "\"shape\""),
        (ElementKind::Image, "\"image\""),
        (ElementKind::Video, "\"video\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
    }
}

#[test]
fn element_kind_rejects_unknown() {
    assert!(serde_json::from_str::<ElementKind>("\"audio\"").is_err());
}

#[test]
fn frame_deserializes_persisted_shape() {
    let value = json!({
        "id": "6f1f6c4e-8a43-4d8e-9a65-3b8a4f1d2c10",
        "title": "Intro",
        "position": { "x": 100.0, "y": 50.0 },
        "width": 400.0,
        "height": 300.0,
        "rotation": 0.0,
        "backgroundColor": "#111111",
        "borderColor": "#222222",
        "locked": true,
        "elements": [{
            "id": "0d6e0b5a-2f8b-4a8f-8c3b-5a7e5f0a1b2c",
            "type": "text",
            "content": "Hello",
            "position": { "x": 10.0, "y": 10.0 },
            "size": { "width": 200.0, "height": 40.0 },
            "rotation": 5.0,
            "style": { "fontSize": 32.0, "fontFamily": "Inter" }
        }]
    });
    let frame: Frame = serde_json::from_value(value).unwrap();
    assert_eq!(frame.title, "Intro");
    assert_eq!(frame.scale, 1.0);
    assert_eq!(frame.background_color, "#111111");
    assert!(frame.locked);
    assert_eq!(frame.elements.len(), 1);
    assert_eq!(frame.elements[0].kind, ElementKind::Text);
    assert_eq!(frame.elements[0].style.font_size, Some(32.0));
    assert_eq!(frame.elements[0].style.font_family.as_deref(), Some("Inter"));
}

#[test]
fn frame_serializes_camel_case_keys() {
    let (store, id) = store_with_frame(0.0, 0.0, 10.0, 10.0);
    let s = serde_json::to_string(store.get(&id).unwrap()).unwrap();
    assert!(s.contains("\"backgroundColor\""));
    assert!(s.contains("\"borderColor\""));
    assert!(!s.contains("background_color"));
}

#[test]
fn partial_frame_skips_none_fields() {
    let p = PartialFrame { title: Some("x".into()), ..Default::default() };
    let s = serde_json::to_string(&p).unwrap();
    assert_eq!(s, "{\"title\":\"x\"}");
}

// =============================================================
// Frame geometry
// =============================================================

#[test]
fn world_rect_unrotated_is_frame_rect() {
    let (store, id) = store_with_frame(100.0, 100.0, 200.0, 100.0);
    let f = store.get(&id).unwrap();
    assert_eq!(f.world_rect(), Rect::new(100.0, 100.0, 200.0, 100.0));
    assert_eq!(f.center(), Point::new(200.0, 150.0));
}

#[test]
fn world_rect_honours_scale() {
    let mut store = FrameStore::new();
    let id = store.add_frame(FrameSpec { scale: 2.0, ..FrameSpec::at(0.0, 0.0, 100.0, 50.0) });
    assert_eq!(store.get(&id).unwrap().world_rect(), Rect::new(0.0, 0.0, 200.0, 100.0));
}

#[test]
fn world_rect_rotated_covers_corners() {
    let mut store = FrameStore::new();
    let id = store.add_frame(FrameSpec { rotation: 90.0, ..FrameSpec::at(0.0, 0.0, 100.0, 50.0) });
    let r = store.get(&id).unwrap().world_rect();
    assert!(approx_eq(r.x, -50.0));
    assert!(approx_eq(r.y, 0.0));
    assert!(approx_eq(r.width, 50.0));
    assert!(approx_eq(r.height, 100.0));
}

#[test]
fn contains_respects_rotation() {
    let mut store = FrameStore::new();
    let id = store.add_frame(FrameSpec { rotation: 90.0, ..FrameSpec::at(0.0, 0.0, 100.0, 50.0) });
    let f = store.get(&id).unwrap();
    assert!(f.contains(Point::new(-25.0, 50.0)));
    assert!(!f.contains(Point::new(50.0, 25.0)));
}

#[test]
fn local_world_round_trip() {
    let mut store = FrameStore::new();
    let id = store.add_frame(FrameSpec { rotation: 33.0, scale: 1.5, ..FrameSpec::at(40.0, -20.0, 100.0, 50.0) });
    let f = store.get(&id).unwrap();
    let local = Point::new(12.0, 34.0);
    let back = f.world_to_local(f.local_to_world(local));
    assert!(approx_eq(back.x, local.x));
    assert!(approx_eq(back.y, local.y));
}

#[test]
fn element_origin_is_frame_plus_offset() {
    let (mut store, id) = store_with_frame(100.0, 200.0, 400.0, 300.0);
    let el = store.add_element(&id, text_spec("hi")).unwrap();
    let f = store.get(&id).unwrap();
    assert_eq!(f.element_origin(f.element(&el).unwrap()), Point::new(110.0, 220.0));
}

// =============================================================
// Frame CRUD
// =============================================================

#[test]
fn add_frame_returns_unique_ids() {
    let mut store = FrameStore::new();
    let a = store.add_frame(FrameSpec::default());
    let b = store.add_frame(FrameSpec::default());
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
    assert_eq!(store.index_of(&b), Some(1));
}

#[test]
fn add_frame_repairs_invalid_size() {
    let mut store = FrameStore::new();
    let id = store.add_frame(FrameSpec { scale: 0.0, ..FrameSpec::at(0.0, 0.0, -5.0, 0.0) });
    let f = store.get(&id).unwrap();
    assert!(f.width > 0.0 && f.height > 0.0);
    assert_eq!(f.scale, 1.0);
}

#[test]
fn update_frame_applies_present_fields() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let ok = store.update_frame(
        &id,
        &PartialFrame {
            title: Some("Renamed".into()),
            position: Some(Point::new(5.0, 6.0)),
            locked: Some(true),
            ..Default::default()
        },
    );
    assert!(ok);
    let f = store.get(&id).unwrap();
    assert_eq!(f.title, "Renamed");
    assert_eq!(f.position, Point::new(5.0, 6.0));
    assert_eq!(f.width, 100.0);
    assert!(f.locked);
}

#[test]
fn update_frame_ignores_degenerate_size() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    store.update_frame(&id, &PartialFrame { width: Some(0.0), height: Some(f64::NAN), ..Default::default() });
    let f = store.get(&id).unwrap();
    assert_eq!((f.width, f.height), (100.0, 100.0));
}

#[test]
fn non_finite_positions_are_ignored() {
    let (mut store, id) = store_with_frame(10.0, 20.0, 100.0, 100.0);
    store.update_frame(&id, &PartialFrame::moved_to(Point::new(f64::NAN, 0.0)));
    assert_eq!(store.get(&id).unwrap().position, Point::new(10.0, 20.0));

    let el = store.add_element(&id, text_spec("x")).unwrap();
    let partial = PartialElement { position: Some(Point::new(0.0, f64::INFINITY)), ..Default::default() };
    store.update_element(&id, &el, &partial);
    assert_eq!(store.get(&id).unwrap().element(&el).unwrap().position, Point::new(10.0, 20.0));

    let fresh = store.add_frame(FrameSpec::at(f64::NAN, 5.0, 100.0, 100.0));
    assert_eq!(store.get(&fresh).unwrap().position, Point::default());
    assert!(store.bounds().is_some_and(|b| b.x.is_finite() && b.width.is_finite()));
}

#[test]
fn update_missing_frame_is_noop() {
    let (mut store, _) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let before = store.clone();
    assert!(!store.update_frame(&Uuid::new_v4(), &PartialFrame::moved_to(Point::new(1.0, 1.0))));
    assert_eq!(store, before);
}

#[test]
fn remove_frame_cascades_elements() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let el = store.add_element(&id, text_spec("x")).unwrap();
    let removed = store.remove_frame(&id).unwrap();
    assert_eq!(removed.elements.len(), 1);
    assert!(store.find_element(&el).is_none());
    assert!(store.is_empty());
}

#[test]
fn remove_missing_frame_is_none() {
    let mut store = FrameStore::new();
    assert!(store.remove_frame(&Uuid::new_v4()).is_none());
}

#[test]
fn duplicate_frame_offsets_and_preserves_size() {
    let (mut store, id) = store_with_frame(100.0, 100.0, 200.0, 100.0);
    store.add_element(&id, text_spec("copy me")).unwrap();
    let copy = store.duplicate_frame(&id, 20.0).unwrap();

    assert_ne!(copy, id);
    let src = store.get(&id).unwrap().clone();
    let dup = store.get(&copy).unwrap();
    assert_eq!((dup.width, dup.height), (src.width, src.height));
    assert_eq!(dup.position, Point::new(120.0, 120.0));
    assert_ne!(dup.position, src.position);
    assert_eq!(dup.elements.len(), 1);
    assert_ne!(dup.elements[0].id, src.elements[0].id);
    assert_eq!(store.index_of(&copy), Some(1));
}

#[test]
fn duplicate_missing_frame_is_none() {
    let mut store = FrameStore::new();
    assert!(store.duplicate_frame(&Uuid::new_v4(), 20.0).is_none());
}

#[test]
fn insert_frame_replaces_in_place() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 10.0, 10.0);
    store.add_frame(FrameSpec::default());
    let mut replacement = store.get(&id).unwrap().clone();
    replacement.title = "Replaced".into();
    store.insert_frame(replacement);
    assert_eq!(store.len(), 2);
    assert_eq!(store.index_of(&id), Some(0));
    assert_eq!(store.get(&id).unwrap().title, "Replaced");
}

#[test]
fn step_frame_swaps_single_neighbour() {
    let mut store = FrameStore::new();
    let a = store.add_frame(FrameSpec::default());
    let b = store.add_frame(FrameSpec::default());
    let c = store.add_frame(FrameSpec::default());
    assert!(store.step_frame(&a, LayerStep::Forward));
    let order: Vec<FrameId> = store.frames().iter().map(|f| f.id).collect();
    assert_eq!(order, vec![b, a, c]);
    assert!(!store.step_frame(&c, LayerStep::Forward));
}

#[test]
fn bounds_spans_all_frames() {
    let mut store = FrameStore::new();
    assert_eq!(store.bounds(), None);
    store.add_frame(FrameSpec::at(0.0, 0.0, 100.0, 100.0));
    store.add_frame(FrameSpec::at(300.0, -50.0, 100.0, 100.0));
    assert_eq!(store.bounds(), Some(Rect::new(0.0, -50.0, 400.0, 150.0)));
}

// =============================================================
// Element CRUD
// =============================================================

#[test]
fn add_element_to_missing_frame_is_none() {
    let mut store = FrameStore::new();
    assert!(store.add_element(&Uuid::new_v4(), text_spec("x")).is_none());
}

#[test]
fn update_element_merges_style() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let mut spec = text_spec("x");
    spec.style.fill = Some("#000000".into());
    let el = store.add_element(&id, spec).unwrap();

    let ok = store.update_element(
        &id,
        &el,
        &PartialElement {
            content: Some("updated".into()),
            style: Some(ElementStyle { font_size: Some(48.0), opacity: Some(4.0), ..Default::default() }),
            ..Default::default()
        },
    );
    assert!(ok);
    let (_, e) = store.find_element(&el).unwrap();
    assert_eq!(e.content, "updated");
    assert_eq!(e.style.fill.as_deref(), Some("#000000"));
    assert_eq!(e.style.font_size, Some(48.0));
    assert_eq!(e.style.opacity, Some(1.0));
}

#[test]
fn update_element_in_wrong_frame_is_noop() {
    let mut store = FrameStore::new();
    let a = store.add_frame(FrameSpec::default());
    let b = store.add_frame(FrameSpec::default());
    let el = store.add_element(&a, text_spec("x")).unwrap();
    let partial = PartialElement { content: Some("nope".into()), ..Default::default() };
    assert!(!store.update_element(&b, &el, &partial));
    assert_eq!(store.find_element(&el).unwrap().1.content, "x");
}

#[test]
fn delete_element_removes_only_target() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let a = store.add_element(&id, text_spec("a")).unwrap();
    let b = store.add_element(&id, text_spec("b")).unwrap();
    assert_eq!(store.delete_element(&id, &a).map(|e| e.id), Some(a));
    assert_eq!(element_ids(&store, &id), vec![b]);
    assert!(store.delete_element(&id, &a).is_none());
}

#[test]
fn duplicate_element_places_copy_above_source() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let a = store.add_element(&id, text_spec("a")).unwrap();
    let b = store.add_element(&id, text_spec("b")).unwrap();
    let copy = store.duplicate_element(&id, &a, 20.0).unwrap();
    assert_eq!(element_ids(&store, &id), vec![a, copy, b]);
    let (_, e) = store.find_element(&copy).unwrap();
    assert_eq!(e.position, Point::new(30.0, 40.0));
    assert_eq!(e.content, "a");
}

#[test]
fn step_element_forward_is_one_position() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let a = store.add_element(&id, text_spec("a")).unwrap();
    let b = store.add_element(&id, text_spec("b")).unwrap();
    let c = store.add_element(&id, text_spec("c")).unwrap();
    assert!(store.step_element(&id, &a, LayerStep::Forward));
    // One swap, not a jump to the top.
    assert_eq!(element_ids(&store, &id), vec![b, a, c]);
}

#[test]
fn step_element_backward_is_one_position() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let a = store.add_element(&id, text_spec("a")).unwrap();
    let b = store.add_element(&id, text_spec("b")).unwrap();
    let c = store.add_element(&id, text_spec("c")).unwrap();
    assert!(store.step_element(&id, &c, LayerStep::Backward));
    assert_eq!(element_ids(&store, &id), vec![a, c, b]);
}

#[test]
fn step_element_at_ends_is_noop() {
    let (mut store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let a = store.add_element(&id, text_spec("a")).unwrap();
    let b = store.add_element(&id, text_spec("b")).unwrap();
    assert!(!store.step_element(&id, &a, LayerStep::Backward));
    assert!(!store.step_element(&id, &b, LayerStep::Forward));
    assert!(!store.step_element(&id, &Uuid::new_v4(), LayerStep::Forward));
    assert_eq!(element_ids(&store, &id), vec![a, b]);
}

// =============================================================
// ElementStyle accessors
// =============================================================

#[test]
fn style_defaults() {
    let s = ElementStyle::default();
    assert_eq!(s.fill_or_default(), "#D94B4B");
    assert_eq!(s.stroke_or_default(), "#1F1A17");
    assert_eq!(s.stroke_width_or_default(), 1.0);
    assert_eq!(s.opacity_or_default(), 1.0);
    assert_eq!(s.font_size_or_default(), 24.0);
}

// =============================================================
// Document
// =============================================================

#[test]
fn document_parses_minimal_json() {
    let id = Uuid::new_v4();
    let raw = json!({
        "frames": [{ "id": id, "position": { "x": 1.0, "y": 2.0 }, "width": 800.0, "height": 450.0 }],
        "path": [id],
        "currentFrameId": id,
    })
    .to_string();
    let doc = Document::from_json(&raw).unwrap();
    assert_eq!(doc.frames.len(), 1);
    assert_eq!(doc.frames[0].scale, 1.0);
    assert_eq!(doc.frames[0].background_color, "#FFFFFF");
    assert_eq!(doc.path, vec![id]);
    assert_eq!(doc.current_frame_id, Some(id));
}

#[test]
fn document_path_and_current_are_optional() {
    let doc = Document::from_json(r#"{"frames": []}"#).unwrap();
    assert!(doc.path.is_empty());
    assert_eq!(doc.current_frame_id, None);
}

#[test]
fn document_rejects_duplicate_frame_ids() {
    let (store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let mut frames = store.frames().to_vec();
    frames.push(frames[0].clone());
    let doc = Document { frames, ..Document::default() };
    assert!(matches!(doc.validate(), Err(EngineError::DuplicateFrame(d)) if d == id));
}

#[test]
fn document_rejects_degenerate_frames() {
    let (store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let mut frame = store.get(&id).unwrap().clone();
    frame.height = 0.0;
    let doc = Document { frames: vec![frame], ..Document::default() };
    assert!(matches!(doc.validate(), Err(EngineError::InvalidFrameSize { .. })));
}

#[test]
fn document_rejects_zero_scale() {
    let id = Uuid::new_v4();
    let raw = json!({
        "frames": [{ "id": id, "position": { "x": 100.0, "y": 0.0 }, "width": 200.0, "height": 100.0, "scale": 0.0 }],
    })
    .to_string();
    assert!(matches!(Document::from_json(&raw), Err(EngineError::InvalidFrameTransform(bad)) if bad == id));
}

#[test]
fn document_rejects_non_finite_transform() {
    let (store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let base = store.get(&id).unwrap().clone();
    for frame in [
        Frame { scale: -1.0, ..base.clone() },
        Frame { scale: f64::NAN, ..base.clone() },
        Frame { position: Point::new(f64::INFINITY, 0.0), ..base.clone() },
        Frame { rotation: f64::NAN, ..base.clone() },
    ] {
        let doc = Document { frames: vec![frame], ..Document::default() };
        assert!(matches!(doc.validate(), Err(EngineError::InvalidFrameTransform(_))));
    }
}

#[test]
fn document_rejects_malformed_json() {
    assert!(matches!(Document::from_json("{ not json"), Err(EngineError::Json(_))));
}

#[test]
fn document_json_uses_camel_case() {
    let (store, id) = store_with_frame(0.0, 0.0, 100.0, 100.0);
    let doc = Document { frames: store.frames().to_vec(), path: vec![id], current_frame_id: Some(id) };
    let text = doc.to_json().unwrap();
    assert!(text.contains("\"currentFrameId\""));
    assert!(text.contains("\"backgroundColor\""));
    assert_eq!(Document::from_json(&text).unwrap(), doc);
}
