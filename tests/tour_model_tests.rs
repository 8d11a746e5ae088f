// Host-side tests for tour document parsing, validation and the fallback tour.
// The main crate is wasm-only, so these exercise `tour-core` directly.

mod common;

use serde_json::json;
use tour_core::{
    load_tour, try_load, ContentBlock, LoadFailure, MouseViewMode, Tour, TourError,
    ViewParameters,
};

#[test]
fn minimal_document_parses_with_defaults() {
    let tour = Tour::from_json(r#"{"scenes":[{"id":"a","name":"A"}]}"#).unwrap();
    assert_eq!(tour.scenes.len(), 1);
    assert_eq!(tour.settings.mouse_view_mode, MouseViewMode::Drag);
    assert!(!tour.settings.autorotate_enabled);
    assert!(tour.settings.fullscreen_button);
    assert!(!tour.settings.gyro_enabled);
    assert!(tour.settings.vr_enabled);
    assert_eq!(
        tour.scenes[0].initial_view(),
        ViewParameters::default(),
        "missing initialViewParameters should default to yaw 0, pitch 0, fov 1.4"
    );
    assert!(tour.assets.icons.is_empty() && tour.assets.media.is_empty());
}

#[test]
fn missing_scenes_array_is_malformed() {
    let err = Tour::from_json(r#"{"settings":{}}"#).unwrap_err();
    assert!(matches!(err, TourError::Json(_)), "got {err:?}");
}

#[test]
fn scene_missing_id_or_name_is_malformed() {
    assert!(Tour::from_json(r#"{"scenes":[{"name":"A"}]}"#).is_err());
    assert!(Tour::from_json(r#"{"scenes":[{"id":"a"}]}"#).is_err());
}

#[test]
fn empty_or_duplicate_scene_ids_are_malformed() {
    let empty = Tour::from_value(json!({"scenes":[{"id":"","name":"A"}]})).unwrap_err();
    assert!(matches!(empty, TourError::Malformed(_)), "got {empty:?}");

    let dup = Tour::from_value(json!({
        "scenes":[{"id":"a","name":"A"},{"id":"a","name":"Again"}]
    }))
    .unwrap_err();
    assert!(
        dup.to_string().contains("duplicate scene id 'a'"),
        "unexpected message: {dup}"
    );
}

#[test]
fn unknown_content_block_type_keeps_the_tour() {
    let text = json!({"scenes":[{"id":"nave","name":"Nave",
        "sourceImage":{"path":"nave.jpg"},
        "hotspots":[{"id":"h","contentBlocks":[
            {"type":"pdf","assetId":"leaflet"},
            {"type":"text","value":"still here"}
        ]}]
    }]})
    .to_string();
    let tour = load_tour(Ok::<_, String>(text));
    assert_eq!(tour.scenes[0].id, "nave");
    let blocks = &tour.scenes[0].hotspots[0].content_blocks;
    assert_eq!(blocks[0], ContentBlock::Unknown);
    assert_eq!(blocks[0].asset_id(), None);
    assert_eq!(blocks[1].kind(), "text");
}

#[test]
fn unknown_mouse_mode_falls_back_to_drag() {
    let text = json!({
        "settings": {"mouseViewMode": "scroll", "vrEnabled": false},
        "scenes": [{"id":"nave","name":"Nave"}]
    })
    .to_string();
    let tour = load_tour(Ok::<_, String>(text));
    assert_eq!(tour.scenes[0].id, "nave");
    assert_eq!(tour.settings.mouse_view_mode, MouseViewMode::Drag);
    assert!(!tour.settings.vr_enabled);
}

#[test]
fn fractional_pixel_sizes_are_accepted() {
    let text = json!({"scenes":[
        {"id":"flat","name":"Flat","sourceImage":{"path":"f.jpg","width":4096.0}},
        {"id":"cube","name":"Cube","faceSize":1024.4,
         "levels":[{"tileSize":256.0,"size":512.6}]}
    ]})
    .to_string();
    let tour = try_load(Ok::<_, String>(text)).unwrap();
    assert_eq!(tour.scenes[0].source_image.as_ref().unwrap().width, Some(4096));
    assert_eq!(tour.scenes[1].face_size, Some(1024));
    assert_eq!(tour.scenes[1].levels[0].tile_size, Some(256));
    assert_eq!(tour.scenes[1].levels[0].size, Some(513));
}

#[test]
fn content_blocks_parse_into_their_variants() {
    let tour = common::tour(json!({"scenes":[{"id":"a","name":"A","hotspots":[{
        "id":"h",
        "contentBlocks":[
            {"type":"text","value":"hello"},
            {"type":"image","assetId":"img"},
            {"type":"video","url":"https://video.example/embed/1"},
            {"type":"audio","assetId":"snd"},
            {"type":"link","url":"https://example.org","label":"More"}
        ]
    }]}]}));
    let kinds: Vec<&str> = tour.scenes[0].hotspots[0]
        .content_blocks
        .iter()
        .map(ContentBlock::kind)
        .collect();
    assert_eq!(kinds, ["text", "image", "video", "audio", "link"]);
    assert_eq!(
        tour.scenes[0].hotspots[0].content_blocks[1].asset_id(),
        Some("img")
    );
    assert_eq!(tour.scenes[0].hotspots[0].content_blocks[4].asset_id(), None);
}

#[test]
fn qtvr_mouse_mode_parses() {
    let tour = common::tour(json!({
        "settings": {"mouseViewMode": "qtvr", "autorotateEnabled": true},
        "scenes": []
    }));
    assert_eq!(tour.settings.mouse_view_mode, MouseViewMode::Qtvr);
    assert_eq!(tour.settings.mouse_view_mode.as_str(), "qtvr");
    assert!(tour.settings.autorotate_enabled);
}

#[test]
fn fallback_tour_matches_literal_values() {
    let tour = Tour::fallback();
    assert_eq!(tour.scenes.len(), 1);
    let scene = &tour.scenes[0];
    assert_eq!(scene.id, "scene-entrance");
    assert_eq!(scene.name, "Entrance");
    assert_eq!(scene.initial_view(), ViewParameters::new(0.0, 0.0, 1.4));
    assert_eq!(scene.face_size, Some(2048));
    assert_eq!(scene.levels.len(), 1);
    assert_eq!(scene.levels[0].tile_size, Some(256));
    assert_eq!(scene.levels[0].size, Some(256));
    assert!(scene.levels[0].fallback_only);
    assert!(scene.source_image.is_none());

    assert_eq!(scene.hotspots.len(), 1);
    let hotspot = &scene.hotspots[0];
    assert_eq!(hotspot.id, "hs-altar");
    assert_eq!(hotspot.icon_id.as_deref(), Some("info"));
    assert_eq!(hotspot.title.as_deref(), Some("Main Altar"));
    assert_eq!(
        hotspot.content_blocks,
        vec![ContentBlock::Text {
            value: "Sample content.".into()
        }]
    );
}

#[test]
fn fallback_tour_survives_a_serialization_pass() {
    // Property: the embedded tour is itself a valid document
    let text = serde_json::to_string(&Tour::fallback()).unwrap();
    let parsed = Tour::from_json(&text).unwrap();
    assert_eq!(parsed, Tour::fallback());
}

#[test]
fn network_failure_uses_fallback() {
    let tour = load_tour(Err::<String, _>("connection refused"));
    assert_eq!(tour, Tour::fallback());
}

#[test]
fn malformed_document_uses_fallback_wholesale() {
    // One good scene does not rescue a document with a bad one
    let text = r#"{"scenes":[{"id":"ok","name":"Ok"},{"name":"no id"}]}"#;
    let tour = load_tour(Ok::<_, String>(text.to_string()));
    assert_eq!(tour, Tour::fallback());
}

#[test]
fn load_failures_are_distinguished_for_diagnostics() {
    let network = try_load(Err::<String, _>("timeout")).unwrap_err();
    assert!(matches!(network, LoadFailure::Network(ref m) if m == "timeout"));

    assert_eq!(network.to_string(), "tour fetch failed: timeout");

    let malformed = try_load(Ok::<_, String>("not json".into())).unwrap_err();
    assert!(matches!(malformed, LoadFailure::Malformed(TourError::Json(_))));
    assert!(malformed.to_string().starts_with("malformed tour document:"));
}

#[test]
fn valid_document_is_used_as_is() {
    let tour = load_tour(Ok::<_, String>(
        r#"{"scenes":[{"id":"x","name":"X"}]}"#.to_string(),
    ));
    assert_eq!(tour.scenes[0].id, "x");
    assert!(tour.scene("x").is_some());
    assert!(tour.scene("scene-entrance").is_none());
}
