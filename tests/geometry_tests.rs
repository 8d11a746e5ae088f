// Host-side tests for scene geometry resolution and hotspot scaling.

mod common;

use serde_json::json;
use std::f64::consts::PI;
use tour_core::{
    hotspot_scale, resolve_scene, resolve_scene_degraded, tiles_path, CubeLevel,
    GeometryDescriptor, Scene, SourceDescriptor, ViewLimit,
};

fn scene(value: serde_json::Value) -> Scene {
    serde_json::from_value(value).expect("fixture scene should parse")
}

fn flat_width(value: serde_json::Value) -> Option<u32> {
    resolve_scene(&scene(value)).and_then(|r| r.flat_width())
}

#[test]
fn flat_width_prefers_image_width_then_face_size_then_default() {
    // Property: width = image width, else face size, else 4096
    assert_eq!(
        flat_width(json!({"id":"a","name":"A","sourceImage":{"path":"a.jpg","width":6000},"faceSize":1000})),
        Some(6000)
    );
    assert_eq!(
        flat_width(json!({"id":"a","name":"A","sourceImage":{"path":"a.jpg"},"faceSize":1000})),
        Some(1000)
    );
    assert_eq!(
        flat_width(json!({"id":"a","name":"A","sourceImage":{"path":"a.jpg"}})),
        Some(4096)
    );
}

#[test]
fn flat_scene_yields_single_level_equirect() {
    let runtime = resolve_scene(&scene(json!({
        "id":"a","name":"A",
        "sourceImage":{"dataUrl":"data:image/jpeg;base64,AA","path":"a.jpg","width":2000}
    })))
    .expect("flat scene should resolve");
    assert_eq!(
        runtime.source,
        SourceDescriptor::ImageUrl {
            url: "data:image/jpeg;base64,AA".into()
        },
        "inline data should win over path"
    );
    assert!(matches!(
        runtime.geometry,
        GeometryDescriptor::Equirect { ref levels } if levels.len() == 1 && levels[0].width == 2000
    ));
    assert_eq!(runtime.limit, ViewLimit::traditional(2000));
    assert_eq!(runtime.limit.max_vfov, PI);
    assert_eq!(runtime.limit.max_hfov, PI);
}

#[test]
fn flat_source_wins_over_levels() {
    let runtime = resolve_scene(&scene(json!({
        "id":"a","name":"A",
        "sourceImage":{"path":"a.jpg"},
        "levels":[{"tileSize":256,"size":512}]
    })))
    .unwrap();
    assert!(!runtime.geometry.is_cube());
}

#[test]
fn image_without_reference_falls_through_to_levels() {
    let runtime = resolve_scene(&scene(json!({
        "id":"a","name":"A",
        "sourceImage":{"width":3000,"path":""},
        "levels":[{"tileSize":256,"size":512}]
    })))
    .expect("levels should still resolve");
    assert!(runtime.geometry.is_cube());
}

#[test]
fn all_fallback_only_levels_are_not_renderable() {
    let s = scene(json!({
        "id":"a","name":"A",
        "levels":[
            {"tileSize":256,"size":256,"fallbackOnly":true},
            {"tileSize":512,"size":512,"fallbackOnly":true}
        ]
    }));
    assert!(resolve_scene(&s).is_none());
}

#[test]
fn levels_missing_sizes_are_filtered_out() {
    let s = scene(json!({
        "id":"a","name":"A",
        "levels":[{"tileSize":256},{"size":512},{"tileSize":0,"size":512}]
    }));
    assert!(resolve_scene(&s).is_none(), "no level has both sizes set");
    assert!(resolve_scene(&scene(json!({"id":"b","name":"B"}))).is_none());
}

#[test]
fn tiled_scene_defaults() {
    // End-to-end scenario: one selectable level, no sourceImage, no faceSize
    let runtime = resolve_scene(&scene(json!({
        "id":"nave","name":"Nave",
        "levels":[{"tileSize":256,"size":512,"fallbackOnly":false}]
    })))
    .expect("tiled scene should resolve");
    assert_eq!(
        runtime.source,
        SourceDescriptor::Tiled {
            url_template: "tiles/nave/{z}/{f}/{y}/{x}.jpg".into(),
            cube_map_preview_url: "tiles/nave/preview.jpg".into(),
        }
    );
    assert_eq!(
        runtime.geometry,
        GeometryDescriptor::Cube {
            levels: vec![CubeLevel {
                tile_size: 256,
                size: 512,
                fallback_only: false
            }]
        }
    );
    assert_eq!(runtime.limit.max_resolution, 2048);
}

#[test]
fn tiled_scene_uses_explicit_paths_and_keeps_level_order() {
    let s = scene(json!({
        "id":"nave","name":"Nave",
        "tilesPath":"cdn/nave",
        "previewPath":"cdn/nave/p.jpg",
        "faceSize":4096,
        "levels":[
            {"tileSize":512,"size":2048},
            {"tileSize":256,"size":256,"fallbackOnly":true},
            {"tileSize":512,"size":1024}
        ]
    }));
    assert_eq!(tiles_path(&s), "cdn/nave");
    let runtime = resolve_scene(&s).unwrap();
    let SourceDescriptor::Tiled {
        url_template,
        cube_map_preview_url,
    } = &runtime.source
    else {
        panic!("expected tiled source");
    };
    assert_eq!(url_template, "cdn/nave/{z}/{f}/{y}/{x}.jpg");
    assert_eq!(cube_map_preview_url, "cdn/nave/p.jpg");
    let GeometryDescriptor::Cube { levels } = &runtime.geometry else {
        panic!("expected cube geometry");
    };
    let sizes: Vec<u32> = levels.iter().map(|l| l.size).collect();
    assert_eq!(sizes, [2048, 256, 1024], "declared order must be preserved");
    assert_eq!(runtime.limit.max_resolution, 4096);
}

#[test]
fn resolution_is_deterministic() {
    let s = scene(json!({
        "id":"nave","name":"Nave",
        "levels":[{"tileSize":256,"size":512}]
    }));
    assert_eq!(resolve_scene(&s), resolve_scene(&s));
}

#[test]
fn degraded_resolution_promotes_largest_fallback_level() {
    let s = scene(json!({
        "id":"a","name":"A",
        "levels":[
            {"tileSize":256,"size":256,"fallbackOnly":true},
            {"tileSize":256,"size":512,"fallbackOnly":true}
        ]
    }));
    let runtime = resolve_scene_degraded(&s).expect("degraded resolution should admit the scene");
    let GeometryDescriptor::Cube { levels } = runtime.geometry else {
        panic!("expected cube geometry");
    };
    assert!(levels[0].fallback_only);
    assert!(!levels[1].fallback_only);
}

#[test]
fn degraded_resolution_matches_strict_for_renderable_scenes() {
    let s = scene(json!({"id":"a","name":"A","sourceImage":{"path":"a.jpg"}}));
    assert_eq!(resolve_scene_degraded(&s), resolve_scene(&s));
    let empty = scene(json!({"id":"b","name":"B"}));
    assert!(resolve_scene_degraded(&empty).is_none());
}

#[test]
fn hotspot_scale_is_clamped() {
    assert_eq!(hotspot_scale(0.01), 0.95);
    assert!(common::approx(hotspot_scale(1.4), 1.0 / 1.4));
    assert_eq!(hotspot_scale(10.0), 0.5);
    for fov in [0.01, 1.4, 10.0] {
        let s = hotspot_scale(fov);
        assert!((0.5..=0.95).contains(&s), "scale {s} out of range for fov {fov}");
    }
}

#[test]
fn hotspot_scale_is_non_increasing_in_fov() {
    let mut previous = f64::INFINITY;
    let mut fov = 0.01;
    while fov <= 10.0 {
        let s = hotspot_scale(fov);
        assert!(s <= previous, "scale rose from {previous} to {s} at fov {fov}");
        previous = s;
        fov += 0.01;
    }
}
