//! Scene geometry resolution.
//!
//! Turns one [`Scene`] into renderer-agnostic source, geometry and view-limit
//! descriptors. Pure and deterministic: the primary session and each stereo
//! eye call it independently and must get identical results.

use crate::constants::{
    DEFAULT_FACE_SIZE, DEFAULT_FLAT_WIDTH, PREVIEW_FILE_NAME, TILES_ROOT, TILE_URL_PATTERN,
};
use crate::model::{Level, Scene};
use serde::Serialize;
use std::f64::consts::PI;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SourceDescriptor {
    /// One image URL (inline data or path).
    ImageUrl { url: String },
    /// Tile URL template with `{z}`, `{f}`, `{y}`, `{x}` placeholders.
    Tiled {
        url_template: String,
        cube_map_preview_url: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EquirectLevel {
    pub width: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeLevel {
    pub tile_size: u32,
    pub size: u32,
    pub fallback_only: bool,
}

impl CubeLevel {
    fn from_level(level: &Level) -> Option<Self> {
        match (level.tile_size, level.size) {
            (Some(tile_size), Some(size)) if tile_size > 0 && size > 0 => Some(Self {
                tile_size,
                size,
                fallback_only: level.fallback_only,
            }),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GeometryDescriptor {
    Equirect { levels: Vec<EquirectLevel> },
    Cube { levels: Vec<CubeLevel> },
}

impl GeometryDescriptor {
    pub fn is_cube(&self) -> bool {
        matches!(self, GeometryDescriptor::Cube { .. })
    }
}

/// Traditional limiter: caps zoom by source resolution and both fov axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewLimit {
    pub max_resolution: u32,
    pub max_vfov: f64,
    pub max_hfov: f64,
}

impl ViewLimit {
    pub fn traditional(max_resolution: u32) -> Self {
        Self {
            max_resolution,
            max_vfov: PI,
            max_hfov: PI,
        }
    }
}

/// Renderer-ready description of a scene.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneRuntime {
    pub source: SourceDescriptor,
    pub geometry: GeometryDescriptor,
    pub limit: ViewLimit,
}

impl SceneRuntime {
    /// Width of the flat image, if this is a single-image runtime.
    pub fn flat_width(&self) -> Option<u32> {
        match &self.geometry {
            GeometryDescriptor::Equirect { levels } => levels.first().map(|l| l.width),
            GeometryDescriptor::Cube { .. } => None,
        }
    }
}

/// Resolve a scene, or `None` when it has no usable geometry.
pub fn resolve_scene(scene: &Scene) -> Option<SceneRuntime> {
    if let Some(runtime) = flat_runtime(scene) {
        return Some(runtime);
    }
    let levels = usable_levels(scene);
    if levels.is_empty() || levels.iter().all(|l| l.fallback_only) {
        return None;
    }
    Some(tiled_runtime(scene, levels))
}

/// Like [`resolve_scene`], but a tiled scene whose usable levels are all
/// fallback-only still resolves, with its largest level made selectable.
///
/// Used only when strict resolution leaves nothing to show.
pub fn resolve_scene_degraded(scene: &Scene) -> Option<SceneRuntime> {
    if let Some(runtime) = resolve_scene(scene) {
        return Some(runtime);
    }
    let mut levels = usable_levels(scene);
    let largest = levels
        .iter()
        .enumerate()
        .max_by_key(|(_, l)| l.size)
        .map(|(i, _)| i)?;
    levels[largest].fallback_only = false;
    Some(tiled_runtime(scene, levels))
}

fn flat_runtime(scene: &Scene) -> Option<SceneRuntime> {
    let image = scene.source_image.as_ref()?;
    let url = image.url()?;
    let width = positive(image.width)
        .or(positive(scene.face_size))
        .unwrap_or(DEFAULT_FLAT_WIDTH);
    Some(SceneRuntime {
        source: SourceDescriptor::ImageUrl {
            url: url.to_owned(),
        },
        geometry: GeometryDescriptor::Equirect {
            levels: vec![EquirectLevel { width }],
        },
        limit: ViewLimit::traditional(width),
    })
}

/// Levels with both size and tile size set, declared order preserved.
fn usable_levels(scene: &Scene) -> Vec<CubeLevel> {
    scene.levels.iter().filter_map(CubeLevel::from_level).collect()
}

fn tiled_runtime(scene: &Scene, levels: Vec<CubeLevel>) -> SceneRuntime {
    let tiles_path = tiles_path(scene);
    let preview = scene
        .preview_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{tiles_path}/{PREVIEW_FILE_NAME}"));
    SceneRuntime {
        source: SourceDescriptor::Tiled {
            url_template: format!("{tiles_path}/{TILE_URL_PATTERN}"),
            cube_map_preview_url: preview,
        },
        geometry: GeometryDescriptor::Cube { levels },
        limit: ViewLimit::traditional(positive(scene.face_size).unwrap_or(DEFAULT_FACE_SIZE)),
    }
}

/// Tile root for a scene: explicit `tilesPath`, else `tiles/<id>`.
pub fn tiles_path(scene: &Scene) -> String {
    match scene.tiles_path.as_deref() {
        Some(p) if !p.is_empty() => p.to_owned(),
        _ => format!("{TILES_ROOT}/{}", scene.id),
    }
}

#[inline]
fn positive(v: Option<u32>) -> Option<u32> {
    v.filter(|v| *v > 0)
}
