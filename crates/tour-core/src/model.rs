//! Tour document model.
//!
//! Mirrors the JSON schema of a tour file (camelCase keys). A [`Tour`] is
//! immutable once loaded; derived data such as resolved asset paths is filled
//! in by [`crate::ResolvedTour::resolve`].

use crate::error::TourError;
use crate::view::ViewParameters;
use fnv::FnvHashSet;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    #[serde(default)]
    pub settings: Settings,
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub assets: AssetCollections,
}

/// Pointer interaction mode handed to the rendering engine. Unrecognised
/// names fall back to [`MouseViewMode::Drag`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseViewMode {
    #[default]
    Drag,
    Qtvr,
}

impl<'de> Deserialize<'de> for MouseViewMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(match name.as_deref() {
            Some("qtvr") => MouseViewMode::Qtvr,
            Some("drag") | None => MouseViewMode::Drag,
            Some(other) => {
                log::warn!("[tour] unknown mouseViewMode '{other}', using drag");
                MouseViewMode::Drag
            }
        })
    }
}

impl MouseViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MouseViewMode::Drag => "drag",
            MouseViewMode::Qtvr => "qtvr",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub mouse_view_mode: MouseViewMode,
    pub autorotate_enabled: bool,
    pub fullscreen_button: bool,
    pub gyro_enabled: bool,
    pub vr_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_view_mode: MouseViewMode::Drag,
            autorotate_enabled: false,
            fullscreen_button: true,
            gyro_enabled: false,
            vr_enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_view_parameters: Option<ViewParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image: Option<SourceImage>,
    #[serde(default)]
    pub levels: Vec<Level>,
    #[serde(
        default,
        deserialize_with = "pixel_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub face_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_path: Option<String>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl Scene {
    /// View the scene opens with and returns to on reset.
    pub fn initial_view(&self) -> ViewParameters {
        self.initial_view_parameters.unwrap_or_default()
    }
}

/// Single equirectangular image, inline or by path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(
        default,
        deserialize_with = "pixel_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<u32>,
}

impl SourceImage {
    /// Inline data wins over a path reference. Empty strings count as absent.
    pub fn url(&self) -> Option<&str> {
        non_empty(self.data_url.as_deref()).or_else(|| non_empty(self.path.as_deref()))
    }
}

/// One resolution level of a cube-map tile pyramid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    #[serde(
        default,
        deserialize_with = "pixel_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub tile_size: Option<u32>,
    #[serde(
        default,
        deserialize_with = "pixel_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<u32>,
    #[serde(default)]
    pub fallback_only: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content_blocks: Vec<ContentBlock>,
    /// Filled in by asset resolution; empty means "use the default marker".
    #[serde(default, skip_deserializing)]
    pub icon_path: String,
}

/// One unit of hotspot content, tagged by `type` in the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        value: String,
    },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        asset_id: Option<String>,
        #[serde(default, skip_deserializing)]
        asset_path: String,
    },
    Video {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        asset_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_deserializing)]
        asset_path: String,
    },
    Audio {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        asset_id: Option<String>,
        #[serde(default, skip_deserializing)]
        asset_path: String,
    },
    Link {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Any block type this viewer does not know. Parsed so the rest of the
    /// document survives; never shown.
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    /// Lowercase kind name, as it appears in the document.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::Image { .. } => "image",
            ContentBlock::Video { .. } => "video",
            ContentBlock::Audio { .. } => "audio",
            ContentBlock::Link { .. } => "link",
            ContentBlock::Unknown => "unknown",
        }
    }

    pub fn asset_id(&self) -> Option<&str> {
        match self {
            ContentBlock::Image { asset_id, .. }
            | ContentBlock::Video { asset_id, .. }
            | ContentBlock::Audio { asset_id, .. } => asset_id.as_deref(),
            ContentBlock::Text { .. } | ContentBlock::Link { .. } | ContentBlock::Unknown => None,
        }
    }

    pub fn asset_path(&self) -> Option<&str> {
        match self {
            ContentBlock::Image { asset_path, .. }
            | ContentBlock::Video { asset_path, .. }
            | ContentBlock::Audio { asset_path, .. } => Some(asset_path.as_str()),
            ContentBlock::Text { .. } | ContentBlock::Link { .. } | ContentBlock::Unknown => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetCollections {
    pub icons: Vec<Asset>,
    pub media: Vec<Asset>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Asset {
    /// Inline data wins over a path reference; an asset with neither resolves to "".
    pub fn reference(&self) -> &str {
        non_empty(self.data_url.as_deref())
            .or_else(|| non_empty(self.path.as_deref()))
            .unwrap_or("")
    }
}

impl Tour {
    /// Parse and validate a tour document.
    pub fn from_json(text: &str) -> Result<Self, TourError> {
        let tour: Tour = serde_json::from_str(text)?;
        tour.validate()?;
        Ok(tour)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, TourError> {
        let tour: Tour = serde_json::from_value(value)?;
        tour.validate()?;
        Ok(tour)
    }

    fn validate(&self) -> Result<(), TourError> {
        let mut seen = FnvHashSet::default();
        for (i, scene) in self.scenes.iter().enumerate() {
            if scene.id.is_empty() {
                return Err(TourError::malformed(format!("scene #{i} has an empty id")));
            }
            if !seen.insert(scene.id.as_str()) {
                return Err(TourError::malformed(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
        }
        Ok(())
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }
}

/// Sizes are plain JSON numbers; `4096.0` is as good as `4096`.
fn pixel_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let size = Option::<f64>::deserialize(deserializer)?;
    Ok(size.map(|v| v.max(0.0).round() as u32))
}

#[inline]
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
