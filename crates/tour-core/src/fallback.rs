use crate::model::{
    AssetCollections, ContentBlock, Hotspot, Level, MouseViewMode, Scene, Settings, Tour,
};
use crate::view::ViewParameters;

impl Tour {
    /// Built-in single-scene tour used whenever the real document cannot be
    /// fetched or parsed.
    pub fn fallback() -> Self {
        Tour {
            settings: Settings {
                mouse_view_mode: MouseViewMode::Drag,
                autorotate_enabled: false,
                fullscreen_button: true,
                gyro_enabled: false,
                vr_enabled: true,
            },
            scenes: vec![Scene {
                id: "scene-entrance".into(),
                name: "Entrance".into(),
                initial_view_parameters: Some(ViewParameters::new(0.0, 0.0, 1.4)),
                source_image: None,
                levels: vec![Level {
                    tile_size: Some(256),
                    size: Some(256),
                    fallback_only: true,
                }],
                face_size: Some(2048),
                tiles_path: None,
                preview_path: None,
                hotspots: vec![Hotspot {
                    id: "hs-altar".into(),
                    yaw: 0.0,
                    pitch: 0.0,
                    icon_id: Some("info".into()),
                    title: Some("Main Altar".into()),
                    content_blocks: vec![ContentBlock::Text {
                        value: "Sample content.".into(),
                    }],
                    icon_path: String::new(),
                }],
            }],
            assets: AssetCollections::default(),
        }
    }
}
