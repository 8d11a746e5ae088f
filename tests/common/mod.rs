// In-memory rendering engine and orientation event source shared by the
// host-side integration tests. The web crate is wasm-only; these stand in for
// Marzipano and the browser's `deviceorientation` events.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use tour_core::{
    Hotspot, OrientationEvents, OrientationHandler, OrientationReading, PanoramaScene,
    PanoramaViewer, ResolvedTour, SceneRuntime, Tour, ViewListener, ViewParameters,
};

/// What a viewer has been asked to do so far.
#[derive(Default)]
pub struct ViewerLog {
    pub runtimes: Vec<SceneRuntime>,
    pub visible: Option<usize>,
    pub switches: usize,
    pub orientation_enabled: bool,
    pub orientation_enables: usize,
}

#[derive(Clone, Default)]
pub struct MockViewer {
    pub log: Rc<RefCell<ViewerLog>>,
    /// Every `create_scene` fails when set.
    pub reject_all: bool,
}

impl MockViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject_all: true,
            ..Self::default()
        }
    }

    pub fn scenes_created(&self) -> usize {
        self.log.borrow().runtimes.len()
    }

    pub fn visible(&self) -> Option<usize> {
        self.log.borrow().visible
    }

    pub fn orientation_enabled(&self) -> bool {
        self.log.borrow().orientation_enabled
    }
}

impl PanoramaViewer for MockViewer {
    type Scene = MockScene;
    type Error = String;

    fn create_scene(
        &self,
        runtime: &SceneRuntime,
        initial: ViewParameters,
    ) -> Result<MockScene, String> {
        if self.reject_all {
            return Err("surface lost".to_string());
        }
        let mut log = self.log.borrow_mut();
        let key = log.runtimes.len();
        log.runtimes.push(runtime.clone());
        Ok(MockScene {
            key,
            viewer: self.log.clone(),
            view: Rc::new(RefCell::new(ViewState {
                params: initial,
                ..ViewState::default()
            })),
        })
    }

    fn enable_orientation_control(&self) {
        let mut log = self.log.borrow_mut();
        log.orientation_enabled = true;
        log.orientation_enables += 1;
    }

    fn disable_orientation_control(&self) {
        self.log.borrow_mut().orientation_enabled = false;
    }
}

#[derive(Default)]
pub struct ViewState {
    pub params: ViewParameters,
    pub listeners: Vec<ViewListener>,
    pub sets: usize,
    pub hotspots: Vec<String>,
    pub last_scale: Option<f64>,
}

#[derive(Clone)]
pub struct MockScene {
    /// Creation order within its viewer.
    pub key: usize,
    viewer: Rc<RefCell<ViewerLog>>,
    pub view: Rc<RefCell<ViewState>>,
}

impl MockScene {
    pub fn sets(&self) -> usize {
        self.view.borrow().sets
    }

    pub fn last_scale(&self) -> Option<f64> {
        self.view.borrow().last_scale
    }

    pub fn hotspot_ids(&self) -> Vec<String> {
        self.view.borrow().hotspots.clone()
    }
}

impl PanoramaScene for MockScene {
    type Hotspot = String;

    fn switch_to(&self) {
        let mut log = self.viewer.borrow_mut();
        log.visible = Some(self.key);
        log.switches += 1;
    }

    fn view_parameters(&self) -> ViewParameters {
        self.view.borrow().params
    }

    fn set_view_parameters(&self, params: ViewParameters) {
        // Listeners run with the borrow released so they may read this scene.
        let mut listeners = {
            let mut view = self.view.borrow_mut();
            view.params = params;
            view.sets += 1;
            std::mem::take(&mut view.listeners)
        };
        for listener in &mut listeners {
            listener(params);
        }
        self.view.borrow_mut().listeners.append(&mut listeners);
    }

    fn create_hotspot(&self, hotspot: &Hotspot) -> Option<String> {
        self.view.borrow_mut().hotspots.push(hotspot.id.clone());
        Some(hotspot.id.clone())
    }

    fn set_hotspot_scale(&self, _hotspot: &String, scale: f64) {
        self.view.borrow_mut().last_scale = Some(scale);
    }

    fn on_view_change(&self, listener: ViewListener) {
        self.view.borrow_mut().listeners.push(listener);
    }
}

/// Orientation event source whose subscriptions are numbered tokens.
#[derive(Default)]
pub struct MockEvents {
    handlers: Vec<(usize, OrientationHandler)>,
    next_token: usize,
    pub subscribes: usize,
    pub unsubscribed: Vec<usize>,
}

impl MockEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> usize {
        self.handlers.len()
    }

    pub fn tokens(&self) -> Vec<usize> {
        self.handlers.iter().map(|(t, _)| *t).collect()
    }

    /// Deliver one reading to every subscribed handler.
    pub fn emit(&mut self, reading: OrientationReading) {
        for (_, handler) in &mut self.handlers {
            handler(reading);
        }
    }
}

impl OrientationEvents for MockEvents {
    type Subscription = usize;

    fn subscribe(&mut self, handler: OrientationHandler) -> usize {
        let token = self.next_token;
        self.next_token += 1;
        self.subscribes += 1;
        self.handlers.push((token, handler));
        token
    }

    fn unsubscribe(&mut self, token: usize) {
        self.handlers.retain(|(t, _)| *t != token);
        self.unsubscribed.push(token);
    }
}

pub fn tour(value: serde_json::Value) -> Tour {
    Tour::from_value(value).expect("fixture tour should parse")
}

pub fn resolved(value: serde_json::Value) -> ResolvedTour {
    ResolvedTour::resolve(tour(value))
}

/// Three renderable scenes: flat, tiled, flat. Each has one hotspot.
pub fn three_scene_tour() -> ResolvedTour {
    resolved(serde_json::json!({
        "scenes": [
            {
                "id": "lobby",
                "name": "Lobby",
                "initialViewParameters": { "yaw": 0.5, "pitch": -0.1, "fov": 1.2 },
                "sourceImage": { "path": "img/lobby.jpg", "width": 8000 },
                "hotspots": [
                    { "id": "hs-desk", "yaw": 0.1, "pitch": 0.0, "title": "Desk",
                      "contentBlocks": [{ "type": "text", "value": "Reception" }] }
                ]
            },
            {
                "id": "hall",
                "name": "Hall",
                "initialViewParameters": { "yaw": -1.0, "pitch": 0.2, "fov": 0.9 },
                "levels": [
                    { "tileSize": 256, "size": 256, "fallbackOnly": true },
                    { "tileSize": 512, "size": 1024 }
                ],
                "faceSize": 1024,
                "hotspots": [
                    { "id": "hs-door", "yaw": 1.0, "pitch": 0.0 }
                ]
            },
            {
                "id": "garden",
                "name": "Garden",
                "sourceImage": { "dataUrl": "data:image/jpeg;base64,AAAA" },
                "hotspots": [
                    { "id": "hs-tree", "yaw": 2.0, "pitch": 0.3 }
                ]
            }
        ]
    }))
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn same_view(a: ViewParameters, b: ViewParameters) -> bool {
    approx(a.yaw, b.yaw) && approx(a.pitch, b.pitch) && approx(a.fov, b.fov)
}
