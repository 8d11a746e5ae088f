//! Marzipano bindings and the `tour_core` engine traits on top of them.

use crate::constants::{AUTOROTATE_IDLE_MS, AUTOROTATE_YAW_SPEED, GYRO_METHOD_ID, HOTSPOT_SCALE_VAR};
use crate::dom;
use js_sys::{Object, Reflect};
use tour_core::{
    GeometryDescriptor, Hotspot, MouseViewMode, PanoramaScene, PanoramaViewer, SceneRuntime,
    SourceDescriptor, ViewListener, ViewParameters,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen(js_namespace = Marzipano)]
extern "C" {
    #[wasm_bindgen(js_name = Viewer)]
    type RawViewer;
    #[wasm_bindgen(constructor, js_class = "Viewer", catch)]
    fn new(element: &web::Element, opts: &JsValue) -> Result<RawViewer, JsValue>;
    #[wasm_bindgen(method, js_name = createScene, catch)]
    fn create_scene(this: &RawViewer, opts: &JsValue) -> Result<RawScene, JsValue>;
    #[wasm_bindgen(method)]
    fn controls(this: &RawViewer) -> Controls;
    #[wasm_bindgen(method, js_name = setIdleMovement)]
    fn set_idle_movement(this: &RawViewer, timeout_ms: u32, movement: &JsValue);

    #[wasm_bindgen(js_name = Scene)]
    #[derive(Clone)]
    type RawScene;
    #[wasm_bindgen(method, js_name = switchTo)]
    fn switch_to(this: &RawScene);
    #[wasm_bindgen(method, js_name = hotspotContainer)]
    fn hotspot_container(this: &RawScene) -> HotspotContainer;

    type HotspotContainer;
    #[wasm_bindgen(method, js_name = createHotspot)]
    fn create_hotspot(this: &HotspotContainer, element: &web::Element, coords: &JsValue);

    type Controls;
    #[wasm_bindgen(method, js_name = registerMethod)]
    fn register_method(this: &Controls, id: &str, method: &JsValue, enabled: bool);
    #[wasm_bindgen(method, js_name = enableMethod)]
    fn enable_method(this: &Controls, id: &str);
    #[wasm_bindgen(method, js_name = disableMethod)]
    fn disable_method(this: &Controls, id: &str);
    #[wasm_bindgen(method)]
    fn method(this: &Controls, id: &str) -> JsValue;

    #[derive(Clone)]
    type RectilinearView;
    #[wasm_bindgen(constructor, catch)]
    fn new(params: &JsValue, limiter: &JsValue) -> Result<RectilinearView, JsValue>;
    #[wasm_bindgen(method)]
    fn parameters(this: &RectilinearView) -> JsValue;
    #[wasm_bindgen(method, js_name = setParameters)]
    fn set_parameters(this: &RectilinearView, params: &JsValue);
    #[wasm_bindgen(method, js_name = addEventListener)]
    fn add_event_listener(this: &RectilinearView, event: &str, handler: &js_sys::Function);

    type ImageUrlSource;
    #[wasm_bindgen(static_method_of = ImageUrlSource, js_name = fromString)]
    fn from_string(url: &str, opts: &JsValue) -> ImageUrlSource;

    type EquirectGeometry;
    #[wasm_bindgen(constructor, catch)]
    fn new(levels: &JsValue) -> Result<EquirectGeometry, JsValue>;

    type CubeGeometry;
    #[wasm_bindgen(constructor, catch)]
    fn new(levels: &JsValue) -> Result<CubeGeometry, JsValue>;

    #[wasm_bindgen(js_name = autorotate)]
    fn autorotate(opts: &JsValue) -> JsValue;
}

#[wasm_bindgen(js_namespace = ["Marzipano", "RectilinearView", "limit"])]
extern "C" {
    #[wasm_bindgen(js_name = traditional)]
    fn traditional_limit(max_resolution: f64, max_vfov: f64, max_hfov: f64) -> JsValue;
}

/// True when the Marzipano global has been loaded on the page.
pub fn is_available() -> bool {
    web::window()
        .and_then(|w| Reflect::get(&w, &"Marzipano".into()).ok())
        .is_some_and(|m| !m.is_undefined() && !m.is_null())
}

/// The optional `Marzipano.DeviceOrientationControlMethod` constructor.
pub fn orientation_method_ctor() -> Option<js_sys::Function> {
    let window = web::window()?;
    let marzipano = Reflect::get(&window, &"Marzipano".into()).ok()?;
    if marzipano.is_undefined() || marzipano.is_null() {
        return None;
    }
    Reflect::get(&marzipano, &"DeviceOrientationControlMethod".into())
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}

pub struct MarzipanoViewer {
    raw: RawViewer,
}

impl MarzipanoViewer {
    pub fn new(element: &web::Element, mode: MouseViewMode) -> anyhow::Result<Self> {
        let controls = Object::new();
        set(&controls, "mouseViewMode", &mode.as_str().into());
        let opts = Object::new();
        set(&opts, "controls", &controls);
        let raw = RawViewer::new(element, &opts).map_err(js_err)?;
        Ok(Self { raw })
    }

    pub fn start_idle_autorotate(&self) {
        let opts = Object::new();
        set(&opts, "yawSpeed", &AUTOROTATE_YAW_SPEED.into());
        set(&opts, "targetPitch", &JsValue::from_f64(0.0));
        set(&opts, "targetFov", &JsValue::from_f64(std::f64::consts::FRAC_PI_2));
        self.raw
            .set_idle_movement(AUTOROTATE_IDLE_MS, &autorotate(&opts));
    }
}

impl PanoramaViewer for MarzipanoViewer {
    type Scene = MarzipanoScene;
    type Error = anyhow::Error;

    fn create_scene(
        &self,
        runtime: &SceneRuntime,
        initial: ViewParameters,
    ) -> anyhow::Result<MarzipanoScene> {
        let source: JsValue = match &runtime.source {
            SourceDescriptor::ImageUrl { url } => ImageUrlSource::from_string(url, &JsValue::UNDEFINED).into(),
            SourceDescriptor::Tiled {
                url_template,
                cube_map_preview_url,
            } => {
                let opts = Object::new();
                set(&opts, "cubeMapPreviewUrl", &cube_map_preview_url.into());
                ImageUrlSource::from_string(url_template, &opts).into()
            }
        };
        let geometry: JsValue = match &runtime.geometry {
            GeometryDescriptor::Equirect { levels } => {
                EquirectGeometry::new(&to_js(levels)?).map_err(js_err)?.into()
            }
            GeometryDescriptor::Cube { levels } => {
                CubeGeometry::new(&to_js(levels)?).map_err(js_err)?.into()
            }
        };
        let limit = &runtime.limit;
        let limiter = traditional_limit(limit.max_resolution as f64, limit.max_vfov, limit.max_hfov);
        let view = RectilinearView::new(&params_to_js(initial), &limiter).map_err(js_err)?;

        let opts = Object::new();
        set(&opts, "source", &source);
        set(&opts, "geometry", &geometry);
        set(&opts, "view", &view);
        set(&opts, "pinFirstLevel", &JsValue::TRUE);
        let scene = self.raw.create_scene(&opts).map_err(js_err)?;
        Ok(MarzipanoScene { scene, view })
    }

    fn enable_orientation_control(&self) {
        let controls = self.raw.controls();
        let registered = controls.method(GYRO_METHOD_ID);
        if registered.is_undefined() || registered.is_null() {
            let Some(ctor) = orientation_method_ctor() else {
                log::warn!("[gyro] native orientation control vanished");
                return;
            };
            match Reflect::construct(&ctor, &js_sys::Array::new()) {
                Ok(method) => controls.register_method(GYRO_METHOD_ID, &method, false),
                Err(e) => {
                    log::error!("[gyro] orientation control error: {:?}", e);
                    return;
                }
            }
        }
        controls.enable_method(GYRO_METHOD_ID);
    }

    fn disable_orientation_control(&self) {
        self.raw.controls().disable_method(GYRO_METHOD_ID);
    }
}

#[derive(Clone)]
pub struct MarzipanoScene {
    scene: RawScene,
    view: RectilinearView,
}

impl PanoramaScene for MarzipanoScene {
    type Hotspot = web::HtmlElement;

    fn switch_to(&self) {
        self.scene.switch_to();
    }

    fn view_parameters(&self) -> ViewParameters {
        params_from_js(&self.view.parameters())
    }

    fn set_view_parameters(&self, params: ViewParameters) {
        self.view.set_parameters(&params_to_js(params));
    }

    fn create_hotspot(&self, hotspot: &Hotspot) -> Option<web::HtmlElement> {
        let element = dom::hotspot_element(hotspot)?;
        let coords = Object::new();
        set(&coords, "yaw", &hotspot.yaw.into());
        set(&coords, "pitch", &hotspot.pitch.into());
        self.scene
            .hotspot_container()
            .create_hotspot(&element, &coords);
        Some(element)
    }

    fn set_hotspot_scale(&self, hotspot: &web::HtmlElement, scale: f64) {
        _ = hotspot
            .style()
            .set_property(HOTSPOT_SCALE_VAR, &scale.to_string());
    }

    fn on_view_change(&self, mut listener: ViewListener) {
        let view = self.view.clone();
        let closure = Closure::wrap(Box::new(move || {
            listener(params_from_js(&view.parameters()));
        }) as Box<dyn FnMut()>);
        self.view
            .add_event_listener("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn params_to_js(params: ViewParameters) -> JsValue {
    let obj = Object::new();
    set(&obj, "yaw", &params.yaw.into());
    set(&obj, "pitch", &params.pitch.into());
    set(&obj, "fov", &params.fov.into());
    obj.into()
}

fn params_from_js(value: &JsValue) -> ViewParameters {
    let defaults = ViewParameters::default();
    let num = |key: &str, default: f64| {
        Reflect::get(value, &key.into())
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(default)
    };
    ViewParameters {
        yaw: num("yaw", defaults.yaw),
        pitch: num("pitch", defaults.pitch),
        fov: num("fov", defaults.fov),
    }
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<JsValue> {
    let text = serde_json::to_string(value)?;
    js_sys::JSON::parse(&text).map_err(js_err)
}

#[inline]
fn set(target: &Object, key: &str, value: &JsValue) {
    _ = Reflect::set(target, &key.into(), value);
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}
