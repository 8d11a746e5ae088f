//! Browser device-orientation plumbing for the gyro controller.

use crate::marzipano;
use js_sys::{Function, Promise, Reflect};
use tour_core::{
    MotionPermission, OrientationCapabilities, OrientationEvents, OrientationHandler,
    OrientationReading,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Probe what the page can do right now.
pub fn orientation_capabilities() -> OrientationCapabilities {
    let orientation_events = web::window()
        .and_then(|w| Reflect::has(&w, &"DeviceOrientationEvent".into()).ok())
        .unwrap_or(false);
    OrientationCapabilities {
        native_control: marzipano::orientation_method_ctor().is_some(),
        orientation_events,
    }
}

/// Ask for motion access where the platform gates it (iOS Safari). Rejections
/// count as denial.
pub async fn request_motion_permission() -> MotionPermission {
    for class in ["DeviceOrientationEvent", "DeviceMotionEvent"] {
        let Some(request) = permission_fn(class) else {
            continue;
        };
        let Ok(promise) = request.call0(&JsValue::NULL) else {
            return MotionPermission::Denied;
        };
        let Ok(promise) = promise.dyn_into::<Promise>() else {
            return MotionPermission::Denied;
        };
        return match JsFuture::from(promise).await {
            Ok(result) if result.as_string().as_deref() == Some("granted") => {
                MotionPermission::Granted
            }
            Ok(_) => MotionPermission::Denied,
            Err(e) => {
                log::warn!("[gyro] permission request failed: {:?}", e);
                MotionPermission::Denied
            }
        };
    }
    MotionPermission::NotRequired
}

fn permission_fn(class: &str) -> Option<Function> {
    let window = web::window()?;
    let ctor = Reflect::get(&window, &class.into()).ok()?;
    if ctor.is_undefined() {
        return None;
    }
    let request = Reflect::get(&ctor, &"requestPermission".into()).ok()?;
    let request = request.dyn_into::<Function>().ok()?;
    Some(request.bind(&ctor))
}

/// `deviceorientation` listener registered on the window (capture phase).
pub struct OrientationListener {
    closure: Closure<dyn FnMut(web::DeviceOrientationEvent)>,
}

#[derive(Default)]
pub struct WindowOrientationEvents;

impl OrientationEvents for WindowOrientationEvents {
    type Subscription = OrientationListener;

    fn subscribe(&mut self, mut handler: OrientationHandler) -> OrientationListener {
        let closure = Closure::wrap(Box::new(move |ev: web::DeviceOrientationEvent| {
            handler(OrientationReading {
                alpha: ev.alpha(),
                beta: ev.beta(),
            });
        }) as Box<dyn FnMut(web::DeviceOrientationEvent)>);
        if let Some(window) = web::window() {
            _ = window.add_event_listener_with_callback_and_bool(
                "deviceorientation",
                closure.as_ref().unchecked_ref(),
                true,
            );
        }
        OrientationListener { closure }
    }

    fn unsubscribe(&mut self, subscription: OrientationListener) {
        if let Some(window) = web::window() {
            _ = window.remove_event_listener_with_callback_and_bool(
                "deviceorientation",
                subscription.closure.as_ref().unchecked_ref(),
                true,
            );
        }
    }
}
