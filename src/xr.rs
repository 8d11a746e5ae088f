//! Fullscreen toggle and the WebXR immersive-session probe.

use crate::constants::VR_BODY_CLASS;
use js_sys::{Function, Promise, Reflect};
use tour_core::ImmersiveOutcome;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const IMMERSIVE_VR: &str = "immersive-vr";

/// Toggle page fullscreen and set the body's VR class to match. Returns
/// whether the page is entering fullscreen.
pub fn toggle_fullscreen(document: &web::Document) -> bool {
    let entering = document.fullscreen_element().is_none();
    if entering {
        if let Some(root) = document.document_element() {
            if let Err(e) = root.request_fullscreen() {
                log::warn!("[vr] fullscreen request failed: {:?}", e);
            }
        }
    } else {
        document.exit_fullscreen();
    }
    if let Some(body) = document.body() {
        _ = body.class_list().toggle_with_force(VR_BODY_CLASS, entering);
    }
    entering
}

/// Probe WebXR and, if supported, start and immediately end an immersive
/// session. One attempt, no retry.
pub async fn try_immersive_session() -> ImmersiveOutcome {
    let Some(xr) = navigator_xr() else {
        return ImmersiveOutcome::Unavailable;
    };
    let supported = match call_promise(&xr, "isSessionSupported").await {
        Ok(v) => v.as_bool().unwrap_or(false),
        Err(e) => {
            log::warn!("[vr] isSessionSupported failed: {:?}", e);
            false
        }
    };
    if !supported {
        return ImmersiveOutcome::Unsupported;
    }
    let session = match call_promise(&xr, "requestSession").await {
        Ok(session) => session,
        Err(e) => {
            log::warn!("[vr] requestSession failed: {:?}", e);
            return ImmersiveOutcome::Failed;
        }
    };
    end_session(&session);
    ImmersiveOutcome::Started
}

fn navigator_xr() -> Option<JsValue> {
    let navigator = web::window()?.navigator();
    let xr = Reflect::get(&navigator, &"xr".into()).ok()?;
    (!xr.is_undefined() && !xr.is_null()).then_some(xr)
}

async fn call_promise(xr: &JsValue, method: &str) -> Result<JsValue, JsValue> {
    let func = Reflect::get(xr, &method.into())?.dyn_into::<Function>()?;
    let promise = func.call1(xr, &IMMERSIVE_VR.into())?.dyn_into::<Promise>()?;
    JsFuture::from(promise).await
}

fn end_session(session: &JsValue) {
    match Reflect::get(session, &"end".into()).and_then(|f| f.dyn_into::<Function>()) {
        Ok(end) => {
            if let Err(e) = end.call0(session) {
                log::warn!("[vr] session end failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("[vr] session has no end(): {:?}", e),
    }
}
