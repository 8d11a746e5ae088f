#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::device::{OrientationListener, WindowOrientationEvents};
use crate::marzipano::MarzipanoViewer;
use std::cell::RefCell;
use std::rc::Rc;
use tour_core::{
    load_tour, GyroController, GyroError, ModalContent, MotionPermission, MouseViewMode, Orientation,
    ResolvedTour, Settings, ViewerSession,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod constants;
mod device;
mod dom;
mod marzipano;
mod xr;

type Session = Rc<RefCell<ViewerSession<MarzipanoViewer>>>;

struct Gyro {
    controller: GyroController<OrientationListener>,
    events: WindowOrientationEvents,
}

type SharedGyro = Rc<RefCell<Gyro>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tour-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    dom::wire_modal_close(&document);

    let tour = ResolvedTour::resolve(load_tour(fetch_text(&window, TOUR_URL).await));
    let settings = tour.settings.clone();
    apply_settings(&document, &settings);

    if !marzipano::is_available() {
        anyhow::bail!("Marzipano is not loaded");
    }
    let pano = document
        .get_element_by_id(PANO_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{PANO_ID}"))?;
    let viewer = MarzipanoViewer::new(&pano, settings.mouse_view_mode)?;
    if settings.autorotate_enabled {
        viewer.start_idle_autorotate();
    }

    let session: Session = Rc::new(RefCell::new(ViewerSession::build(viewer, tour)));
    if !session.borrow().has_content() {
        dom::open_modal(&ModalContent::notice(NO_CONTENT_TITLE, NO_CONTENT_TEXT));
    }
    let gyro: SharedGyro = Rc::new(RefCell::new(Gyro {
        controller: GyroController::new(),
        events: WindowOrientationEvents,
    }));

    wire_scene_list(&document, &session);
    wire_reset(&document, &session);
    wire_gyro(&document, &session, &gyro);
    wire_vr(&document, &session, &gyro, settings.mouse_view_mode);
    if settings.fullscreen_button {
        dom::add_click_listener(&document, BTN_FULLSCREEN_ID, move || {
            if let Some(document) = dom::window_document() {
                xr::toggle_fullscreen(&document);
            }
        });
    }
    Ok(())
}

/// Fetch `url` as text. Any failure (network, HTTP status, body) is an error.
async fn fetch_text(window: &web::Window, url: &str) -> anyhow::Result<String> {
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::Response>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !response.ok() {
        anyhow::bail!("HTTP {}", response.status());
    }
    let body = response.text().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    JsFuture::from(body)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("response body is not text"))
}

fn apply_settings(document: &web::Document, settings: &Settings) {
    dom::set_visible(document, BTN_VR_ID, settings.vr_enabled);
    dom::set_visible(document, BTN_FULLSCREEN_ID, settings.fullscreen_button);
    dom::set_text(document, BTN_GYRO_ID, GYRO_OFF_LABEL);
    log::info!(
        "[settings] mouse={} autorotate={} gyro={} vr={}",
        settings.mouse_view_mode.as_str(),
        settings.autorotate_enabled,
        settings.gyro_enabled,
        settings.vr_enabled
    );
}

fn wire_scene_list(document: &web::Document, session: &Session) {
    let names: Vec<String> = session
        .borrow()
        .navigation()
        .into_iter()
        .map(|(_, name)| name.to_string())
        .collect();
    let session = session.clone();
    dom::render_scene_list(document, SCENE_LIST_ID, &names, move |index| {
        session.borrow_mut().switch_scene(index);
    });
}

fn wire_reset(document: &web::Document, session: &Session) {
    let session = session.clone();
    dom::add_click_listener(document, BTN_RESET_ID, move || {
        session.borrow().reset_orientation();
    });
}

fn wire_gyro(document: &web::Document, session: &Session, gyro: &SharedGyro) {
    let session = session.clone();
    let gyro = gyro.clone();
    dom::add_click_listener(document, BTN_GYRO_ID, move || {
        let session = session.clone();
        let gyro = gyro.clone();
        spawn_local(async move { toggle_gyro(session, gyro).await });
    });
}

async fn toggle_gyro(session: Session, gyro: SharedGyro) {
    if session.borrow().current_index().is_none() {
        return;
    }
    if gyro.borrow().controller.is_enabled() {
        let mut gyro = gyro.borrow_mut();
        let Gyro { controller, events } = &mut *gyro;
        controller.disable(session.borrow().active_viewer(), events);
        set_gyro_label(false);
        return;
    }

    let caps = device::orientation_capabilities();
    if let Err(e) = GyroController::<OrientationListener>::select_strategy(caps) {
        alert(e);
        return;
    }
    let permission = device::request_motion_permission().await;
    if let Err(e) = enable_gyro(&session, &gyro, permission) {
        alert(e);
        return;
    }
    set_gyro_label(true);
}

/// Enable gyro on the session's active viewer. Capabilities are probed again
/// since the page may have changed while the prompt was open.
fn enable_gyro(
    session: &Session,
    gyro: &SharedGyro,
    permission: MotionPermission,
) -> Result<(), GyroError> {
    let caps = device::orientation_capabilities();
    let sink_session = session.clone();
    let sink = move |o: Orientation| {
        if let Ok(session) = sink_session.try_borrow() {
            session.apply_orientation(o.yaw, o.pitch);
        }
    };
    let mut gyro = gyro.borrow_mut();
    let Gyro { controller, events } = &mut *gyro;
    let session = session.borrow();
    controller.enable(caps, permission, session.active_viewer(), events, sink)?;
    Ok(())
}

fn set_gyro_label(on: bool) {
    if let Some(document) = dom::window_document() {
        let label = if on { GYRO_ON_LABEL } else { GYRO_OFF_LABEL };
        dom::set_text(&document, BTN_GYRO_ID, label);
    }
}

fn alert(e: GyroError) {
    log::warn!("[gyro] {e}");
    if let Some(window) = web::window() {
        _ = window.alert_with_message(&e.to_string());
    }
}

fn wire_vr(
    document: &web::Document,
    session: &Session,
    gyro: &SharedGyro,
    mode: MouseViewMode,
) {
    let session = session.clone();
    let gyro = gyro.clone();
    dom::add_click_listener(document, BTN_VR_ID, move || {
        let Some(document) = dom::window_document() else {
            return;
        };
        if !xr::toggle_fullscreen(&document) {
            with_gyro_moved(&session, &gyro, |session| session.exit_stereo());
            log::info!("[vr] back to the primary view");
            return;
        }
        with_gyro_moved(&session, &gyro, |session| enter_stereo(&document, session, mode));
        spawn_local(async move {
            let outcome = xr::try_immersive_session().await;
            log::info!("[vr] immersive outcome: {outcome:?}");
            dom::open_modal(&outcome.notice());
        });
    });
}

/// Run a presentation change with gyro detached, then re-attach it to
/// whichever viewer is active afterwards.
fn with_gyro_moved(
    session: &Session,
    gyro: &SharedGyro,
    change: impl FnOnce(&mut ViewerSession<MarzipanoViewer>),
) {
    let gyro_was_on = {
        let mut gyro = gyro.borrow_mut();
        let Gyro { controller, events } = &mut *gyro;
        let on = controller.is_enabled();
        controller.disable(session.borrow().active_viewer(), events);
        on
    };

    change(&mut session.borrow_mut());

    if gyro_was_on {
        // Permission was already granted for the running gyro.
        let enabled = enable_gyro(session, gyro, MotionPermission::Granted);
        set_gyro_label(enabled.is_ok());
    }
}

/// Move the tour onto the eye pair, building it on first use.
fn enter_stereo(
    document: &web::Document,
    session: &mut ViewerSession<MarzipanoViewer>,
    mode: MouseViewMode,
) {
    let entered = session.enter_stereo(|| {
        let eye = |id: &str| {
            let element = document
                .get_element_by_id(id)
                .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?;
            MarzipanoViewer::new(&element, mode)
        };
        anyhow::Ok((eye(PANO_LEFT_ID)?, eye(PANO_RIGHT_ID)?))
    });
    match entered {
        Ok(presentation) => log::info!("[vr] presentation: {presentation:?}"),
        Err(e) => log::warn!("[vr] stereo viewers unavailable: {e}"),
    }
}
