use crate::constants::{MODAL_BODY_ID, MODAL_CLOSE_ID, MODAL_ID, MODAL_TITLE_ID};
use tour_core::constants::DEFAULT_HOTSPOT_TITLE;
use tour_core::{Hotspot, ModalContent, ModalEntry};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        on_click(&el, handler);
    }
}

pub fn on_click(target: &web::EventTarget, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_visible(document: &web::Document, element_id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.set_attribute("style", if visible { "" } else { "display:none" });
    }
}

fn create<T: JsCast>(document: &web::Document, tag: &str) -> Option<T> {
    document.create_element(tag).ok()?.dyn_into::<T>().ok()
}

/// Clickable marker for a hotspot: its icon, or a default "i" badge.
pub fn hotspot_element(hotspot: &Hotspot) -> Option<web::HtmlElement> {
    let document = window_document()?;
    let wrapper: web::HtmlElement = create(&document, "div")?;
    wrapper.set_class_name("hotspot");
    let label = hotspot.title.as_deref().unwrap_or(DEFAULT_HOTSPOT_TITLE);
    _ = wrapper.set_attribute("aria-label", label);

    match create::<web::HtmlImageElement>(&document, "img") {
        Some(img) if !hotspot.icon_path.is_empty() => {
            img.set_src(&hotspot.icon_path);
            img.set_alt("");
            img.set_class_name("hotspot-icon");
            let wrapper_err = wrapper.clone();
            let img_err = img.clone();
            let on_error = Closure::wrap(Box::new(move || {
                img_err.remove();
                mark_default(&wrapper_err);
            }) as Box<dyn FnMut()>);
            _ = img.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
            on_error.forget();
            _ = wrapper.append_child(&img);
        }
        _ => mark_default(&wrapper),
    }

    let content = ModalContent::for_hotspot(hotspot);
    on_click(&wrapper, move || open_modal(&content));
    Some(wrapper)
}

fn mark_default(wrapper: &web::HtmlElement) {
    _ = wrapper.class_list().add_1("hotspot-default");
    wrapper.set_text_content(Some("i"));
}

/// Render `content` into the modal and show it.
pub fn open_modal(content: &ModalContent) {
    let Some(document) = window_document() else {
        return;
    };
    set_text(&document, MODAL_TITLE_ID, &content.title);
    let Some(body) = document.get_element_by_id(MODAL_BODY_ID) else {
        return;
    };
    body.set_inner_html("");

    for section in &content.sections {
        let Some(block) = create::<web::HtmlElement>(&document, "div") else {
            continue;
        };
        block.set_class_name("block");
        if let Some(heading) = create::<web::HtmlElement>(&document, "h4") {
            heading.set_text_content(Some(section.heading));
            _ = block.append_child(&heading);
        }
        if let Some(node) = section.entry.as_ref().and_then(|e| entry_node(&document, e)) {
            _ = block.append_child(&node);
        }
        _ = body.append_child(&block);
    }

    if let Some(modal) = document.get_element_by_id(MODAL_ID) {
        _ = modal.class_list().add_1("visible");
        _ = modal.set_attribute("aria-hidden", "false");
    }
}

pub fn close_modal() {
    let Some(modal) = window_document().and_then(|d| d.get_element_by_id(MODAL_ID)) else {
        return;
    };
    _ = modal.class_list().remove_1("visible");
    _ = modal.set_attribute("aria-hidden", "true");
}

/// Close button, plus clicks on the backdrop itself.
pub fn wire_modal_close(document: &web::Document) {
    add_click_listener(document, MODAL_CLOSE_ID, close_modal);
    let Some(modal) = document.get_element_by_id(MODAL_ID) else {
        return;
    };
    let backdrop = modal.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let on_backdrop = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .is_some_and(|t| t == backdrop);
        if on_backdrop {
            close_modal();
        }
    }) as Box<dyn FnMut(_)>);
    _ = modal.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn entry_node(document: &web::Document, entry: &ModalEntry) -> Option<web::Element> {
    let node: web::Element = match entry {
        ModalEntry::Text(text) => {
            let p: web::HtmlElement = create(document, "p")?;
            p.set_text_content(Some(text));
            p.into()
        }
        ModalEntry::Image { src, alt } => {
            let img: web::HtmlImageElement = create(document, "img")?;
            img.set_src(src);
            img.set_alt(alt);
            img.into()
        }
        ModalEntry::EmbeddedVideo { url } => {
            let frame: web::HtmlIFrameElement = create(document, "iframe")?;
            frame.set_src(url);
            frame.set_width("100%");
            frame.set_height("360");
            _ = frame.set_attribute(
                "allow",
                "autoplay; encrypted-media; fullscreen; picture-in-picture",
            );
            _ = frame.set_attribute("style", "border:0");
            frame.into()
        }
        ModalEntry::Video { src } => {
            let video: web::HtmlVideoElement = create(document, "video")?;
            video.set_controls(true);
            video.set_src(src);
            video.into()
        }
        ModalEntry::Audio { src } => {
            let audio: web::HtmlAudioElement = create(document, "audio")?;
            audio.set_controls(true);
            audio.set_src(src);
            audio.into()
        }
        ModalEntry::Link { href, label } => {
            let link: web::HtmlAnchorElement = create(document, "a")?;
            link.set_href(href);
            link.set_text_content(Some(label));
            link.set_target("_blank");
            link.set_rel("noopener noreferrer");
            link.into()
        }
    };
    Some(node)
}

/// One button per navigable scene; `on_select` receives the scene index.
pub fn render_scene_list(
    document: &web::Document,
    list_id: &str,
    names: &[String],
    on_select: impl Fn(usize) + Clone + 'static,
) {
    let Some(list) = document.get_element_by_id(list_id) else {
        return;
    };
    list.set_inner_html("");
    for (index, name) in names.iter().enumerate() {
        let Some(button) = create::<web::HtmlButtonElement>(document, "button") else {
            continue;
        };
        button.set_text_content(Some(name));
        let select = on_select.clone();
        on_click(&button, move || select(index));
        _ = list.append_child(&button);
    }
}
