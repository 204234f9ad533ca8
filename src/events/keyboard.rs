use crate::core::{action_for_key, TransportAction};
use crate::dom::Listener;
use wasm_bindgen::JsCast;
use web_sys as web;

fn typing_into_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

/// Keydown listener for the actions `accept` lets through.
pub fn wire_transport_keys(
    accept: fn(TransportAction) -> bool,
    mut handler: impl FnMut(TransportAction) + 'static,
) -> Option<Listener> {
    Listener::on_window("keydown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if ev.repeat() || ev.ctrl_key() || ev.meta_key() || typing_into_field(ev) {
            return;
        }
        let Some(action) = action_for_key(&ev.key()).filter(|a| accept(*a)) else {
            return;
        };
        if action != TransportAction::ToggleTheme {
            // keep Space/arrows from scrolling the page
            ev.prevent_default();
        }
        log::info!("[keys] {:?}", action);
        handler(action);
    })
}
