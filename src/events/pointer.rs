use crate::core::PointerOffset;
use crate::dom::{self, Listener};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the cursor relative to the container centre. The frame loop reads
/// the latest value; both run on the page's event loop so a `Cell` suffices.
pub fn wire_pointer_move(
    container: web::Element,
    pointer: Rc<Cell<PointerOffset>>,
) -> Option<Listener> {
    Listener::on_window("mousemove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let rect = dom::element_rect(&container);
        pointer.set(PointerOffset::from_client(
            ev.client_x() as f32,
            ev.client_y() as f32,
            rect,
        ));
    })
}
