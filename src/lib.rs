//! Audio-reactive wireframe sphere for the browser.
//!
//! `core` holds everything that does not touch the DOM and builds on any
//! target; the remaining modules are the WebGPU / WebAudio front-end.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod constants;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod loader;
#[cfg(target_arch = "wasm32")]
mod notify;
#[cfg(target_arch = "wasm32")]
mod player;
#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod theme;
#[cfg(target_arch = "wasm32")]
mod visualizer;

#[cfg(target_arch = "wasm32")]
pub use visualizer::{current_theme, mount, toggle_theme, Visualizer};

#[cfg(target_arch = "wasm32")]
mod entry {
    use crate::core::VisualizerConfig;
    use crate::visualizer::{self, Visualizer};
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    thread_local! {
        static AUTO_MOUNTED: RefCell<Option<Visualizer>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("pulse-sphere starting");
        // Theme controls work even on pages that never mount a visualizer.
        crate::theme::ThemeStore::shared();

        // Pages opt in to mounting at load with `<div id="visualizer" data-autostart>`;
        // everyone else calls `mount(id)` from JS.
        let config = VisualizerConfig::default();
        let autostart = crate::dom::window_document()
            .and_then(|d| d.get_element_by_id(&config.container_id))
            .map(|el| el.has_attribute("data-autostart"))
            .unwrap_or(false);
        if !autostart {
            return Ok(());
        }
        spawn_local(async move {
            match visualizer::mount_with(config).await {
                Ok(v) => AUTO_MOUNTED.with(|slot| *slot.borrow_mut() = Some(v)),
                Err(e) => log::error!("init error: {:?}", e),
            }
        });
        Ok(())
    }
}
