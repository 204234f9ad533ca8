use crate::audio::FrequencyAnalyzer;
use crate::constants::{NEXT_BUTTON_ID, PLAY_PAUSE_BUTTON_ID, PREV_BUTTON_ID};
use crate::core::observable::SubscriptionId;
use crate::core::{
    AnalyserSlot, CameraRig, Observable, PlaybackController, Playlist, PointerOffset,
    RenderState, Theme, TransportAction, VisualizerConfig,
};
use crate::frame::{self, FrameContext, FrameLoop};
use crate::notify::Presenter;
use crate::player::Player;
use crate::render::GpuState;
use crate::theme::ThemeStore;
use crate::{dom, events};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Mounted {
    player: Rc<RefCell<Player>>,
    presenter: Rc<RefCell<Presenter>>,
    frame_ctx: Rc<RefCell<FrameContext>>,
    frame_loop: FrameLoop,
    listeners: Vec<dom::Listener>,
    theme: Observable<Theme>,
    theme_sub: SubscriptionId,
    canvas: web::HtmlCanvasElement,
}

/// A mounted visualizer. Dropping it (or calling `destroy`) tears everything
/// down: frame loop, listeners, audio graph, GPU resources and the canvas.
#[wasm_bindgen]
pub struct Visualizer {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl Visualizer {
    pub fn play_pause(&self) {
        if let Some(m) = &self.inner {
            m.player.borrow_mut().play_pause();
        }
    }

    pub fn next(&self) {
        if let Some(m) = &self.inner {
            m.player.borrow_mut().next();
        }
    }

    pub fn prev(&self) {
        if let Some(m) = &self.inner {
            m.player.borrow_mut().prev();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn playing(&self) -> bool {
        self.inner
            .as_ref()
            .map(|m| m.player.borrow().controller().state().is_playing)
            .unwrap_or(false)
    }

    #[wasm_bindgen(getter)]
    pub fn track_index(&self) -> usize {
        self.inner
            .as_ref()
            .map(|m| m.player.borrow().controller().state().current_index)
            .unwrap_or(0)
    }

    #[wasm_bindgen(getter)]
    pub fn track_label(&self) -> String {
        self.inner
            .as_ref()
            .map(|m| m.player.borrow().controller().current_track().label())
            .unwrap_or_default()
    }

    pub fn destroy(&mut self) {
        let Some(m) = self.inner.take() else {
            return;
        };
        m.frame_loop.stop();
        drop(m.listeners);
        m.theme.unsubscribe(m.theme_sub);
        m.player.borrow_mut().teardown();
        m.presenter.borrow_mut().clear();
        match m.frame_ctx.try_borrow_mut() {
            Ok(mut f) => f.release(),
            // Mid-frame: the loop is already stopped, resources go with the last Rc.
            Err(_) => log::warn!("[frame] teardown during a frame; deferring GPU release"),
        }
        m.canvas.remove();
        log::info!("visualizer destroyed");
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Toggle the page theme (persisted). Mounted visualizers follow it.
#[wasm_bindgen]
pub fn toggle_theme() -> String {
    ThemeStore::shared().toggle().as_str().to_string()
}

#[wasm_bindgen]
pub fn current_theme() -> String {
    ThemeStore::shared().current().as_str().to_string()
}

/// Mount into the element with id `container_id`.
#[wasm_bindgen]
pub async fn mount(container_id: String) -> Result<Visualizer, JsValue> {
    mount_with(VisualizerConfig::for_container(&container_id))
        .await
        .map_err(|e| {
            log::error!("mount error: {:?}", e);
            JsValue::from_str(&format!("{:#}", e))
        })
}

fn apply_canvas_theme(canvas: &web::HtmlCanvasElement, theme: Theme) {
    dom::set_background(canvas, theme.preset().canvas_background);
}

pub(crate) async fn mount_with(config: VisualizerConfig) -> anyhow::Result<Visualizer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document
        .get_element_by_id(&config.container_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", config.container_id))?;
    let config = config.with_overrides(|k| container.get_attribute(k));
    log::info!("[mount] {:?}", config);

    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.set_attribute("style", "display:block;width:100%;height:100%");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let (width, height) =
        dom::sync_canvas_backing_size(&canvas, &container, config.max_pixel_ratio);

    let theme_store = ThemeStore::shared();
    let theme = theme_store.observable();
    apply_canvas_theme(&canvas, theme.get());

    let gpu = match GpuState::new(&canvas).await {
        Ok(g) => g,
        Err(e) => {
            canvas.remove();
            return Err(e.context("WebGPU init"));
        }
    };
    let audio_ctx = match web::AudioContext::new() {
        Ok(c) => c,
        Err(e) => {
            canvas.remove();
            return Err(anyhow::anyhow!("AudioContext: {:?}", e));
        }
    };

    let presenter = Presenter::new(&document, config.dismiss_ms, config.exit_ms);
    let analyzer: Rc<RefCell<AnalyserSlot<FrequencyAnalyzer>>> = Rc::default();
    let playlist = Playlist::bundled(&config.asset_root);
    let mut controller = PlaybackController::new(playlist);
    if let Some(limit) = config.retry_limit {
        controller = controller.with_retry_limit(limit);
    }
    let player = match Player::new(
        controller,
        audio_ctx,
        analyzer.clone(),
        presenter.clone(),
        &document,
    ) {
        Ok(p) => p,
        Err(e) => {
            canvas.remove();
            return Err(e);
        }
    };
    player.borrow_mut().mount();

    let preset = Rc::new(Cell::new(theme.get().preset()));
    let pointer = Rc::new(Cell::new(PointerOffset::default()));
    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        gpu: Some(gpu),
        canvas: canvas.clone(),
        container: container.clone(),
        max_pixel_ratio: config.max_pixel_ratio,
        camera: CameraRig::new(width, height),
        state: RenderState::default(),
        started: Instant::now(),
        pointer: pointer.clone(),
        analyzer,
        preset: preset.clone(),
    }));

    let theme_sub = {
        let canvas = canvas.clone();
        theme.subscribe(move |t: &Theme| {
            preset.set(t.preset());
            apply_canvas_theme(&canvas, *t);
        })
    };

    let mut listeners = Vec::new();
    listeners.extend(events::wire_pointer_move(container.clone(), pointer));
    {
        let frame_ctx = frame_ctx.clone();
        listeners.extend(dom::Listener::on_window("resize", move |_| {
            if let Ok(mut f) = frame_ctx.try_borrow_mut() {
                f.resize();
            }
        }));
    }
    {
        let player = player.clone();
        listeners.extend(events::wire_transport_keys(
            |a| !a.is_page_wide(),
            move |action| dispatch(&player, action),
        ));
    }
    for (id, action) in [
        (PLAY_PAUSE_BUTTON_ID, TransportAction::PlayPause),
        (PREV_BUTTON_ID, TransportAction::Prev),
        (NEXT_BUTTON_ID, TransportAction::Next),
    ] {
        let player = player.clone();
        listeners.extend(dom::add_click_listener(&document, id, move || {
            dispatch(&player, action)
        }));
    }

    let frame_loop = frame::start_loop(frame_ctx.clone());
    log::info!("[mount] visualizer running in #{}", config.container_id);

    Ok(Visualizer {
        inner: Some(Mounted {
            player,
            presenter,
            frame_ctx,
            frame_loop,
            listeners,
            theme,
            theme_sub,
            canvas,
        }),
    })
}

fn dispatch(player: &Rc<RefCell<Player>>, action: TransportAction) {
    match action {
        TransportAction::PlayPause => player.borrow_mut().play_pause(),
        TransportAction::Next => player.borrow_mut().next(),
        TransportAction::Prev => player.borrow_mut().prev(),
        // Wired page-wide by the theme store.
        TransportAction::ToggleTheme => {}
    }
}
