use crate::audio::FrequencyAnalyzer;
use crate::core::{
    AnalyserSlot, CameraRig, PointerOffset, RenderState, SphereUniforms, ThemePreset,
};
use crate::dom;
use crate::render::GpuState;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub gpu: Option<GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub container: web::Element,
    pub max_pixel_ratio: f64,

    pub camera: CameraRig,
    pub state: RenderState,
    pub started: Instant,

    pub pointer: Rc<Cell<PointerOffset>>,
    pub analyzer: Rc<RefCell<AnalyserSlot<FrequencyAnalyzer>>>,
    pub preset: Rc<Cell<ThemePreset>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        self.camera.ease_toward(self.pointer.get());
        let elapsed = self.started.elapsed().as_secs_f32();
        let sample = self.analyzer.borrow_mut().get_mut().map(|a| a.sample());
        self.state.advance(elapsed, self.camera.position, sample);

        let Some(gpu) = &mut self.gpu else {
            return;
        };
        let preset = self.preset.get();
        let uniforms = SphereUniforms::new(self.camera.view_proj(), &self.state, &preset);
        match gpu.render(&uniforms, preset.clear_rgba) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    /// Re-read the container size after a window resize.
    pub fn resize(&mut self) {
        let (w, h) =
            dom::sync_canvas_backing_size(&self.canvas, &self.container, self.max_pixel_ratio);
        self.camera.set_viewport(w, h);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(w, h);
        }
        log::debug!("[frame] resized to {}x{}", w, h);
    }

    /// Drop GPU-side resources; later frames become no-ops.
    pub fn release(&mut self) {
        self.gpu = None;
    }
}

/// Handle to the `requestAnimationFrame` chain driving a [`FrameContext`].
pub struct FrameLoop {
    alive: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub fn stop(&self) {
        self.alive.set(false);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's self-reference; safe even from inside a tick.
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Option<i32> {
    let w = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let alive = Rc::new(Cell::new(true));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    let alive_tick = alive.clone();
    let raf_tick = raf_id.clone();
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        if !alive_tick.get() {
            return;
        }
        if let Ok(mut ctx) = frame_ctx.try_borrow_mut() {
            ctx.frame();
        }
        // Teardown may have happened during the frame.
        if alive_tick.get() {
            raf_tick.set(request_frame(&tick_clone));
        }
    }) as Box<dyn FnMut()>));
    raf_id.set(request_frame(&tick));

    FrameLoop {
        alive,
        raf_id,
        tick,
    }
}
