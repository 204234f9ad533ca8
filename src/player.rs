use crate::audio::{FrequencyAnalyzer, Sound};
use crate::constants::PLAY_PAUSE_BUTTON_ID;
use crate::core::handoff::deliver;
use crate::core::{AnalyserSlot, Effect, Effects, Phase, PlaybackController};
use crate::loader;
use crate::notify::Presenter;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Browser side of the playback state machine: owns the audio graph and
/// executes the controller's effects.
pub struct Player {
    controller: PlaybackController,
    ctx: web::AudioContext,
    sound: Sound,
    analyzer: Rc<RefCell<AnalyserSlot<FrequencyAnalyzer>>>,
    presenter: Rc<RefCell<Presenter>>,
    play_button: Option<web::Element>,
    self_ref: Weak<RefCell<Player>>,
    torn_down: bool,
}

impl Player {
    pub fn new(
        controller: PlaybackController,
        ctx: web::AudioContext,
        analyzer: Rc<RefCell<AnalyserSlot<FrequencyAnalyzer>>>,
        presenter: Rc<RefCell<Presenter>>,
        document: &web::Document,
    ) -> anyhow::Result<Rc<RefCell<Self>>> {
        let sound = Sound::new(&ctx)?;
        let play_button = document.get_element_by_id(PLAY_PAUSE_BUTTON_ID);
        Ok(Rc::new_cyclic(|weak| {
            RefCell::new(Player {
                controller,
                ctx,
                sound,
                analyzer,
                presenter,
                play_button,
                self_ref: weak.clone(),
                torn_down: false,
            })
        }))
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn mount(&mut self) {
        let fx = self.controller.mount();
        self.run(fx, None);
    }

    pub fn play_pause(&mut self) {
        // Browsers keep the context suspended until a user gesture.
        _ = self.ctx.resume();
        let fx = self.controller.play_pause();
        self.run(fx, None);
    }

    pub fn next(&mut self) {
        _ = self.ctx.resume();
        let fx = self.controller.next();
        self.run(fx, None);
    }

    pub fn prev(&mut self) {
        _ = self.ctx.resume();
        let fx = self.controller.prev();
        self.run(fx, None);
    }

    fn load_finished(&mut self, generation: u64, result: Result<web::AudioBuffer, crate::core::LoadError>) {
        if self.torn_down {
            return;
        }
        match result {
            Ok(buffer) => {
                let fx = self.controller.load_succeeded(generation);
                self.run(fx, Some(buffer));
            }
            Err(e) => {
                if self.controller.is_current(generation) {
                    log::error!("[loader] {}", e);
                } else {
                    log::debug!("[loader] stale failure ignored: {}", e);
                }
                let fx = self.controller.load_failed(generation);
                self.run(fx, None);
            }
        }
    }

    fn track_ended(&mut self, generation: u64) {
        if self.torn_down {
            return;
        }
        log::info!("[playback] track ended: {}", self.controller.current_track().path);
        let fx = self.controller.track_ended(generation);
        self.run(fx, None);
    }

    fn run(&mut self, effects: Effects, mut buffer: Option<web::AudioBuffer>) {
        for effect in effects {
            match effect {
                Effect::StopSound => self.sound.stop(),
                Effect::Load {
                    index,
                    path,
                    generation,
                } => {
                    log::debug!("[playback] spawn load #{} {}", index, path);
                    self.spawn_load(path, generation);
                }
                Effect::Bind { generation } => match buffer.take() {
                    Some(b) => self.bind(b, generation),
                    None => log::error!("[playback] bind without a buffer (gen={})", generation),
                },
                Effect::StartPlayback { generation } => self.start(generation),
                Effect::Pause => {
                    self.sound.pause();
                    log::info!("[playback] paused");
                }
                Effect::Notify(ev) => self.presenter.borrow_mut().show(&ev),
                Effect::Exhausted => {
                    log::error!("[playback] no track could be loaded; press play to retry");
                    self.sound.stop();
                    self.presenter.borrow_mut().clear();
                }
            }
        }
        self.sync_play_button();
    }

    fn bind(&mut self, buffer: web::AudioBuffer, generation: u64) {
        self.sound.set_buffer(buffer);
        let mut slot = self.analyzer.borrow_mut();
        slot.clear();
        match FrequencyAnalyzer::new(&self.ctx, self.sound.output()) {
            Ok(a) => slot.replace(a),
            Err(e) => log::error!("[playback] analyser for gen={}: {:?}", generation, e),
        }
    }

    fn start(&mut self, generation: u64) {
        _ = self.ctx.resume();
        let weak = self.self_ref.clone();
        let started = self.sound.play(move || {
            deliver(weak.clone(), move |p: &mut Player| p.track_ended(generation), defer_task);
        });
        match started {
            Ok(()) => log::info!("[playback] playing {}", self.controller.current_track().path),
            Err(e) => log::error!("[playback] start failed: {:?}", e),
        }
    }

    fn spawn_load(&self, path: String, generation: u64) {
        let weak = self.self_ref.clone();
        let ctx = self.ctx.clone();
        spawn_local(async move {
            let result = loader::load_track(&ctx, &path).await;
            deliver(
                weak,
                move |p: &mut Player| p.load_finished(generation, result),
                defer_task,
            );
        });
    }

    fn sync_play_button(&self) {
        let Some(btn) = &self.play_button else {
            return;
        };
        let playing = self.controller.phase() == Phase::Playing;
        _ = btn.class_list().toggle_with_force("playing", playing);
        _ = btn.set_attribute("aria-pressed", if playing { "true" } else { "false" });
        _ = btn.set_attribute("aria-label", if playing { "Pause audio" } else { "Play audio" });
    }

    /// Stop audio, drop the analyser and close the context. Loads still in
    /// flight resolve into a no-op.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.sound.disconnect();
        self.analyzer.borrow_mut().clear();
        _ = self.ctx.close();
        log::info!("[playback] audio graph torn down");
    }
}

fn defer_task(task: Box<dyn FnOnce()>) {
    spawn_local(async move { task() });
}
