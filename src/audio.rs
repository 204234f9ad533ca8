use crate::core::constants::ANALYSER_FFT_SIZE;
use crate::core::{average_magnitude, AudioTap};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn js_err(what: &str, e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{} error: {:?}", what, e)
}

/// A pausable player for one decoded buffer.
///
/// WebAudio sources are one-shot, so pausing records the play head and
/// resuming starts a fresh source at that offset. The end-of-track callback
/// is detached before any deliberate stop so only natural completion fires it.
pub struct Sound {
    ctx: web::AudioContext,
    output: web::GainNode,
    buffer: Option<web::AudioBuffer>,
    source: Option<web::AudioBufferSourceNode>,
    on_ended: Option<Closure<dyn FnMut()>>,
    started_at: f64,
    progress: f64,
    playing: bool,
}

impl Sound {
    pub fn new(ctx: &web::AudioContext) -> anyhow::Result<Self> {
        let output = web::GainNode::new(ctx).map_err(|e| js_err("GainNode", e))?;
        output.gain().set_value(1.0);
        output
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| js_err("connect", e))?;
        Ok(Self {
            ctx: ctx.clone(),
            output,
            buffer: None,
            source: None,
            on_ended: None,
            started_at: 0.0,
            progress: 0.0,
            playing: false,
        })
    }

    /// Node the analyser taps.
    pub fn output(&self) -> &web::AudioNode {
        &self.output
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_buffer(&mut self, buffer: web::AudioBuffer) {
        self.stop();
        self.buffer = Some(buffer);
    }

    #[allow(deprecated)]
    pub fn play(&mut self, on_ended: impl FnMut() + 'static) -> anyhow::Result<()> {
        if self.playing {
            return Ok(());
        }
        let buffer = self
            .buffer
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no buffer bound"))?;
        let src = self
            .ctx
            .create_buffer_source()
            .map_err(|e| js_err("AudioBufferSourceNode", e))?;
        src.set_buffer(Some(buffer));
        src.set_loop(false);
        src.connect_with_audio_node(&self.output)
            .map_err(|e| js_err("connect", e))?;
        let closure = Closure::wrap(Box::new(on_ended) as Box<dyn FnMut()>);
        src.set_onended(Some(closure.as_ref().unchecked_ref()));
        let duration = buffer.duration();
        let offset = if duration > 0.0 {
            self.progress % duration
        } else {
            0.0
        };
        src.start_with_when_and_grain_offset(0.0, offset)
            .map_err(|e| js_err("start", e))?;
        self.started_at = self.ctx.current_time();
        self.source = Some(src);
        self.on_ended = Some(closure);
        self.playing = true;
        Ok(())
    }

    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.progress += (self.ctx.current_time() - self.started_at).max(0.0);
        self.halt_source();
        self.playing = false;
    }

    pub fn stop(&mut self) {
        self.halt_source();
        self.progress = 0.0;
        self.playing = false;
    }

    pub fn disconnect(&mut self) {
        self.stop();
        self.buffer = None;
        _ = self.output.disconnect();
    }

    #[allow(deprecated)]
    fn halt_source(&mut self) {
        if let Some(src) = self.source.take() {
            src.set_onended(None);
            _ = src.stop();
            _ = src.disconnect();
        }
        self.on_ended = None;
    }
}

/// Average-magnitude probe over a bound sound's output.
pub struct FrequencyAnalyzer {
    node: web::AnalyserNode,
    input: web::AudioNode,
    bins: Vec<u8>,
}

impl FrequencyAnalyzer {
    pub fn new(ctx: &web::AudioContext, input: &web::AudioNode) -> anyhow::Result<Self> {
        let node = web::AnalyserNode::new(ctx).map_err(|e| js_err("AnalyserNode", e))?;
        node.set_fft_size(ANALYSER_FFT_SIZE);
        input
            .connect_with_audio_node(&node)
            .map_err(|e| js_err("connect analyser", e))?;
        let bins = vec![0u8; node.frequency_bin_count() as usize];
        Ok(Self {
            node,
            input: input.clone(),
            bins,
        })
    }

    /// Latest average magnitude in `[0, 255]`; 0 until audio flows.
    pub fn sample(&mut self) -> f32 {
        self.node.get_byte_frequency_data(&mut self.bins);
        average_magnitude(&self.bins)
    }
}

impl AudioTap for FrequencyAnalyzer {
    fn detach(&self) {
        // node.disconnect() only drops outgoing edges; the feed from the
        // sound's output has to be cut on the input side.
        _ = self.input.disconnect_with_audio_node(&self.node);
        _ = self.node.disconnect();
    }
}
