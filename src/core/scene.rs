use crate::core::constants::*;
use crate::core::theme::ThemePreset;
use glam::{Mat4, Vec3};

/// Pointer position relative to the container centre, in world-ish units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    /// `client_*` is the event position; `rect` is `[left, top, width, height]`
    /// of the container in the same CSS pixel space.
    pub fn from_client(client_x: f32, client_y: f32, rect: [f32; 4]) -> Self {
        let cx = rect[0] + rect[2] / 2.0;
        let cy = rect[1] + rect[3] / 2.0;
        Self {
            x: (client_x - cx) / POINTER_SCALE,
            y: (client_y - cy) / POINTER_SCALE,
        }
    }
}

/// Perspective camera that drifts toward the pointer and always looks at
/// the origin.
#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    pub position: Vec3,
    pub aspect: f32,
}

impl CameraRig {
    pub fn new(width: u32, height: u32) -> Self {
        let mut rig = Self {
            position: Vec3::from_array(CAMERA_START),
            aspect: 1.0,
        };
        rig.set_viewport(width, height);
        rig
    }

    /// Exponential smoothing toward the pointer; screen-down maps to world-down.
    #[inline]
    pub fn ease_toward(&mut self, pointer: PointerOffset) {
        self.position.x += (pointer.x - self.position.x) * CAMERA_EASE_X;
        self.position.y += (-pointer.y - self.position.y) * CAMERA_EASE_Y;
    }

    /// Zero-sized viewports (hidden container) keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            CAMERA_FOV_Y_DEG.to_radians(),
            self.aspect,
            CAMERA_NEAR,
            CAMERA_FAR,
        )
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Per-frame values pushed to the shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    pub elapsed_time: f32,
    pub camera_position: Vec3,
    pub frequency_magnitude: f32,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            elapsed_time: 0.0,
            camera_position: Vec3::from_array(CAMERA_START),
            frequency_magnitude: INITIAL_FREQUENCY,
        }
    }
}

impl RenderState {
    /// Record one frame. Without an analyser sample the previous magnitude
    /// is kept so the sphere does not snap flat between tracks.
    pub fn advance(&mut self, elapsed_time: f32, camera_position: Vec3, sample: Option<f32>) {
        self.elapsed_time = elapsed_time;
        self.camera_position = camera_position;
        if let Some(m) = sample {
            self.frequency_magnitude = m.clamp(0.0, MAX_MAGNITUDE);
        }
    }
}

/// Uniform block layout shared with `sphere.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub time: f32,
    pub frequency: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub _pad: [f32; 3],
}

impl SphereUniforms {
    pub fn new(view_proj: Mat4, state: &RenderState, preset: &ThemePreset) -> Self {
        let [red, green, blue] = preset.line_rgb;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            time: state.elapsed_time,
            frequency: state.frequency_magnitude,
            red,
            green,
            blue,
            _pad: [0.0; 3],
        }
    }
}
