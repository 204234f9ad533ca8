// Shared visual/audio tuning constants used by the web frontend.

// Sphere geometry
pub const SPHERE_RADIUS: f32 = 3.0;
pub const SPHERE_DETAIL: u32 = 12; // subdivisions per icosahedron edge minus one

// Displacement shader
pub const NOISE_PERIOD: f32 = 10.0; // pnoise wraps every 10 units on each axis
pub const NOISE_AMPLITUDE: f32 = 3.0;
pub const FREQUENCY_DIVISOR: f32 = 30.0;
pub const NOISE_DIVISOR: f32 = 10.0;
pub const INITIAL_FREQUENCY: f32 = 1.0; // uniform value before any analyser is bound

// Camera
pub const CAMERA_START: [f32; 3] = [0.0, -2.0, 14.0];
pub const CAMERA_FOV_Y_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_EASE_X: f32 = 0.05; // fraction of the remaining distance covered per frame
pub const CAMERA_EASE_Y: f32 = 0.5;
pub const POINTER_SCALE: f32 = 100.0; // css pixels per world unit of pointer offset

// Analyser
pub const ANALYSER_FFT_SIZE: u32 = 32;
pub const MAX_MAGNITUDE: f32 = 255.0;

// Notifications
pub const NOTIFICATION_DISMISS_MS: u32 = 3000;
pub const NOTIFICATION_EXIT_MS: u32 = 300;
