pub const RENDER_WIDTH: i32 = 1920;           // Width of the host window at full size
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the host window at full size
pub const FPS: u32 = 60;                      // Frames per second

pub const DEFAULT_INTERVAL_MS: u64 = 1000;            // Time between automatic advances
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 700;   // Duration of the transition effect
pub const DEFAULT_ANIMATION_DELAY_MS: u64 = 100;      // Delay before the transition starts
pub const DEFAULT_TIMING_FUNCTION: &str = "cubic-bezier(0.1, 0.99, 0.1, 0.99)";

pub const ZOOM_OUT_SCALE: f32 = 2.0;          // Scale of slides that are not shown in ZOOM mode

pub const DOT_RADIUS: f32 = 6.0;              // Navigation dot radius (pixels)
pub const DOT_SPACING: f32 = 24.0;            // Distance between dot centers (pixels)
pub const DOT_MARGIN: f32 = 32.0;             // Distance from the bottom edge (pixels)
