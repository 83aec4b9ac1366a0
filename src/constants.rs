pub const TICK_RATE_MS: u64 = 1000; // one sample-render cycle per second
pub const SOURCE_COUNT: usize = 5;

pub const VIEWPORT_WIDTH: f64 = 1600.0;
pub const VIEWPORT_HEIGHT: f64 = 1200.0;
pub const LABEL_MARGIN: f64 = 100.0; // headroom kept above the tallest bar

pub const MIN_RATE: f64 = 1000.0;
pub const MAX_RATE: f64 = 5000.0;

pub const LABEL_OFFSET: f64 = 20.0;
pub const LABEL_FONT_SIZE: f32 = 14.0;

pub const WINDOW_TITLE: &str = "Bandwidth Monitor";
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

pub const FONT_PATH_ENV: &str = "BANDWIDTH_MONITOR_FONT";
pub const LOG_PATH_ENV: &str = "BANDWIDTH_MONITOR_LOG";
