use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::canvas::SparseCanvas;

const CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_PATTERN: &str = "{d(%H:%M:%S%.3f)} {l} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(CONFIG_FILE, Default::default()).is_err() {
        init_console_fallback();
    }
}

/// Console logging at `warn` for runs without a `log4rs.yaml` next to them.
fn init_console_fallback() {
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}

pub fn log_canvas_layout(canvas: &SparseCanvas) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    log::debug!(
        "canvas {} holds {} tiles in {} bands, written area {}",
        canvas.bounds(),
        canvas.tile_count(),
        canvas.band_count(),
        canvas.occupied()
    );
    for band in canvas.bands() {
        let columns: Vec<i32> = band.tiles().iter().map(|tile| tile.min_x()).collect();
        log::debug!("band {:>5}: {:?}", band.min_y(), columns);
    }
}
