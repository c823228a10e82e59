use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::seq::SliceRandom;
use raylib::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carousel::constants::*;
use carousel::{AnimationKind, CarouselConfig, IndexPolicy, ReferenceIndex, StyleForm, TimerDiscipline};

mod engine;
mod render;
mod slide;
mod texture_loader;

use crate::engine::Engine;
use crate::render::CarouselEngine;
use crate::texture_loader::load_sorted_image_paths;

#[derive(Parser)]
#[command(name = "carousel")]
#[command(author, version, about = "Auto-advancing image carousel")]
struct Cli {
    /// Directory holding the slide images
    directory: PathBuf,

    /// TOML file with carousel options; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds between automatic advances
    #[arg(short, long)]
    duration: Option<u64>,

    /// Milliseconds the transition effect lasts
    #[arg(long)]
    animation_duration: Option<u64>,

    /// Milliseconds before the transition starts
    #[arg(long)]
    animation_delay: Option<u64>,

    /// Easing curve, e.g. "ease-out" or "cubic-bezier(0.1, 0.99, 0.1, 0.99)"
    #[arg(long)]
    animation_timing_function: Option<String>,

    /// NO, FADE, SLIDE, SLIDE_LEFT, SLIDE_RIGHT or ZOOM
    #[arg(short = 't', long)]
    animation_type: Option<String>,

    /// Show one navigation dot per slide
    #[arg(short = 'n', long)]
    with_navigation: bool,

    /// Animate the very first paint instead of snapping
    #[arg(long)]
    animate_on_mount: bool,

    /// Which slide of the rotation counts as shown
    #[arg(long, value_enum)]
    reference: Option<ReferenceIndex>,

    /// Handling of out-of-range manual selections
    #[arg(long, value_enum)]
    index_policy: Option<IndexPolicy>,

    /// Single or two-timer rotation
    #[arg(long, value_enum)]
    timers: Option<TimerDiscipline>,

    /// Per-slide styles or active/next phases
    #[arg(long, value_enum)]
    style_form: Option<StyleForm>,

    /// Randomize slide order
    #[arg(long)]
    shuffle: bool,
}

impl Cli {
    fn carousel_config(&self) -> Result<CarouselConfig> {
        let mut config = match &self.config {
            Some(path) => CarouselConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))?,
            None => CarouselConfig::default(),
        };

        if let Some(duration) = self.duration {
            config.interval_ms = duration;
        }
        if let Some(duration) = self.animation_duration {
            config.animation_duration_ms = duration;
        }
        if let Some(delay) = self.animation_delay {
            config.animation_delay_ms = delay;
        }
        if let Some(timing) = &self.animation_timing_function {
            config.timing_function = timing.clone();
        }
        if let Some(name) = &self.animation_type {
            config.animation_type = AnimationKind::parse_lenient(name);
        }
        config.with_navigation |= self.with_navigation;
        config.animate_on_mount |= self.animate_on_mount;
        if let Some(reference) = self.reference {
            config.reference = reference;
        }
        if let Some(policy) = self.index_policy {
            config.index_policy = policy;
        }
        if let Some(timers) = self.timers {
            config.timers = timers;
        }
        if let Some(form) = self.style_form {
            config.style_form = form;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = cli.carousel_config()?;

    let mut image_paths = load_sorted_image_paths(&cli.directory)?;
    if cli.shuffle {
        image_paths.shuffle(&mut rand::rng());
    }
    info!("Input path: {} ({} images)", cli.directory.display(), image_paths.len());

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = CarouselEngine::new(config);
    if let Err(e) = engine.initialize(&mut rl, &thread, image_paths) {
        error!("{:#}", e);
        return Err(e);
    }

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        if !engine.render_frame(dt, &mut rl, &thread) {
            break;
        }
    }

    engine.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "carousel",
            "photos",
            "--duration",
            "3000",
            "-t",
            "zoom",
            "--with-navigation",
            "--index-policy",
            "wrap",
            "--timers",
            "two",
        ])
        .unwrap();
        let config = cli.carousel_config().unwrap();
        assert_eq!(config.interval_ms, 3000);
        assert_eq!(config.animation_type, Some(AnimationKind::Zoom));
        assert!(config.with_navigation);
        assert_eq!(config.index_policy, IndexPolicy::Wrap);
        assert_eq!(config.timers, TimerDiscipline::Two);
        assert_eq!(config.animation_duration_ms, DEFAULT_ANIMATION_DURATION_MS);
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let cli = Cli::try_parse_from(["carousel", "photos", "-d", "0"]).unwrap();
        assert!(cli.carousel_config().is_err());
    }
}
