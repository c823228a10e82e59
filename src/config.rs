use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::constants::*;
use crate::error::{CarouselError, Result};
use crate::phases::Phase;

/// Visual effect used between two slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimationKind {
    /// Snap between slides without any transition
    #[serde(rename = "NO")]
    None,
    Fade,
    Slide,
    SlideLeft,
    SlideRight,
    Zoom,
}

impl AnimationKind {
    /// Parses names such as `FADE`, `slide-left` or `NO`. Unknown names give `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "NO" | "NONE" => Some(Self::None),
            "FADE" => Some(Self::Fade),
            "SLIDE" => Some(Self::Slide),
            "SLIDE_LEFT" => Some(Self::SlideLeft),
            "SLIDE_RIGHT" => Some(Self::SlideRight),
            "ZOOM" => Some(Self::Zoom),
            _ => None,
        }
    }

    /// Like [`AnimationKind::parse`], but logs names it cannot make sense of.
    pub fn parse_lenient(name: &str) -> Option<Self> {
        let kind = Self::parse(name);
        if kind.is_none() {
            warn!("Unrecognized animation type {:?}, slides will switch without animation", name);
        }
        kind
    }
}

/// Which half of the rotation state counts as the slide being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceIndex {
    Active,
    #[default]
    NextActive,
}

/// How manual selection treats indices outside `[0, slide_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IndexPolicy {
    #[default]
    Reject,
    Wrap,
    Clamp,
}

impl IndexPolicy {
    pub fn resolve(self, index: i64, slide_count: usize) -> Result<usize> {
        if slide_count == 0 {
            return Err(CarouselError::NoSlides);
        }
        let count = slide_count as i64;
        match self {
            IndexPolicy::Reject if (0..count).contains(&index) => Ok(index as usize),
            IndexPolicy::Reject => Err(CarouselError::IndexOutOfRange { index, slide_count }),
            IndexPolicy::Wrap => Ok(index.rem_euclid(count) as usize),
            IndexPolicy::Clamp => Ok(index.clamp(0, count - 1) as usize),
        }
    }
}

/// Number of independent timer tracks driving the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TimerDiscipline {
    /// One timer keyed on the next-active slide
    #[default]
    Single,
    /// An extra timer keyed on the active slide staggers exit and entry
    Two,
}

/// Which resolver output the host consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StyleForm {
    /// One property bag per slide
    #[default]
    Payload,
    /// A from/to phase pair for the active and next slides
    Phases,
}

/// Caller supplied phases merged over the builtin animation table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomAnimation {
    #[serde(default)]
    pub active: Option<Phase>,
    #[serde(default)]
    pub next: Option<Phase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Milliseconds between automatic advances
    #[serde(default = "default_interval_ms", alias = "duration")]
    pub interval_ms: u64,
    /// Milliseconds the transition effect itself lasts
    #[serde(default = "default_animation_duration_ms", alias = "animation_duration")]
    pub animation_duration_ms: u64,
    /// Milliseconds before the transition starts
    #[serde(default = "default_animation_delay_ms", alias = "animation_delay")]
    pub animation_delay_ms: u64,
    /// Easing curve descriptor
    #[serde(default = "default_timing_function", alias = "animation_timing_function")]
    pub timing_function: String,
    /// Unset or unrecognized means no animation
    #[serde(default, deserialize_with = "deserialize_animation_type")]
    pub animation_type: Option<AnimationKind>,
    #[serde(default)]
    pub with_navigation: bool,
    #[serde(default)]
    pub animate_on_mount: bool,
    #[serde(default)]
    pub custom_animation: Option<CustomAnimation>,
    #[serde(default)]
    pub reference: ReferenceIndex,
    #[serde(default)]
    pub index_policy: IndexPolicy,
    #[serde(default)]
    pub timers: TimerDiscipline,
    /// Delay of the bring-next track, half the interval when unset
    #[serde(default)]
    pub bring_next_delay_ms: Option<u64>,
    #[serde(default)]
    pub style_form: StyleForm,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            animation_duration_ms: default_animation_duration_ms(),
            animation_delay_ms: default_animation_delay_ms(),
            timing_function: default_timing_function(),
            animation_type: None,
            with_navigation: false,
            animate_on_mount: false,
            custom_animation: None,
            reference: ReferenceIndex::default(),
            index_policy: IndexPolicy::default(),
            timers: TimerDiscipline::default(),
            bring_next_delay_ms: None,
            style_form: StyleForm::default(),
        }
    }
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

fn default_animation_duration_ms() -> u64 {
    DEFAULT_ANIMATION_DURATION_MS
}

fn default_animation_delay_ms() -> u64 {
    DEFAULT_ANIMATION_DELAY_MS
}

fn default_timing_function() -> String {
    DEFAULT_TIMING_FUNCTION.to_string()
}

fn deserialize_animation_type<'de, D>(deserializer: D) -> std::result::Result<Option<AnimationKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.as_deref().and_then(AnimationKind::parse_lenient))
}

impl CarouselConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CarouselConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(CarouselError::InvalidConfig("interval_ms must be positive".into()));
        }
        match self.bring_next_delay_ms {
            Some(0) => {
                return Err(CarouselError::InvalidConfig("bring_next_delay_ms must be positive".into()));
            }
            // The advance track would always fire first and cancel it
            Some(delay) if self.timers == TimerDiscipline::Two && delay >= self.interval_ms => {
                return Err(CarouselError::InvalidConfig(format!(
                    "bring_next_delay_ms ({}) must be shorter than interval_ms ({})",
                    delay, self.interval_ms
                )));
            }
            _ => {}
        }
        Ok(())
    }

    pub fn bring_next_delay_ms(&self) -> u64 {
        self.bring_next_delay_ms.unwrap_or(self.interval_ms / 2).max(1)
    }
}
