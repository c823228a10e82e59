//! Single-payload style resolver: one property bag per slide.

use std::fmt::Write;

use crate::config::{AnimationKind, ReferenceIndex};
use crate::constants::ZOOM_OUT_SCALE;

/// Transition descriptor attached to every computed style.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Disabled,
    Timed {
        duration_ms: u64,
        timing_function: String,
        delay_ms: u64,
    },
}

/// Computed properties for one slide layer. `None` leaves a property untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideStyle {
    pub opacity: Option<f32>,
    pub translate_x_percent: Option<f32>,
    pub scale: Option<f32>,
    pub transition: Transition,
}

impl SlideStyle {
    /// CSS-like declaration list, e.g. `transition: all 0.7s ease 0.1s; opacity: 1`.
    pub fn to_css(&self) -> String {
        let mut css = match &self.transition {
            Transition::Disabled => "transition: none".to_string(),
            Transition::Timed { duration_ms, timing_function, delay_ms } => format!(
                "transition: all {}s {} {}s",
                *duration_ms as f64 / 1000.0,
                timing_function,
                *delay_ms as f64 / 1000.0
            ),
        };
        if let Some(opacity) = self.opacity {
            let _ = write!(css, "; opacity: {}", opacity);
        }
        let mut transforms = Vec::new();
        if let Some(x) = self.translate_x_percent {
            transforms.push(format!("translateX({}%)", x));
        }
        if let Some(scale) = self.scale {
            transforms.push(format!("scale({})", scale));
        }
        if !transforms.is_empty() {
            let _ = write!(css, "; transform: {}", transforms.join(" "));
        }
        css
    }
}

/// Everything the resolver looks at for one slide.
#[derive(Debug, Clone, Copy)]
pub struct StyleInput<'a> {
    pub slide_index: usize,
    pub active_index: Option<usize>,
    pub next_active_index: usize,
    pub reference: ReferenceIndex,
    pub animation_type: Option<AnimationKind>,
    pub duration_ms: u64,
    pub timing_function: &'a str,
    pub delay_ms: u64,
}

impl StyleInput<'_> {
    fn reference_index(&self) -> usize {
        match self.reference {
            ReferenceIndex::Active => self.active_index.unwrap_or(self.next_active_index),
            ReferenceIndex::NextActive => self.next_active_index,
        }
    }
}

pub fn resolve_style(input: &StyleInput) -> SlideStyle {
    let reference = input.reference_index();
    let shown = input.slide_index == reference;
    let opacity = if shown { 1.0 } else { 0.0 };
    let offset = (input.slide_index as f32 - reference as f32) * 100.0;
    let mirrored = (reference as f32 - input.slide_index as f32) * 100.0;

    let timed = Transition::Timed {
        duration_ms: input.duration_ms,
        timing_function: input.timing_function.to_string(),
        delay_ms: input.delay_ms,
    };

    match input.animation_type {
        Some(AnimationKind::Fade) => SlideStyle {
            opacity: Some(opacity),
            translate_x_percent: None,
            scale: None,
            transition: timed,
        },
        Some(AnimationKind::Slide) | Some(AnimationKind::SlideLeft) => SlideStyle {
            opacity: None,
            translate_x_percent: Some(offset),
            scale: None,
            transition: timed,
        },
        Some(AnimationKind::SlideRight) => SlideStyle {
            opacity: None,
            translate_x_percent: Some(mirrored),
            scale: None,
            transition: timed,
        },
        Some(AnimationKind::Zoom) => SlideStyle {
            opacity: Some(opacity),
            translate_x_percent: None,
            scale: Some(if shown { 1.0 } else { ZOOM_OUT_SCALE }),
            transition: timed,
        },
        Some(AnimationKind::None) | None => SlideStyle {
            opacity: Some(opacity),
            translate_x_percent: None,
            scale: None,
            transition: Transition::Disabled,
        },
    }
}
