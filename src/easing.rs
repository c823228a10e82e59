//! Timing function descriptors such as `ease-out` or `cubic-bezier(0.1, 0.99, 0.1, 0.99)`.

use crate::error::{CarouselError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

/// Coarse curve family, for hosts that only ship named easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingShape {
    Linear,
    In,
    Out,
    InOut,
}

impl Easing {
    pub fn parse(descriptor: &str) -> Result<Self> {
        let descriptor = descriptor.trim().to_ascii_lowercase();
        match descriptor.as_str() {
            "linear" => return Ok(Easing::Linear),
            "ease" => return Ok(Easing::Ease),
            "ease-in" => return Ok(Easing::EaseIn),
            "ease-out" => return Ok(Easing::EaseOut),
            "ease-in-out" => return Ok(Easing::EaseInOut),
            _ => {}
        }

        let args = descriptor
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| CarouselError::TimingFunction(descriptor.clone()))?;

        let points = args
            .split(',')
            .map(|value| value.trim().parse::<f32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| CarouselError::TimingFunction(descriptor.clone()))?;

        match points.as_slice() {
            // x coordinates must stay inside [0, 1] for the curve to be a function of time
            &[x1, y1, x2, y2] if (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2) => {
                Ok(Easing::CubicBezier { x1, y1, x2, y2 })
            }
            _ => Err(CarouselError::TimingFunction(descriptor.clone())),
        }
    }

    pub fn shape(&self) -> EasingShape {
        match *self {
            Easing::Linear => EasingShape::Linear,
            Easing::EaseIn => EasingShape::In,
            Easing::EaseOut => EasingShape::Out,
            Easing::Ease | Easing::EaseInOut => EasingShape::InOut,
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                let fast_start = y1 > x1;
                let fast_end = y2 < x2;
                match (fast_start, fast_end) {
                    _ if x1 == y1 && x2 == y2 => EasingShape::Linear,
                    (true, false) => EasingShape::Out,
                    (false, true) => EasingShape::In,
                    _ => EasingShape::InOut,
                }
            }
        }
    }
}
