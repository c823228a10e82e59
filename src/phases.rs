//! From/to phase resolver for hosts that replay an animation on every transition.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::config::{AnimationKind, CustomAnimation};
use crate::constants::ZOOM_OUT_SCALE;

/// Snapshot of animatable properties. Translations are percentages of the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleProps {
    #[serde(default)]
    pub opacity: Option<f32>,
    #[serde(default)]
    pub translate_x: Option<f32>,
    #[serde(default)]
    pub translate_y: Option<f32>,
    #[serde(default)]
    pub scale: Option<f32>,
}

impl StyleProps {
    pub const EMPTY: StyleProps = StyleProps {
        opacity: None,
        translate_x: None,
        translate_y: None,
        scale: None,
    };

    fn opacity(value: f32) -> Self {
        Self { opacity: Some(value), ..Self::EMPTY }
    }

    fn translate_x(value: f32) -> Self {
        Self { translate_x: Some(value), ..Self::EMPTY }
    }

    /// Field by field merge where `other` wins.
    pub fn overlay(&self, other: &StyleProps) -> StyleProps {
        StyleProps {
            opacity: other.opacity.or(self.opacity),
            translate_x: other.translate_x.or(self.translate_x),
            translate_y: other.translate_y.or(self.translate_y),
            scale: other.scale.or(self.scale),
        }
    }
}

/// How one slide moves across a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(default)]
    pub from: StyleProps,
    #[serde(default)]
    pub to: StyleProps,
}

impl Phase {
    pub fn overlay(&self, other: &Phase) -> Phase {
        Phase {
            from: self.from.overlay(&other.from),
            to: self.to.overlay(&other.to),
        }
    }
}

/// Phases for the outgoing (`active`) and incoming (`next`) slide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhasePair {
    pub active: Phase,
    pub next: Phase,
}

/// What the host interpolator needs to play one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub phase: Phase,
    pub duration_ms: u64,
    pub timing_function: String,
    pub delay_ms: u64,
    /// Flips on every transition; a change means restart from `from`
    pub reset: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpecs {
    pub active: AnimationSpec,
    pub next: AnimationSpec,
}

static BUILTIN_PHASES: LazyLock<HashMap<AnimationKind, PhasePair>> = LazyLock::new(|| {
    let slide_left = PhasePair {
        active: Phase { from: StyleProps::translate_x(0.0), to: StyleProps::translate_x(-100.0) },
        next: Phase { from: StyleProps::translate_x(100.0), to: StyleProps::translate_x(0.0) },
    };
    HashMap::from([
        (
            AnimationKind::Fade,
            PhasePair {
                active: Phase { from: StyleProps::opacity(1.0), to: StyleProps::opacity(0.0) },
                next: Phase { from: StyleProps::opacity(0.0), to: StyleProps::opacity(1.0) },
            },
        ),
        (AnimationKind::Slide, slide_left),
        (AnimationKind::SlideLeft, slide_left),
        (
            AnimationKind::SlideRight,
            PhasePair {
                active: Phase { from: StyleProps::translate_x(0.0), to: StyleProps::translate_x(100.0) },
                next: Phase { from: StyleProps::translate_x(-100.0), to: StyleProps::translate_x(0.0) },
            },
        ),
        (
            AnimationKind::Zoom,
            PhasePair {
                active: Phase {
                    from: StyleProps { opacity: Some(1.0), scale: Some(1.0), ..StyleProps::EMPTY },
                    to: StyleProps { opacity: Some(0.0), scale: Some(ZOOM_OUT_SCALE), ..StyleProps::EMPTY },
                },
                next: Phase {
                    from: StyleProps { opacity: Some(0.0), scale: Some(ZOOM_OUT_SCALE), ..StyleProps::EMPTY },
                    to: StyleProps { opacity: Some(1.0), scale: Some(1.0), ..StyleProps::EMPTY },
                },
            },
        ),
    ])
});

/// Builtin phases for `kind` with the caller's overrides laid on top.
pub fn resolve_phases(kind: Option<AnimationKind>, custom: Option<&CustomAnimation>) -> PhasePair {
    let builtin = kind
        .and_then(|kind| BUILTIN_PHASES.get(&kind).copied())
        .unwrap_or_default();

    let Some(custom) = custom else {
        return builtin;
    };

    PhasePair {
        active: custom.active.map_or(builtin.active, |phase| builtin.active.overlay(&phase)),
        next: custom.next.map_or(builtin.next, |phase| builtin.next.overlay(&phase)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_table_entry() {
        let pair = resolve_phases(Some(AnimationKind::Fade), None);
        assert_eq!(pair.active.from.opacity, Some(1.0));
        assert_eq!(pair.active.to.opacity, Some(0.0));
        assert_eq!(pair.next.from.opacity, Some(0.0));
        assert_eq!(pair.next.to.opacity, Some(1.0));
    }

    #[test]
    fn test_slide_directions_mirror() {
        let left = resolve_phases(Some(AnimationKind::SlideLeft), None);
        let right = resolve_phases(Some(AnimationKind::SlideRight), None);
        assert_eq!(left.active.to.translate_x, Some(-100.0));
        assert_eq!(right.active.to.translate_x, Some(100.0));
        assert_eq!(left.next.from.translate_x, Some(100.0));
        assert_eq!(right.next.from.translate_x, Some(-100.0));
        assert_eq!(resolve_phases(Some(AnimationKind::Slide), None), left);
    }

    #[test]
    fn test_unset_and_none_are_empty() {
        assert_eq!(resolve_phases(None, None), PhasePair::default());
        assert_eq!(resolve_phases(Some(AnimationKind::None), None), PhasePair::default());
    }

    #[test]
    fn test_custom_override_wins_field_by_field() {
        let custom = CustomAnimation {
            active: None,
            next: Some(Phase {
                from: StyleProps { opacity: Some(0.25), scale: Some(0.5), ..StyleProps::EMPTY },
                to: StyleProps::EMPTY,
            }),
        };
        let pair = resolve_phases(Some(AnimationKind::Fade), Some(&custom));
        assert_eq!(pair.next.from.opacity, Some(0.25));
        assert_eq!(pair.next.from.scale, Some(0.5));
        assert_eq!(pair.next.to.opacity, Some(1.0));
        assert_eq!(pair.active, resolve_phases(Some(AnimationKind::Fade), None).active);
    }

    #[test]
    fn test_custom_over_empty_table() {
        let custom = CustomAnimation {
            active: Some(Phase { from: StyleProps::translate_x(0.0), to: StyleProps::translate_x(-50.0) }),
            next: None,
        };
        let pair = resolve_phases(None, Some(&custom));
        assert_eq!(pair.active.to.translate_x, Some(-50.0));
        assert_eq!(pair.next, Phase::default());
    }

    #[test]
    fn test_table_is_not_mutated_by_overrides() {
        let custom = CustomAnimation {
            active: Some(Phase { from: StyleProps::opacity(0.3), to: StyleProps::EMPTY }),
            next: None,
        };
        let _ = resolve_phases(Some(AnimationKind::Fade), Some(&custom));
        assert_eq!(resolve_phases(Some(AnimationKind::Fade), None).active.from.opacity, Some(1.0));
    }
}
