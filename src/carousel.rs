use tracing::{debug, info, warn};

use crate::config::{CarouselConfig, TimerDiscipline};
use crate::error::{CarouselError, Result};
use crate::phases::{AnimationSpec, AnimationSpecs, resolve_phases};
use crate::state::{Action, RotationState};
use crate::style::{SlideStyle, StyleInput, Transition, resolve_style};
use crate::timer::TimerSlot;

/// A mounted carousel: rotation state plus the timers that drive it.
///
/// Time is virtual. The host calls [`Carousel::advance`] with elapsed
/// milliseconds and every due timer fires in deadline order inside that call,
/// so a transition always completes before the next one is considered.
#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    slide_count: usize,
    state: RotationState,
    now_ms: u64,
    advance_timer: TimerSlot,
    bring_next_timer: TimerSlot,
    mounted: bool,
    settled: bool,
}

impl Carousel {
    pub fn mount(slide_count: usize, config: CarouselConfig) -> Result<Self> {
        if slide_count == 0 {
            return Err(CarouselError::NoSlides);
        }
        config.validate()?;

        let mut carousel = Self {
            state: RotationState::initial(slide_count, config.reference),
            config,
            slide_count,
            now_ms: 0,
            advance_timer: TimerSlot::default(),
            bring_next_timer: TimerSlot::default(),
            mounted: true,
            settled: false,
        };
        carousel.arm_all();

        info!(
            "Mounted carousel with {} slides, interval {}ms, {:?} timers",
            slide_count, carousel.config.interval_ms, carousel.config.timers
        );
        Ok(carousel)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The slide currently treated as shown.
    pub fn reference_index(&self) -> usize {
        self.state.reference_index(self.config.reference)
    }

    pub fn armed_timers(&self) -> usize {
        [self.advance_timer, self.bring_next_timer]
            .iter()
            .filter(|timer| timer.is_armed())
            .count()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        [self.advance_timer.deadline(), self.bring_next_timer.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Moves the clock forward and fires every timer that falls due. Returns
    /// the transitions dispatched, in order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Action> {
        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = Vec::new();

        // --- Fire due timers, earliest first ---
        while let Some(deadline) = self.next_deadline().filter(|deadline| *deadline <= target) {
            // Jump the clock to the firing instant so re-arms count from there
            self.now_ms = deadline;

            // Ties go to the advance track
            let action = if self.advance_timer.take_due(deadline).is_some() {
                Action::Next
            } else if self.bring_next_timer.take_due(deadline).is_some() {
                Action::BringNext
            } else {
                break;
            };
            self.dispatch(action);
            fired.push(action);

            // A slot re-armed at or before the instant it just fired would spin forever
            let slot = match action {
                Action::BringNext => &mut self.bring_next_timer,
                _ => &mut self.advance_timer,
            };
            if slot.deadline().is_some_and(|next| next <= deadline) {
                warn!("Timer re-armed without moving forward at {}ms, cancelling it", deadline);
                slot.cancel();
            }
        }

        // --- Settle the clock at the end of the window ---
        self.now_ms = target;
        fired
    }

    /// Manual selection. Cancels every pending timer before dispatching, then
    /// restarts the countdown.
    pub fn select(&mut self, index: i64) -> Result<()> {
        if !self.mounted {
            return Err(CarouselError::NotMounted);
        }
        let index = self.config.index_policy.resolve(index, self.slide_count)?;

        self.advance_timer.cancel();
        self.bring_next_timer.cancel();
        info!("Manual selection of slide {}", index);
        self.dispatch(Action::Custom(index));
        Ok(())
    }

    /// Changing the interval restarts every armed countdown.
    pub fn set_interval_ms(&mut self, interval_ms: u64) -> Result<()> {
        if interval_ms == self.config.interval_ms {
            return Ok(());
        }
        let previous = self.config.interval_ms;
        self.config.interval_ms = interval_ms;
        if let Err(e) = self.config.validate() {
            self.config.interval_ms = previous;
            return Err(e);
        }
        if self.mounted {
            // Only restart tracks that were counting down; an idle track stays idle
            if self.advance_timer.is_armed() {
                self.advance_timer.arm(self.now_ms, self.config.interval_ms);
            }
            if self.bring_next_timer.is_armed() {
                self.bring_next_timer.arm(self.now_ms, self.config.bring_next_delay_ms());
            }
        }
        Ok(())
    }

    /// Cancels every timer. The state stops changing for good.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.advance_timer.cancel();
        self.bring_next_timer.cancel();
        self.mounted = false;
        info!("Unmounted carousel at {}ms", self.now_ms);
    }

    /// Payload form: one computed style per slide.
    pub fn slide_styles(&self) -> Vec<SlideStyle> {
        (0..self.slide_count)
            .map(|slide_index| {
                let mut style = resolve_style(&StyleInput {
                    slide_index,
                    active_index: self.state.active,
                    next_active_index: self.state.next_active,
                    reference: self.config.reference,
                    animation_type: self.config.animation_type,
                    duration_ms: self.config.animation_duration_ms,
                    timing_function: &self.config.timing_function,
                    delay_ms: self.config.animation_delay_ms,
                });
                if !self.settled && !self.config.animate_on_mount {
                    style.transition = Transition::Disabled;
                }
                style
            })
            .collect()
    }

    /// Phase form: animation specs for the outgoing and incoming slides.
    pub fn animation_specs(&self) -> AnimationSpecs {
        let phases = resolve_phases(self.config.animation_type, self.config.custom_animation.as_ref());
        let spec = |phase| AnimationSpec {
            phase,
            duration_ms: self.config.animation_duration_ms,
            timing_function: self.config.timing_function.clone(),
            delay_ms: self.config.animation_delay_ms,
            reset: self.state.toggle,
        };
        AnimationSpecs {
            active: spec(phases.active),
            next: spec(phases.next),
        }
    }

    fn dispatch(&mut self, action: Action) {
        // --- Run the reducer: the whole state is replaced at once ---
        let previous = self.state;
        self.state = previous.reduce(action, self.slide_count, self.config.reference);
        self.settled = true;
        debug!(
            "{:?} at {}ms: active {:?} -> {:?}, next {} -> {}",
            action, self.now_ms, previous.active, self.state.active, previous.next_active, self.state.next_active
        );

        // --- Re-arm the tracks keyed on what changed ---
        match action {
            Action::Next | Action::Custom(_) => {
                self.advance_timer.arm(self.now_ms, self.config.interval_ms);
            }
            Action::BringNext => {} // Pair unchanged, the advance countdown keeps running
        }

        if self.config.timers == TimerDiscipline::Two
            && (previous.active != self.state.active || matches!(action, Action::Custom(_)))
        {
            self.bring_next_timer.arm(self.now_ms, self.config.bring_next_delay_ms());
        }
    }

    fn arm_all(&mut self) {
        self.advance_timer.arm(self.now_ms, self.config.interval_ms);
        if self.config.timers == TimerDiscipline::Two {
            self.bring_next_timer.arm(self.now_ms, self.config.bring_next_delay_ms());
        }
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnimationKind, IndexPolicy, ReferenceIndex};

    fn fade_config() -> CarouselConfig {
        CarouselConfig {
            interval_ms: 1000,
            animation_type: Some(AnimationKind::Fade),
            with_navigation: true,
            ..Default::default()
        }
    }

    fn shown_slide(carousel: &Carousel) -> Vec<usize> {
        carousel
            .slide_styles()
            .iter()
            .enumerate()
            .filter(|(_, style)| style.opacity == Some(1.0))
            .map(|(index, _)| index)
            .collect()
    }

    #[test]
    fn test_mount_rejects_empty_carousel() {
        assert!(matches!(Carousel::mount(0, CarouselConfig::default()), Err(CarouselError::NoSlides)));
    }

    #[test]
    fn test_fade_navigation_scenario() {
        let mut carousel = Carousel::mount(3, fade_config()).unwrap();
        assert_eq!(shown_slide(&carousel), vec![0]);

        assert_eq!(carousel.advance(999), vec![]);
        assert_eq!(carousel.advance(1), vec![Action::Next]);
        assert_eq!(shown_slide(&carousel), vec![1]);

        carousel.advance(400);
        carousel.select(2).unwrap();
        assert_eq!(shown_slide(&carousel), vec![2]);
        assert_eq!(carousel.next_deadline(), Some(2400));

        assert_eq!(carousel.advance(999), vec![]);
        assert_eq!(carousel.advance(1), vec![Action::Next]);
        assert_eq!(shown_slide(&carousel), vec![0]);
    }

    #[test]
    fn test_next_active_cycles_with_time() {
        let mut carousel = Carousel::mount(4, CarouselConfig::default()).unwrap();
        let mut seen = Vec::new();
        for _ in 0..8 {
            carousel.advance(1000);
            seen.push(carousel.state().next_active);
        }
        assert_eq!(seen, vec![1, 2, 3, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_large_step_fires_each_timer_once_per_interval() {
        let mut carousel = Carousel::mount(3, CarouselConfig::default()).unwrap();
        let fired = carousel.advance(3500);
        assert_eq!(fired, vec![Action::Next; 3]);
        assert_eq!(carousel.now_ms(), 3500);
        assert_eq!(carousel.next_deadline(), Some(4000));
    }

    #[test]
    fn test_select_leaves_exactly_one_timer() {
        let mut carousel = Carousel::mount(3, fade_config()).unwrap();
        carousel.advance(700);
        carousel.select(1).unwrap();
        assert_eq!(carousel.armed_timers(), 1);
        assert_eq!(carousel.next_deadline(), Some(1700));
        // the countdown from mount must not fire at 1000
        assert_eq!(carousel.advance(999), vec![]);
        assert_eq!(carousel.advance(1), vec![Action::Next]);
        assert_eq!(carousel.advance(999), vec![]);
    }

    #[test]
    fn test_select_sets_next_active_regardless_of_state() {
        let mut carousel = Carousel::mount(5, CarouselConfig::default()).unwrap();
        for target in [4, 0, 0, 3, 1] {
            carousel.advance(250);
            carousel.select(target).unwrap();
            assert_eq!(carousel.state().next_active, target as usize);
        }
    }

    #[test]
    fn test_out_of_range_selection_follows_policy() {
        let mut carousel = Carousel::mount(3, CarouselConfig::default()).unwrap();
        let before = carousel.state();
        assert!(matches!(carousel.select(3), Err(CarouselError::IndexOutOfRange { .. })));
        assert!(carousel.select(-1).is_err());
        assert_eq!(carousel.state(), before);
        assert_eq!(carousel.next_deadline(), Some(1000));

        let config = CarouselConfig { index_policy: IndexPolicy::Wrap, ..Default::default() };
        let mut carousel = Carousel::mount(3, config).unwrap();
        carousel.select(-1).unwrap();
        assert_eq!(carousel.state().next_active, 2);

        let config = CarouselConfig { index_policy: IndexPolicy::Clamp, ..Default::default() };
        let mut carousel = Carousel::mount(3, config).unwrap();
        carousel.select(10).unwrap();
        assert_eq!(carousel.state().next_active, 2);
    }

    #[test]
    fn test_unmount_stops_all_mutation() {
        let config = CarouselConfig { timers: TimerDiscipline::Two, ..fade_config() };
        let mut carousel = Carousel::mount(3, config).unwrap();
        carousel.advance(1200);
        carousel.unmount();
        let frozen = carousel.state();
        assert_eq!(carousel.armed_timers(), 0);
        assert_eq!(carousel.advance(10_000), vec![]);
        assert_eq!(carousel.state(), frozen);
        assert!(matches!(carousel.select(0), Err(CarouselError::NotMounted)));
    }

    #[test]
    fn test_two_timer_staggers_bring_next() {
        let config = CarouselConfig { timers: TimerDiscipline::Two, ..fade_config() };
        let mut carousel = Carousel::mount(3, config).unwrap();
        assert_eq!(carousel.armed_timers(), 2);

        assert_eq!(carousel.advance(500), vec![Action::BringNext]);
        let toggled = carousel.state();
        assert_eq!((toggled.active, toggled.next_active), (None, 0));
        assert!(toggled.toggle);

        assert_eq!(carousel.advance(500), vec![Action::Next]);
        assert_eq!(carousel.state().active, Some(0));
        assert_eq!(carousel.advance(500), vec![Action::BringNext]);
        assert_eq!(carousel.advance(500), vec![Action::Next]);
        assert_eq!(carousel.state().active, Some(1));
    }

    #[test]
    fn test_two_timer_select_cancels_both_tracks() {
        let config = CarouselConfig { timers: TimerDiscipline::Two, ..fade_config() };
        let mut carousel = Carousel::mount(3, config).unwrap();
        carousel.advance(400);
        carousel.select(2).unwrap();
        assert_eq!(carousel.armed_timers(), 2);
        assert_eq!(carousel.next_deadline(), Some(900));
        assert_eq!(carousel.advance(600), vec![Action::BringNext]);
        assert_eq!(carousel.advance(400), vec![Action::Next]);
        assert_eq!(carousel.state().active, Some(2));
    }

    #[test]
    fn test_single_slide_keeps_ticking() {
        let mut carousel = Carousel::mount(1, fade_config()).unwrap();
        assert_eq!(carousel.advance(3000), vec![Action::Next; 3]);
        assert_eq!(carousel.state().next_active, 0);
        assert_eq!(shown_slide(&carousel), vec![0]);
    }

    #[test]
    fn test_set_interval_restarts_countdown() {
        let mut carousel = Carousel::mount(3, CarouselConfig::default()).unwrap();
        carousel.advance(800);
        carousel.set_interval_ms(500).unwrap();
        assert_eq!(carousel.next_deadline(), Some(1300));
        assert!(carousel.set_interval_ms(0).is_err());
        assert_eq!(carousel.config().interval_ms, 500);
    }

    #[test]
    fn test_set_interval_leaves_idle_bring_next_track_idle() {
        let config = CarouselConfig { timers: TimerDiscipline::Two, ..fade_config() };
        let mut carousel = Carousel::mount(3, config).unwrap();
        assert_eq!(carousel.advance(500), vec![Action::BringNext]);
        assert_eq!(carousel.armed_timers(), 1);

        carousel.set_interval_ms(800).unwrap();
        assert_eq!(carousel.armed_timers(), 1);
        assert_eq!(carousel.next_deadline(), Some(1300));
        assert_eq!(carousel.advance(700), vec![]);
        assert_eq!(carousel.advance(100), vec![Action::Next]);
    }

    #[test]
    fn test_timer_past_end_of_clock_does_not_spin() {
        let config = CarouselConfig { interval_ms: u64::MAX - 1, ..CarouselConfig::default() };
        let mut carousel = Carousel::mount(3, config).unwrap();
        assert_eq!(carousel.advance(u64::MAX), vec![Action::Next]);
        assert_eq!(carousel.now_ms(), u64::MAX);
        assert_eq!(carousel.armed_timers(), 0);
        assert_eq!(carousel.advance(10), vec![]);
    }

    #[test]
    fn test_navigation_under_active_reference_shows_selection() {
        let config = CarouselConfig { reference: ReferenceIndex::Active, ..fade_config() };
        let mut carousel = Carousel::mount(3, config).unwrap();
        assert_eq!(shown_slide(&carousel), vec![0]);

        // navigation dot for slide 2
        carousel.advance(300);
        carousel.select(2).unwrap();
        assert_eq!(shown_slide(&carousel), vec![2]);
        assert_eq!(carousel.next_deadline(), Some(1300));

        // previous, as the Left key computes it
        let count = carousel.slide_count();
        let previous = (carousel.reference_index() + count - 1) % count;
        carousel.select(previous as i64).unwrap();
        assert_eq!(shown_slide(&carousel), vec![1]);

        // following, as the Right key computes it
        let following = (carousel.reference_index() + 1) % count;
        carousel.select(following as i64).unwrap();
        assert_eq!(shown_slide(&carousel), vec![2]);

        assert_eq!(carousel.advance(999), vec![]);
        assert_eq!(carousel.advance(1), vec![Action::Next]);
        assert_eq!(shown_slide(&carousel), vec![0]);
    }

    #[test]
    fn test_first_paint_snaps_unless_animated_on_mount() {
        let mut carousel = Carousel::mount(2, fade_config()).unwrap();
        assert!(carousel.slide_styles().iter().all(|style| style.transition == Transition::Disabled));
        carousel.advance(1000);
        assert!(carousel.slide_styles().iter().all(|style| style.transition != Transition::Disabled));

        let config = CarouselConfig { animate_on_mount: true, ..fade_config() };
        let carousel = Carousel::mount(2, config).unwrap();
        assert!(carousel.slide_styles().iter().all(|style| style.transition != Transition::Disabled));
    }

    #[test]
    fn test_active_reference_starts_settled() {
        let config = CarouselConfig { reference: ReferenceIndex::Active, ..fade_config() };
        let mut carousel = Carousel::mount(3, config).unwrap();
        assert_eq!(carousel.reference_index(), 0);
        assert_eq!(shown_slide(&carousel), vec![0]);
        carousel.advance(1000);
        assert_eq!(shown_slide(&carousel), vec![1]);
    }

    #[test]
    fn test_animation_specs_follow_toggle() {
        let mut carousel = Carousel::mount(3, fade_config()).unwrap();
        let before = carousel.animation_specs();
        assert_eq!(before.next.phase.to.opacity, Some(1.0));
        assert_eq!(before.active.duration_ms, 700);
        assert_eq!(before.active.delay_ms, 100);
        carousel.advance(1000);
        assert_ne!(carousel.animation_specs().next.reset, before.next.reset);
    }
}
