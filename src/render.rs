use std::path::PathBuf;

use anyhow::{Result, bail};
use raylib::prelude::*;
use tracing::{info, warn};

use carousel::constants::*;
use carousel::easing::{Easing, EasingShape};
use carousel::style::Transition;
use carousel::{AnimationKind, Carousel, CarouselConfig, StyleForm};

use crate::engine::Engine;
use crate::slide::{EaseFn, LayerProps, LayerTransition, Slide};
use crate::texture_loader::load_texture_with_exif_rotation;

const ACTIVE_LAYER: usize = 0;
const NEXT_LAYER: usize = 1;

/// raylib host for a [`Carousel`]: feeds it frame time, interpolates the
/// computed styles and draws the slides plus the navigation dots.
pub struct CarouselEngine {
    config: CarouselConfig,
    images: Vec<Texture2D>,
    carousel: Option<Carousel>,
    layers: Vec<Slide>,
    easing: EaseFn,
    last_reset: bool,
    pending_ms: f32,
}

fn ease_fn(shape: EasingShape) -> EaseFn {
    match shape {
        EasingShape::Linear => ease::linear_none,
        EasingShape::In => ease::cubic_in,
        EasingShape::Out => ease::cubic_out,
        EasingShape::InOut => ease::cubic_in_out,
    }
}

impl CarouselEngine {
    pub fn new(config: CarouselConfig) -> Self {
        let easing = match Easing::parse(&config.timing_function) {
            Ok(easing) => ease_fn(easing.shape()),
            Err(e) => {
                warn!("{}, falling back to ease-out", e);
                ease::cubic_out
            }
        };

        Self {
            config,
            images: Vec::new(),
            carousel: None,
            layers: Vec::new(),
            easing,
            last_reset: false,
            pending_ms: 0.0,
        }
    }

    fn animated(&self) -> bool {
        !matches!(self.config.animation_type, None | Some(AnimationKind::None))
    }

    fn timed(&self, duration_ms: u64, delay_ms: u64) -> Option<LayerTransition> {
        Some(LayerTransition {
            duration: duration_ms as f32 / 1000.0,
            delay: delay_ms as f32 / 1000.0,
            easing: self.easing,
        })
    }

    fn layer_transition(&self, transition: &Transition) -> Option<LayerTransition> {
        match transition {
            Transition::Disabled => None,
            Transition::Timed { duration_ms, delay_ms, .. } => self.timed(*duration_ms, *delay_ms),
        }
    }

    fn build_layers(&mut self) {
        let Some(carousel) = self.carousel.as_ref() else {
            return;
        };

        self.layers = match self.config.style_form {
            StyleForm::Payload => carousel
                .slide_styles()
                .iter()
                .enumerate()
                .map(|(index, style)| Slide::new(index, LayerProps::from_style(style)))
                .collect(),
            StyleForm::Phases => {
                let state = carousel.state();
                let specs = carousel.animation_specs();
                let active = specs.active.phase;
                let next = specs.next.phase;
                let mut layers = vec![
                    Slide::new(state.active.unwrap_or(0), LayerProps::from_props(&active.from)),
                    Slide::new(state.next_active, LayerProps::from_props(&next.from)),
                ];
                if state.active.is_none() {
                    layers[NEXT_LAYER] = Slide::new(state.next_active, LayerProps::from_props(&next.to));
                }
                if self.config.animate_on_mount && self.animated() {
                    let transition = self.timed(specs.next.duration_ms, specs.next.delay_ms);
                    layers[ACTIVE_LAYER].restart(
                        LayerProps::from_props(&active.from),
                        LayerProps::from_props(&active.to),
                        transition,
                    );
                    layers[NEXT_LAYER].restart(
                        LayerProps::from_props(&next.from),
                        LayerProps::from_props(&next.to),
                        transition,
                    );
                }
                self.last_reset = specs.next.reset;
                layers
            }
        };
    }

    fn sync_payload(&mut self) {
        let Some(carousel) = self.carousel.as_ref() else {
            return;
        };
        let styles = carousel.slide_styles();
        for (index, style) in styles.iter().enumerate() {
            let target = LayerProps::from_style(style);
            if self.layers[index].target() != target {
                let transition = self.layer_transition(&style.transition);
                self.layers[index].retarget(target, transition);
            }
        }
    }

    fn sync_phases(&mut self) {
        let Some(carousel) = self.carousel.as_ref() else {
            return;
        };
        let specs = carousel.animation_specs();
        if specs.next.reset == self.last_reset {
            return;
        }
        self.last_reset = specs.next.reset;

        let state = carousel.state();
        let transition = if self.animated() {
            self.timed(specs.next.duration_ms, specs.next.delay_ms)
        } else {
            None
        };

        let active = specs.active.phase;
        let next = specs.next.phase;
        self.layers[ACTIVE_LAYER].image_index = state.active.unwrap_or(0);
        self.layers[ACTIVE_LAYER].restart(LayerProps::from_props(&active.from), LayerProps::from_props(&active.to), transition);
        self.layers[NEXT_LAYER].image_index = state.next_active;
        self.layers[NEXT_LAYER].restart(LayerProps::from_props(&next.from), LayerProps::from_props(&next.to), transition);
    }

    fn dot_centers(&self, screen_width: f32, screen_height: f32) -> Vec<Vector2> {
        let count = self.images.len();
        let total = (count.saturating_sub(1)) as f32 * DOT_SPACING;
        let start_x = screen_width * 0.5 - total * 0.5;
        (0..count)
            .map(|index| Vector2::new(start_x + index as f32 * DOT_SPACING, screen_height - DOT_MARGIN))
            .collect()
    }

    fn handle_input(&mut self, rl: &RaylibHandle) {
        let count = self.images.len();
        let mut selection: Option<usize> = None;

        if self.config.with_navigation && rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = rl.get_mouse_position();
            let dots = self.dot_centers(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
            selection = dots.iter().position(|dot| {
                let (dx, dy) = (mouse.x - dot.x, mouse.y - dot.y);
                dx * dx + dy * dy <= (DOT_RADIUS * 2.0) * (DOT_RADIUS * 2.0)
            });
        }

        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        let shown = carousel.reference_index();
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            selection = Some((shown + 1) % count);
        } else if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            selection = Some((shown + count - 1) % count);
        }

        if let Some(index) = selection {
            if let Err(e) = carousel.select(index as i64) {
                warn!("Ignoring selection of slide {}: {}", index, e);
            }
        }
    }
}

impl Engine for CarouselEngine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, paths: Vec<PathBuf>) -> Result<()> {
        for path in paths {
            match load_texture_with_exif_rotation(rl, thread, &path) {
                Ok(image) => self.images.push(image),
                Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
            }
        }
        if self.images.is_empty() {
            bail!("No slides were loaded");
        }

        info!("Loaded {} slides", self.images.len());
        self.carousel = Some(Carousel::mount(self.images.len(), self.config.clone())?);
        self.build_layers();
        Ok(())
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool {
        if !self.carousel.as_ref().is_some_and(Carousel::is_mounted) {
            return false;
        }

        // --- Input ---
        self.handle_input(rl);

        // --- Clock ---
        // The carousel clock counts whole milliseconds, carry the rest over
        self.pending_ms += dt * 1000.0;
        let elapsed = self.pending_ms.floor();
        self.pending_ms -= elapsed;
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.advance(elapsed as u64);
        }

        // --- Sync layers to the resolved styles, then step their tweens ---
        match self.config.style_form {
            StyleForm::Payload => self.sync_payload(),
            StyleForm::Phases => self.sync_phases(),
        }
        for layer in self.layers.iter_mut() {
            layer.update(dt);
        }

        let (active, shown) = match self.carousel.as_ref() {
            Some(carousel) => (carousel.state().active, carousel.reference_index()),
            None => return false,
        };

        // --- Draw ---
        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::BLACK);

        for (index, layer) in self.layers.iter().enumerate() {
            if self.config.style_form == StyleForm::Phases && index == ACTIVE_LAYER && active.is_none() {
                continue;
            }
            layer.draw(&mut d, &self.images[layer.image_index]);
        }

        // Dots highlight the slide being shown
        if self.config.with_navigation {
            let dots = self.dot_centers(d.get_screen_width() as f32, d.get_screen_height() as f32);
            for (index, dot) in dots.into_iter().enumerate() {
                let color = if index == shown { Color::WHITE } else { Color::GRAY };
                d.draw_circle_v(dot, DOT_RADIUS, color);
            }
        }

        true
    }

    fn shutdown(&mut self) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.unmount();
        }
    }
}
