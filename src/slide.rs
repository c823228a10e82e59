use raylib::prelude::*;

use carousel::phases::StyleProps;
use carousel::style::SlideStyle;

pub type EaseFn = fn(f32, f32, f32, f32) -> f32;

/// Resolved numeric properties of a layer. Missing properties fall back to identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerProps {
    pub opacity: f32,
    pub translate_x: f32, // percent of the window width
    pub translate_y: f32, // percent of the window height
    pub scale: f32,
}

impl Default for LayerProps {
    fn default() -> Self {
        Self { opacity: 1.0, translate_x: 0.0, translate_y: 0.0, scale: 1.0 }
    }
}

impl LayerProps {
    pub fn from_style(style: &SlideStyle) -> Self {
        let base = Self::default();
        Self {
            opacity: style.opacity.unwrap_or(base.opacity),
            translate_x: style.translate_x_percent.unwrap_or(base.translate_x),
            translate_y: base.translate_y,
            scale: style.scale.unwrap_or(base.scale),
        }
    }

    pub fn from_props(props: &StyleProps) -> Self {
        let base = Self::default();
        Self {
            opacity: props.opacity.unwrap_or(base.opacity),
            translate_x: props.translate_x.unwrap_or(base.translate_x),
            translate_y: props.translate_y.unwrap_or(base.translate_y),
            scale: props.scale.unwrap_or(base.scale),
        }
    }
}

/// Timing of one layer transition, in seconds.
#[derive(Clone, Copy)]
pub struct LayerTransition {
    pub duration: f32,
    pub delay: f32,
    pub easing: EaseFn,
}

struct Tweens {
    opacity: ease::Tween,
    translate_x: ease::Tween,
    translate_y: ease::Tween,
    scale: ease::Tween,
}

/// One drawn slide layer and the transition currently moving it.
pub struct Slide {
    pub image_index: usize,

    props: LayerProps,
    target: LayerProps,

    delay_timer: f32,
    animation_timer: f32,
    duration: f32,
    pending: Option<LayerTransition>,
    tweens: Option<Tweens>,
    pub is_animating: bool,
}

impl Slide {
    pub fn new(image_index: usize, props: LayerProps) -> Self {
        Self {
            image_index,
            props,
            target: props,
            delay_timer: 0.0,
            animation_timer: 0.0,
            duration: 0.0,
            pending: None,
            tweens: None,
            is_animating: false,
        }
    }

    pub fn target(&self) -> LayerProps {
        self.target
    }

    /// Moves toward `target` from wherever the layer is now. `None` snaps.
    pub fn retarget(&mut self, target: LayerProps, transition: Option<LayerTransition>) {
        self.target = target;
        self.tweens = None;
        match transition {
            Some(transition) => {
                self.pending = Some(transition);
                self.delay_timer = 0.0;
                self.is_animating = true;
            }
            None => {
                self.pending = None;
                self.props = target;
                self.is_animating = false;
            }
        }
    }

    /// Jumps to `from`, then animates to `to`.
    pub fn restart(&mut self, from: LayerProps, to: LayerProps, transition: Option<LayerTransition>) {
        self.props = from;
        self.retarget(to, transition);
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }

        // --- Wait out the delay, then build the tweens ---
        if let Some(transition) = self.pending {
            self.delay_timer += dt;
            if self.delay_timer < transition.delay {
                return;
            }
            self.pending = None;
            if transition.duration <= 0.0 {
                self.props = self.target;
                self.is_animating = false;
                return;
            }
            self.animation_timer = 0.0;
            self.duration = transition.duration;
            self.tweens = Some(Tweens {
                opacity: ease::Tween::new(transition.easing, self.props.opacity, self.target.opacity, transition.duration),
                translate_x: ease::Tween::new(transition.easing, self.props.translate_x, self.target.translate_x, transition.duration),
                translate_y: ease::Tween::new(transition.easing, self.props.translate_y, self.target.translate_y, transition.duration),
                scale: ease::Tween::new(transition.easing, self.props.scale, self.target.scale, transition.duration),
            });
        }

        // --- Step the tweens ---
        let Some(tweens) = self.tweens.as_mut() else {
            return;
        };
        self.props.opacity = tweens.opacity.apply(dt);
        self.props.translate_x = tweens.translate_x.apply(dt);
        self.props.translate_y = tweens.translate_y.apply(dt);
        self.props.scale = tweens.scale.apply(dt);

        // --- Settle on the target ---
        self.animation_timer += dt;
        if self.animation_timer >= self.duration {
            self.is_animating = false;
            self.tweens = None;
            self.props = self.target;
        }
    }

    /// Draws `image` covering the window, offset and scaled by the layer props.
    pub fn draw(&self, d: &mut RaylibDrawHandle, image: &Texture2D) {
        if self.props.opacity <= 0.0 {
            return;
        }

        let screen_width = d.get_screen_width() as f32;
        let screen_height = d.get_screen_height() as f32;

        let tex_width = image.width() as f32;
        let tex_height = image.height() as f32;

        let cover = (screen_width / tex_width).max(screen_height / tex_height) * self.props.scale;
        let scaled_width = tex_width * cover;
        let scaled_height = tex_height * cover;

        let center = Vector2::new(
            screen_width * (0.5 + self.props.translate_x / 100.0),
            screen_height * (0.5 + self.props.translate_y / 100.0),
        );

        // Relative to the dest rectangle (ie. the center of the image)
        let origin = Vector2::new(scaled_width * 0.5, scaled_height * 0.5);
        let alpha = (self.props.opacity.clamp(0.0, 1.0) * 255.0) as u8;

        d.draw_texture_pro(
            image,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            Rectangle::new(center.x, center.y, scaled_width, scaled_height),
            origin,
            0.0,
            Color::new(255, 255, 255, alpha),
        );
    }
}
