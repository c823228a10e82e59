//! Auto-advancing slideshow component: a timer driven rotation state machine
//! plus pure resolvers that turn the rotation into per-slide styles.

pub mod carousel;
pub mod config;
pub mod constants;
pub mod easing;
pub mod error;
pub mod phases;
pub mod state;
pub mod style;
pub mod timer;

pub use carousel::Carousel;
pub use config::{AnimationKind, CarouselConfig, CustomAnimation, IndexPolicy, ReferenceIndex, StyleForm, TimerDiscipline};
pub use error::{CarouselError, Result};
pub use state::{Action, RotationState};
