use crate::config::ReferenceIndex;

/// Transitions the rotation can take.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    Next,      // Advance timer fired: promote next slide, queue the one after it
    BringNext, // Secondary timer fired: keep the pair, replay the animation
    Custom(usize), // Manual selection of a slide
}

/// Rotation state owned by one mounted carousel. Every transition replaces it whole.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RotationState {
    /// Slide currently shown, `None` until the first transition settles it
    pub active: Option<usize>,
    /// Slide the rotation is moving toward
    pub next_active: usize,
    /// Flips on every transition so animations restart from their `from` phase
    pub toggle: bool,
}

impl RotationState {
    pub fn initial(slide_count: usize, reference: ReferenceIndex) -> Self {
        match reference {
            ReferenceIndex::NextActive => Self { active: None, next_active: 0, toggle: false },
            ReferenceIndex::Active => Self {
                active: Some(0),
                next_active: 1 % slide_count.max(1),
                toggle: false,
            },
        }
    }

    /// `reference` decides what manual selection lands on: the selected slide
    /// becomes whichever half of the pair is treated as shown.
    pub fn reduce(self, action: Action, slide_count: usize, reference: ReferenceIndex) -> Self {
        let modulus = slide_count.max(1);
        let toggle = !self.toggle;
        match action {
            Action::Next => Self {
                active: Some(self.next_active),
                next_active: (self.next_active + 1) % modulus,
                toggle,
            },
            Action::BringNext => Self { toggle, ..self },
            Action::Custom(index) => match reference {
                // Complete the pending transition, then head for the selection
                ReferenceIndex::NextActive => Self {
                    active: Some(self.next_active),
                    next_active: index,
                    toggle,
                },
                // Show the selection now, queue the slide after it
                ReferenceIndex::Active => Self {
                    active: Some(index),
                    next_active: (index + 1) % modulus,
                    toggle,
                },
            },
        }
    }

    /// The slide treated as shown under the given policy.
    pub fn reference_index(&self, reference: ReferenceIndex) -> usize {
        match reference {
            ReferenceIndex::Active => self.active.unwrap_or(self.next_active),
            ReferenceIndex::NextActive => self.next_active,
        }
    }
}
