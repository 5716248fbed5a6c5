//! Slingshot launch control
//!
//! Dragging away from the point and releasing fires it the opposite way,
//! with the raw pixel offset used as velocity in pixels/s.

use glam::Vec2;

/// Launch gesture state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlingState {
    /// Nothing held
    Idle,
    /// Finger down at `touch`
    Aiming { touch: Vec2 },
    /// Released; the run belongs to the tick driver
    Launched,
}

/// Line segments shown while aiming
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlingVisuals {
    /// From the point's start to the finger
    pub line: (Vec2, Vec2),
    /// Fixed-length indicator from the start toward the finger
    pub cursor: (Vec2, Vec2),
}

#[derive(Debug, Clone)]
pub struct Sling {
    start: Vec2,
    cursor_length: f32,
    state: SlingState,
}

impl Sling {
    pub fn new(start: Vec2, cursor_length: f32) -> Self {
        Self {
            start,
            cursor_length,
            state: SlingState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> SlingState {
        self.state
    }

    pub fn press(&mut self, touch: Vec2) {
        self.state = SlingState::Aiming { touch };
    }

    /// Returns false when not aiming
    pub fn drag(&mut self, touch: Vec2) -> bool {
        match self.state {
            SlingState::Aiming { .. } => {
                self.state = SlingState::Aiming { touch };
                true
            }
            _ => false,
        }
    }

    /// Finish aiming; yields the launch velocity
    pub fn release(&mut self, touch: Vec2) -> Option<Vec2> {
        match self.state {
            SlingState::Aiming { .. } => {
                self.state = SlingState::Launched;
                Some(self.start - touch)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = SlingState::Idle;
    }

    pub fn visuals(&self) -> Option<SlingVisuals> {
        match self.state {
            SlingState::Aiming { touch } => {
                let dir = (touch - self.start).normalize_or_zero();
                Some(SlingVisuals {
                    line: (self.start, touch),
                    cursor: (self.start, self.start + dir * self.cursor_length),
                })
            }
            _ => None,
        }
    }
}
