//! Swipe-to-delete gesture state machine.
//!
//! # Responsibility
//! - Turn a continuous horizontal drag into at most one delete commit.
//! - Report the visual offset and pending-deletion highlight while dragging.
//!
//! # Invariants
//! - States move `Idle -> Dragging -> (Committed | Idle)` and
//!   `Committed -> Idle`; nothing else.
//! - Vertical movement is ignored; rows cannot be reordered by dragging.
//! - One release yields at most one `GestureEvent::Commit`.
//! - The machine never touches the store; the caller runs the delete.

use log::{debug, info};

/// Share of the row width a drag must cover to commit.
pub const DEFAULT_THRESHOLD_FRACTION: f32 = 0.5;

/// Horizontal direction of a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Geometry used to decide whether a release commits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Row width in view units.
    pub row_width: f32,
    /// Fraction of `row_width` in `(0, 1]`.
    pub threshold_fraction: f32,
}

impl GestureConfig {
    pub fn new(row_width: f32) -> Self {
        Self {
            row_width,
            threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
        }
    }

    /// Absolute horizontal distance at which a release commits.
    pub fn commit_distance(&self) -> f32 {
        let fraction = self.threshold_fraction.clamp(f32::EPSILON, 1.0);
        (self.row_width.abs() * fraction).max(f32::EPSILON)
    }
}

/// Current gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging { position: usize, offset_x: f32 },
    Committed {
        position: usize,
        direction: SwipeDirection,
    },
}

/// Presentation signal for the dragged row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    pub position: usize,
    pub offset_x: f32,
    /// Pending-deletion highlight.
    pub highlighted: bool,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// No drag was in progress.
    Ignored,
    /// Released short of the threshold; nothing changes.
    Aborted { position: usize },
    /// Released past the threshold; delete `position` exactly once.
    Commit {
        position: usize,
        direction: SwipeDirection,
    },
}

#[derive(Debug, Clone)]
pub struct DeleteGesture {
    config: GestureConfig,
    state: GestureState,
}

impl DeleteGesture {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Starts dragging row `position`. Returns `false` unless idle.
    pub fn begin_drag(&mut self, position: usize) -> bool {
        if self.state != GestureState::Idle {
            return false;
        }
        self.state = GestureState::Dragging {
            position,
            offset_x: 0.0,
        };
        true
    }

    /// Moves the drag to horizontal offset `dx`; `dy` is ignored.
    ///
    /// Returns the frame to draw, or `None` when not dragging.
    pub fn drag_to(&mut self, dx: f32, _dy: f32) -> Option<DragFrame> {
        let GestureState::Dragging { position, .. } = self.state else {
            return None;
        };
        let offset_x = if dx.is_finite() { dx } else { 0.0 };
        self.state = GestureState::Dragging { position, offset_x };
        self.presentation()
    }

    /// Ends the drag.
    pub fn release(&mut self) -> GestureEvent {
        let GestureState::Dragging { position, offset_x } = self.state else {
            return GestureEvent::Ignored;
        };

        if offset_x.abs() < self.config.commit_distance() {
            self.state = GestureState::Idle;
            debug!(
                "event=gesture_abort module=gesture status=ok position={}",
                position
            );
            return GestureEvent::Aborted { position };
        }

        let direction = if offset_x < 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        };
        self.state = GestureState::Committed {
            position,
            direction,
        };
        info!(
            "event=gesture_commit module=gesture status=ok position={} direction={:?}",
            position, direction
        );
        GestureEvent::Commit {
            position,
            direction,
        }
    }

    /// Drops an in-progress drag without any effect.
    pub fn cancel(&mut self) {
        if matches!(self.state, GestureState::Dragging { .. }) {
            self.state = GestureState::Idle;
        }
    }

    /// Clears the committed presentation after the delete ran.
    pub fn finish(&mut self) -> bool {
        if matches!(self.state, GestureState::Committed { .. }) {
            self.state = GestureState::Idle;
            return true;
        }
        false
    }

    /// Frame to draw for the current state; `None` when idle.
    pub fn presentation(&self) -> Option<DragFrame> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Dragging { position, offset_x } => Some(DragFrame {
                position,
                offset_x,
                highlighted: true,
            }),
            GestureState::Committed { position, direction } => Some(DragFrame {
                position,
                offset_x: match direction {
                    SwipeDirection::Left => -self.config.row_width.abs(),
                    SwipeDirection::Right => self.config.row_width.abs(),
                },
                highlighted: true,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DeleteGesture, GestureConfig, GestureEvent, GestureState, SwipeDirection};

    fn gesture() -> DeleteGesture {
        DeleteGesture::new(GestureConfig::new(400.0))
    }

    #[test]
    fn commit_distance_is_half_row_by_default() {
        assert_eq!(GestureConfig::new(400.0).commit_distance(), 200.0);
    }

    #[test]
    fn vertical_movement_does_not_move_row() {
        let mut gesture = gesture();
        assert!(gesture.begin_drag(0));
        let frame = gesture.drag_to(10.0, 300.0).expect("dragging");
        assert_eq!(frame.offset_x, 10.0);
        assert!(frame.highlighted);
    }

    #[test]
    fn release_past_threshold_commits_once() {
        let mut gesture = gesture();
        gesture.begin_drag(3);
        gesture.drag_to(-250.0, 0.0);

        assert_eq!(
            gesture.release(),
            GestureEvent::Commit {
                position: 3,
                direction: SwipeDirection::Left
            }
        );
        assert_eq!(gesture.release(), GestureEvent::Ignored);
        assert!(gesture.finish());
        assert_eq!(gesture.state(), GestureState::Idle);
    }

    #[test]
    fn release_short_of_threshold_aborts() {
        let mut gesture = gesture();
        gesture.begin_drag(1);
        gesture.drag_to(199.0, 0.0);

        assert_eq!(gesture.release(), GestureEvent::Aborted { position: 1 });
        assert_eq!(gesture.state(), GestureState::Idle);
        assert!(gesture.presentation().is_none());
    }

    #[test]
    fn cannot_begin_while_committed() {
        let mut gesture = gesture();
        gesture.begin_drag(0);
        gesture.drag_to(400.0, 0.0);
        gesture.release();

        assert!(!gesture.begin_drag(1));
        assert!(gesture.drag_to(500.0, 0.0).is_none());
    }

    #[test]
    fn cancel_drops_drag_without_commit() {
        let mut gesture = gesture();
        gesture.begin_drag(2);
        gesture.drag_to(350.0, 0.0);
        gesture.cancel();

        assert_eq!(gesture.release(), GestureEvent::Ignored);
        assert_eq!(gesture.state(), GestureState::Idle);
        assert!(gesture.presentation().is_none());
    }

    #[test]
    fn non_finite_offset_is_treated_as_zero() {
        let mut gesture = gesture();
        gesture.begin_drag(0);
        gesture.drag_to(f32::NAN, 0.0);
        assert_eq!(gesture.release(), GestureEvent::Aborted { position: 0 });
    }
}
