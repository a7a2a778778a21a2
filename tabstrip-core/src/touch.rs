//! Touch event model for the tabstrip engine.
//!
//! The host owns raw input dispatch; it forwards per-pointer events translated
//! into the strip's local coordinate space. Events carry timestamps so the
//! gesture router can derive long-press timing without its own clock.

use std::time::{Duration, Instant};

use crate::{Dp, PxPosition};

/// Default distance a pointer may travel before a press stops being a tap.
///
/// Hosts with a platform-provided slop constant should override this through
/// the widget configuration.
pub const DEFAULT_TOUCH_SLOP: Dp = Dp(8.0);

/// Default hold duration after which a press becomes a long-press.
pub const DEFAULT_LONG_PRESS_TIMEOUT: Duration = Duration::from_millis(500);

/// The stage of a pointer interaction an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// The pointer went down.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer was lifted.
    Up,
    /// The interaction was cancelled by the platform (e.g. a parent view took
    /// over the gesture).
    Cancel,
}

/// A single timestamped pointer event in strip-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// When this event occurred.
    pub timestamp: Instant,
    /// Pointer position relative to the strip's top-left corner.
    pub position: PxPosition,
    /// The interaction stage.
    pub phase: TouchPhase,
}

impl TouchEvent {
    /// Creates a new touch event.
    pub fn new(phase: TouchPhase, position: PxPosition, timestamp: Instant) -> Self {
        Self {
            timestamp,
            position,
            phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Px;

    #[test]
    fn test_event_construction() {
        let now = Instant::now();
        let event = TouchEvent::new(TouchPhase::Down, PxPosition::new(Px(3), Px(4)), now);
        assert_eq!(event.phase, TouchPhase::Down);
        assert_eq!(event.position.x, Px(3));
        assert_eq!(event.timestamp, now);
    }
}
