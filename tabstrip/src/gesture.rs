//! Gesture router: per-item click, long-click and vertical slide-off
//! handling.
//!
//! Every item owns an independent touch target, index-for-index with the
//! item list. A press watches vertical movement; once it exceeds the touch
//! slop and the slide-off listener grants `prepare`, the enclosing
//! pager/scroller is locked out through the parent-intercept callback and the
//! target tracks the slide-off zone. Otherwise the gesture stays passthrough:
//! the pager keeps handling horizontal movement and ordinary click handling
//! proceeds.

use tabstrip_core::{Px, PxPosition, TouchEvent, TouchPhase};
use tracing::debug;

use crate::strip::TabStrip;

/// Vertical direction in which a tab can be dragged off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOffDirection {
    /// Slide-off engages above the item, once the pointer has moved up by the
    /// item's own height.
    Top,
    /// Slide-off engages below the item, once the pointer has moved down past
    /// the item's bottom edge.
    Bottom,
}

/// Receives item click and long-click events.
pub trait ItemClickListener {
    /// An item was tapped.
    fn on_item_click(&mut self, index: usize);

    /// An item was long-pressed. Return `true` to consume the gesture and
    /// suppress the trailing click.
    fn on_item_long_click(&mut self, _index: usize) -> bool {
        false
    }
}

/// Receives the slide-off gesture lifecycle for a single item.
pub trait SlideOffListener {
    /// The pointer crossed the touch slop vertically; return `true` to claim
    /// the gesture (locking out the enclosing pager), `false` to leave it
    /// passthrough.
    fn on_slide_off_prepare(&mut self, index: usize, position: PxPosition) -> bool;

    /// The pointer entered the slide-off zone.
    fn on_slide_off_start(&mut self, index: usize, position: PxPosition);

    /// The pointer moved while inside the slide-off zone.
    fn on_slide_off_movement(&mut self, index: usize, position: PxPosition);

    /// The gesture left the zone (`apply = false`) or was released inside it
    /// (`apply = true`).
    fn on_slide_off_finish(&mut self, index: usize, position: PxPosition, apply: bool);
}

/// Per-item gesture state.
#[derive(Debug, Clone, Default)]
pub(crate) enum TargetState {
    #[default]
    Idle,
    /// Pressed, direction not yet decided.
    Pressed {
        down: PxPosition,
        moved_beyond_slop: bool,
        long_press_fired: bool,
    },
    /// The slide-off listener claimed the gesture.
    SlideOff { in_slide_off: bool },
}

/// One item's touch target.
#[derive(Debug, Clone, Default)]
pub(crate) struct TouchTarget {
    pub(crate) state: TargetState,
}

impl TouchTarget {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_pressed(&self) -> bool {
        matches!(self.state, TargetState::Pressed { .. })
    }
}

/// Whether a pointer at local `y` is inside the slide-off zone of an item of
/// the given height.
pub(crate) fn in_slide_off_zone(y: Px, height: Px, direction: SlideOffDirection) -> bool {
    match direction {
        SlideOffDirection::Bottom => y >= height,
        SlideOffDirection::Top => y <= -height,
    }
}

impl TabStrip {
    /// Routes a touch event to the item under it.
    ///
    /// Returns whether the strip consumed the event. Events are swallowed
    /// whole while touch is disabled or a disable animation is running.
    pub fn handle_touch(&mut self, event: TouchEvent) -> bool {
        if self.destroyed {
            return false;
        }
        if self.touch_disabled || self.selection.disabled_factor != 0.0 {
            return true;
        }

        match event.phase {
            TouchPhase::Down => self.on_touch_down(event),
            TouchPhase::Move => self.on_touch_move(event),
            TouchPhase::Up => self.on_touch_end(event, true),
            TouchPhase::Cancel => self.on_touch_end(event, false),
        }
    }

    fn on_touch_down(&mut self, event: TouchEvent) -> bool {
        let Some(index) = self.item_index_at(event.position.x) else {
            self.active_target = None;
            return false;
        };
        self.active_target = Some(index);
        self.targets[index].state = TargetState::Pressed {
            down: event.position,
            moved_beyond_slop: false,
            long_press_fired: false,
        };
        self.long_press
            .arm(event.timestamp + self.args.long_press_timeout);
        self.invalidate();
        true
    }

    fn on_touch_move(&mut self, event: TouchEvent) -> bool {
        let Some(index) = self.active_target else {
            return false;
        };
        let slop = self.args.touch_slop.to_pixels_f32();
        let height = self.height;
        let direction = self.args.slide_off_direction;
        let TabStrip {
            targets,
            slide_off_listener,
            intercept_request,
            parent_intercept_locked,
            long_press,
            ..
        } = self;

        let state = std::mem::take(&mut targets[index].state);
        let (next, handled) = match state {
            TargetState::Pressed {
                down,
                mut moved_beyond_slop,
                long_press_fired,
            } => {
                if down.distance_to(event.position) > slop {
                    moved_beyond_slop = true;
                    long_press.cancel();
                }
                let vertical = (event.position.y - down.y).to_f32().abs();
                let claimed = vertical > slop
                    && slide_off_listener
                        .as_mut()
                        .is_some_and(|listener| {
                            listener.on_slide_off_prepare(index, event.position)
                        });
                if claimed {
                    debug!(index, "slide-off claimed, locking parent intercept");
                    if let Some(request) = intercept_request.as_mut() {
                        request(true);
                    }
                    *parent_intercept_locked = true;
                    (
                        TargetState::SlideOff {
                            in_slide_off: false,
                        },
                        true,
                    )
                } else {
                    (
                        TargetState::Pressed {
                            down,
                            moved_beyond_slop,
                            long_press_fired,
                        },
                        true,
                    )
                }
            }
            TargetState::SlideOff { mut in_slide_off } => {
                if let Some(listener) = slide_off_listener.as_mut() {
                    let inside = in_slide_off_zone(event.position.y, height, direction);
                    if in_slide_off != inside {
                        in_slide_off = inside;
                        if inside {
                            listener.on_slide_off_start(index, event.position);
                        } else {
                            listener.on_slide_off_finish(index, event.position, false);
                        }
                    }
                    if inside {
                        listener.on_slide_off_movement(index, event.position);
                    }
                }
                (TargetState::SlideOff { in_slide_off }, true)
            }
            TargetState::Idle => (TargetState::Idle, false),
        };
        targets[index].state = next;
        handled
    }

    fn on_touch_end(&mut self, event: TouchEvent, released: bool) -> bool {
        let container_alpha = self.container_alpha;
        let slop = self.args.touch_slop.to_pixels_f32();
        let Some(index) = self.active_target.take() else {
            self.long_press.cancel();
            return false;
        };
        let TabStrip {
            targets,
            slide_off_listener,
            click_listener,
            intercept_request,
            parent_intercept_locked,
            long_press,
            ..
        } = self;
        long_press.cancel();

        let state = std::mem::take(&mut targets[index].state);
        match state {
            TargetState::Pressed {
                down,
                long_press_fired,
                ..
            } => {
                let tap = released
                    && !long_press_fired
                    && down.distance_to(event.position) <= slop
                    && container_alpha >= 1.0;
                if tap && let Some(listener) = click_listener.as_mut() {
                    listener.on_item_click(index);
                }
            }
            TargetState::SlideOff { in_slide_off } => {
                if in_slide_off && let Some(listener) = slide_off_listener.as_mut() {
                    listener.on_slide_off_finish(index, event.position, released);
                }
            }
            TargetState::Idle => {}
        }

        if *parent_intercept_locked {
            if let Some(request) = intercept_request.as_mut() {
                request(false);
            }
            *parent_intercept_locked = false;
        }
        self.invalidate();
        true
    }

    /// Fires a pending long-press; called from `tick` when the long-press
    /// deadline elapses.
    pub(crate) fn fire_long_press(&mut self) {
        let Some(index) = self.active_target else {
            return;
        };
        if self.container_alpha < 1.0 {
            return;
        }
        let TabStrip {
            targets,
            click_listener,
            ..
        } = self;
        if let TargetState::Pressed {
            moved_beyond_slop: false,
            long_press_fired,
            ..
        } = &mut targets[index].state
            && let Some(listener) = click_listener.as_mut()
            && listener.on_item_long_click(index)
        {
            *long_press_fired = true;
        }
    }

    /// The index of the item currently held pressed, if any.
    pub(crate) fn pressed_index(&self) -> Option<usize> {
        self.active_target
            .filter(|&index| self.targets[index].is_pressed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabstrip_core::Px;

    #[test]
    fn test_slide_off_zone_bottom() {
        let height = Px(48);
        assert!(!in_slide_off_zone(Px(47), height, SlideOffDirection::Bottom));
        assert!(in_slide_off_zone(Px(48), height, SlideOffDirection::Bottom));
        assert!(in_slide_off_zone(Px(300), height, SlideOffDirection::Bottom));
        assert!(!in_slide_off_zone(Px(-60), height, SlideOffDirection::Bottom));
    }

    #[test]
    fn test_slide_off_zone_top() {
        let height = Px(48);
        assert!(!in_slide_off_zone(Px(0), height, SlideOffDirection::Top));
        assert!(!in_slide_off_zone(Px(-47), height, SlideOffDirection::Top));
        assert!(in_slide_off_zone(Px(-48), height, SlideOffDirection::Top));
    }

    #[test]
    fn test_target_default_is_idle() {
        let target = TouchTarget::new();
        assert!(matches!(target.state, TargetState::Idle));
        assert!(!target.is_pressed());
    }
}
