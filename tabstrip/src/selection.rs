//! Selection animator: the continuous selection position, indicator geometry
//! and the gated geometry-change notifications.
//!
//! The gating rule is deliberately asymmetric. Live factor updates notify
//! continuously while no transition is tracked or while the tracked
//! transition is between adjacent tabs (a user drag); factor updates that
//! belong to a multi-step jump stay silent, and the single notification for
//! the jump is issued from the resolved-transition path instead. Consumers
//! such as page-indicator bars rely on receiving exactly one event for a fast
//! far jump.

use tabstrip_core::Px;
use tracing::trace;

use crate::strip::TabStrip;

/// Geometry reported to a [`SelectionChangeListener`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionChange {
    /// Indicator left edge.
    pub left: Px,
    /// Indicator width.
    pub width: Px,
    /// Actual (post-trim) width of the first item.
    pub first_item_width: Px,
    /// Actual (post-trim) width of the last item.
    pub last_item_width: Px,
    /// Selection position normalized over the whole strip, in `[0, 1]`.
    pub total_factor: f32,
    /// Whether this change resolves an animated jump rather than a live drag.
    pub animated: bool,
}

/// Receives gated selection-geometry changes.
pub trait SelectionChangeListener {
    /// Called when the reported geometry tuple actually changed.
    fn on_selection_changed(&mut self, change: &SelectionChange);
}

/// Mutable selection state owned by the strip.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SelectionState {
    pub(crate) factor: f32,
    pub(crate) transition: Option<(usize, usize)>,
    pub(crate) left: Px,
    pub(crate) width: Px,
    last_left: Px,
    last_width: Px,
    last_total_factor: f32,
    pub(crate) disabled_factor: f32,
    pub(crate) overlay_factor: f32,
}

impl SelectionState {
    pub(crate) fn new() -> Self {
        Self {
            factor: 0.0,
            transition: None,
            left: Px::ZERO,
            width: Px::ZERO,
            last_left: Px::ZERO,
            last_width: Px::ZERO,
            last_total_factor: 0.0,
            disabled_factor: 0.0,
            overlay_factor: 0.0,
        }
    }

    /// Whether this recompute path is allowed to notify the listener.
    ///
    /// `live` recomputes follow factor updates; resolved recomputes follow an
    /// explicit `(from, to)` transition being set.
    pub(crate) fn should_notify(&self, live: bool) -> bool {
        match (live, self.transition) {
            (true, None) => true,
            (true, Some((from, to))) => from.abs_diff(to) == 1,
            (false, Some((from, to))) => from.abs_diff(to) > 1,
            (false, None) => false,
        }
    }

    pub(crate) fn tuple_changed(&self, left: Px, width: Px, total_factor: f32) -> bool {
        self.last_left != left || self.last_width != width || self.last_total_factor != total_factor
    }

    pub(crate) fn mark_reported(&mut self, left: Px, width: Px, total_factor: f32) {
        self.last_left = left;
        self.last_width = width;
        self.last_total_factor = total_factor;
    }
}

/// Indicator geometry in wrap mode: interpolates between the slots (actual
/// width + both paddings) straddling the fractional factor.
pub(crate) fn wrap_indicator(spans: &[Px], factor: f32) -> (Px, Px) {
    let count = spans.len();
    let floor = (factor as usize).min(count.saturating_sub(1));
    let remain = factor - factor.floor();

    let width = if remain == 0.0 {
        spans[floor]
    } else {
        let from = spans[floor];
        let to = spans[(floor + 1).min(count - 1)];
        from + Px::from_f32((to - from).to_f32() * remain)
    };

    let mut left = Px::ZERO;
    for span in spans.iter().take(floor) {
        left += *span;
    }
    if remain != 0.0 {
        left += Px::from_f32(spans[floor].to_f32() * remain);
    }
    (left, width)
}

/// Indicator geometry in fill mode: the indicator occupies exactly one slot,
/// sliding continuously between integer positions.
pub(crate) fn fill_indicator(slot: f32, factor: f32) -> (Px, Px) {
    (Px::from_f32(factor * slot), Px::from_f32(slot.round()))
}

/// Selection position normalized over the item range; 0 for a single item.
pub(crate) fn total_factor(count: usize, factor: f32) -> f32 {
    if count > 1 {
        factor / (count - 1) as f32
    } else {
        0.0
    }
}

/// Per-item highlight factor in `[0, 1]`.
///
/// During an explicit transition only its endpoints fade; otherwise a
/// triangular falloff spans exactly one neighbor on each side of the factor.
pub(crate) fn item_highlight_factor(
    factor: f32,
    transition: Option<(usize, usize)>,
    index: usize,
) -> f32 {
    if let Some((from, to)) = transition {
        let diff = from.abs_diff(to) as f32;
        let progress = (factor - from as f32).abs() / diff;
        if index == to {
            progress
        } else if index == from {
            1.0 - progress
        } else {
            0.0
        }
    } else {
        let abs = (factor - index as f32).abs();
        if abs <= 1.0 { 1.0 - abs } else { 0.0 }
    }
}

impl TabStrip {
    /// Sets the continuous selection position.
    ///
    /// No-op when unchanged. Landing exactly on the tracked transition's
    /// target clears the transition before geometry is recomputed.
    pub fn set_selection_factor(&mut self, factor: f32) {
        let factor = if self.records.is_empty() {
            factor
        } else {
            factor.clamp(0.0, (self.records.len() - 1) as f32)
        };
        if self.selection.factor == factor {
            return;
        }
        self.selection.factor = factor;
        if let Some((_, to)) = self.selection.transition
            && factor as usize == to
            && factor.fract() == 0.0
        {
            self.selection.transition = None;
        }
        self.recalculate_selection(factor, true);
        self.invalidate();
    }

    /// Tracks (or clears) an explicit `(from, to)` jump.
    ///
    /// A same-index pair is ignored. Setting a target runs the resolved
    /// recompute path, which is the only path allowed to notify for
    /// multi-step jumps.
    pub fn set_from_to(&mut self, transition: Option<(usize, usize)>) {
        match transition {
            Some((from, to)) if from == to => {}
            Some((from, to)) => {
                self.selection.transition = Some((from, to));
                self.recalculate_selection(to as f32, false);
            }
            None => {
                self.selection.transition = None;
            }
        }
    }

    /// The current continuous selection position.
    pub fn selection_factor(&self) -> f32 {
        self.selection.factor
    }

    /// Current indicator left edge.
    pub fn selection_left(&self) -> Px {
        self.selection.left
    }

    /// Current indicator width.
    pub fn selection_width(&self) -> Px {
        self.selection.width
    }

    /// Recomputes indicator geometry for `factor` and notifies the listener
    /// when gating allows and the reported tuple changed.
    pub(crate) fn recalculate_selection(&mut self, factor: f32, live: bool) {
        if self.records.is_empty() {
            return;
        }
        let padding = self.text_padding_px();
        let count = self.records.len();

        let (left, width) = if self.wrap_mode() {
            let spans: Vec<Px> = self
                .records
                .iter()
                .map(|record| record.actual_width + padding * 2)
                .collect();
            wrap_indicator(&spans, factor)
        } else {
            fill_indicator(self.common_slot, factor)
        };

        let call = if live {
            if self.selection.left != left || self.selection.width != width {
                self.selection.left = left;
                self.selection.width = width;
            }
            self.selection.should_notify(true)
        } else {
            self.selection.should_notify(false)
        };

        let total_factor = total_factor(count, factor);
        if call
            && self.selection_listener.is_some()
            && self.selection.tuple_changed(left, width, total_factor)
        {
            self.selection.mark_reported(left, width, total_factor);
            let change = SelectionChange {
                left,
                width,
                first_item_width: self.records[0].actual_width,
                last_item_width: self.records[count - 1].actual_width,
                total_factor,
                animated: !live,
            };
            trace!(?change, "selection geometry reported");
            if let Some(listener) = self.selection_listener.as_mut() {
                listener.on_selection_changed(&change);
            }
        }
    }
}
