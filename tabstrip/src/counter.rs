//! Badge counter drawn inside a tab.
//!
//! A [`Counter`] owns its shaped label and cached widths, so the layout
//! engine can ask for its footprint without re-measuring every pass. Its
//! prominence fades with distance from the active tab through a pluggable
//! [`CounterAlphaProvider`].

use tabstrip_core::{
    Color, DrawCommand, DrawList, Dp, Px, PxRect, PxPosition, TextShaper, TextStyle, TruncateAt,
};

const BADGE_HORIZONTAL_INSET: Dp = Dp(5.0);
const BADGE_VERTICAL_INSET: Dp = Dp(2.0);

/// How a counter is anchored to the x coordinate it is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CounterAnchor {
    /// `x` is the horizontal center of the pill.
    Center,
    /// `x` is the left edge of the pill.
    Start,
}

/// A badge counter with cached geometry and draw state.
///
/// Counters are compared by identity when the strip decides whether an item
/// list push changed anything, so share one `Arc<Counter>` across pushes for
/// an unchanged badge.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    label: String,
    layout: tabstrip_core::TextLayout,
    width: Px,
    height: Px,
    background: Color,
    text_color: Color,
}

impl Counter {
    /// Creates a counter for `count`, measuring the label with `shaper`.
    pub fn new(
        count: u64,
        shaper: &dyn TextShaper,
        style: &TextStyle,
        background: Color,
        text_color: Color,
    ) -> Self {
        let label = count.to_string();
        let layout = shaper.shape(&label, style, Px::MAX, TruncateAt::End);
        let height = layout.height + BADGE_VERTICAL_INSET.to_px() * 2;
        // Single digits get a circle rather than a sliver.
        let width = (layout.width + BADGE_HORIZONTAL_INSET.to_px() * 2).max(height);
        Self {
            label,
            layout,
            width,
            height,
            background,
            text_color,
        }
    }

    /// The rendered label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Full pill width.
    pub fn width(&self) -> Px {
        self.width
    }

    /// Full pill height.
    pub fn height(&self) -> Px {
        self.height
    }

    /// Pill width plus a horizontal inset toward neighboring content.
    pub fn scaled_width(&self, offset: Px) -> Px {
        self.width + offset
    }

    pub(crate) fn record(
        &self,
        frame: &mut DrawList,
        x: Px,
        center_y: Px,
        anchor: CounterAnchor,
        text_alpha: f32,
        background_alpha: f32,
    ) {
        let left = match anchor {
            CounterAnchor::Center => x - self.width / 2,
            CounterAnchor::Start => x,
        };
        let top = center_y - self.height / 2;
        frame.push(DrawCommand::Rect {
            rect: PxRect::new(left, top, self.width, self.height),
            color: self
                .background
                .with_alpha(self.background.a * background_alpha),
            corner_radius: self.height / 2,
        });
        frame.push(DrawCommand::Text {
            layout: self.layout.clone(),
            position: PxPosition::new(
                left + (self.width - self.layout.width) / 2,
                top + (self.height - self.layout.height) / 2,
            ),
            color: self.text_color,
            alpha: text_alpha,
        });
    }
}

/// Policy supplying counter alpha channels from a distance-from-selection
/// factor in `[0, 1]` (1 = the active tab).
pub trait CounterAlphaProvider {
    /// Alpha of the counter label.
    fn text_alpha(&self, _counter: &Counter, distance_factor: f32) -> f32 {
        0.5 + 0.5 * distance_factor
    }

    /// Alpha of any drawable associated with the counter's tab (e.g. the
    /// sticker image next to it).
    fn drawable_alpha(&self, _counter: &Counter, distance_factor: f32) -> f32 {
        0.5 + 0.5 * distance_factor
    }

    /// Alpha of the pill background.
    fn background_alpha(&self, _counter: &Counter, distance_factor: f32) -> f32 {
        0.5 + 0.5 * distance_factor
    }
}

/// The default alpha policy: `0.5 + 0.5 × factor` for every channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCounterAlphaProvider;

impl CounterAlphaProvider for DefaultCounterAlphaProvider {}

#[cfg(test)]
mod tests {
    use super::*;
    use tabstrip_core::FixedMetricsShaper;

    fn test_counter(count: u64) -> Counter {
        let shaper = FixedMetricsShaper::new(Px(10), Px(20));
        Counter::new(
            count,
            &shaper,
            &TextStyle::default(),
            Color::BLACK,
            Color::WHITE,
        )
    }

    #[test]
    fn test_single_digit_is_round() {
        let counter = test_counter(7);
        assert_eq!(counter.height(), Px(24));
        // 10 + 2*5 = 20 < 24, widened to the circle diameter.
        assert_eq!(counter.width(), Px(24));
    }

    #[test]
    fn test_wide_count_keeps_insets() {
        let counter = test_counter(1234);
        assert_eq!(counter.width(), Px(50));
        assert_eq!(counter.scaled_width(Px(6)), Px(56));
    }

    #[test]
    fn test_default_alpha_provider() {
        let provider = DefaultCounterAlphaProvider;
        let counter = test_counter(1);
        assert_eq!(provider.text_alpha(&counter, 0.0), 0.5);
        assert_eq!(provider.background_alpha(&counter, 1.0), 1.0);
        assert_eq!(provider.drawable_alpha(&counter, 0.5), 0.75);
    }

    #[test]
    fn test_record_centers_label() {
        let counter = test_counter(7);
        let mut frame = DrawList::new();
        counter.record(
            &mut frame,
            Px(100),
            Px(50),
            CounterAnchor::Center,
            1.0,
            1.0,
        );
        assert_eq!(frame.len(), 2);
        let DrawCommand::Rect { rect, .. } = &frame.commands()[0] else {
            panic!("expected pill rect first");
        };
        assert_eq!(rect.x, Px(100 - 12));
        assert_eq!(rect.y, Px(50 - 12));
    }
}
