//! Tab item model and the per-item layout caches owned by the strip.

use std::sync::Arc;

use tabstrip_core::{
    IconId, Px, StickerHandle, StickerId, TextLayout, TextShaper, TextStyle, TruncateAt,
};

use crate::{counter::Counter, strip::StripDefaults};

/// One tab of the strip.
///
/// An item is an immutable description: what to display and how much width to
/// claim. All mutable layout state (measured widths, trimmed layouts, drag
/// translation) lives in the strip's per-item records, not here.
///
/// # Equality
///
/// Two items are equal when their icon ids match, their texts match (absent
/// and empty are the same), and their counters are the *same object*
/// (`Arc::ptr_eq`). Counter internals are never deep-compared; sticker,
/// hidden and width overrides do not participate. [`crate::TabStrip::set_items`]
/// uses this to skip relayout when the caller re-pushes an equivalent list.
#[derive(Debug, Clone)]
pub struct Item {
    pub(crate) text: Option<String>,
    pub(crate) icon: Option<IconId>,
    pub(crate) counter: Option<Arc<Counter>>,
    pub(crate) sticker: Option<StickerId>,
    pub(crate) hidden: bool,
    pub(crate) static_width: Option<Px>,
    pub(crate) extra_width: Px,
}

impl Item {
    fn empty() -> Self {
        Self {
            text: None,
            icon: None,
            counter: None,
            sticker: None,
            hidden: false,
            static_width: None,
            extra_width: Px::ZERO,
        }
    }

    /// A text-only tab.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::empty()
        }
    }

    /// An icon-only tab.
    pub fn from_icon(icon: IconId) -> Self {
        Self {
            icon: Some(icon),
            ..Self::empty()
        }
    }

    /// A text tab with a leading icon.
    pub fn from_text_icon(text: impl Into<String>, icon: IconId) -> Self {
        Self {
            text: Some(text.into()),
            icon: Some(icon),
            ..Self::empty()
        }
    }

    /// An icon tab with a badge counter.
    pub fn from_icon_counter(icon: IconId, counter: Arc<Counter>) -> Self {
        Self {
            icon: Some(icon),
            counter: Some(counter),
            ..Self::empty()
        }
    }

    /// A text tab with a badge counter.
    pub fn from_text_counter(text: impl Into<String>, counter: Arc<Counter>) -> Self {
        Self {
            text: Some(text.into()),
            counter: Some(counter),
            ..Self::empty()
        }
    }

    /// A text tab with both an icon and a badge counter.
    pub fn from_text_icon_counter(
        text: impl Into<String>,
        icon: IconId,
        counter: Arc<Counter>,
    ) -> Self {
        Self {
            text: Some(text.into()),
            icon: Some(icon),
            counter: Some(counter),
            ..Self::empty()
        }
    }

    /// A bare counter tab claiming `extra_width` on top of the badge.
    pub fn from_counter(counter: Arc<Counter>, extra_width: Px) -> Self {
        Self {
            counter: Some(counter),
            extra_width,
            ..Self::empty()
        }
    }

    /// A sticker tab: badge counter next to asynchronously loaded artwork.
    pub fn from_sticker(sticker: StickerId, counter: Arc<Counter>, extra_width: Px) -> Self {
        Self {
            sticker: Some(sticker),
            counter: Some(counter),
            extra_width,
            ..Self::empty()
        }
    }

    /// A hidden leading placeholder: claims layout width, draws nothing.
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::empty()
        }
    }

    /// Overrides every width computation with a fixed value.
    pub fn with_static_width(mut self, width: Px) -> Self {
        self.static_width = Some(width);
        self
    }

    /// The display text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The icon id, if any.
    pub fn icon(&self) -> Option<IconId> {
        self.icon
    }

    /// The badge counter, if any.
    pub fn counter(&self) -> Option<&Arc<Counter>> {
        self.counter.as_ref()
    }

    /// The sticker reference, if any.
    pub fn sticker(&self) -> Option<StickerId> {
        self.sticker
    }

    /// Whether this is a hidden placeholder.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        let counters_identical = match (&self.counter, &other.counter) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.icon == other.icon
            && self.text.as_deref().unwrap_or("") == other.text.as_deref().unwrap_or("")
            && counters_identical
    }
}

/// Mutable per-item layout record owned by the strip, index-for-index with
/// the item list.
#[derive(Debug, Clone)]
pub(crate) struct ItemRecord {
    pub(crate) item: Item,
    /// Full intrinsic width, including any extra width.
    pub(crate) width: Px,
    /// Width after the last trim/untrim pass.
    pub(crate) actual_width: Px,
    /// Trimmed (or full) label layout; `None` for text-less items.
    pub(crate) layout: Option<TextLayout>,
    /// Draw-only horizontal offset for drag-follow visuals.
    pub(crate) translation_x: Px,
    /// Late-binding sticker artwork, requested from the loader on bind.
    pub(crate) sticker: Option<Arc<StickerHandle>>,
    /// Side length of the sticker slot once bound.
    pub(crate) sticker_size: Px,
}

impl ItemRecord {
    pub(crate) fn new(item: Item) -> Self {
        Self {
            item,
            width: Px::ZERO,
            actual_width: Px::ZERO,
            layout: None,
            translation_x: Px::ZERO,
            sticker: None,
            sticker_size: Px::ZERO,
        }
    }

    /// Computes and caches the item's full intrinsic width.
    pub(crate) fn compute_width(&mut self, shaper: &dyn TextShaper, style: &TextStyle) -> Px {
        let spacing = StripDefaults::CONTENT_SPACING.to_px();
        let icon_size = StripDefaults::ICON_SIZE.to_px();
        let icon_part = |icon: Option<IconId>| {
            if icon.is_some() {
                icon_size + spacing
            } else {
                Px::ZERO
            }
        };

        let item = &self.item;
        let base = if let Some(static_width) = item.static_width {
            static_width
        } else if let Some(counter) = &item.counter {
            if let Some(text) = item.text.as_deref() {
                shaper.measure(text, style) + counter.scaled_width(spacing) + icon_part(item.icon)
            } else if self.sticker.is_some() {
                counter.width() + self.sticker_size
            } else if item.icon.is_some() {
                icon_size + counter.scaled_width(spacing)
            } else {
                counter.width() + spacing
            }
        } else if let Some(text) = item.text.as_deref() {
            shaper.measure(text, style) + icon_part(item.icon)
        } else if item.icon.is_some() {
            icon_size
        } else {
            Px::ZERO
        };

        self.width = base + item.extra_width;
        self.width
    }

    /// Ellipsizes the label into `avail` and caches the resulting layout.
    pub(crate) fn trim(&mut self, avail: Px, shaper: &dyn TextShaper, style: &TextStyle) {
        if let Some(text) = self.item.text.as_deref() {
            let layout = shaper.shape(text, style, avail, TruncateAt::End);
            self.actual_width = layout.width;
            self.layout = Some(layout);
        } else {
            self.layout = None;
            self.actual_width = self.width;
        }
    }

    /// Restores the full, untrimmed label layout.
    pub(crate) fn untrim(&mut self, shaper: &dyn TextShaper, style: &TextStyle) {
        if let Some(text) = self.item.text.as_deref() {
            let full = shaper.measure(text, style);
            self.layout = Some(shaper.shape(text, style, full, TruncateAt::End));
        } else {
            self.layout = None;
        }
        self.actual_width = self.width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabstrip_core::{Color, FixedMetricsShaper};

    fn shaper() -> FixedMetricsShaper {
        FixedMetricsShaper::new(Px(10), Px(20))
    }

    fn counter() -> Arc<Counter> {
        Arc::new(Counter::new(
            7,
            &shaper(),
            &TextStyle::default(),
            Color::BLACK,
            Color::WHITE,
        ))
    }

    #[test]
    fn test_equality_treats_missing_and_empty_text_alike() {
        // Hidden placeholders carry no text; the hidden flag itself is not
        // part of the equality rule.
        assert_eq!(Item::from_text(""), Item::hidden());
    }

    #[test]
    fn test_equality_counter_identity() {
        let shared = counter();
        let a = Item::from_text_counter("chats", shared.clone());
        let b = Item::from_text_counter("chats", shared.clone());
        assert_eq!(a, b);

        // Equal value, different object: not equal.
        let c = Item::from_text_counter("chats", counter());
        assert_ne!(a, c);
    }

    #[test]
    fn test_equality_icon_changes_differ() {
        let a = Item::from_icon(IconId(1));
        let b = Item::from_icon(IconId(2));
        assert_ne!(a, b);
        assert_eq!(a, Item::from_icon(IconId(1)));
    }

    #[test]
    fn test_width_text_only() {
        let mut record = ItemRecord::new(Item::from_text("abcd"));
        assert_eq!(
            record.compute_width(&shaper(), &TextStyle::default()),
            Px(40)
        );
    }

    #[test]
    fn test_width_text_with_icon() {
        let mut record = ItemRecord::new(Item::from_text_icon("abcd", IconId(1)));
        // 40 text + 24 icon + 6 spacing
        assert_eq!(
            record.compute_width(&shaper(), &TextStyle::default()),
            Px(70)
        );
    }

    #[test]
    fn test_width_icon_only() {
        let mut record = ItemRecord::new(Item::from_icon(IconId(1)));
        assert_eq!(
            record.compute_width(&shaper(), &TextStyle::default()),
            Px(24)
        );
    }

    #[test]
    fn test_width_bare_counter() {
        let c = counter();
        let pill = c.width();
        let mut record = ItemRecord::new(Item::from_counter(c, Px(4)));
        assert_eq!(
            record.compute_width(&shaper(), &TextStyle::default()),
            pill + Px(6) + Px(4)
        );
    }

    #[test]
    fn test_width_static_override_still_adds_extra() {
        let mut item = Item::from_text("abcdefgh").with_static_width(Px(55));
        item.extra_width = Px(5);
        let mut record = ItemRecord::new(item);
        assert_eq!(
            record.compute_width(&shaper(), &TextStyle::default()),
            Px(60)
        );
    }

    #[test]
    fn test_width_empty_item_is_zero() {
        let mut record = ItemRecord::new(Item::hidden());
        assert_eq!(
            record.compute_width(&shaper(), &TextStyle::default()),
            Px(0)
        );
    }

    #[test]
    fn test_trim_and_untrim() {
        let style = TextStyle::default();
        let mut record = ItemRecord::new(Item::from_text("abcdefgh"));
        record.compute_width(&shaper(), &style);
        assert_eq!(record.width, Px(80));

        record.trim(Px(50), &shaper(), &style);
        let trimmed = record.layout.clone().expect("text items keep a layout");
        assert!(trimmed.text.ends_with('…'));
        assert!(record.actual_width <= Px(50));

        record.untrim(&shaper(), &style);
        let full = record.layout.clone().expect("text items keep a layout");
        assert_eq!(full.text, "abcdefgh");
        assert_eq!(record.actual_width, Px(80));
    }
}
