//! The pager-top-view facade: item list management, layout driving,
//! configuration and teardown.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use derive_setters::Setters;
use tabstrip_core::{
    DEFAULT_LONG_PRESS_TIMEOUT, DEFAULT_TOUCH_SLOP, Dp, IconId, OneShot, Px, StickerLoader,
    TextShaper, TextStyle,
};
use tracing::debug;

use crate::{
    counter::{CounterAlphaProvider, DefaultCounterAlphaProvider},
    error::StripError,
    gesture::{ItemClickListener, SlideOffDirection, SlideOffListener, TouchTarget},
    item::{Item, ItemRecord},
    layout,
    selection::{SelectionChangeListener, SelectionState},
    theme::{ColorRole, ThemeSource},
};

/// How the strip resolves its own width against the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sizing {
    /// The strip sizes itself to its content; labels are never re-ellipsized.
    Wrap,
    /// The strip always spans the viewport; items share uniform slots and
    /// oversized labels are tail-ellipsized.
    #[default]
    Fill,
}

/// Built-in metrics of the strip.
pub struct StripDefaults;

impl StripDefaults {
    /// Height of the selection indicator bar.
    pub const SELECTION_HEIGHT: Dp = Dp(2.0);
    /// Horizontal padding applied on both sides of every item.
    pub const TEXT_PADDING: Dp = Dp(19.0);
    /// Side length of the icon slot.
    pub const ICON_SIZE: Dp = Dp(24.0);
    /// Spacing between an icon and the content following it.
    pub const CONTENT_SPACING: Dp = Dp(6.0);
    /// Side length of the sticker slot.
    pub const STICKER_SIZE: Dp = Dp(34.0);
    /// Delay before the indicator is recomputed after a non-initial relayout,
    /// letting the host's own relayout settle first.
    pub const RELAYOUT_SETTLE_DELAY: Duration = Duration::from_millis(10);
    /// Alpha of the pressed-state highlight behind a held tab.
    pub const PRESSED_HIGHLIGHT_ALPHA: f32 = 0.1;
}

/// Configuration for a [`TabStrip`].
///
/// # Examples
///
/// ```
/// use tabstrip::{Sizing, StripArgs};
/// use tabstrip_core::Dp;
///
/// let args = StripArgs::default()
///     .sizing(Sizing::Wrap)
///     .text_padding(Dp(12.0))
///     .draw_selection_at_top(true);
/// ```
#[derive(PartialEq, Clone, Setters)]
pub struct StripArgs {
    /// Wrap-vs-fill sizing mode.
    pub sizing: Sizing,
    /// In fill mode, lets a slot grow up to double its computed width (capped
    /// at the even split) when the items leave slack.
    pub fits_parent_width: bool,
    /// Horizontal padding on both sides of every item.
    pub text_padding: Dp,
    /// Style selector passed to the host text shaper.
    pub text_style: TextStyle,
    /// Pins the selection indicator to the top edge instead of the bottom.
    pub draw_selection_at_top: bool,
    /// Vertical direction of the per-item slide-off gesture.
    pub slide_off_direction: SlideOffDirection,
    /// Draw pressed-state highlights for a dark background.
    pub dark_background: bool,
    /// Color role of inactive labels; falls back to a translucent
    /// [`ColorRole::HEADER_TEXT`].
    #[setters(strip_option)]
    pub from_text_color: Option<ColorRole>,
    /// Color role of the active label.
    pub to_text_color: ColorRole,
    /// Color role of the selection indicator; falls back to a translucent
    /// [`ColorRole::HEADER_TEXT`].
    #[setters(strip_option)]
    pub selection_color: Option<ColorRole>,
    /// Distance a pointer may travel before a press stops being a tap.
    pub touch_slop: Dp,
    /// Hold duration after which a press becomes a long-press.
    pub long_press_timeout: Duration,
}

impl Default for StripArgs {
    fn default() -> Self {
        Self {
            sizing: Sizing::default(),
            fits_parent_width: false,
            text_padding: StripDefaults::TEXT_PADDING,
            text_style: TextStyle::default(),
            draw_selection_at_top: false,
            slide_off_direction: SlideOffDirection::Bottom,
            dark_background: false,
            from_text_color: None,
            to_text_color: ColorRole::HEADER_TEXT,
            selection_color: None,
            touch_slop: DEFAULT_TOUCH_SLOP,
            long_press_timeout: DEFAULT_LONG_PRESS_TIMEOUT,
        }
    }
}

/// A horizontal tab strip above a swipeable pager, with a continuously
/// animated selection indicator.
///
/// The host drives it cooperatively: push items and a live selection factor,
/// call [`measure`](Self::measure) when the viewport changes,
/// [`tick`](Self::tick) once per frame, forward touch events through
/// [`handle_touch`](Self::handle_touch) and replay
/// [`render`](Self::render)'s draw list.
pub struct TabStrip {
    pub(crate) args: StripArgs,
    pub(crate) records: Vec<ItemRecord>,
    pub(crate) targets: Vec<TouchTarget>,
    pub(crate) selection: SelectionState,
    pub(crate) total_width: Px,
    pub(crate) mean_item_width: Px,
    pub(crate) common_slot: f32,
    pub(crate) last_measured_width: Px,
    pub(crate) height: Px,
    pub(crate) container_alpha: f32,
    pub(crate) touch_disabled: bool,
    pub(crate) shaper: Arc<dyn TextShaper>,
    pub(crate) theme: Arc<dyn ThemeSource>,
    pub(crate) sticker_loader: Option<Arc<dyn StickerLoader>>,
    pub(crate) deferred_indicator: OneShot,
    pub(crate) long_press: OneShot,
    pub(crate) active_target: Option<usize>,
    pub(crate) click_listener: Option<Box<dyn ItemClickListener>>,
    pub(crate) selection_listener: Option<Box<dyn SelectionChangeListener>>,
    pub(crate) slide_off_listener: Option<Box<dyn SlideOffListener>>,
    pub(crate) intercept_request: Option<Box<dyn FnMut(bool)>>,
    pub(crate) parent_intercept_locked: bool,
    pub(crate) alpha_provider: Box<dyn CounterAlphaProvider>,
    pub(crate) needs_redraw: bool,
    pub(crate) destroyed: bool,
}

impl TabStrip {
    /// Creates an empty strip bound to the host's shaper and theme.
    pub fn new(args: StripArgs, shaper: Arc<dyn TextShaper>, theme: Arc<dyn ThemeSource>) -> Self {
        Self {
            args,
            records: Vec::new(),
            targets: Vec::new(),
            selection: SelectionState::new(),
            total_width: Px::ZERO,
            mean_item_width: Px::ZERO,
            common_slot: 0.0,
            last_measured_width: Px::ZERO,
            height: Px::ZERO,
            container_alpha: 1.0,
            touch_disabled: false,
            shaper,
            theme,
            sticker_loader: None,
            deferred_indicator: OneShot::new(),
            long_press: OneShot::new(),
            active_target: None,
            click_listener: None,
            selection_listener: None,
            slide_off_listener: None,
            intercept_request: None,
            parent_intercept_locked: false,
            alpha_provider: Box::new(DefaultCounterAlphaProvider),
            needs_redraw: false,
            destroyed: false,
        }
    }

    /// Attaches the asynchronous sticker loader.
    pub fn with_sticker_loader(mut self, loader: Arc<dyn StickerLoader>) -> Self {
        self.sticker_loader = Some(loader);
        self.rebind_stickers();
        self
    }

    // --- item list ---

    /// Replaces the item list.
    ///
    /// Skipped entirely (no geometry recompute, no notification) when the new
    /// list is index-wise equal to the current one under [`Item`] equality.
    pub fn set_items(&mut self, items: Vec<Item>) {
        if self.records.len() == items.len() {
            let unchanged = items
                .iter()
                .zip(self.records.iter())
                .all(|(item, record)| *item == record.item);
            if unchanged {
                debug!("item list unchanged, skipping relayout");
                return;
            }
        }

        let loader = self.sticker_loader.clone();
        for record in &mut self.records {
            Self::release_sticker(&loader, record);
        }
        self.records = items.into_iter().map(ItemRecord::new).collect();
        self.targets = vec![TouchTarget::new(); self.records.len()];
        self.rebind_stickers();
        self.recompute_totals();
        self.selection.factor = if self.records.is_empty() {
            0.0
        } else {
            self.selection
                .factor
                .clamp(0.0, (self.records.len() - 1) as f32)
        };
        self.last_measured_width = Px::ZERO;
        self.invalidate();
    }

    /// Replaces the item list with text-only tabs.
    pub fn set_text_items(&mut self, texts: &[&str]) {
        self.set_items(texts.iter().map(|text| Item::from_text(*text)).collect());
    }

    /// Replaces the item list with icon-only tabs.
    pub fn set_icon_items(&mut self, icons: &[IconId]) {
        self.set_items(icons.iter().map(|icon| Item::from_icon(*icon)).collect());
    }

    /// Replaces a single item.
    pub fn set_item_at(&mut self, index: usize, item: Item) -> Result<(), StripError> {
        let count = self.records.len();
        if index >= count {
            return Err(StripError::IndexOutOfBounds { index, count });
        }

        let padding = self.text_padding_px();
        let loader = self.sticker_loader.clone();
        self.total_width -= self.records[index].width + padding * 2;
        Self::release_sticker(&loader, &mut self.records[index]);
        self.records[index] = ItemRecord::new(item);
        self.rebind_stickers();

        let shaper = self.shaper.clone();
        let width = self.records[index].compute_width(&*shaper, &self.args.text_style);
        self.total_width += width + padding * 2;
        self.mean_item_width = self.total_width / count as i32;

        self.last_measured_width = Px::ZERO;
        self.invalidate();
        Ok(())
    }

    /// Appends an item.
    pub fn add_item(&mut self, item: Item) {
        let index = self.records.len();
        let _ = self.add_item_at(item, index);
    }

    /// Inserts an item at `index` (equal to the count appends).
    pub fn add_item_at(&mut self, item: Item, index: usize) -> Result<(), StripError> {
        let count = self.records.len();
        if index > count {
            return Err(StripError::IndexOutOfBounds { index, count });
        }

        self.records.insert(index, ItemRecord::new(item));
        self.targets.insert(index, TouchTarget::new());
        self.rebind_stickers();

        let shaper = self.shaper.clone();
        let style = self.args.text_style;
        let padding = self.text_padding_px();
        let width = self.records[index].compute_width(&*shaper, &style);
        self.total_width += width + padding * 2;
        self.mean_item_width = self.total_width / self.records.len() as i32;

        if count > 0 && index <= self.selection.factor as usize {
            self.selection.factor += 1.0;
        }
        self.selection.factor = self
            .selection
            .factor
            .clamp(0.0, (self.records.len() - 1) as f32);

        // Incremental trim for the new item; siblings keep their layouts
        // until the next full pass.
        let wrap = self.wrap_mode();
        if self.last_measured_width != Px::ZERO {
            self.common_slot = layout::common_slot_width(
                self.last_measured_width,
                self.records.len(),
                self.mean_item_width,
                self.args.fits_parent_width,
            );
            let avail = Px::from_f32(self.common_slot) - padding * 2;
            let record = &mut self.records[index];
            if !wrap && record.width > avail {
                record.trim(avail, &*shaper, &style);
            } else {
                record.untrim(&*shaper, &style);
            }
        } else {
            self.records[index].untrim(&*shaper, &style);
        }

        self.invalidate();
        Ok(())
    }

    /// Removes the last item, if any.
    pub fn remove_last_item(&mut self) {
        if !self.records.is_empty() {
            let index = self.records.len() - 1;
            let _ = self.remove_item_at(index);
        }
    }

    /// Removes the item at `index`.
    pub fn remove_item_at(&mut self, index: usize) -> Result<(), StripError> {
        let count = self.records.len();
        if index >= count {
            return Err(StripError::IndexOutOfBounds { index, count });
        }

        let loader = self.sticker_loader.clone();
        let mut record = self.records.remove(index);
        Self::release_sticker(&loader, &mut record);
        self.targets.remove(index);

        let padding = self.text_padding_px();
        self.total_width -= record.width + padding * 2;
        let remaining = self.records.len();
        self.mean_item_width = if remaining == 0 {
            Px::ZERO
        } else {
            self.total_width / remaining as i32
        };

        if remaining == 0 {
            self.selection.factor = 0.0;
        } else {
            if index <= self.selection.factor as usize && self.selection.factor >= 1.0 {
                self.selection.factor -= 1.0;
            }
            self.selection.factor = self.selection.factor.min((remaining - 1) as f32);
        }

        self.invalidate();
        Ok(())
    }

    /// Recomputes a single item's width and layout in place.
    pub fn request_item_layout_at(&mut self, index: usize) {
        if index < self.records.len() {
            let item = self.records[index].item.clone();
            let _ = self.set_item_at(index, item);
        }
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.records.len()
    }

    /// The item at `index`, if in range.
    pub fn item_at(&self, index: usize) -> Option<&Item> {
        self.records.get(index).map(|record| &record.item)
    }

    /// Sets the draw-only horizontal translation of a single item.
    pub fn set_item_translation_x(&mut self, index: usize, x: Px) -> Result<(), StripError> {
        let count = self.records.len();
        let Some(record) = self.records.get_mut(index) else {
            return Err(StripError::IndexOutOfBounds { index, count });
        };
        record.translation_x = x;
        self.invalidate();
        Ok(())
    }

    // --- layout driving ---

    /// Lays the strip out against `viewport_width` and returns the strip's
    /// own width (the content total in wrap mode, the viewport in fill mode).
    pub fn measure(&mut self, viewport_width: Px) -> Px {
        match self.args.sizing {
            Sizing::Wrap => {
                let total = self.total_width;
                self.layout_pass(total, true);
                total
            }
            Sizing::Fill => {
                self.layout_pass(viewport_width, false);
                viewport_width
            }
        }
    }

    /// Sets the strip height used for centering content and the slide-off
    /// threshold.
    pub fn set_height(&mut self, height: Px) {
        if self.height != height {
            self.height = height;
            self.invalidate();
        }
    }

    fn layout_pass(&mut self, width: Px, wrap: bool) {
        if width == Px::ZERO || self.last_measured_width == width || self.records.is_empty() {
            return;
        }
        let relayout = self.last_measured_width != Px::ZERO;
        self.last_measured_width = width;
        self.common_slot = layout::common_slot_width(
            width,
            self.records.len(),
            self.mean_item_width,
            self.args.fits_parent_width,
        );

        let padding = self.text_padding_px();
        let avail = Px::from_f32(self.common_slot) - padding * 2;
        let shaper = self.shaper.clone();
        layout::apply_trim(&mut self.records, wrap, avail, &*shaper, &self.args.text_style);
        debug!(width = width.raw(), wrap, relayout, "strip laid out");

        if relayout {
            // Let the host's pending relayout settle before moving the
            // indicator; a newer layout pass rearms and wins.
            self.deferred_indicator
                .arm_after(Instant::now(), StripDefaults::RELAYOUT_SETTLE_DELAY);
        } else {
            let factor = self.selection.factor;
            self.recalculate_selection(factor, true);
        }
    }

    /// Fires due deferred work; call once per frame.
    pub fn tick(&mut self, now: Instant) {
        if self.deferred_indicator.fire_if_due(now) {
            let factor = self.selection.factor;
            self.recalculate_selection(factor, true);
            self.invalidate();
        }
        if self.long_press.fire_if_due(now) {
            self.fire_long_press();
        }
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    // --- configuration ---

    /// Sets the per-item horizontal text padding.
    pub fn set_text_padding(&mut self, padding: Dp) {
        self.args.text_padding = padding;
        self.recompute_totals();
        self.last_measured_width = Px::ZERO;
        self.invalidate();
    }

    /// Toggles fill-mode slot growth into leftover slack.
    pub fn set_fits_parent_width(&mut self, fits: bool) {
        self.args.fits_parent_width = fits;
        self.last_measured_width = Px::ZERO;
        self.invalidate();
    }

    /// Moves the selection indicator to the top or bottom edge.
    pub fn set_draw_selection_at_top(&mut self, at_top: bool) {
        self.args.draw_selection_at_top = at_top;
        self.invalidate();
    }

    /// Whether the indicator is pinned to the top edge.
    pub fn is_draw_selection_at_top(&self) -> bool {
        self.args.draw_selection_at_top
    }

    /// Sets the slide-off gesture direction.
    pub fn set_slide_off_direction(&mut self, direction: SlideOffDirection) {
        self.args.slide_off_direction = direction;
    }

    /// Switches pressed-state highlights to their dark-background variant.
    pub fn set_use_dark_background(&mut self) {
        self.args.dark_background = true;
    }

    /// Enables or disables touch handling entirely.
    pub fn set_touch_disabled(&mut self, disabled: bool) {
        self.touch_disabled = disabled;
    }

    /// Drives the disable animation: fades labels toward the "from" color and
    /// dims the indicator. Touch is swallowed while non-zero.
    pub fn set_disabled_factor(&mut self, factor: f32) {
        if self.selection.disabled_factor != factor {
            self.selection.disabled_factor = factor;
            self.invalidate();
        }
    }

    /// Drives the overlay cross-fade toward a blank filling color.
    pub fn set_overlay_factor(&mut self, factor: f32) {
        if self.selection.overlay_factor != factor {
            self.selection.overlay_factor = factor;
            self.invalidate();
        }
    }

    /// Sets the from/to label color roles. Returns whether anything changed.
    pub fn set_text_from_to_colors(&mut self, from: Option<ColorRole>, to: ColorRole) -> bool {
        if self.args.from_text_color != from || self.args.to_text_color != to {
            self.args.from_text_color = from;
            self.args.to_text_color = to;
            self.invalidate();
            true
        } else {
            false
        }
    }

    /// Sets the indicator color role. Returns whether anything changed.
    pub fn set_selection_color(&mut self, color: Option<ColorRole>) -> bool {
        if self.args.selection_color != color {
            self.args.selection_color = color;
            self.invalidate();
            true
        } else {
            false
        }
    }

    /// Mirrors the enclosing container's opacity; clicks are suppressed while
    /// it is below 1 (a cross-fade transition is in progress).
    pub fn set_container_alpha(&mut self, alpha: f32) {
        self.container_alpha = alpha;
    }

    /// Replaces the counter alpha policy.
    pub fn set_counter_alpha_provider(&mut self, provider: Box<dyn CounterAlphaProvider>) {
        self.alpha_provider = provider;
        self.invalidate();
    }

    // --- listeners ---

    /// Sets or clears the click/long-click listener.
    pub fn set_on_item_click_listener(&mut self, listener: Option<Box<dyn ItemClickListener>>) {
        self.click_listener = listener;
    }

    /// Sets or clears the gated selection-geometry listener.
    pub fn set_selection_change_listener(
        &mut self,
        listener: Option<Box<dyn SelectionChangeListener>>,
    ) {
        self.selection_listener = listener;
    }

    /// Sets or clears the slide-off gesture listener.
    pub fn set_on_slide_off_listener(&mut self, listener: Option<Box<dyn SlideOffListener>>) {
        self.slide_off_listener = listener;
    }

    /// Sets or clears the callback requesting touch-interception disallowance
    /// on the enclosing container.
    pub fn set_parent_intercept_request(&mut self, request: Option<Box<dyn FnMut(bool)>>) {
        self.intercept_request = request;
    }

    // --- invalidation hooks ---

    /// The host's text assets changed (e.g. an emoji atlas swap); redraw.
    pub fn notify_text_assets_changed(&mut self) {
        self.invalidate();
    }

    /// The host's layout direction flipped; geometry mirrors on the next
    /// recorded frame.
    pub fn notify_layout_direction_changed(&mut self) {
        self.invalidate();
    }

    // --- teardown ---

    /// Releases every sticker-loader association. Safe to call repeatedly;
    /// also run on drop.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        let loader = self.sticker_loader.clone();
        for record in &mut self.records {
            Self::release_sticker(&loader, record);
        }
    }

    // --- geometry accessors ---

    /// Sum of item widths plus both paddings per item.
    pub fn total_width(&self) -> Px {
        self.total_width
    }

    /// The uniform fill-mode slot width from the last layout pass.
    pub fn common_item_width(&self) -> Px {
        Px::from_f32(self.common_slot.round())
    }

    /// The strip's own width: the content total in wrap mode, the last
    /// measured viewport in fill mode.
    pub fn strip_width(&self) -> Px {
        if self.wrap_mode() {
            self.total_width
        } else {
            self.last_measured_width
        }
    }

    // --- internals ---

    pub(crate) fn wrap_mode(&self) -> bool {
        matches!(self.args.sizing, Sizing::Wrap)
    }

    pub(crate) fn text_padding_px(&self) -> Px {
        self.args.text_padding.to_px()
    }

    pub(crate) fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    pub(crate) fn slot_span_at(&self, index: usize) -> Px {
        layout::slot_span(self.common_slot, index)
    }

    /// Touch span of an item: full width plus paddings in wrap mode, the
    /// uniform slot in fill mode.
    fn item_span_at(&self, index: usize) -> Px {
        if self.wrap_mode() {
            self.records[index].width + self.text_padding_px() * 2
        } else {
            self.slot_span_at(index)
        }
    }

    pub(crate) fn item_rect(&self, index: usize) -> tabstrip_core::PxRect {
        let mut left = Px::ZERO;
        for i in 0..index {
            left += self.item_span_at(i);
        }
        let span = self.item_span_at(index);
        let rtl = matches!(
            self.theme.layout_direction(),
            crate::theme::LayoutDirection::Rtl
        );
        let x = if rtl {
            self.strip_width() - left - span
        } else {
            left
        };
        tabstrip_core::PxRect::new(x, Px::ZERO, span, self.height)
    }

    pub(crate) fn item_index_at(&self, x: Px) -> Option<usize> {
        if self.last_measured_width == Px::ZERO {
            return None;
        }
        (0..self.records.len()).find(|&index| {
            let rect = self.item_rect(index);
            x >= rect.x && x < rect.x + rect.width
        })
    }

    fn rebind_stickers(&mut self) {
        let Some(loader) = self.sticker_loader.clone() else {
            return;
        };
        for record in &mut self.records {
            if let Some(id) = record.item.sticker
                && record.sticker.is_none()
            {
                record.sticker = Some(loader.request(id));
                record.sticker_size = StripDefaults::STICKER_SIZE.to_px();
            }
        }
    }

    fn release_sticker(loader: &Option<Arc<dyn StickerLoader>>, record: &mut ItemRecord) {
        if record.sticker.take().is_some()
            && let (Some(loader), Some(id)) = (loader, record.item.sticker)
        {
            loader.release(id);
        }
        record.sticker_size = Px::ZERO;
    }

    fn recompute_totals(&mut self) {
        let shaper = self.shaper.clone();
        let padding = self.text_padding_px();
        let (total, mean) =
            layout::compute_totals(&mut self.records, &*shaper, &self.args.text_style, padding);
        self.total_width = total;
        self.mean_item_width = mean;
    }
}

impl Drop for TabStrip {
    fn drop(&mut self) {
        self.destroy();
    }
}
