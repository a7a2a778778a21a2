//! Render pass: records one frame of the strip as draw commands.
//!
//! Items are drawn left-to-right, or mirrored for right-to-left layouts where
//! the drawing cursor starts at the strip width and decrements. Content is
//! blended between the "from" and "to" text colors by the per-item highlight
//! factor, counters fade through the alpha-provider policy, and an optional
//! overlay rectangle slides vertically across the strip during transitions.

use tabstrip_core::{Color, DrawCommand, DrawList, Px, PxPosition, PxRect};

use crate::{
    counter::CounterAnchor,
    selection::item_highlight_factor,
    strip::{StripDefaults, TabStrip},
    theme::{ColorRole, LayoutDirection},
};

impl TabStrip {
    /// Records the current frame into `frame`.
    ///
    /// At `overlay_factor == 1` the strip is fully covered and nothing is
    /// recorded; the host represents the covered state by swapping content.
    pub fn render(&self, frame: &mut DrawList) {
        if self.records.is_empty() {
            return;
        }
        let overlay = self.selection.overlay_factor;
        if overlay == 1.0 {
            return;
        }

        let height = self.height;
        let strip_width = self.strip_width();
        let rtl = self.theme.layout_direction() == LayoutDirection::Rtl;

        let header = self.theme.color(ColorRole::HEADER_TEXT);
        let to_color = self.theme.color(self.args.to_text_color);
        let from_color = match self.args.from_text_color {
            Some(role) => self.theme.color(role),
            None => header.with_alpha(self.theme.subtitle_alpha()),
        };
        let selection_color = match self.args.selection_color {
            Some(role) => self.theme.color(role),
            None => header.with_alpha(0.9),
        };

        if let Some(pressed) = self.pressed_index() {
            let highlight = if self.args.dark_background {
                Color::WHITE
            } else {
                Color::BLACK
            };
            frame.push(DrawCommand::Rect {
                rect: self.item_rect(pressed),
                color: highlight.with_alpha(StripDefaults::PRESSED_HIGHLIGHT_ALPHA),
                corner_radius: Px::ZERO,
            });
        }

        let disabled = self.selection.disabled_factor;
        let selection_height = StripDefaults::SELECTION_HEIGHT.to_px();
        let selection_left = if rtl {
            strip_width - self.selection.left - self.selection.width
        } else {
            self.selection.left
        };
        let selection_top = if self.args.draw_selection_at_top {
            Px::ZERO
        } else {
            height - selection_height
        };
        let indicator_color = if disabled == 0.0 {
            selection_color
        } else {
            selection_color.lerp(from_color, disabled)
        };
        frame.push(DrawCommand::Rect {
            rect: PxRect::new(
                selection_left,
                selection_top,
                self.selection.width,
                selection_height,
            ),
            color: indicator_color,
            corner_radius: Px::ZERO,
        });

        self.record_items(frame, strip_width, rtl, from_color, to_color);

        if overlay != 0.0 {
            let top = Px::from_f32(height.to_f32() * (1.0 - overlay));
            frame.push(DrawCommand::Rect {
                rect: PxRect::new(Px::ZERO, top, strip_width, height),
                color: self.theme.color(ColorRole::FILLING),
                corner_radius: Px::ZERO,
            });
        }
    }

    fn record_items(
        &self,
        frame: &mut DrawList,
        strip_width: Px,
        rtl: bool,
        from_color: Color,
        to_color: Color,
    ) {
        let height = self.height;
        let padding = self.text_padding_px();
        let disabled = self.selection.disabled_factor;
        let icon_size = StripDefaults::ICON_SIZE.to_px();
        let spacing = StripDefaults::CONTENT_SPACING.to_px();
        let factor = self.selection.factor;
        let first_hidden = self.records[0].item.hidden;

        let mut cx = if rtl { strip_width } else { Px::ZERO };
        for (index, record) in self.records.iter().enumerate() {
            let item_width = if self.wrap_mode() {
                record.actual_width + padding * 2
            } else {
                self.slot_span_at(index)
            };
            if rtl {
                cx -= item_width;
            }

            if !record.item.hidden {
                let highlight =
                    item_highlight_factor(factor, self.selection.transition, index);
                let color = from_color.lerp(to_color, highlight * (1.0 - disabled));
                // Drag-follow translation shifts only this item's commands.
                let ox = cx + record.translation_x;

                if let Some(counter) = record.item.counter.as_deref() {
                    let mut alpha_factor = 1.0 - (factor - index as f32).abs().clamp(0.0, 1.0);
                    let drawable_alpha = self.alpha_provider.drawable_alpha(counter, alpha_factor);
                    if first_hidden {
                        alpha_factor = alpha_factor.max(1.0 - factor.clamp(0.0, 1.0));
                        if index == 1 && factor < 1.0 {
                            alpha_factor = 1.0;
                        }
                    }
                    let text_alpha = self.alpha_provider.text_alpha(counter, alpha_factor);
                    let background_alpha =
                        self.alpha_provider.background_alpha(counter, alpha_factor);

                    if let Some(layout) = record.layout.as_ref() {
                        let horizontal_padding =
                            ((item_width - record.actual_width) / 2).max(Px::ZERO);
                        let mut string_x = ox + horizontal_padding;
                        if let Some(icon) = record.item.icon {
                            frame.push(DrawCommand::Icon {
                                icon,
                                position: PxPosition::new(string_x, height / 2 - icon_size / 2),
                                tint: color,
                                alpha: 1.0,
                            });
                            string_x += icon_size + spacing;
                        }
                        frame.push(DrawCommand::Text {
                            layout: layout.clone(),
                            position: PxPosition::new(string_x, height / 2 - layout.height / 2),
                            color,
                            alpha: 1.0,
                        });
                        counter.record(
                            frame,
                            ox + item_width - horizontal_padding - counter.width() / 2,
                            height / 2,
                            CounterAnchor::Center,
                            text_alpha,
                            background_alpha,
                        );
                    } else if let Some(handle) = record.sticker.as_ref() {
                        let size = record.sticker_size;
                        let image_y = (height - size) / 2;
                        if let Some(resolved) = handle.resolved() {
                            frame.push(DrawCommand::Image {
                                data: resolved.image,
                                rect: PxRect::new(ox, image_y, size, size),
                                scale: resolved.display_scale,
                                alpha: drawable_alpha,
                            });
                        }
                        counter.record(
                            frame,
                            ox + size,
                            height / 2,
                            CounterAnchor::Start,
                            text_alpha,
                            background_alpha,
                        );
                    } else if let Some(icon) = record.item.icon {
                        let horizontal_padding =
                            ((item_width - record.actual_width) / 2).max(Px::ZERO);
                        frame.push(DrawCommand::Icon {
                            icon,
                            position: PxPosition::new(
                                ox + horizontal_padding,
                                height / 2 - icon_size / 2,
                            ),
                            tint: color,
                            alpha: 1.0,
                        });
                        counter.record(
                            frame,
                            ox + item_width - horizontal_padding - counter.width() / 2,
                            height / 2,
                            CounterAnchor::Center,
                            text_alpha,
                            background_alpha,
                        );
                    } else {
                        counter.record(
                            frame,
                            ox + item_width / 2,
                            height / 2,
                            CounterAnchor::Center,
                            text_alpha,
                            background_alpha,
                        );
                    }
                } else if let Some(layout) = record.layout.as_ref() {
                    let string_x = if let Some(icon) = record.item.icon {
                        let horizontal_padding =
                            ((item_width - record.actual_width) / 2).max(Px::ZERO);
                        frame.push(DrawCommand::Icon {
                            icon,
                            position: PxPosition::new(
                                ox + horizontal_padding,
                                height / 2 - icon_size / 2,
                            ),
                            tint: color,
                            alpha: 1.0,
                        });
                        ox + horizontal_padding + icon_size + spacing
                    } else {
                        ox + item_width / 2 - record.actual_width / 2
                    };
                    frame.push(DrawCommand::Text {
                        layout: layout.clone(),
                        position: PxPosition::new(string_x, height / 2 - layout.height / 2),
                        color,
                        alpha: 1.0,
                    });
                } else if let Some(icon) = record.item.icon {
                    frame.push(DrawCommand::Icon {
                        icon,
                        position: PxPosition::new(
                            ox + item_width / 2 - icon_size / 2,
                            height / 2 - icon_size / 2,
                        ),
                        tint: color,
                        alpha: 1.0,
                    });
                }
            }

            if !rtl {
                cx += item_width;
            }
        }
    }
}
