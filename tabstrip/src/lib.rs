//! A pager top view: the horizontal tab strip drawn above a swipeable
//! content pager.
//!
//! The strip displays a row of selectable items (text, icon, badge counter or
//! animated sticker) with a continuously animated selection indicator that
//! tracks drag progress between tabs, and recognizes a per-tab vertical
//! "slide-off" drag alongside ordinary clicks and the pager's own horizontal
//! scrolling.
//!
//! The engine is host-agnostic: the platform supplies text shaping, theme
//! colors, sticker loading and touch events through the seams defined in
//! [`tabstrip_core`], and replays the [`tabstrip_core::DrawList`] recorded by
//! [`TabStrip::render`] against its own surface.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tabstrip::{StripArgs, TabStrip, theme::StaticTheme};
//! use tabstrip_core::{DrawList, FixedMetricsShaper, Px};
//!
//! let shaper = Arc::new(FixedMetricsShaper::default());
//! let theme = Arc::new(StaticTheme::new());
//! let mut strip = TabStrip::new(StripArgs::default(), shaper, theme);
//!
//! strip.set_text_items(&["Chats", "Calls", "Contacts"]);
//! strip.set_height(Px(48));
//! strip.measure(Px(720));
//! strip.set_selection_factor(0.5);
//!
//! let mut frame = DrawList::new();
//! strip.render(&mut frame);
//! assert!(!frame.is_empty());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod counter;
pub mod error;
pub mod gesture;
pub mod item;
mod layout;
mod render;
pub mod selection;
pub mod strip;
pub mod theme;

pub use crate::{
    counter::{Counter, CounterAlphaProvider, DefaultCounterAlphaProvider},
    error::StripError,
    gesture::{ItemClickListener, SlideOffDirection, SlideOffListener},
    item::Item,
    selection::{SelectionChange, SelectionChangeListener},
    strip::{Sizing, StripArgs, StripDefaults, TabStrip},
    theme::{ColorRole, LayoutDirection, StaticTheme, ThemeSource},
};
