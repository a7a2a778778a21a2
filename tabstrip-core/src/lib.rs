//! Platform-agnostic primitives and host seams for the tabstrip widget
//! engine.
//!
//! This crate defines the vocabulary the widget crate is written in:
//!
//! - [`Px`]/[`Dp`] pixel units with a process-wide scale factor
//! - [`Color`] and its blending helpers
//! - [`TouchEvent`]s forwarded by the host's input dispatch
//! - [`DrawCommand`]s recorded by the render pass and replayed by the host
//! - the [`TextShaper`] measurement/shaping seam
//! - the [`StickerLoader`] asynchronous image seam
//! - [`OneShot`] deadlines for deferred work driven by the host's frame tick
//!
//! Nothing here talks to a window system, a GPU or a font library; hosts
//! implement the seams with whatever they render and shape text with.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod color;
pub mod dp;
pub mod draw;
pub mod image;
pub mod px;
pub mod text;
pub mod time;
pub mod touch;

pub use crate::{
    color::Color,
    dp::{Dp, SCALE_FACTOR},
    draw::{DrawCommand, DrawList, IconId},
    image::{ImageData, ResolvedSticker, StickerHandle, StickerId, StickerLoader},
    px::{Px, PxPosition, PxRect, PxSize},
    text::{
        ELLIPSIS, FixedMetricsShaper, TextLayout, TextShaper, TextStyle, TruncateAt,
    },
    time::OneShot,
    touch::{DEFAULT_LONG_PRESS_TIMEOUT, DEFAULT_TOUCH_SLOP, TouchEvent, TouchPhase},
};
