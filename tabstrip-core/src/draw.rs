//! Draw commands recorded by the render pass.
//!
//! The engine does not paint; each frame it records an ordered [`DrawList`]
//! of [`DrawCommand`]s that the host replays against its own surface. All
//! geometry is absolute in strip-local physical pixels, already mirrored for
//! right-to-left layouts and shifted by per-item translation offsets.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::{Color, ImageData, Px, PxPosition, PxRect, TextLayout};

/// Opaque identifier of an icon resource resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(pub u32);

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled (optionally rounded) rectangle.
    Rect {
        /// Target rectangle.
        rect: PxRect,
        /// Fill color.
        color: Color,
        /// Corner radius; zero draws square corners.
        corner_radius: Px,
    },
    /// A shaped single line of text.
    Text {
        /// Shaped layout produced by the host's [`crate::TextShaper`].
        layout: TextLayout,
        /// Top-left corner of the layout.
        position: PxPosition,
        /// Text color.
        color: Color,
        /// Extra opacity multiplied onto the color.
        alpha: f32,
    },
    /// A tinted icon drawn at its intrinsic size.
    Icon {
        /// Host-resolved icon resource.
        icon: IconId,
        /// Top-left corner.
        position: PxPosition,
        /// Tint applied over the icon shape.
        tint: Color,
        /// Extra opacity multiplied onto the tint.
        alpha: f32,
    },
    /// A decoded raster image scaled into a rectangle.
    Image {
        /// Decoded RGBA8 artwork.
        data: Arc<ImageData>,
        /// Target bounds before `scale` is applied around their center.
        rect: PxRect,
        /// Display scale applied around the bounds center.
        scale: f32,
        /// Opacity.
        alpha: f32,
    },
}

/// An ordered list of draw commands for one frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrawList {
    commands: SmallVec<[DrawCommand; 16]>,
}

impl DrawList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Returns the recorded commands in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clears the list for reuse on the next frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
