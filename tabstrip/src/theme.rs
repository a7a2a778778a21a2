//! Theme and layout-direction seam.
//!
//! The strip never owns colors; it resolves every paint through a host
//! [`ThemeSource`] keyed by opaque [`ColorRole`] identifiers, so theme
//! switches take effect on the next recorded frame without touching the
//! widget.

use tabstrip_core::Color;

/// Opaque identifier of a themable color role.
///
/// The host assigns meaning to the raw values; the strip only forwards them.
/// A couple of roles are well-known because the strip falls back to them when
/// the caller leaves a color unconfigured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRole(pub u32);

impl ColorRole {
    /// Default text color of header content; also the base for the derived
    /// inactive-label and indicator fallbacks.
    pub const HEADER_TEXT: Self = Self(1);
    /// Background filling color used by the overlay cross-fade.
    pub const FILLING: Self = Self(2);
}

/// Horizontal layout direction of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left; the strip mirrors item order, indicator geometry and
    /// hit testing.
    Rtl,
}

/// Host-provided color resolution and layout direction.
pub trait ThemeSource: Send + Sync {
    /// Resolves a color role to a concrete color.
    fn color(&self, role: ColorRole) -> Color;

    /// Current layout direction.
    fn layout_direction(&self) -> LayoutDirection {
        LayoutDirection::Ltr
    }

    /// Translucency applied to [`ColorRole::HEADER_TEXT`] when deriving the
    /// fallback inactive-label color.
    fn subtitle_alpha(&self) -> f32 {
        0.8
    }
}

/// A fixed role-to-color table, mainly for tests and previews.
#[derive(Debug, Clone)]
pub struct StaticTheme {
    colors: Vec<(ColorRole, Color)>,
    fallback: Color,
    direction: LayoutDirection,
}

impl StaticTheme {
    /// Creates a theme that answers every role with opaque white.
    pub fn new() -> Self {
        Self {
            colors: Vec::new(),
            fallback: Color::WHITE,
            direction: LayoutDirection::Ltr,
        }
    }

    /// Adds or overrides a role mapping.
    pub fn with_color(mut self, role: ColorRole, color: Color) -> Self {
        self.colors.retain(|(r, _)| *r != role);
        self.colors.push((role, color));
        self
    }

    /// Sets the color returned for unmapped roles.
    pub fn with_fallback(mut self, color: Color) -> Self {
        self.fallback = color;
        self
    }

    /// Sets the layout direction.
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }
}

impl Default for StaticTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeSource for StaticTheme {
    fn color(&self, role: ColorRole) -> Color {
        self.colors
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, c)| *c)
            .unwrap_or(self.fallback)
    }

    fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_theme_lookup() {
        let theme = StaticTheme::new()
            .with_color(ColorRole::HEADER_TEXT, Color::BLACK)
            .with_fallback(Color::WHITE);
        assert_eq!(theme.color(ColorRole::HEADER_TEXT), Color::BLACK);
        assert_eq!(theme.color(ColorRole(99)), Color::WHITE);
    }

    #[test]
    fn test_override_replaces_previous_mapping() {
        let theme = StaticTheme::new()
            .with_color(ColorRole::FILLING, Color::BLACK)
            .with_color(ColorRole::FILLING, Color::WHITE);
        assert_eq!(theme.color(ColorRole::FILLING), Color::WHITE);
    }
}
