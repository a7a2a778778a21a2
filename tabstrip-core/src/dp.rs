//! Density-independent pixels for the tabstrip engine.
//!
//! Density-independent pixels (dp) are a virtual pixel unit that provides
//! consistent visual sizing across screen densities. The conversion between
//! dp and physical pixels is controlled by a process-wide scale factor stored
//! in [`SCALE_FACTOR`], typically set once by the host at startup from the
//! device's pixel density.

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::Px;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// The scale factor represents how many physical pixels correspond to one dp
/// unit. When unset, conversions default to 1.0 (no scaling), which is also
/// the contract used by headless tests.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels (dp).
///
/// `Dp` wraps an `f64` measurement that stays visually consistent across
/// screen densities; it is converted to [`Px`] with the current
/// [`SCALE_FACTOR`] when geometry needs pixel precision.
///
/// # Examples
///
/// ```
/// use tabstrip_core::Dp;
///
/// const TEXT_PADDING: Dp = Dp::new(19.0);
/// let px = TEXT_PADDING.to_px();
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Creates a new `Dp` instance with the specified value.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts this dp value to physical pixels as an `f64`.
    pub fn to_pixels_f64(&self) -> f64 {
        self.0 * scale_factor()
    }

    /// Converts this dp value to physical pixels as an `f32`.
    pub fn to_pixels_f32(&self) -> f32 {
        (self.0 * scale_factor()) as f32
    }

    /// Creates a `Dp` value from physical pixels specified as an `f64`.
    pub fn from_pixels_f64(value: f64) -> Self {
        Dp(value / scale_factor())
    }

    /// Converts this `Dp` value to a `Px` (physical pixels) value.
    pub fn to_px(&self) -> Px {
        Px::from_f32(self.to_pixels_f32())
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp::new(value)
    }
}

impl From<Px> for Dp {
    fn from(px: Px) -> Self {
        Dp::from_pixels_f64(px.0 as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale_is_identity() {
        // Tests run without a host-provided scale factor.
        assert_eq!(Dp(19.0).to_px(), Px(19));
        assert_eq!(Dp::from_pixels_f64(24.0), Dp(24.0));
    }

    #[test]
    fn test_px_round_trip() {
        let px = Px(42);
        let dp: Dp = px.into();
        assert_eq!(dp.to_px(), px);
    }
}
