//! Size and Fraction: primitives for proportional layout.

use std::fmt;

/// A width and height in character cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Zero-sized box.
    pub const ZERO: Self = Self::new(0, 0);

    /// Get the area (number of cells).
    #[inline]
    pub const fn area(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }

    /// Check if the box has no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Remove frame overhead, clamping at zero.
    #[inline]
    #[must_use]
    pub const fn shrink(&self, frame: (u16, u16)) -> Self {
        Self::new(
            self.width.saturating_sub(frame.0),
            self.height.saturating_sub(frame.1),
        )
    }

    /// Scale each dimension by a fraction.
    #[inline]
    #[must_use]
    pub const fn scale(&self, width: Fraction, height: Fraction) -> Self {
        Self::new(width.of(self.width), height.of(self.height))
    }

    /// Check whether this box fits inside `other`.
    #[inline]
    pub const fn fits_within(&self, other: &Self) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({}x{})", self.width, self.height)
    }
}

/// A proportion of a parent dimension, in `[0, 1]`.
///
/// Stored in fixed point (parts per million). Scaling multiplies the
/// dimension first and divides by the scale last, so 40% of 100 is 40 and
/// repeated scaling of the same input always yields the same cell count.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fraction(u32);

impl Fraction {
    const SCALE: u32 = 1_000_000;

    /// Nothing.
    pub const ZERO: Self = Self(0);

    /// All of the parent.
    pub const FULL: Self = Self(Self::SCALE);

    /// Half of the parent.
    pub const HALF: Self = Self(Self::SCALE / 2);

    /// Build a fraction from a real value.
    ///
    /// Values are clamped into `[0, 1]`: negatives and NaN become 0,
    /// anything above 1 (including infinity) becomes 1.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        let clamped = value.clamp(0.0, 1.0);
        Self((clamped * f64::from(Self::SCALE)).round() as u32)
    }

    /// Build a fraction from a percentage. Values above 100 clamp to 100%.
    pub const fn percent(percent: u16) -> Self {
        let percent = if percent > 100 { 100 } else { percent as u32 };
        Self(percent * (Self::SCALE / 100))
    }

    /// The fraction as a real value.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::SCALE)
    }

    /// Apply the fraction to a dimension, rounding down.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn of(self, dimension: u16) -> u16 {
        // Cannot exceed `dimension` because the fraction is at most 1.
        ((dimension as u64 * self.0 as u64) / Self::SCALE as u64) as u16
    }
}

impl From<f64> for Fraction {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fraction({self})")
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_f64() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_does_not_collapse() {
        // Truncating 40/100 before multiplying would give 0 here.
        assert_eq!(Fraction::percent(40).of(100), 40);
        assert_eq!(Fraction::percent(60).of(50), 30);
        assert_eq!(Fraction::percent(29).of(100), 29);
        assert_eq!(Fraction::percent(33).of(10), 3);
    }

    #[test]
    fn test_full_and_zero() {
        assert_eq!(Fraction::FULL.of(u16::MAX), u16::MAX);
        assert_eq!(Fraction::ZERO.of(500), 0);
        assert_eq!(Fraction::HALF.of(101), 50);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Fraction::new(-0.5), Fraction::ZERO);
        assert_eq!(Fraction::new(f64::NAN), Fraction::ZERO);
        assert_eq!(Fraction::new(1.5), Fraction::FULL);
        assert_eq!(Fraction::new(f64::INFINITY), Fraction::FULL);
        assert_eq!(Fraction::new(f64::NEG_INFINITY), Fraction::ZERO);
        assert_eq!(Fraction::percent(250), Fraction::FULL);
        assert_eq!(Fraction::new(0.25), Fraction::percent(25));
    }

    #[test]
    fn test_size_shrink_clamps() {
        let size = Size::new(10, 1);
        assert_eq!(size.shrink((2, 2)), Size::new(8, 0));
        assert_eq!(size.shrink((20, 0)), Size::new(0, 1));
        assert!(Size::new(0, 5).is_empty());
        assert_eq!(Size::new(4, 5).area(), 20);
    }

    #[test]
    fn test_size_scale() {
        let size = Size::new(100, 50);
        assert_eq!(
            size.scale(Fraction::HALF, Fraction::FULL),
            Size::new(50, 50)
        );
        assert!(Size::new(50, 50).fits_within(&size));
        assert!(!Size::new(101, 1).fits_within(&size));
    }
}
