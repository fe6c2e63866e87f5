use serde::{Deserialize, Serialize};

/// Widget size in logical (device-independent) units, as reported by the GUI
/// toolkit's resize events.
///
/// Toolkits emit zero or negative sizes while an element is not yet laid
/// out; `is_degenerate` identifies those events so they can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: i32,
    pub height: i32,
}

impl LogicalSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True for sizes emitted before layout has assigned real dimensions.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Convert to physical pixels at the given device scale factor.
    pub fn to_physical(&self, scale_factor: f64) -> PhysicalSize {
        PhysicalSize {
            width: (self.width as f64 * scale_factor).round() as i32,
            height: (self.height as f64 * scale_factor).round() as i32,
        }
    }
}

/// Buffer size in physical pixels, as carried by engine paint deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: i32,
    pub height: i32,
}

impl PhysicalSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether `other` is within `tolerance` pixels of `self` on both axes.
    pub fn within_tolerance(&self, other: PhysicalSize, tolerance: i32) -> bool {
        (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_sizes() {
        assert!(LogicalSize::new(0, 100).is_degenerate());
        assert!(LogicalSize::new(100, 0).is_degenerate());
        assert!(LogicalSize::new(-1, 100).is_degenerate());
        assert!(LogicalSize::new(100, -1).is_degenerate());
        assert!(!LogicalSize::new(1, 1).is_degenerate());
    }

    #[test]
    fn to_physical_at_unit_scale() {
        let size = LogicalSize::new(300, 200);
        assert_eq!(size.to_physical(1.0), PhysicalSize::new(300, 200));
    }

    #[test]
    fn to_physical_rounds_fractional_pixels() {
        // 310 * 1.25 = 387.5, 205 * 1.25 = 256.25
        let size = LogicalSize::new(310, 205);
        assert_eq!(size.to_physical(1.25), PhysicalSize::new(388, 256));
    }

    #[test]
    fn to_physical_at_two_x() {
        let size = LogicalSize::new(300, 200);
        assert_eq!(size.to_physical(2.0), PhysicalSize::new(600, 400));
    }

    #[test]
    fn within_tolerance_boundaries() {
        let expected = PhysicalSize::new(600, 400);
        assert!(expected.within_tolerance(PhysicalSize::new(600, 400), 2));
        assert!(expected.within_tolerance(PhysicalSize::new(602, 398), 2));
        assert!(!expected.within_tolerance(PhysicalSize::new(603, 400), 2));
        assert!(!expected.within_tolerance(PhysicalSize::new(600, 403), 2));
    }

    #[test]
    fn within_tolerance_requires_both_axes() {
        let expected = PhysicalSize::new(600, 400);
        // Width matches exactly but height is far off.
        assert!(!expected.within_tolerance(PhysicalSize::new(600, 300), 2));
    }
}
