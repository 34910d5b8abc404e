// File: crates/chart-core/src/scale.rs
// Summary: Linear (continuous) and point (categorical) scales mapping data to pixels.

/// Continuous data coordinate (value, year).
pub type Value = f64;

/// Linear map from a data interval to a pixel interval. The pixel interval may
/// be inverted (e.g. bottom-to-top for a Y axis).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: Value,
    pub d1: Value,
    pub r0: f32,
    pub r1: f32,
}

impl LinearScale {
    pub fn new(domain: (Value, Value), range: (f32, f32)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    pub fn domain(&self) -> (Value, Value) { (self.d0, self.d1) }

    /// A zero-width domain maps everything to the middle of the range.
    #[inline]
    pub fn to_px(&self, v: Value) -> f32 {
        let span = self.d1 - self.d0;
        let t = if span == 0.0 { 0.5 } else { (v - self.d0) / span };
        self.r0 + (t as f32) * (self.r1 - self.r0)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> Value {
        let span = self.r1 - self.r0;
        if span == 0.0 {
            return self.d0;
        }
        let t = ((px - self.r0) / span) as f64;
        self.d0 + t * (self.d1 - self.d0)
    }
}

/// Evenly spaced positions for an ordered category list, first and last
/// categories on the range ends. A single category sits in the middle.
#[derive(Clone, Debug, PartialEq)]
pub struct PointScale {
    categories: Vec<String>,
    r0: f32,
    r1: f32,
}

impl PointScale {
    pub fn new(categories: Vec<String>, range: (f32, f32)) -> Self {
        Self { categories, r0: range.0, r1: range.1 }
    }

    pub fn categories(&self) -> &[String] { &self.categories }

    pub fn step(&self) -> f32 {
        let n = self.categories.len();
        (self.r1 - self.r0) / n.saturating_sub(1).max(1) as f32
    }

    pub fn position_at(&self, index: usize) -> Option<f32> {
        let n = self.categories.len();
        if index >= n {
            return None;
        }
        if n == 1 {
            return Some((self.r0 + self.r1) * 0.5);
        }
        Some(self.r0 + self.step() * index as f32)
    }

    pub fn position(&self, category: &str) -> Option<f32> {
        let i = self.categories.iter().position(|c| c == category)?;
        self.position_at(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_round_trip_with_inverted_range() {
        let s = LinearScale::new((0.0, 20.0), (376.0, 32.0));
        assert_eq!(s.to_px(0.0), 376.0);
        assert_eq!(s.to_px(20.0), 32.0);
        assert!((s.from_px(s.to_px(5.0)) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn linear_degenerate_domain_maps_to_middle() {
        let s = LinearScale::new((4.0, 4.0), (0.0, 100.0));
        assert_eq!(s.to_px(4.0), 50.0);
        assert_eq!(s.to_px(99.0), 50.0);
    }

    #[test]
    fn point_scale_spreads_categories() {
        let s = PointScale::new(vec!["a".into(), "b".into(), "c".into()], (48.0, 296.0));
        assert_eq!(s.position("a"), Some(48.0));
        assert_eq!(s.position("b"), Some(172.0));
        assert_eq!(s.position("c"), Some(296.0));
        assert_eq!(s.position("z"), None);

        let one = PointScale::new(vec!["only".into()], (0.0, 10.0));
        assert_eq!(one.position_at(0), Some(5.0));
    }
}
