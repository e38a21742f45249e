//! Resource pools (PV, PE, EA, SAN).
//!
//! A pool is a current value clamped to `[0, max]`. When the maximum changes
//! because the build changed, [`ResourcePool::rescale`] keeps the pool's fill
//! ratio instead of resetting it.

use serde::{Deserialize, Serialize};

/// Fill a pool of `new_max` to the same ratio `current / old_max` had.
///
/// Rounds down and clamps to `[0, new_max]`. A pool whose old maximum was
/// zero or negative comes back full.
pub fn preserve_fill(current: i32, old_max: i32, new_max: i32) -> i32 {
    let cap = new_max.max(0);
    if old_max <= 0 {
        return cap;
    }
    let scaled = i64::from(current) * i64::from(cap) / i64::from(old_max);
    scaled.clamp(0, i64::from(cap)) as i32
}

/// A clamped resource with a current and maximum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    /// Current value.
    pub current: i32,
    /// Maximum value.
    pub max: i32,
}

impl ResourcePool {
    /// A full pool.
    pub fn full(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// A pool at `current`, clamped to `[0, max]`.
    pub fn with_current(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Adjust by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(0, self.max);
        self.current
    }

    /// Returns true if the pool is at zero.
    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// Returns true if the pool is at its maximum.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Fraction filled, 0.0 to 1.0.
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 1.0;
        }
        f64::from(self.current) / f64::from(self.max)
    }

    /// The same fill ratio against a new maximum.
    pub fn rescale(&self, new_max: i32) -> Self {
        Self {
            current: preserve_fill(self.current, self.max, new_max),
            max: new_max.max(0),
        }
    }
}

impl std::fmt::Display for ResourcePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_starts_at_max() {
        let p = ResourcePool::full(21);
        assert_eq!(p.current, 21);
        assert!(p.is_full());
        assert!(!p.is_empty());
    }

    #[test]
    fn adjust_clamps() {
        let mut p = ResourcePool::full(10);
        assert_eq!(p.adjust(-3), 7);
        assert_eq!(p.adjust(50), 10);
        assert_eq!(p.adjust(-50), 0);
        assert!(p.is_empty());
    }

    #[test]
    fn with_current_clamps() {
        assert_eq!(ResourcePool::with_current(30, 10).current, 10);
        assert_eq!(ResourcePool::with_current(-4, 10).current, 0);
    }

    #[test]
    fn half_full_stays_half_full() {
        let p = ResourcePool::with_current(10, 20);
        let q = p.rescale(30);
        assert_eq!(q, ResourcePool::with_current(15, 30));
        assert!((q.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rescale_rounds_down() {
        assert_eq!(preserve_fill(7, 21, 26), 8);
        assert_eq!(preserve_fill(1, 3, 2), 0);
    }

    #[test]
    fn zero_old_max_comes_back_full() {
        assert_eq!(preserve_fill(0, 0, 12), 12);
        assert_eq!(ResourcePool::full(0).rescale(5), ResourcePool::full(5));
    }

    #[test]
    fn negative_new_max_is_zero() {
        assert_eq!(preserve_fill(5, 10, -3), 0);
    }

    #[test]
    fn display() {
        assert_eq!(ResourcePool::with_current(3, 8).to_string(), "3/8");
    }
}
