/// Rounding shared by all reconstructors.
///
/// Counts are always rounded to the nearest integer with ties going to the
/// even neighbour, e.g. `0.5 → 0`, `1.5 → 2`, `2.5 → 2`.
pub trait FloatExt: Sized {
    /// Round to the nearest integer, ties to even.
    fn round_count(self) -> i64;
}

impl FloatExt for f64 {
    fn round_count(self) -> i64 {
        if !self.is_finite() {
            return 0;
        }

        self.round_ties_even() as i64
    }
}

/// Convert a signed intermediate count into a count, clamping negatives.
pub fn clamp_count(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_to_even() {
        assert_eq!(0.5_f64.round_count(), 0);
        assert_eq!(1.5_f64.round_count(), 2);
        assert_eq!(2.5_f64.round_count(), 2);
        assert_eq!(3.5_f64.round_count(), 4);
        assert_eq!((-0.5_f64).round_count(), 0);
        assert_eq!((-1.5_f64).round_count(), -2);
    }

    #[test]
    fn non_ties() {
        assert_eq!(2.49_f64.round_count(), 2);
        assert_eq!(2.51_f64.round_count(), 3);
        assert_eq!((-2.51_f64).round_count(), -3);
    }

    #[test]
    fn non_finite() {
        assert_eq!(f64::NAN.round_count(), 0);
        assert_eq!(f64::INFINITY.round_count(), 0);
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_count(-3), 0);
        assert_eq!(clamp_count(7), 7);
        assert_eq!(clamp_count(i64::MAX), u32::MAX);
    }
}
