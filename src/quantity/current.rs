use std::ops::Div;

use crate::quantity::{energy::AmpHours, time::Hours};

quantity!(
    /// Average current drawn by a tool, in other words, its consumption in amp-hours per hour.
    Amperes,
    "A",
    2
);

impl Div<Amperes> for AmpHours {
    type Output = Hours;

    fn div(self, rhs: Amperes) -> Self::Output {
        Hours(self.0 / rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_charge_over_current() {
        assert_abs_diff_eq!((AmpHours(15.0) / Amperes(3.0)).0, 5.0);
    }

    #[test]
    fn test_current_over_time() {
        assert_abs_diff_eq!((Amperes(2.5) * Hours(4.0)).0, 10.0);
    }
}
