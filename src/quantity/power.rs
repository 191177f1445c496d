use crate::quantity::{energy::WattHours, time::Hours};

quantity!(Watts, "W", 0);

implement_mul!(Watts, Hours, WattHours);

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_energy_over_time() {
        assert_abs_diff_eq!((Watts(702.0) * Hours(8.0)).0, 5616.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Watts(1349.6).to_string(), "1350 W");
    }
}
