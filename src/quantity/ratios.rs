quantity!(Percentage, "%", 1);

impl Percentage {
    /// Convert the percentage into `0.0..=1.0`.
    pub const fn to_ratio(self) -> f64 {
        self.0 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_to_ratio() {
        assert_abs_diff_eq!(Percentage(40.0).to_ratio(), 0.4);
    }
}
