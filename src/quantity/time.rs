quantity!(Hours, "h", 1);

impl Hours {
    pub fn from_minutes(minutes: u32) -> Self {
        Self(f64::from(minutes) / 60.0)
    }
}
