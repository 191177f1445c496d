use crate::quantity::{current::Amperes, time::Hours};

quantity!(WattHours, "Wh", 0);

quantity!(
    /// Battery charge.
    ///
    /// By catalog convention, one amp-hour is worth
    /// [`AmpHours::WATT_HOURS_PER_AMP_HOUR`] watt-hours.
    AmpHours,
    "Ah",
    1
);

implement_mul!(Amperes, Hours, AmpHours);

impl AmpHours {
    pub const WATT_HOURS_PER_AMP_HOUR: f64 = 20.0;

    pub fn to_watt_hours(self) -> WattHours {
        WattHours(self.0 * Self::WATT_HOURS_PER_AMP_HOUR)
    }
}
