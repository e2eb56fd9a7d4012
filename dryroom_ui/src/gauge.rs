use dryroom_core::{ColorBucket, GaugeRange, RoomSnapshot, SensorKind, color_bucket};

/// Everything a gauge widget needs to draw one reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeView {
    pub kind: SensorKind,
    pub value: f32,
    pub percentage: f32,
    /// Needle rotation in degrees, -120..=120.
    pub angle: f32,
    pub bucket: ColorBucket,
}

impl GaugeView {
    pub fn new(kind: SensorKind, value: f32, range: &GaugeRange) -> Self {
        let percentage = range.percentage(value);
        Self {
            kind,
            value,
            percentage,
            angle: dryroom_core::angle(percentage),
            bucket: color_bucket(value, kind),
        }
    }

    pub fn temperature(snap: &RoomSnapshot) -> Self {
        Self::new(SensorKind::Temperature, snap.temperature, &snap.temperature_range)
    }

    pub fn humidity(snap: &RoomSnapshot) -> Self {
        Self::new(SensorKind::Humidity, snap.humidity, &snap.humidity_range)
    }

    #[inline]
    pub fn unit(&self) -> &'static str {
        self.kind.unit()
    }

    /// Filled share of the 240° arc.
    #[inline]
    pub fn arc_fraction(&self) -> f32 {
        self.percentage / 100.0
    }

    /// Compact text form, e.g. `25.5°C [####------] normal`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.arc_fraction() * width as f32).round() as usize).min(width);
        format!(
            "{:.1}{} [{}{}] {}",
            self.value,
            self.unit(),
            "#".repeat(filled),
            "-".repeat(width - filled),
            self.bucket.as_str()
        )
    }
}
