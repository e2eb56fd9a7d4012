//! Pure value mapping for gauge rendering.
//!
//! A sensor value is mapped to a clamped percentage of its domain, the
//! percentage to a rotation on a 240° arc (-120°..=+120°), and the raw value
//! to a categorical colour bucket. Nothing here holds state.

use crate::error::ControlError;

/// Half of the gauge sweep in degrees.
pub const GAUGE_HALF_SWEEP_DEG: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Temperature,
    Humidity,
}

impl SensorKind {
    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::Humidity => "%",
        }
    }
}

/// Display category for a reading. The presentation layer owns the actual colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorBucket {
    Cold,
    Normal,
    Warm,
    Hot,
    Dry,
    Humid,
}

impl ColorBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorBucket::Cold => "cold",
            ColorBucket::Normal => "normal",
            ColorBucket::Warm => "warm",
            ColorBucket::Hot => "hot",
            ColorBucket::Dry => "dry",
            ColorBucket::Humid => "humid",
        }
    }
}

/// Percentage of `[min, max]` covered by `value`, clamped to `[0, 100]`.
///
/// Requires `min < max`; anything else (including NaN bounds) is rejected with
/// `InvalidRange`. A NaN `value` maps to 0.
pub fn percentage(value: f32, min: f32, max: f32) -> Result<f32, ControlError> {
    // false for NaN bounds as well
    let ordered = min < max;
    if !ordered || !(max - min).is_finite() {
        return Err(ControlError::InvalidRange { min, max });
    }
    if value.is_nan() {
        return Ok(0.0);
    }
    let clamped = value.clamp(min, max);
    // ratio first: value == max gives exactly 100
    let pct = (clamped - min) / (max - min) * 100.0;
    Ok(pct.clamp(0.0, 100.0))
}

/// Gauge needle angle in degrees for a percentage (`-120 + p * 2.4`);
/// out-of-range input is clamped. Exact at 0, 50 and 100.
#[inline]
pub fn angle(percentage: f32) -> f32 {
    let p = if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    };
    GAUGE_HALF_SWEEP_DEG * (p / 50.0 - 1.0)
}

/// Step function from a raw reading to its display bucket.
pub fn color_bucket(value: f32, kind: SensorKind) -> ColorBucket {
    match kind {
        SensorKind::Temperature => {
            if value < 20.0 {
                ColorBucket::Cold
            } else if value < 30.0 {
                ColorBucket::Normal
            } else if value < 40.0 {
                ColorBucket::Warm
            } else {
                ColorBucket::Hot
            }
        }
        SensorKind::Humidity => {
            if value < 30.0 {
                ColorBucket::Dry
            } else if value < 60.0 {
                ColorBucket::Normal
            } else {
                ColorBucket::Humid
            }
        }
    }
}

/// A validated `[min, max]` domain for one sensor kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeRange {
    min: f32,
    max: f32,
}

impl GaugeRange {
    pub fn new(min: f32, max: f32) -> Result<Self, ControlError> {
        // Reuse the percentage guard so both reject the same inputs.
        percentage(min, min, max)?;
        Ok(Self { min, max })
    }

    pub const TEMPERATURE_DEFAULT: GaugeRange = GaugeRange {
        min: 0.0,
        max: 50.0,
    };
    pub const HUMIDITY_DEFAULT: GaugeRange = GaugeRange {
        min: 0.0,
        max: 100.0,
    };

    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        (self.min..=self.max).contains(&v)
    }

    /// Clamped percentage; cannot fail since the range was validated.
    pub fn percentage(&self, value: f32) -> f32 {
        percentage(value, self.min, self.max).unwrap_or(0.0)
    }

    pub fn angle(&self, value: f32) -> f32 {
        angle(self.percentage(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_linear_inside_range() {
        assert_eq!(percentage(25.0, 0.0, 50.0).unwrap(), 50.0);
        assert_eq!(percentage(65.0, 0.0, 100.0).unwrap(), 65.0);
        assert_eq!(percentage(15.0, 10.0, 20.0).unwrap(), 50.0);
    }

    #[test]
    fn percentage_clamps_outside_range() {
        assert_eq!(percentage(-10.0, 0.0, 50.0).unwrap(), 0.0);
        assert_eq!(percentage(80.0, 0.0, 50.0).unwrap(), 100.0);
        assert_eq!(percentage(f32::INFINITY, 0.0, 50.0).unwrap(), 100.0);
        assert_eq!(percentage(f32::NAN, 0.0, 50.0).unwrap(), 0.0);
    }

    #[test]
    fn degenerate_ranges_are_rejected() {
        assert_eq!(
            percentage(1.0, 5.0, 5.0),
            Err(ControlError::InvalidRange { min: 5.0, max: 5.0 })
        );
        assert!(percentage(1.0, 10.0, 0.0).is_err());
        assert!(percentage(1.0, f32::NAN, 1.0).is_err());
        assert!(percentage(1.0, f32::MIN, f32::MAX).is_err());
        assert!(GaugeRange::new(3.0, 3.0).is_err());
    }

    #[test]
    fn angle_spans_240_degrees() {
        assert_eq!(angle(0.0), -120.0);
        assert_eq!(angle(50.0), 0.0);
        assert_eq!(angle(100.0), 120.0);
        assert_eq!(angle(150.0), 120.0);
        assert_eq!(angle(-5.0), -120.0);
    }

    #[test]
    fn temperature_buckets_are_half_open() {
        assert_eq!(color_bucket(19.9, SensorKind::Temperature), ColorBucket::Cold);
        assert_eq!(color_bucket(20.0, SensorKind::Temperature), ColorBucket::Normal);
        assert_eq!(color_bucket(29.9, SensorKind::Temperature), ColorBucket::Normal);
        assert_eq!(color_bucket(30.0, SensorKind::Temperature), ColorBucket::Warm);
        assert_eq!(color_bucket(40.0, SensorKind::Temperature), ColorBucket::Hot);
    }

    #[test]
    fn humidity_buckets_are_half_open() {
        assert_eq!(color_bucket(29.0, SensorKind::Humidity), ColorBucket::Dry);
        assert_eq!(color_bucket(30.0, SensorKind::Humidity), ColorBucket::Normal);
        assert_eq!(color_bucket(59.9, SensorKind::Humidity), ColorBucket::Normal);
        assert_eq!(color_bucket(60.0, SensorKind::Humidity), ColorBucket::Humid);
    }

    #[test]
    fn gauge_range_helpers() {
        let r = GaugeRange::TEMPERATURE_DEFAULT;
        assert!(r.contains(0.0) && r.contains(50.0) && !r.contains(50.1));
        assert_eq!(r.angle(0.0), -120.0);
        assert_eq!(r.angle(50.0), 120.0);
    }
}
