use crate::engine::Measurement;

/// Coarse fullness band of a fill rate, for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillBand {
    /// Fill rate below 0.25.
    Low,
    /// Fill rate from 0.25 up to 0.6.
    Medium,
    /// Fill rate of 0.6 and above.
    High,
}

impl FillBand {
    const LOW_BELOW: f64 = 0.25;
    const MEDIUM_BELOW: f64 = 0.6;

    /// Band of a fill rate.
    pub fn from_fill_rate(fill_rate: f64) -> Self {
        if fill_rate < Self::LOW_BELOW {
            FillBand::Low
        } else if fill_rate < Self::MEDIUM_BELOW {
            FillBand::Medium
        } else {
            FillBand::High
        }
    }
}

/// A measurement expressed in articles for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillReport {
    /// Integrated volume.
    pub volume: f64,
    /// Fill rate, not clamped.
    pub fill_rate: f64,
    /// Fullness band of the fill rate.
    pub band: FillBand,
    /// Estimated number of articles, `round(fill_rate * max_articles)`.
    pub filled_articles: i64,
    /// Number of articles a full container holds.
    pub max_articles: u32,
}

impl FillReport {
    /// Creates a report from a measurement and the article count of a full container.
    pub fn new(measurement: Measurement, max_articles: u32) -> Self {
        Self {
            volume: measurement.volume,
            fill_rate: measurement.fill_rate,
            band: FillBand::from_fill_rate(measurement.fill_rate),
            filled_articles: (measurement.fill_rate * max_articles as f64).round() as i64,
            max_articles,
        }
    }
}

impl std::fmt::Display for FillReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.filled_articles, self.max_articles)
    }
}
