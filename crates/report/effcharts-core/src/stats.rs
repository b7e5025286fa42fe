//! Per-bucket statistics and baseline comparison.

use serde::{Deserialize, Serialize};

/// Median of a sample list.
///
/// Sorts a copy ascending; even-length lists average the two central values.
/// Returns `None` for an empty list.
pub fn median(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    Some(median)
}

/// Which direction of change counts as an improvement for a metric set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Times, sizes, energy: lower values win.
    #[default]
    SmallerIsBetter,
    /// Scores: higher values win.
    BiggerIsBetter,
}

impl Polarity {
    /// Human phrase embedded in diff labels.
    pub fn explain(self) -> &'static str {
        match self {
            Self::SmallerIsBetter => "smaller is better",
            Self::BiggerIsBetter => "bigger is better",
        }
    }
}

/// Classification of a competitor against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffKind {
    /// The competitor moved in the improving direction.
    Good,
    /// The competitor did not improve on the baseline.
    Bad,
}

impl DiffKind {
    /// Label word for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Bad => "Bad",
        }
    }
}

/// A competitor's deviation from the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diff {
    /// Good or bad, after applying the set's polarity.
    pub kind: DiffKind,
    /// Polarity the classification was made under.
    pub polarity: Polarity,
    /// `competitor - baseline`, unnormalized.
    pub raw: f64,
    /// Non-negative display magnitude of `raw`.
    pub magnitude: f64,
    /// `raw * 100 / competitor`, multiplied by the normalization sign.
    pub percent: f64,
}

/// Compare one competitor median against the baseline median.
///
/// A negative `raw` is normalized to a positive magnitude with sign `-1`; the
/// same sign is applied to the percentage. The percentage is `0` when the
/// competitor median is zero.
pub fn diff(baseline: f64, competitor: f64, polarity: Polarity) -> Diff {
    let raw = competitor - baseline;
    let decreased = raw < 0.0;
    let sign = if decreased { -1.0 } else { 1.0 };

    let kind = match (polarity, decreased) {
        (Polarity::SmallerIsBetter, true) | (Polarity::BiggerIsBetter, false) => DiffKind::Good,
        (Polarity::SmallerIsBetter, false) | (Polarity::BiggerIsBetter, true) => DiffKind::Bad,
    };

    let percent = if competitor.abs() < f64::EPSILON {
        0.0
    } else {
        raw * 100.0 / competitor * sign
    };

    Diff {
        kind,
        polarity,
        raw,
        magnitude: raw * sign,
        percent,
    }
}
