//! Summary statistics over a computed score series.
//!
//! Advisory descriptors for a text summary -- day count, mean, extremes,
//! volatility and trend. None of this feeds back into scoring; it seeds
//! the local fallback report and any external narrative generator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::{DailyScore, DateRange};

/// Day-over-day stability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityBand {
    /// Mean absolute change below 8
    Low,
    /// Mean absolute change below 18
    Medium,
    /// Mean absolute change of 18 or more
    High,
}

impl VolatilityBand {
    /// Classify a mean absolute day-over-day change.
    pub fn classify(volatility: f64) -> Self {
        if volatility < 8.0 {
            VolatilityBand::Low
        } else if volatility < 18.0 {
            VolatilityBand::Medium
        } else {
            VolatilityBand::High
        }
    }
}

/// First-vs-last direction of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Last score more than 5 points above the first
    Rising,
    /// Last score more than 5 points below the first
    Falling,
    /// Within 5 points either way
    Flat,
}

impl Trend {
    /// Classify a first-to-last delta.
    pub fn classify(delta: i32) -> Self {
        if delta > 5 {
            Trend::Rising
        } else if delta < -5 {
            Trend::Falling
        } else {
            Trend::Flat
        }
    }
}

/// Descriptive statistics for a score series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStats {
    /// Number of scored days
    pub day_count: usize,
    /// Mean total score
    pub mean_score: f64,
    /// Highest total score
    pub max_score: i32,
    /// Day the highest score fell on (earliest wins on ties)
    pub max_day: NaiveDate,
    /// Lowest total score
    pub min_score: i32,
    /// Day the lowest score fell on (earliest wins on ties)
    pub min_day: NaiveDate,
    /// Last score minus first score
    pub first_last_delta: i32,
    /// Mean absolute day-over-day change
    pub volatility: f64,
    /// Days scoring 75 or above
    pub high_days: usize,
    /// Days scoring 45 or below
    pub low_days: usize,
}

impl ScoreStats {
    /// Compute statistics over a series. `None` for an empty series.
    pub fn from_series(series: &[DailyScore]) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;

        let day_count = series.len();
        let sum: i64 = series.iter().map(|s| i64::from(s.total_score)).sum();
        let mean_score = sum as f64 / day_count as f64;

        let mut max = first;
        let mut min = first;
        for score in series {
            if score.total_score > max.total_score {
                max = score;
            }
            if score.total_score < min.total_score {
                min = score;
            }
        }

        let volatility = if day_count < 2 {
            0.0
        } else {
            let change_sum: f64 = series
                .windows(2)
                .map(|pair| f64::from((pair[1].total_score - pair[0].total_score).abs()))
                .sum();
            change_sum / (day_count - 1) as f64
        };

        Some(Self {
            day_count,
            mean_score,
            max_score: max.total_score,
            max_day: max.date,
            min_score: min.total_score,
            min_day: min.date,
            first_last_delta: last.total_score - first.total_score,
            volatility,
            high_days: series.iter().filter(|s| s.total_score >= 75).count(),
            low_days: series.iter().filter(|s| s.total_score <= 45).count(),
        })
    }

    /// Volatility classification.
    pub fn volatility_band(&self) -> VolatilityBand {
        VolatilityBand::classify(self.volatility)
    }

    /// Trend classification.
    pub fn trend(&self) -> Trend {
        Trend::classify(self.first_last_delta)
    }

    /// Render the deterministic prose report for this series.
    pub fn render_report(&self, range: &DateRange) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Between {} and {}, {} days of planning scores were recorded.\n",
            range.start, range.end, self.day_count
        ));
        out.push_str(&format!(
            "The average score was about {} points, with a high of {} (around {}) and a low of {} (around {}).\n",
            self.mean_score.round() as i64,
            self.max_score,
            self.max_day,
            self.min_score,
            self.min_day,
        ));

        out.push_str(match self.volatility_band() {
            VolatilityBand::Low => {
                "Overall volatility was low, which suggests a steady execution rhythm, "
            }
            VolatilityBand::Medium => {
                "Overall volatility was moderate, which suggests execution was swayed by short-term factors, "
            }
            VolatilityBand::High => {
                "Overall volatility was high, which suggests execution swung between good and bad stretches, "
            }
        });
        out.push_str(match self.trend() {
            Trend::Rising => "and the overall trend was upward.",
            Trend::Falling => "and scores slipped noticeably from start to finish.",
            Trend::Flat => "and the overall trend was roughly flat.",
        });

        out.push_str(&format!(
            "\nThere were {} high-scoring days (75 or above) and {} low-scoring days (45 or below).",
            self.high_days, self.low_days
        ));
        out
    }
}

/// Local rule-based summary for a range, handling the empty series.
pub fn local_report(range: &DateRange, series: &[DailyScore]) -> String {
    match ScoreStats::from_series(series) {
        Some(stats) => stats.render_report(range),
        None => {
            "No score data is available for this period, so no assessment can be made."
                .to_string()
        }
    }
}
