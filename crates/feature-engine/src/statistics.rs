//! Statistical Features Computation

use serde::{Deserialize, Serialize};

/// Means at or below this magnitude count as zero for the coefficient of variation
pub const ZERO_MEAN_EPSILON: f64 = 1e-12;

/// Coefficient of variation when the mean is zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroMeanPolicy {
    /// Emit NaN
    #[default]
    Nan,
    /// Emit 0.0
    Zero,
}

/// Summary statistic applied to a signal array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    Mean,
    Median,
    Min,
    Max,
    StdDev,
    Variance,
    CoefVar,
    Iqr,
}

impl Statistic {
    /// All statistics in feature vector order
    pub const ALL: [Statistic; 8] = [
        Statistic::Mean,
        Statistic::Median,
        Statistic::Min,
        Statistic::Max,
        Statistic::StdDev,
        Statistic::Variance,
        Statistic::CoefVar,
        Statistic::Iqr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::StdDev => "std_dev",
            Statistic::Variance => "variance",
            Statistic::CoefVar => "coef_var",
            Statistic::Iqr => "iqr",
        }
    }
}

/// Statistical features for a signal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticalFeatures {
    /// Mean value
    pub mean: f64,
    /// Median (average of the two middle values for even lengths)
    pub median: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Population variance
    pub variance: f64,
    /// Standard deviation over mean
    pub coef_var: f64,
    /// Interquartile range (Q3 - Q1)
    pub iqr: f64,
}

impl StatisticalFeatures {
    /// Compute statistical features from a slice of values
    ///
    /// Returns `None` for an empty slice, where no statistic is defined.
    pub fn compute(values: &[f64], policy: ZeroMeanPolicy) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = mean(values)?;
        let variance = variance(values)?;
        let std_dev = variance.sqrt();

        Some(Self {
            mean,
            median: percentile_sorted(&sorted, 0.5),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            std_dev,
            variance,
            coef_var: coefficient_of_variation(mean, std_dev, policy),
            iqr: percentile_sorted(&sorted, 0.75) - percentile_sorted(&sorted, 0.25),
        })
    }

    /// Value of one statistic
    pub fn get(&self, stat: Statistic) -> f64 {
        match stat {
            Statistic::Mean => self.mean,
            Statistic::Median => self.median,
            Statistic::Min => self.min,
            Statistic::Max => self.max,
            Statistic::StdDev => self.std_dev,
            Statistic::Variance => self.variance,
            Statistic::CoefVar => self.coef_var,
            Statistic::Iqr => self.iqr,
        }
    }
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance
pub fn variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let m2: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some(m2 / values.len() as f64)
}

/// Population standard deviation
pub fn standard_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 0.5)
}

pub fn min_val(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max_val(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Coefficient of variation with an explicit zero-mean policy
pub fn coef_var(values: &[f64], policy: ZeroMeanPolicy) -> Option<f64> {
    let mean = mean(values)?;
    let std_dev = standard_dev(values)?;
    Some(coefficient_of_variation(mean, std_dev, policy))
}

pub fn iqr(values: &[f64]) -> Option<f64> {
    Some(percentile(values, 0.75)? - percentile(values, 0.25)?)
}

/// Percentile `q` in `[0, 1]` with linear interpolation between closest ranks
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(percentile_sorted(&sorted, q))
}

fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

fn coefficient_of_variation(mean: f64, std_dev: f64, policy: ZeroMeanPolicy) -> f64 {
    if mean.abs() <= ZERO_MEAN_EPSILON {
        return match policy {
            ZeroMeanPolicy::Nan => f64::NAN,
            ZeroMeanPolicy::Zero => 0.0,
        };
    }
    std_dev / mean
}
