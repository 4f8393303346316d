//! Reduction operations over a metric of a record slice.

use crate::record::{Metric, StudentRecord};

/// Built-in reduction operations over a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all records (blank values included).
    Count,
    /// Sum of values, blanks read as zero.
    Sum,
    /// Arithmetic mean, blanks read as zero and counted in the denominator.
    Mean,
    /// Minimum value.
    Min,
    /// Maximum value.
    Max,
}

/// Reduce a metric using a built-in [`ReduceOp`].
///
/// Every value goes through [`StudentRecord::value`], so missing data reads as zero. On an empty
/// slice every operation returns `0.0`.
pub fn reduce(records: &[&StudentRecord], metric: Metric, op: ReduceOp) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let values = records.iter().map(|r| r.value(metric));
    match op {
        ReduceOp::Count => records.len() as f64,
        ReduceOp::Sum => values.sum(),
        ReduceOp::Mean => values.sum::<f64>() / records.len() as f64,
        ReduceOp::Min => values.fold(f64::INFINITY, f64::min),
        ReduceOp::Max => values.fold(f64::NEG_INFINITY, f64::max),
    }
}

/// One-decimal rounding, half-up: `floor(10*x + 0.5) / 10`.
pub fn round_to_one_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

/// Unnormalised co-moment sum of two metrics: `sum((x_i - mean(x)) * (y_i - mean(y)))`.
///
/// This is not a correlation coefficient; it is neither divided by the count nor by the
/// variances, and it is not bounded to `[-1, 1]`.
pub fn co_moment_sum(records: &[&StudentRecord], x: Metric, y: Metric) -> f64 {
    let mean_x = reduce(records, x, ReduceOp::Mean);
    let mean_y = reduce(records, y, ReduceOp::Mean);
    records
        .iter()
        .map(|r| (r.value(x) - mean_x) * (r.value(y) - mean_y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{full, student};
    use crate::types::CellValue;

    #[test]
    fn reduce_ops_on_scores() {
        let a = student("1", "A", "X", 10.0);
        let b = student("2", "B", "X", 5.5);
        let c = student("3", "C", "X", 20.0);
        let records = vec![&a, &b, &c];

        assert_eq!(reduce(&records, Metric::AssessmentScore, ReduceOp::Count), 3.0);
        assert_eq!(reduce(&records, Metric::AssessmentScore, ReduceOp::Sum), 35.5);
        assert_eq!(reduce(&records, Metric::AssessmentScore, ReduceOp::Min), 5.5);
        assert_eq!(reduce(&records, Metric::AssessmentScore, ReduceOp::Max), 20.0);
        assert!((reduce(&records, Metric::AssessmentScore, ReduceOp::Mean) - 35.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn blank_values_count_as_zero_in_the_denominator() {
        let a = student("1", "A", "X", 80.0);
        let mut b = student("2", "B", "X", 60.0);
        b.attention = CellValue::Empty;
        let records = vec![&a, &b];

        // (75 + 0) / 2
        assert_eq!(reduce(&records, Metric::Attention, ReduceOp::Mean), 37.5);
        assert_eq!(reduce(&records, Metric::Attention, ReduceOp::Min), 0.0);
    }

    #[test]
    fn empty_slice_reduces_to_zero() {
        for op in [ReduceOp::Count, ReduceOp::Sum, ReduceOp::Mean, ReduceOp::Min, ReduceOp::Max] {
            assert_eq!(reduce(&[], Metric::Focus, op), 0.0);
        }
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_to_one_decimal(0.0), 0.0);
        assert_eq!(round_to_one_decimal(3.54), 3.5);
        assert_eq!(round_to_one_decimal(3.55), 3.6);
        assert_eq!(round_to_one_decimal(35.6818), 35.7);
        assert_eq!(round_to_one_decimal(-1.25), -1.2);
    }

    #[test]
    fn co_moment_sum_is_unnormalised() {
        let a = full("1", "A", "X", [0.0, 85.0, 0.0, 0.0, 95.0, 0.0]);
        let b = full("2", "B", "X", [0.0, 40.0, 0.0, 0.0, 55.0, 0.0]);
        let records = vec![&a, &b];
        // means 62.5 / 75: (22.5 * 20) + (-22.5 * -20)
        assert_eq!(co_moment_sum(&records, Metric::Attention, Metric::AssessmentScore), 900.0);
    }
}
