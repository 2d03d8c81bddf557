//! Forecast accuracy metrics
//!
//! Standard metrics for evaluating forecasts against held-out values.
//! Degenerate input (length mismatch, empty slices) yields NaN rather
//! than an error.

/// Mean Absolute Error (MAE)
///
/// Average of absolute differences between predictions and actual values.
/// Lower is better. Same scale as the data.
///
/// # Example
///
/// ```rust
/// use algorithm::utils::metrics::mae;
///
/// let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let predicted = vec![1.1, 2.2, 2.9, 4.1, 5.0];
/// let error = mae(&actual, &predicted);
/// assert!(error >= 0.0);
/// ```
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    sum / actual.len() as f64
}

/// Mean Squared Error (MSE)
///
/// Average of squared differences. Penalizes large errors more heavily.
/// Lower is better.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    sum / actual.len() as f64
}

/// Root Mean Squared Error (RMSE)
///
/// Square root of MSE. Same scale as the data.
/// Lower is better.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Mean Absolute Percentage Error (MAPE), as a percentage.
///
/// Positions with a zero actual value are excluded from both the
/// numerator and the denominator of the mean; if every actual value is
/// zero the result is NaN.
///
/// # Example
///
/// ```rust
/// use algorithm::utils::metrics::mape;
///
/// // The zero position is skipped: mean(0.2, 0.1) * 100 = 15.
/// let error = mape(&[10.0, 0.0, 20.0], &[12.0, 5.0, 18.0]);
/// assert!((error - 15.0).abs() < 1e-10);
/// ```
pub fn mape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    for (a, p) in actual.iter().zip(predicted.iter()) {
        if *a != 0.0 {
            sum += ((a - p) / a).abs();
            count += 1;
        }
    }

    if count == 0 {
        return f64::NAN;
    }
    100.0 * sum / count as f64
}
