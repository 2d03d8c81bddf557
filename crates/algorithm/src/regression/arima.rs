//! ARIMA (Autoregressive Integrated Moving Average) model
//!
//! ARIMA(p, d, q) combines an AR(p) autoregressive component, order-d
//! differencing for stationarity, and an MA(q) moving-average component.
//! Parameters are estimated by minimizing the conditional sum of squares
//! with a bounded Nelder-Mead search, which keeps the fit deterministic
//! for identical input.

use crate::utils::optimization::{minimize, SimplexOptions};
use crate::{Predictor, Result, TsError};

/// ARIMA forecasting model.
#[derive(Debug, Clone)]
pub struct Arima {
    p: usize,
    d: usize,
    q: usize,
    ar: Vec<f64>,
    ma: Vec<f64>,
    intercept: f64,
    /// Training series on the original scale.
    original: Option<Vec<f64>>,
    /// Series after order-d differencing.
    differenced: Option<Vec<f64>>,
    /// One-step-ahead predictions on the original scale, aligned with the
    /// training series. The first d entries have no prediction (NaN).
    fitted: Option<Vec<f64>>,
    /// One-step-ahead errors on the differenced scale.
    residuals: Option<Vec<f64>>,
    sigma2: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl Arima {
    /// Create a new ARIMA(p, d, q) model.
    ///
    /// Orders are taken as given; an order the data cannot support surfaces
    /// as an error from [`Predictor::fit`].
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            p,
            d,
            q,
            ar: vec![],
            ma: vec![],
            intercept: 0.0,
            original: None,
            differenced: None,
            fitted: None,
            residuals: None,
            sigma2: None,
            aic: None,
            bic: None,
        }
    }

    /// The (p, d, q) order this model was built with.
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// Estimated AR coefficients.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// Estimated MA coefficients.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Intercept (mean of the differenced series).
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Akaike information criterion of the fit.
    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    /// Bayesian information criterion of the fit.
    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    /// One-step-ahead in-sample predictions on the original scale.
    ///
    /// Same length as the training series; the first d positions are NaN
    /// because differencing consumes them.
    pub fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    /// One-step-ahead errors on the differenced scale.
    pub fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    /// Variance of the one-step errors over the estimation window.
    pub fn residual_variance(&self) -> Option<f64> {
        self.sigma2
    }

    /// Conditional sum of squared one-step errors for a candidate
    /// parameter vector. This is the objective the optimizer minimizes.
    fn conditional_sse(
        diff: &[f64],
        p: usize,
        q: usize,
        ar: &[f64],
        ma: &[f64],
        intercept: f64,
    ) -> f64 {
        let n = diff.len();
        let start = p.max(q);
        if n <= start {
            return f64::MAX;
        }

        let mut errors = vec![0.0; n];
        let mut sse = 0.0;
        for t in start..n {
            let mut pred = intercept;
            for i in 0..p {
                pred += ar[i] * (diff[t - 1 - i] - intercept);
            }
            for i in 0..q {
                pred += ma[i] * errors[t - 1 - i];
            }
            let e = diff[t] - pred;
            errors[t] = e;
            sse += e * e;
        }
        sse
    }

    fn estimate(&mut self, diff: &[f64]) {
        let (p, q) = (self.p, self.q);
        let mean = diff.iter().sum::<f64>() / diff.len() as f64;

        if p == 0 && q == 0 {
            self.intercept = mean;
            self.ar = vec![];
            self.ma = vec![];
            return;
        }

        // Parameter vector layout: [intercept, ar..., ma...]
        let mut initial = vec![0.0; 1 + p + q];
        initial[0] = mean;
        for i in 0..p {
            initial[1 + i] = 0.1 / (i + 1) as f64;
        }
        for i in 0..q {
            initial[1 + p + i] = 0.1 / (i + 1) as f64;
        }

        // AR/MA coefficients bounded for stationarity and invertibility.
        let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
        bounds.extend(std::iter::repeat((-0.99, 0.99)).take(p + q));

        let options = SimplexOptions {
            max_iter: 1000,
            tolerance: 1e-8,
            ..Default::default()
        };
        let outcome = minimize(
            |params| {
                let ar = &params[1..1 + p];
                let ma = &params[1 + p..];
                Self::conditional_sse(diff, p, q, ar, ma, params[0])
            },
            &initial,
            Some(&bounds),
            options,
        );

        self.intercept = outcome.point[0];
        self.ar = outcome.point[1..1 + p].to_vec();
        self.ma = outcome.point[1 + p..].to_vec();
    }

    /// Run the one-step recursion over the whole differenced series and
    /// derive residuals, fitted values, and information criteria.
    fn compute_fitted(&mut self, data: &[f64], diff: &[f64]) {
        let m = diff.len();
        let (p, q) = (self.p, self.q);
        let mut errors = vec![0.0; m];

        // During warmup (t < max(p, q)) only the lags that exist contribute,
        // mirroring the forecast recursion.
        for t in 0..m {
            let mut pred = self.intercept;
            for i in 0..p {
                if t > i {
                    pred += self.ar[i] * (diff[t - 1 - i] - self.intercept);
                }
            }
            for i in 0..q {
                if t > i {
                    pred += self.ma[i] * errors[t - 1 - i];
                }
            }
            errors[t] = diff[t] - pred;
        }

        // Information criteria from the Gaussian likelihood over the
        // post-warmup window, the same window the CSS objective covers.
        let start = p.max(q).min(m);
        let tail = &errors[start..];
        if !tail.is_empty() {
            let n_eff = tail.len() as f64;
            let sigma2 = tail.iter().map(|e| e * e).sum::<f64>() / n_eff;
            let k = (p + q + 1) as f64;
            let ll = -0.5 * n_eff * (1.0 + sigma2.ln() + (2.0 * std::f64::consts::PI).ln());
            self.sigma2 = Some(sigma2);
            self.aic = Some(-2.0 * ll + 2.0 * k);
            self.bic = Some(-2.0 * ll + k * n_eff.ln());
        }

        // The one-step error is invariant under integration, so the
        // original-scale prediction at t is simply y[t] - e[t].
        let n = data.len();
        let mut fitted = vec![f64::NAN; n];
        for t in self.d..n {
            fitted[t] = data[t] - errors[t - self.d];
        }

        self.fitted = Some(fitted);
        self.residuals = Some(errors);
    }
}

impl Predictor for Arima {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        let required = self.d + self.p.max(self.q) + 2;
        if data.len() < required {
            return Err(TsError::InsufficientData {
                required,
                actual: data.len(),
            });
        }

        let diff = difference(data, self.d);
        self.estimate(&diff);
        self.compute_fitted(data, &diff);
        self.original = Some(data.to_vec());
        self.differenced = Some(diff);
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let original = self.original.as_ref().ok_or(TsError::NotFitted)?;
        let diff = self.differenced.as_ref().ok_or(TsError::NotFitted)?;
        let residuals = self.residuals.as_ref().ok_or(TsError::NotFitted)?;

        if steps == 0 {
            return Ok(vec![]);
        }

        // Recurse forward on the differenced scale; future shocks are zero.
        let mut extended = diff.clone();
        let mut errors = residuals.clone();
        for _ in 0..steps {
            let t = extended.len();
            let mut pred = self.intercept;
            for i in 0..self.p {
                if t > i {
                    pred += self.ar[i] * (extended[t - 1 - i] - self.intercept);
                }
            }
            for i in 0..self.q {
                if t > i {
                    pred += self.ma[i] * errors[t - 1 - i];
                }
            }
            extended.push(pred);
            errors.push(0.0);
        }

        let forecast_diff = &extended[diff.len()..];
        if self.d > 0 {
            Ok(integrate(forecast_diff, original, self.d))
        } else {
            Ok(forecast_diff.to_vec())
        }
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

/// Apply order-d differencing to a series.
fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Undo order-d differencing for a block of forecasted differences,
/// seeding each integration level from the tail of the training series.
fn integrate(forecast_diff: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || forecast_diff.is_empty() {
        return forecast_diff.to_vec();
    }

    let mut result = forecast_diff.to_vec();
    for level in (0..d).rev() {
        let seed = if level == 0 {
            original.last().copied().unwrap_or(0.0)
        } else {
            difference(original, level).last().copied().unwrap_or(0.0)
        };
        let mut acc = seed;
        for v in result.iter_mut() {
            acc += *v;
            *v = acc;
        }
    }
    result
}
