//! Time series prediction algorithms
//!
//! This crate provides the model-fitting side of the forecast service:
//!
//! - [`regression`]: ARIMA
//! - [`utils`]: Metrics and the optimizer backing parameter estimation
//!
//! ## Example
//!
//! ```rust
//! use algorithm::prelude::*;
//!
//! let data: Vec<f64> = (1..=20).map(|x| x as f64).collect();
//! let mut model = Arima::new(1, 1, 0);
//! model.fit(&data).unwrap();
//! let forecast = model.predict(3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

mod error;
pub mod regression;
pub mod utils;

pub use error::{Result, TsError};

/// Common trait for all time series predictors
pub trait Predictor {
    /// Fit the model to historical data
    fn fit(&mut self, data: &[f64]) -> Result<()>;

    /// Predict future values
    fn predict(&self, steps: usize) -> Result<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::regression::Arima;
    pub use crate::utils::metrics::{mae, mape, mse, rmse};
    pub use crate::Predictor;
    pub use crate::{Result, TsError};
}
