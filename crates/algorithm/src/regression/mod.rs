//! Regression-based forecasting models

mod arima;

pub use arima::Arima;
