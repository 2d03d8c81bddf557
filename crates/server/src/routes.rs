//! API route handlers

use algorithm::{regression::Arima, utils::metrics, Predictor, TsError};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::series;
use crate::AppState;

/// Query parameters of the forecast endpoint. All optional; the defaults
/// match the original deployment (ARIMA(2,1,2), 7-step horizon).
#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    #[serde(default = "default_p")]
    pub p: usize,
    #[serde(default = "default_d")]
    pub d: usize,
    #[serde(default = "default_q")]
    pub q: usize,
    #[serde(default = "default_steps")]
    pub steps: usize,
}

fn default_p() -> usize {
    2
}
fn default_d() -> usize {
    1
}
fn default_q() -> usize {
    2
}
fn default_steps() -> usize {
    7
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub forecast: Vec<f64>,
    pub rmse: Option<f64>,
    pub mae: Option<f64>,
    pub mape: Option<f64>,
    pub aic: Option<f64>,
    pub bic: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures a forecast request can run into.
#[derive(Debug)]
pub enum ApiError {
    /// The body could not be turned into an observation series.
    BadInput(String),
    /// The model could not be fitted or could not forecast.
    Model(TsError),
}

impl From<TsError> for ApiError {
    fn from(err: TsError) -> Self {
        ApiError::Model(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadInput(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Model(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// `POST /predict?p=&d=&q=&steps=`
///
/// Fits an ARIMA(p, d, q) model to the observation column of the JSON
/// body and returns a `steps`-long forecast. When the series is longer
/// than `steps`, the last `steps` observations are held out and scored
/// against the fitted model's in-sample predictions over that window;
/// otherwise the accuracy metrics are null.
pub async fn predict(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
    Json(body): Json<Value>,
) -> Result<Json<PredictResponse>, ApiError> {
    let values = series::extract(&body, &state.series_field).map_err(ApiError::BadInput)?;

    let mut model = Arima::new(params.p, params.d, params.q);
    model.fit(&values)?;
    let forecast = model.predict(params.steps)?;

    let (rmse, mae, mape) = if values.len() > params.steps {
        let split = values.len() - params.steps;
        let actual = &values[split..];
        let fitted = model.fitted_values().ok_or(TsError::NotFitted)?;
        let predicted = &fitted[split..];
        (
            Some(metrics::rmse(actual, predicted)),
            Some(metrics::mae(actual, predicted)),
            Some(metrics::mape(actual, predicted)),
        )
    } else {
        (None, None, None)
    };

    tracing::debug!(
        n = values.len(),
        p = params.p,
        d = params.d,
        q = params.q,
        steps = params.steps,
        "forecast model fitted"
    );

    Ok(Json(PredictResponse {
        forecast,
        rmse,
        mae,
        mape,
        aic: model.aic(),
        bic: model.bic(),
    }))
}
