//! Prediction Service API
//!
//! Typed request/response layer over the backend's JSON endpoints.
//!
//! ## Envelope
//!
//! Every JSON response carries a boolean `success` and an optional
//! `message`. Absent or false `success` is an application failure; anything
//! that keeps us from reading the envelope is a transport failure.

mod dto;
mod endpoint;
mod error;
#[cfg(feature = "native")]
mod http;

pub use dto::{
    ChartsReply, Credentials, Crop, DatasetReply, EdaCharts, EvaluationCharts,
    EvaluationChartsReply, HistoryReply, Irrigation, LoginReply, ModelResults, PredictReply,
    PredictRequest, PredictionForm, Predictions, Record, RegisterReply, Registration, Scores,
    Season, Soil, TrainReply, TrainRequest,
};
pub use endpoint::{Endpoint, Method};
pub use error::{ClientError, ClientResult, FailureKind};
#[cfg(feature = "native")]
pub use http::{HttpBackend, HttpBackendConfig};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transport to the prediction service.
///
/// Implementations return the decoded JSON body for any response that has
/// one, whatever its HTTP status; the envelope is interpreted by the typed
/// calls below. Futures are not required to be `Send` so browser fetch
/// backends qualify.
#[async_trait(?Send)]
pub trait Backend {
    async fn send(&self, endpoint: Endpoint, body: Option<Value>) -> ClientResult<Value>;
}

#[async_trait(?Send)]
impl<T: Backend + ?Sized> Backend for &T {
    async fn send(&self, endpoint: Endpoint, body: Option<Value>) -> ClientResult<Value> {
        (**self).send(endpoint, body).await
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Send a request and decode the payload of a successful envelope
pub async fn exchange<B, R>(backend: &B, endpoint: Endpoint, body: Option<Value>) -> ClientResult<R>
where
    B: Backend + ?Sized,
    R: DeserializeOwned,
{
    tracing::debug!(endpoint = %endpoint, "Sending request");

    let value = backend.send(endpoint, body).await.map_err(|e| {
        tracing::debug!(endpoint = %endpoint, error = %e, "Transport failure");
        e
    })?;

    let envelope = Envelope::deserialize(&value)?;
    if !envelope.success {
        tracing::debug!(
            endpoint = %endpoint,
            reason = envelope.message.as_deref().unwrap_or(""),
            "Request rejected"
        );
        return Err(ClientError::Rejected {
            message: envelope.message,
        });
    }

    Ok(serde_json::from_value(value)?)
}

fn body<T: Serialize>(request: &T) -> ClientResult<Option<Value>> {
    Ok(Some(serde_json::to_value(request)?))
}

// ============ API Functions ============

pub async fn login<B: Backend + ?Sized>(backend: &B, credentials: &Credentials) -> ClientResult<LoginReply> {
    exchange(backend, Endpoint::Login, body(credentials)?).await
}

pub async fn register<B: Backend + ?Sized>(
    backend: &B,
    registration: &Registration,
) -> ClientResult<RegisterReply> {
    exchange(backend, Endpoint::Register, body(registration)?).await
}

/// End the session. The response body carries nothing we use.
pub async fn logout<B: Backend + ?Sized>(backend: &B) -> ClientResult<()> {
    backend.send(Endpoint::Logout, None).await.map(|_| ())
}

pub async fn get_dataset<B: Backend + ?Sized>(backend: &B) -> ClientResult<Vec<Record>> {
    let reply: DatasetReply = exchange(backend, Endpoint::GetDataset, None).await?;
    Ok(reply.data)
}

pub async fn train_models<B: Backend + ?Sized>(
    backend: &B,
    request: &TrainRequest,
) -> ClientResult<ModelResults> {
    let reply: TrainReply = exchange(backend, Endpoint::TrainModels, body(request)?).await?;
    Ok(reply.results)
}

pub async fn predict<B: Backend + ?Sized>(
    backend: &B,
    request: &PredictRequest,
) -> ClientResult<Predictions> {
    let reply: PredictReply = exchange(backend, Endpoint::Predict, body(request)?).await?;
    Ok(reply.predictions)
}

pub async fn get_charts<B: Backend + ?Sized>(backend: &B) -> ClientResult<EdaCharts> {
    let reply: ChartsReply = exchange(backend, Endpoint::GetCharts, None).await?;
    Ok(reply.charts)
}

pub async fn get_evaluation_charts<B: Backend + ?Sized>(backend: &B) -> ClientResult<EvaluationCharts> {
    let reply: EvaluationChartsReply =
        exchange(backend, Endpoint::GetEvaluationCharts, None).await?;
    Ok(reply.charts)
}

pub async fn get_predictions<B: Backend + ?Sized>(backend: &B) -> ClientResult<Vec<Record>> {
    let reply: HistoryReply = exchange(backend, Endpoint::GetPredictions, None).await?;
    Ok(reply.predictions)
}
