//! Remote inference backend
//!
//! JSON client for an external inference service exposing the toxicity
//! model behind two endpoints: one to load a model instance with a match
//! threshold, one to classify a batch of inputs against it.

use crate::backend::{LoadOptions, ModelHandle, ModelLoader, ToxicityModel};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use toxchat_core::{Error, Prediction, Result};

#[derive(Debug, Serialize)]
struct LoadRequest<'a> {
    threshold: f32,
    labels: &'a [String],
}

#[derive(Debug, Deserialize)]
struct LoadResponse {
    model_id: String,
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    model_id: &'a str,
    inputs: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    predictions: Vec<Prediction>,
}

/// Loader for a model served by an external inference service
pub struct RemoteLoader {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteLoader {
    /// Create a loader for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::model(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ModelLoader for RemoteLoader {
    async fn load(&self, options: &LoadOptions) -> Result<ModelHandle> {
        let url = format!("{}/v1/load", self.base_url);
        let request = LoadRequest {
            threshold: options.threshold,
            labels: &options.labels,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::model(format!("load request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::model(format!("inference service rejected load: {e}")))?;

        let body: LoadResponse = response
            .json()
            .await
            .map_err(|e| Error::model(format!("malformed load response: {e}")))?;

        tracing::info!(model_id = %body.model_id, url = %self.base_url, "remote model loaded");

        Ok(Arc::new(RemoteModel {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            model_id: body.model_id,
        }))
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Handle to a model instance hosted by the inference service
pub struct RemoteModel {
    http: reqwest::Client,
    base_url: String,
    model_id: String,
}

#[async_trait]
impl ToxicityModel for RemoteModel {
    async fn classify(&self, inputs: &[String]) -> Result<Vec<Prediction>> {
        let url = format!("{}/v1/classify", self.base_url);
        let request = ClassifyRequest {
            model_id: &self.model_id,
            inputs,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::model(format!("classify request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::model(format!("inference service rejected classify: {e}")))?;

        let body: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| Error::model(format!("malformed classify response: {e}")))?;

        Ok(body.predictions)
    }
}
