//! API client for the water quality data service.
//!
//! This module provides the `ApiClient` struct wrapping the REST
//! endpoints for system lookup, safety status, violations, and statewide
//! statistics.
//!
//! Every request passes through [`ApiClient::attach_auth`], which adds
//! the stored bearer token when one exists. The endpoints are publicly
//! readable; the server decides what any given token (or its absence) is
//! entitled to.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::TokenStore;
use crate::models::{SafetyStatus, SystemStatistics, Violation, WaterSystem};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Default base URL for a locally running API server
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct ApiClient {
    client: Client,
    base_url: String,
    store: TokenStore,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: String, store: TokenStore) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    /// Attach the stored bearer credential to a request, if one exists.
    ///
    /// Reads the store on every call, so a login or logout earlier in the
    /// process is reflected by the next request. With no credential the
    /// request goes out untouched and the server treats it as anonymous.
    pub fn attach_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self
            .attach_auth(self.client.get(url))
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Lookup Endpoints =====

    /// Search systems by name fragment, PWSID fragment, or exact 5-digit zip
    pub async fn search_systems(&self, query: &str) -> Result<Vec<WaterSystem>> {
        let url = format!("{}/systems/search", self.base_url);
        debug!(url = %url, query = %query, "GET");
        let response = self
            .attach_auth(self.client.get(&url).query(&[("query", query)]))
            .send()
            .await
            .context("Failed to send search request")?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse search response")
    }

    /// Fetch a single system by its PWSID
    pub async fn fetch_system(&self, pwsid: &str) -> Result<WaterSystem> {
        let url = format!("{}/systems/by-id/{}", self.base_url, pwsid);
        self.get(&url).await
    }

    /// Fetch the advisory safety status for a system
    pub async fn fetch_status(&self, pwsid: &str) -> Result<SafetyStatus> {
        let url = format!("{}/systems/{}/status", self.base_url, pwsid);
        self.get(&url).await
    }

    /// Fetch statewide system statistics
    pub async fn fetch_statistics(&self) -> Result<SystemStatistics> {
        let url = format!("{}/statistics", self.base_url);
        self.get(&url).await
    }

    /// Fetch the system nearest to a coordinate.
    /// The server answers 404 for points outside its coverage area.
    pub async fn fetch_nearest_system(&self, lat: f64, lon: f64) -> Result<WaterSystem> {
        let url = format!("{}/systems/by-location", self.base_url);
        debug!(url = %url, lat, lon, "GET");
        let response = self
            .attach_auth(
                self.client
                    .get(&url)
                    .query(&[("lat", lat), ("lon", lon)]),
            )
            .send()
            .await
            .context("Failed to send location request")?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse location response")
    }

    /// Fetch all violations recorded for a system
    pub async fn fetch_violations(&self, pwsid: &str) -> Result<Vec<Violation>> {
        let url = format!("{}/violations/{}", self.base_url, pwsid);
        self.get(&url).await
    }
}
