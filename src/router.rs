//! Path dispatch for the three pipeline operations.
//!
//! Every response, success or not, carries the same CORS headers and a JSON
//! body. Operation failures are logged here and reported to the caller as a
//! generic 500.

use crate::{
    charts::RenderReport,
    commands::{FetchOutcome, Pipeline},
    query::{KpiQuery, KpiRow},
    Result,
};
use async_trait::async_trait;
use axum::http::{
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    },
    HeaderMap, HeaderValue, StatusCode,
};
use serde_json::{json, Value};
use tracing::{error, info, warn};

#[cfg(test)]
mod tests;

pub const GET_CSV_PATH: &str = "/get_csv";
pub const SUMMARIZE_PATH: &str = "/summarize";
pub const QUERY_KPI_PATH: &str = "/query_kpi_from_csv";

/// The operations a [`Router`] dispatches to.
#[async_trait]
pub trait Operations: Send + Sync {
    async fn get_csv(&self) -> Result<FetchOutcome>;
    async fn summarize(&self) -> Result<RenderReport>;
    async fn query_kpi(&self, query: KpiQuery) -> Result<Vec<KpiRow>>;
}

#[async_trait]
impl Operations for Pipeline {
    async fn get_csv(&self) -> Result<FetchOutcome> {
        self.fetch_and_persist().await
    }

    async fn summarize(&self) -> Result<RenderReport> {
        Pipeline::summarize(self).await
    }

    async fn query_kpi(&self, query: KpiQuery) -> Result<Vec<KpiRow>> {
        Pipeline::query_kpi(self, &query).await
    }
}

/// Status, headers and JSON body of one dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("OPTIONS,POST,GET"),
        );
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::new(status, json!({ "message": message }))
    }

    pub fn not_found() -> Self {
        Self::message(StatusCode::NOT_FOUND, "Not Found")
    }

    pub fn internal_error() -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

/// Stateless dispatcher over an [`Operations`] implementation.
#[derive(Debug, Clone)]
pub struct Router<O> {
    ops: O,
}

impl<O: Operations> Router<O> {
    pub fn new(ops: O) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Route `path` to its operation. `body` is only read by the KPI query.
    pub async fn dispatch(&self, path: &str, body: Option<&str>) -> ApiResponse {
        info!(path, "dispatching request");

        let result = match path {
            GET_CSV_PATH => self
                .ops
                .get_csv()
                .await
                .map(|_| json!({ "message": "CSV file saved." })),
            SUMMARIZE_PATH => self
                .ops
                .summarize()
                .await
                .map(|_| json!({ "message": "Summarized" })),
            QUERY_KPI_PATH => self.query(body).await,
            _ => {
                warn!(path, "no route for path");
                return ApiResponse::not_found();
            }
        };

        match result {
            Ok(body) => ApiResponse::new(StatusCode::OK, body),
            Err(e) => {
                error!(path, error = %e, "request failed");
                ApiResponse::internal_error()
            }
        }
    }

    async fn query(&self, body: Option<&str>) -> Result<Value> {
        let query: KpiQuery = serde_json::from_str(body.unwrap_or(""))?;
        let rows = self.ops.query_kpi(query).await?;
        Ok(json!({ "Result": rows }))
    }
}
