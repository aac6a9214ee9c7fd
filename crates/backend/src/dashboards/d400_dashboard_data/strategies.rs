//! Retrieval/write strategies for the manual-dashboard document.
//!
//! The document lives behind a platform whose server-side procedures may not
//! exist in every deployment yet, so reads and writes walk an ordered chain:
//! stored procedure, then the external function endpoint, then the plain row.
//! Each strategy runs at most once per call; there is no retry loop.

use super::repository;
use crate::shared::error::MetricsError;
use async_trait::async_trait;
use contracts::dashboards::d400_dashboard_data::DashboardData;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

pub const RPC_FETCH_FN: &str = "get_dashboard_data";
pub const RPC_SAVE_FN: &str = "upsert_dashboard_data";

/// One way of reaching the stored document
#[async_trait]
pub trait BlobStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<DashboardData, MetricsError>;

    async fn save(&self, data: &DashboardData) -> Result<DashboardData, MetricsError>;
}

// ============================================================================
// 1. Stored-procedure call
// ============================================================================

pub struct RpcStrategy;

#[async_trait]
impl BlobStrategy for RpcStrategy {
    fn name(&self) -> &'static str {
        "rpc"
    }

    async fn fetch(&self) -> Result<DashboardData, MetricsError> {
        let db = crate::shared::data::db::get_connection();
        let row = db
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!("SELECT {}() AS data;", RPC_FETCH_FN),
            ))
            .await
            .map_err(|e| MetricsError::Persistence(e.to_string()))?
            .ok_or_else(|| MetricsError::NotFound("empty rpc result".to_string()))?;

        let payload: String = row
            .try_get("", "data")
            .map_err(|e| MetricsError::Persistence(e.to_string()))?;
        serde_json::from_str(&payload)
            .map_err(|e| MetricsError::Persistence(format!("rpc payload: {}", e)))
    }

    async fn save(&self, data: &DashboardData) -> Result<DashboardData, MetricsError> {
        let payload = serde_json::to_string(data)
            .map_err(|e| MetricsError::Validation(format!("dashboard payload: {}", e)))?;

        let db = crate::shared::data::db::get_connection();
        db.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {}(?);", RPC_SAVE_FN),
            [payload.into()],
        ))
        .await
        .map_err(|e| MetricsError::Persistence(e.to_string()))?;

        Ok(data.clone())
    }
}

// ============================================================================
// 2. External function endpoint
// ============================================================================

pub struct EdgeFunctionStrategy {
    endpoint_url: Option<String>,
    client: reqwest::Client,
}

impl EdgeFunctionStrategy {
    pub fn new(endpoint_url: Option<String>) -> Self {
        Self {
            endpoint_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self) -> Result<&str, MetricsError> {
        self.endpoint_url.as_deref().ok_or_else(|| {
            MetricsError::Persistence("dashboard endpoint_url is not configured".to_string())
        })
    }

    /// The endpoint wraps the document in {"data": ...}
    fn unwrap_payload(body: serde_json::Value) -> Result<DashboardData, MetricsError> {
        let payload = body
            .get("data")
            .cloned()
            .ok_or_else(|| MetricsError::Persistence("endpoint returned no data".to_string()))?;
        serde_json::from_value(payload)
            .map_err(|e| MetricsError::Persistence(format!("endpoint payload: {}", e)))
    }
}

#[async_trait]
impl BlobStrategy for EdgeFunctionStrategy {
    fn name(&self) -> &'static str {
        "edge-function"
    }

    async fn fetch(&self) -> Result<DashboardData, MetricsError> {
        let url = self.url()?;
        let body: serde_json::Value = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| MetricsError::Persistence(e.to_string()))?
            .json()
            .await
            .map_err(|e| MetricsError::Persistence(e.to_string()))?;
        Self::unwrap_payload(body)
    }

    async fn save(&self, data: &DashboardData) -> Result<DashboardData, MetricsError> {
        let url = self.url()?;
        let body: serde_json::Value = self
            .client
            .put(url)
            .json(&serde_json::json!({ "data": data }))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| MetricsError::Persistence(e.to_string()))?
            .json()
            .await
            .map_err(|e| MetricsError::Persistence(e.to_string()))?;
        Self::unwrap_payload(body)
    }
}

// ============================================================================
// 3. Direct row access by the well-known key
// ============================================================================

pub struct DirectTableStrategy;

#[async_trait]
impl BlobStrategy for DirectTableStrategy {
    fn name(&self) -> &'static str {
        "direct-table"
    }

    async fn fetch(&self) -> Result<DashboardData, MetricsError> {
        let db = crate::shared::data::db::get_connection();
        repository::get(db)
            .await?
            .ok_or_else(|| MetricsError::NotFound("dashboard-config row absent".to_string()))
    }

    async fn save(&self, data: &DashboardData) -> Result<DashboardData, MetricsError> {
        let db = crate::shared::data::db::get_connection();
        repository::upsert(db, data).await?;
        Ok(data.clone())
    }
}
