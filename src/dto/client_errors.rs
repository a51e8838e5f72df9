use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error report posted by the browser.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientErrorReport {
    pub message: String,
    pub stack: Option<String>,
    pub component_stack: Option<String>,
    pub url: Option<String>,
    pub user_agent: Option<String>,
    pub error_type: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientErrorReceipt {
    pub logged: bool,
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorSinkStatus {
    pub status: String,
}
