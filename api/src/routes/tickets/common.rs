use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Subject is required and must be at most 255 characters"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub attachments: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub employee_id: Option<i64>,
}

/// Query parameters of the ticket listings. `employeeId`, `traderId` and
/// `search` only narrow admin listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketListParams {
    pub offer_id: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub employee_id: Option<i64>,
    pub trader_id: Option<i64>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
