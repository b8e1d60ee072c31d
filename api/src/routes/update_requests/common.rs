use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub review_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestListParams {
    pub offer_id: Option<i64>,
    pub status: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
