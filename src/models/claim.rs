use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub success: bool,
    pub tx_hash: String,
    pub block_number: Option<i64>,
    /// Claimed count on the reward after this claim
    pub claimed: i32,
}
