//! Typed payloads for the activity audit log.
//!
//! The metadata column is a tagged union rather than an open map, so every
//! activity row deserializes into a known shape.

use serde::{Deserialize, Serialize};

/// Activity type discriminators as stored in `activities.activity_type`.
pub mod activity_types {
    pub const STATUS_CHANGED: &str = "STATUS_CHANGED";
    /// Also used for the readiness transition, not just actual claims.
    /// Inherited naming quirk kept so the user-facing history stays stable.
    pub const REWARD_CLAIMED: &str = "REWARD_CLAIMED";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActivityMetadata {
    #[serde(rename_all = "camelCase")]
    CampaignStatusChanged { new_status: String },
    #[serde(rename_all = "camelCase")]
    MilestoneDelayed {
        milestone_id: i32,
        milestone_title: String,
    },
    #[serde(rename_all = "camelCase")]
    RewardReady {
        reward_id: i32,
        reward_title: String,
    },
    #[serde(rename_all = "camelCase")]
    RewardDistributed {
        reward_id: i32,
        reward_title: String,
        tx_hash: String,
        recipients: u64,
    },
    #[serde(rename_all = "camelCase")]
    RewardClaimed {
        reward_id: i32,
        reward_title: String,
        tx_hash: String,
    },
}
