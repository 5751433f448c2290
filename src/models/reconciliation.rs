use serde::{Deserialize, Serialize};

/// Per-phase counts for one reconciliation run, returned by the trigger
/// endpoint and logged by the in-process job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationSummary {
    pub activated_campaigns: u64,
    pub completed_campaigns: u64,
    pub funded_campaigns: u64,
    pub delayed_milestones: u64,
    pub upcoming_milestones: u64,
    pub rewards_ready_for_claim: u64,
    pub rewards_distributed: u64,
    pub emails_sent: u64,
}
