//! Trial gate outcomes and subscription statistics.

use serde::Serialize;

/// Result of applying the trial gate to one chapter view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TrialViewOutcome {
    /// Active subscriber, nothing counted
    Unlimited,
    /// View counted against the free allowance
    #[serde(rename_all = "camelCase")]
    Counted { watched: u32, remaining: u32 },
    /// Allowance exhausted, the view is refused
    #[serde(rename_all = "camelCase")]
    LimitReached { watched: u32, max: u32 },
}

impl TrialViewOutcome {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, TrialViewOutcome::LimitReached { .. })
    }
}

/// Number of users in each subscription state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionCounts {
    pub none: u64,
    pub trial: u64,
    pub pending: u64,
    pub active: u64,
}

impl SubscriptionCounts {
    pub fn total(&self) -> u64 {
        self.none + self.trial + self.pending + self.active
    }
}

/// Admin dashboard figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total_users: u64,
    pub active_subscribers: u64,
    pub pending_payments: u64,
    pub trial_users: u64,
    pub total_revenue: f64,
}

impl PaymentStats {
    pub fn from_counts(counts: SubscriptionCounts, total_revenue: f64) -> Self {
        Self {
            total_users: counts.total(),
            active_subscribers: counts.active,
            pending_payments: counts.pending,
            trial_users: counts.trial,
            total_revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let json = serde_json::to_value(TrialViewOutcome::Counted { watched: 2, remaining: 1 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "counted", "watched": 2, "remaining": 1}));

        let json = serde_json::to_value(TrialViewOutcome::Unlimited).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "unlimited"}));
    }

    #[test]
    fn test_stats_from_counts() {
        let counts = SubscriptionCounts { none: 1, trial: 4, pending: 2, active: 3 };
        let stats = PaymentStats::from_counts(counts, 900.0);
        assert_eq!(stats.total_users, 10);
        assert_eq!(stats.active_subscribers, 3);
        assert_eq!(stats.pending_payments, 2);
        assert_eq!(stats.trial_users, 4);
    }
}
