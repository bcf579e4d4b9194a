use serde::{Deserialize, Serialize};

use lg_core::domain::value_objects::TrialViewOutcome;

use super::user::UserResponse;

/// Admin subscription decision. `status` and `subscriptionStatus` are both
/// accepted; `status` wins when both are present.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdateRequest {
    pub status: Option<String>,
    pub subscription_status: Option<String>,
    #[serde(default)]
    pub notify: bool,
}

impl SubscriptionUpdateRequest {
    pub fn requested_status(&self) -> Option<&str> {
        self.status
            .as_deref()
            .or(self.subscription_status.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingPaymentsResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrialVideoResponse {
    pub user: UserResponse,
    pub access: TrialViewOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_status_prefers_status() {
        let request: SubscriptionUpdateRequest =
            serde_json::from_str(r#"{"subscriptionStatus":"trial","status":"active"}"#).unwrap();
        assert_eq!(request.requested_status(), Some("active"));
        assert!(!request.notify);

        let request: SubscriptionUpdateRequest =
            serde_json::from_str(r#"{"subscriptionStatus":"Active","notify":true}"#).unwrap();
        assert_eq!(request.requested_status(), Some("Active"));
        assert!(request.notify);

        let request = SubscriptionUpdateRequest::default();
        assert_eq!(request.requested_status(), None);
    }
}
