use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Duplicate inserts are a benign outcome, not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: String,
}

impl From<SubscribeOutcome> for SubscribeResponse {
    fn from(outcome: SubscribeOutcome) -> Self {
        let message = match outcome {
            SubscribeOutcome::Subscribed => "Successfully subscribed!".to_string(),
            SubscribeOutcome::AlreadySubscribed => "You are already subscribed.".to_string(),
        };
        SubscribeResponse { message }
    }
}
