use validator::Validate;

use crate::{
    entities::newsletter::{SubscribeRequest, SubscribeResponse},
    errors::AppError,
    repositories::newsletter::NewsletterRepository,
};

pub struct NewsletterHandler<N>
where
    N: NewsletterRepository,
{
    pub newsletter_repo: N,
}

impl<N> NewsletterHandler<N>
where
    N: NewsletterRepository,
{
    pub fn new(newsletter_repo: N) -> Self {
        NewsletterHandler { newsletter_repo }
    }

    /// Insert-only subscription; a duplicate email is reported as the
    /// informational "already subscribed" outcome, never an error.
    pub async fn subscribe(&self, request: SubscribeRequest) -> Result<SubscribeResponse, AppError> {
        request.validate()?;

        let outcome = self.newsletter_repo.subscribe(&request.email).await?;
        Ok(SubscribeResponse::from(outcome))
    }
}
