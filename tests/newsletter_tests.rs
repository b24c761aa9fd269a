use mockall::mock;

use showcase_backend::entities::newsletter::{SubscribeOutcome, SubscribeRequest};
use showcase_backend::errors::AppError;
use showcase_backend::repositories::newsletter::NewsletterRepository;
use showcase_backend::use_cases::newsletter::NewsletterHandler;

mock! {
    pub NewsletterRepo {}

    #[async_trait::async_trait]
    impl NewsletterRepository for NewsletterRepo {
        async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, AppError>;
    }
}

#[tokio::test]
async fn a_new_email_subscribes() {
    let mut repo = MockNewsletterRepo::new();
    repo.expect_subscribe()
        .returning(|_| Ok(SubscribeOutcome::Subscribed));

    let handler = NewsletterHandler::new(repo);

    let response = handler
        .subscribe(SubscribeRequest {
            email: "reader@example.com".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.message, "Successfully subscribed!");
}

#[tokio::test]
async fn a_duplicate_email_is_reported_not_rejected() {
    let mut repo = MockNewsletterRepo::new();
    repo.expect_subscribe()
        .returning(|_| Ok(SubscribeOutcome::AlreadySubscribed));

    let handler = NewsletterHandler::new(repo);

    let response = handler
        .subscribe(SubscribeRequest {
            email: "reader@example.com".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.message, "You are already subscribed.");
}

#[tokio::test]
async fn malformed_emails_never_reach_the_store() {
    let mut repo = MockNewsletterRepo::new();
    repo.expect_subscribe().never();

    let handler = NewsletterHandler::new(repo);

    let result = handler
        .subscribe(SubscribeRequest {
            email: "not-an-email".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}
