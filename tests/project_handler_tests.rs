use std::sync::Arc;

use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use showcase_backend::entities::profile::{Profile, ProfileAdminView, ProfileInsert};
use showcase_backend::entities::project::{
    NewProjectRequest, ProjectInsert, ProjectWithOwner, UpdateProjectRequest,
};
use showcase_backend::errors::{AppError, StorageError};
use showcase_backend::repositories::profile::ProfileRepository;
use showcase_backend::repositories::project::ProjectRepository;
use showcase_backend::storage::images::ImageStore;
use showcase_backend::use_cases::projects::ProjectHandler;

mock! {
    pub ProjectRepo {}

    #[async_trait::async_trait]
    impl ProjectRepository for ProjectRepo {
        async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError>;
        async fn get_project(&self, id: &Uuid) -> Result<Option<ProjectWithOwner>, AppError>;
        async fn list_visible<'a, 'b, 'c>(&'a self, search: Option<&'b str>, category: Option<&'c Uuid>) -> Result<Vec<ProjectWithOwner>, AppError>;
        async fn get_featured(&self) -> Result<Option<ProjectWithOwner>, AppError>;
        async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<ProjectWithOwner>, AppError>;
        async fn list_all(&self) -> Result<Vec<ProjectWithOwner>, AppError>;
        async fn toggle_validated(&self, id: &Uuid) -> Result<bool, AppError>;
        async fn toggle_featured(&self, id: &Uuid) -> Result<bool, AppError>;
        async fn update_project<'a, 'b, 'c, 'd>(&'a self, id: &'b Uuid, update: &'c UpdateProjectRequest, image_url: Option<&'d str>) -> Result<ProjectWithOwner, AppError>;
        async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
        async fn category_ids_for(&self, id: &Uuid) -> Result<Vec<Uuid>, AppError>;
        async fn related_by_categories(&self, id: &Uuid, category_ids: &[Uuid], limit: u32) -> Result<Vec<ProjectWithOwner>, AppError>;
        async fn recent_validated_excluding(&self, id: &Uuid, limit: u32) -> Result<Vec<ProjectWithOwner>, AppError>;
        async fn increment_views(&self, id: &Uuid) -> Result<i32, AppError>;
    }
}

mock! {
    pub ProfileRepo {}

    #[async_trait::async_trait]
    impl ProfileRepository for ProfileRepo {
        async fn check_connection(&self) -> Result<(), AppError>;
        async fn create_profile(&self, profile: &ProfileInsert) -> Result<Uuid, AppError>;
        async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>, AppError>;
        async fn get_profile_by_id(&self, id: &Uuid) -> Result<Option<Profile>, AppError>;
        async fn list_profiles(&self) -> Result<Vec<ProfileAdminView>, AppError>;
        async fn toggle_role(&self, id: &Uuid) -> Result<String, AppError>;
        async fn toggle_disabled(&self, id: &Uuid) -> Result<bool, AppError>;
    }
}

struct NullStore;

#[async_trait::async_trait]
impl ImageStore for NullStore {
    async fn put(&self, key: &str, _bytes: &[u8]) -> Result<String, StorageError> {
        Ok(format!("http://test.local/images/{}", key))
    }
}

fn sample_profile(is_disabled: bool) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        email: "owner@example.com".to_string(),
        username: Some("owner".to_string()),
        password_hash: "hash".to_string(),
        role: "user".to_string(),
        is_disabled,
        created_at: Utc::now(),
    }
}

fn sample_project(id: Uuid) -> ProjectWithOwner {
    ProjectWithOwner {
        id,
        owner_id: Uuid::new_v4(),
        title: "Sample".to_string(),
        description: "A sample project".to_string(),
        short_description: None,
        image_url: None,
        website_url: None,
        github_url: None,
        twitter_profile: None,
        tags: vec![],
        is_featured: false,
        validated: true,
        views_count: 0,
        publish_date: None,
        created_at: Utc::now(),
        username: Some("owner".to_string()),
    }
}

fn handler(
    project_repo: MockProjectRepo,
    profile_repo: MockProfileRepo,
) -> ProjectHandler<MockProjectRepo, MockProfileRepo> {
    ProjectHandler::new(project_repo, profile_repo, Arc::new(NullStore), None)
}

fn valid_request() -> NewProjectRequest {
    NewProjectRequest {
        title: "My Project".to_string(),
        description: "Something worth showing".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn submissions_start_unvalidated() {
    let profile = sample_profile(false);
    let owner_id = profile.id;

    let mut profile_repo = MockProfileRepo::new();
    profile_repo
        .expect_get_profile_by_id()
        .returning(move |_| Ok(Some(profile.clone())));

    let mut project_repo = MockProjectRepo::new();
    project_repo
        .expect_create_project()
        .withf(move |insert| insert.owner_id == owner_id)
        .returning(|_| Ok(Uuid::new_v4()));

    let handler = handler(project_repo, profile_repo);

    let response = handler
        .submit(&owner_id.to_string(), valid_request(), None)
        .await
        .expect("submission should succeed");

    assert!(!response.validated);
}

#[tokio::test]
async fn disabled_accounts_cannot_submit() {
    let profile = sample_profile(true);
    let owner_id = profile.id;

    let mut profile_repo = MockProfileRepo::new();
    profile_repo
        .expect_get_profile_by_id()
        .returning(move |_| Ok(Some(profile.clone())));

    let handler = handler(MockProjectRepo::new(), profile_repo);

    let result = handler
        .submit(&owner_id.to_string(), valid_request(), None)
        .await;

    assert!(matches!(result, Err(AppError::ForbiddenAccess(_))));
}

#[tokio::test]
async fn submit_rejects_malformed_owner_ids() {
    let handler = handler(MockProjectRepo::new(), MockProfileRepo::new());

    let result = handler.submit("not-a-uuid", valid_request(), None).await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn search_term_is_trimmed_and_blank_means_none() {
    let mut project_repo = MockProjectRepo::new();
    project_repo
        .expect_list_visible()
        .withf(|search, category| search.is_none() && category.is_none())
        .returning(|_, _| Ok(vec![]));

    let handler = handler(project_repo, MockProfileRepo::new());

    let result = handler.list_public(Some("   "), None).await;
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn related_falls_back_to_recent_when_uncategorized() {
    let id = Uuid::new_v4();
    let anchor = sample_project(id);

    let mut project_repo = MockProjectRepo::new();
    project_repo
        .expect_get_project()
        .returning(move |_| Ok(Some(anchor.clone())));
    project_repo
        .expect_category_ids_for()
        .returning(|_| Ok(vec![]));
    project_repo
        .expect_recent_validated_excluding()
        .returning(|_, _| Ok(vec![]));
    project_repo.expect_related_by_categories().never();

    let handler = handler(project_repo, MockProfileRepo::new());

    assert!(handler.related(&id).await.is_ok());
}

#[tokio::test]
async fn related_uses_shared_categories_when_present() {
    let id = Uuid::new_v4();
    let anchor = sample_project(id);
    let category_id = Uuid::new_v4();

    let mut project_repo = MockProjectRepo::new();
    project_repo
        .expect_get_project()
        .returning(move |_| Ok(Some(anchor.clone())));
    project_repo
        .expect_category_ids_for()
        .returning(move |_| Ok(vec![category_id]));
    project_repo
        .expect_related_by_categories()
        .withf(move |_, ids, limit| ids == [category_id] && *limit == 6)
        .returning(|_, _, _| Ok(vec![]));
    project_repo.expect_recent_validated_excluding().never();

    let handler = handler(project_repo, MockProfileRepo::new());

    assert!(handler.related(&id).await.is_ok());
}

#[tokio::test]
async fn related_requires_an_existing_anchor() {
    let mut project_repo = MockProjectRepo::new();
    project_repo.expect_get_project().returning(|_| Ok(None));

    let handler = handler(project_repo, MockProfileRepo::new());

    let result = handler.related(&Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn record_view_reports_the_new_count() {
    let mut project_repo = MockProjectRepo::new();
    project_repo.expect_increment_views().returning(|_| Ok(42));

    let handler = handler(project_repo, MockProfileRepo::new());

    let response = handler.record_view(&Uuid::new_v4()).await.unwrap();
    assert_eq!(response.views_count, 42);
}
