use std::sync::Arc;

use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use showcase_backend::entities::category::{Category, NewCategoryRequest, RenameCategoryRequest};
use showcase_backend::entities::profile::{Profile, ProfileAdminView, ProfileInsert};
use showcase_backend::entities::project::{ProjectInsert, ProjectWithOwner, UpdateProjectRequest};
use showcase_backend::errors::{AppError, StorageError};
use showcase_backend::repositories::category::CategoryRepository;
use showcase_backend::repositories::profile::ProfileRepository;
use showcase_backend::repositories::project::ProjectRepository;
use showcase_backend::storage::images::ImageStore;
use showcase_backend::use_cases::moderation::ModerationHandler;

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
    pub CategoryRepo {}

    #[async_trait::async_trait]
    impl CategoryRepository for CategoryRepo {
        async fn list_categories(&self) -> Result<Vec<Category>, AppError>;
        async fn create_category(&self, name: &str) -> Result<Category, AppError>;
        async fn rename_category(&self, id: &Uuid, name: &str) -> Result<Category, AppError>;
        async fn delete_category(&self, id: &Uuid) -> Result<(), AppError>;
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

fn handler(
    project_repo: MockProjectRepo,
    category_repo: MockCategoryRepo,
    profile_repo: MockProfileRepo,
) -> ModerationHandler<MockProjectRepo, MockCategoryRepo, MockProfileRepo> {
    ModerationHandler::new(project_repo, category_repo, profile_repo, Arc::new(NullStore))
}

fn sample_project(id: Uuid) -> ProjectWithOwner {
    ProjectWithOwner {
        id,
        owner_id: Uuid::new_v4(),
        title: "Edited".to_string(),
        description: "After the edit".to_string(),
        short_description: None,
        image_url: None,
        website_url: None,
        github_url: None,
        twitter_profile: None,
        tags: vec![],
        is_featured: false,
        validated: false,
        views_count: 0,
        publish_date: None,
        created_at: Utc::now(),
        username: Some("owner".to_string()),
    }
}

#[tokio::test]
async fn toggling_validation_twice_restores_the_original_state() {
    let id = Uuid::new_v4();

    let mut project_repo = MockProjectRepo::new();
    let mut flips = vec![true, false].into_iter();
    project_repo
        .expect_toggle_validated()
        .times(2)
        .returning(move |_| Ok(flips.next().unwrap()));

    let handler = handler(project_repo, MockCategoryRepo::new(), MockProfileRepo::new());

    let first = handler.toggle_validation(&id).await.unwrap();
    let second = handler.toggle_validation(&id).await.unwrap();

    assert!(first.value);
    assert!(!second.value);
}

#[tokio::test]
async fn featuring_does_not_unfeature_other_projects() {
    // The flag is a plain per-row flip; no other rows are touched, so
    // two projects may be featured at once.
    let mut project_repo = MockProjectRepo::new();
    project_repo
        .expect_toggle_featured()
        .times(2)
        .returning(|_| Ok(true));

    let handler = handler(project_repo, MockCategoryRepo::new(), MockProfileRepo::new());

    let first = handler.toggle_featured(&Uuid::new_v4()).await.unwrap();
    let second = handler.toggle_featured(&Uuid::new_v4()).await.unwrap();

    assert!(first.value && second.value);
}

#[tokio::test]
async fn edit_passes_the_replacement_category_set_through() {
    let id = Uuid::new_v4();
    let category_ids = vec![Uuid::new_v4(), Uuid::new_v4()];
    let expected = category_ids.clone();

    let mut project_repo = MockProjectRepo::new();
    project_repo
        .expect_update_project()
        .withf(move |_, update, image_url| {
            update.category_ids.as_deref() == Some(expected.as_slice()) && image_url.is_none()
        })
        .returning(move |pid, _, _| Ok(sample_project(*pid)));

    let handler = handler(project_repo, MockCategoryRepo::new(), MockProfileRepo::new());

    let update = UpdateProjectRequest {
        title: "Edited".to_string(),
        description: "After the edit".to_string(),
        category_ids: Some(category_ids),
        ..Default::default()
    };

    let result = handler.edit_project(&id, update, None).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn edit_rejects_invalid_fields() {
    let handler = handler(MockProjectRepo::new(), MockCategoryRepo::new(), MockProfileRepo::new());

    let update = UpdateProjectRequest {
        title: "x".to_string(),
        description: "ok".to_string(),
        ..Default::default()
    };

    let result = handler.edit_project(&Uuid::new_v4(), update, None).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn category_names_are_trimmed_before_storage() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo
        .expect_create_category()
        .withf(|name| name == "AI Tools")
        .returning(|name| {
            Ok(Category {
                id: Uuid::new_v4(),
                name: name.to_string(),
            })
        });

    let handler = handler(MockProjectRepo::new(), category_repo, MockProfileRepo::new());

    let result = handler
        .create_category(NewCategoryRequest {
            name: "  AI Tools  ".to_string(),
        })
        .await;

    assert_eq!(result.unwrap().name, "AI Tools");
}

#[tokio::test]
async fn blank_category_names_are_rejected() {
    let handler = handler(MockProjectRepo::new(), MockCategoryRepo::new(), MockProfileRepo::new());

    let result = handler
        .rename_category(
            &Uuid::new_v4(),
            RenameCategoryRequest {
                name: "   ".to_string(),
            },
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn toggling_a_user_role_reports_the_new_role() {
    let mut profile_repo = MockProfileRepo::new();
    profile_repo
        .expect_toggle_role()
        .returning(|_| Ok("admin".to_string()));

    let handler = handler(MockProjectRepo::new(), MockCategoryRepo::new(), profile_repo);

    let role = handler.toggle_user_role(&Uuid::new_v4()).await.unwrap();
    assert_eq!(role, "admin");
}
