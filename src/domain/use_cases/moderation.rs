use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        category::{Category, NewCategoryRequest, RenameCategoryRequest},
        profile::ProfileAdminView,
        project::{ProjectWithOwner, ToggleResponse, UpdateProjectRequest},
    },
    errors::AppError,
    infrastructure::storage::images::{ImageStore, ImageUpload},
    repositories::{
        category::CategoryRepository,
        profile::ProfileRepository,
        project::ProjectRepository,
    },
};

/// Admin moderation surface: project toggles and edits, user role and
/// disablement, category CRUD. Role gating happens at the HTTP layer;
/// every handler here still only runs behind `AdminClaims`.
pub struct ModerationHandler<R, C, P>
where
    R: ProjectRepository,
    C: CategoryRepository,
    P: ProfileRepository,
{
    pub project_repo: R,
    pub category_repo: C,
    pub profile_repo: P,
    image_store: Arc<dyn ImageStore>,
}

impl<R, C, P> ModerationHandler<R, C, P>
where
    R: ProjectRepository,
    C: CategoryRepository,
    P: ProfileRepository,
{
    pub fn new(project_repo: R, category_repo: C, profile_repo: P, image_store: Arc<dyn ImageStore>) -> Self {
        ModerationHandler {
            project_repo,
            category_repo,
            profile_repo,
            image_store,
        }
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectWithOwner>, AppError> {
        self.project_repo.list_all().await
    }

    pub async fn list_users(&self) -> Result<Vec<ProfileAdminView>, AppError> {
        self.profile_repo.list_profiles().await
    }

    pub async fn toggle_validation(&self, id: &Uuid) -> Result<ToggleResponse, AppError> {
        let value = self.project_repo.toggle_validated(id).await?;
        Ok(ToggleResponse { id: *id, value })
    }

    pub async fn toggle_featured(&self, id: &Uuid) -> Result<ToggleResponse, AppError> {
        let value = self.project_repo.toggle_featured(id).await?;
        Ok(ToggleResponse { id: *id, value })
    }

    /// Full replacement of the editable fields; a provided category set
    /// replaces the association rows wholesale, inside one transaction
    /// with the row update.
    pub async fn edit_project(
        &self,
        id: &Uuid,
        update: UpdateProjectRequest,
        image: Option<ImageUpload>,
    ) -> Result<ProjectWithOwner, AppError> {
        update.validate()?;

        let image_url = match image {
            Some(upload) => {
                let key = upload.generate_key();
                Some(self.image_store.put(&key, &upload.bytes).await?)
            }
            None => None,
        };

        self.project_repo.update_project(id, &update, image_url.as_deref()).await
    }

    /// Irreversible hard delete.
    pub async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        self.project_repo.delete_project(id).await
    }

    pub async fn toggle_user_role(&self, id: &Uuid) -> Result<String, AppError> {
        self.profile_repo.toggle_role(id).await
    }

    pub async fn toggle_user_disable(&self, id: &Uuid) -> Result<bool, AppError> {
        self.profile_repo.toggle_disabled(id).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.category_repo.list_categories().await
    }

    pub async fn create_category(&self, request: NewCategoryRequest) -> Result<Category, AppError> {
        request.validate()?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("Category name cannot be empty".to_string()));
        }

        self.category_repo.create_category(name).await
    }

    pub async fn rename_category(&self, id: &Uuid, request: RenameCategoryRequest) -> Result<Category, AppError> {
        request.validate()?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("Category name cannot be empty".to_string()));
        }

        self.category_repo.rename_category(id, name).await
    }

    pub async fn delete_category(&self, id: &Uuid) -> Result<(), AppError> {
        self.category_repo.delete_category(id).await
    }
}
