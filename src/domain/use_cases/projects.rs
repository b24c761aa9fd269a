use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::project::{
        NewProjectRequest, ProjectCreatedResponse, ProjectWithOwner, ViewsResponse,
        RELATED_PROJECTS_LIMIT,
    },
    errors::AppError,
    infrastructure::mail::resend::Mailer,
    infrastructure::storage::images::{ImageStore, ImageUpload},
    repositories::{profile::ProfileRepository, project::ProjectRepository},
};

pub struct ProjectHandler<R, P>
where
    R: ProjectRepository,
    P: ProfileRepository,
{
    pub project_repo: R,
    pub profile_repo: P,
    image_store: Arc<dyn ImageStore>,
    mailer: Option<Arc<dyn Mailer>>,
}

impl<R, P> ProjectHandler<R, P>
where
    R: ProjectRepository,
    P: ProfileRepository,
{
    pub fn new(
        project_repo: R,
        profile_repo: P,
        image_store: Arc<dyn ImageStore>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        ProjectHandler {
            project_repo,
            profile_repo,
            image_store,
            mailer,
        }
    }

    /// Submits a new project owned by the caller. The image, if any, is
    /// stored first; the row is always created unvalidated. The
    /// confirmation email is fire-and-forget.
    pub async fn submit(
        &self,
        owner_id: &str,
        request: NewProjectRequest,
        image: Option<ImageUpload>,
    ) -> Result<ProjectCreatedResponse, AppError> {
        let owner_id = Uuid::parse_str(owner_id)
            .map_err(|_| AppError::InvalidInput("Invalid user ID in claims".to_string()))?;

        let profile = self.profile_repo.get_profile_by_id(&owner_id)
            .await?
            .ok_or(AppError::UnauthorizedAccess)?;

        if profile.is_disabled {
            return Err(AppError::ForbiddenAccess("Account is disabled".to_string()));
        }

        request.validate()?;

        let image_url = match image {
            Some(upload) => {
                let key = upload.generate_key();
                Some(self.image_store.put(&key, &upload.bytes).await?)
            }
            None => None,
        };

        let title = request.title.clone();
        let insert = request.prepare_for_insert(owner_id, image_url);
        let id = self.project_repo.create_project(&insert).await?;

        self.dispatch_confirmation(profile.email, title);

        Ok(ProjectCreatedResponse {
            id,
            validated: false,
            message: "Your project has been submitted and is pending review.".to_string(),
        })
    }

    /// Best-effort confirmation dispatch on a detached task. Failure is
    /// logged and never affects the submission.
    fn dispatch_confirmation(&self, email: String, project_title: String) {
        let Some(mailer) = self.mailer.as_ref().map(Arc::clone) else {
            tracing::debug!("No mail credential configured, skipping confirmation email");
            return;
        };

        tokio::spawn(async move {
            if let Err(e) = mailer.send_submission_confirmation(&email, &project_title).await {
                tracing::warn!("Failed to send confirmation email: {}", e);
            }
        });
    }

    /// Publicly visible projects, newest-first, with optional substring
    /// search and exact category filter.
    pub async fn list_public(
        &self,
        search: Option<&str>,
        category: Option<&Uuid>,
    ) -> Result<Vec<ProjectWithOwner>, AppError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        self.project_repo.list_visible(search, category).await
    }

    pub async fn featured(&self) -> Result<Option<ProjectWithOwner>, AppError> {
        self.project_repo.get_featured().await
    }

    pub async fn detail(&self, id: &Uuid) -> Result<ProjectWithOwner, AppError> {
        self.project_repo.get_project(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    /// Related projects: anything sharing a category, else the most
    /// recent other validated projects. Two sequential queries, no
    /// weighting by overlap.
    pub async fn related(&self, id: &Uuid) -> Result<Vec<ProjectWithOwner>, AppError> {
        // Ensure the anchor project exists before looking around it.
        self.detail(id).await?;

        let category_ids = self.project_repo.category_ids_for(id).await?;

        if category_ids.is_empty() {
            self.project_repo.recent_validated_excluding(id, RELATED_PROJECTS_LIMIT).await
        } else {
            self.project_repo.related_by_categories(id, &category_ids, RELATED_PROJECTS_LIMIT).await
        }
    }

    pub async fn my_projects(&self, owner_id: &str) -> Result<Vec<ProjectWithOwner>, AppError> {
        let owner_id = Uuid::parse_str(owner_id)
            .map_err(|_| AppError::InvalidInput("Invalid user ID in claims".to_string()))?;
        self.project_repo.list_by_owner(&owner_id).await
    }

    pub async fn record_view(&self, id: &Uuid) -> Result<ViewsResponse, AppError> {
        let views_count = self.project_repo.increment_views(id).await?;
        Ok(ViewsResponse { id: *id, views_count })
    }
}
