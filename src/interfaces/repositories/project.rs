use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{self, PgPool, QueryBuilder};

use crate::{
    entities::project::{ProjectInsert, ProjectWithOwner, UpdateProjectRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Shared SELECT head: project columns joined with the owner's username.
const PROJECT_WITH_OWNER: &str = r#"
    SELECT p.id, p.owner_id, p.title, p.description, p.short_description,
           p.image_url, p.website_url, p.github_url, p.twitter_profile,
           p.tags, p.is_featured, p.validated, p.views_count,
           p.publish_date, p.created_at, pr.username
    FROM projects p
    JOIN profiles pr ON pr.id = p.owner_id
"#;

/// The public-visibility predicate: validated, and either no publish
/// date or a publish date that has passed.
const VISIBLE: &str = " p.validated = TRUE AND (p.publish_date IS NULL OR p.publish_date <= NOW())";

/// ILIKE pattern matching the term as a literal substring: `\`, `%`
/// and `_` are escaped before wrapping in wildcards.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError>;
    async fn get_project(&self, id: &Uuid) -> Result<Option<ProjectWithOwner>, AppError>;
    async fn list_visible(&self, search: Option<&str>, category: Option<&Uuid>) -> Result<Vec<ProjectWithOwner>, AppError>;
    async fn get_featured(&self) -> Result<Option<ProjectWithOwner>, AppError>;
    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<ProjectWithOwner>, AppError>;
    async fn list_all(&self) -> Result<Vec<ProjectWithOwner>, AppError>;
    async fn toggle_validated(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn toggle_featured(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn update_project(&self, id: &Uuid, update: &UpdateProjectRequest, image_url: Option<&str>) -> Result<ProjectWithOwner, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
    async fn category_ids_for(&self, id: &Uuid) -> Result<Vec<Uuid>, AppError>;
    async fn related_by_categories(&self, id: &Uuid, category_ids: &[Uuid], limit: u32) -> Result<Vec<ProjectWithOwner>, AppError>;
    async fn recent_validated_excluding(&self, id: &Uuid, limit: u32) -> Result<Vec<ProjectWithOwner>, AppError>;
    async fn increment_views(&self, id: &Uuid) -> Result<i32, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError> {
        // validated and is_featured are hard-coded false: a submission
        // can never create itself pre-approved.
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO projects (
                owner_id, title, description, short_description, image_url,
                website_url, github_url, twitter_profile, tags,
                is_featured, validated, views_count, publish_date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE, FALSE, 0, NULL, $10)
            RETURNING id
            "#
        )
        .bind(project.owner_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.short_description)
        .bind(&project.image_url)
        .bind(&project.website_url)
        .bind(&project.github_url)
        .bind(&project.twitter_profile)
        .bind(&project.tags)
        .bind(project.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_project(&self, id: &Uuid) -> Result<Option<ProjectWithOwner>, AppError> {
        let project = sqlx::query_as::<_, ProjectWithOwner>(
            &format!("{PROJECT_WITH_OWNER} WHERE p.id = $1")
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn list_visible(&self, search: Option<&str>, category: Option<&Uuid>) -> Result<Vec<ProjectWithOwner>, AppError> {
        let mut builder = QueryBuilder::new(PROJECT_WITH_OWNER);
        builder.push(" WHERE").push(VISIBLE);

        if let Some(term) = search {
            let pattern = like_pattern(term);
            builder.push(" AND (p.title ILIKE ").push_bind(pattern.clone());
            builder.push(" OR p.description ILIKE ").push_bind(pattern.clone());
            builder.push(" OR EXISTS (SELECT 1 FROM unnest(p.tags) AS t WHERE t ILIKE ").push_bind(pattern);
            builder.push("))");
        }

        if let Some(category_id) = category {
            builder.push(" AND EXISTS (SELECT 1 FROM project_categories pc WHERE pc.project_id = p.id AND pc.category_id = ");
            builder.push_bind(*category_id);
            builder.push(")");
        }

        builder.push(" ORDER BY p.created_at DESC");

        let query = builder.build_query_as::<ProjectWithOwner>();
        let projects = query.fetch_all(&self.pool).await?;

        Ok(projects)
    }

    async fn get_featured(&self) -> Result<Option<ProjectWithOwner>, AppError> {
        // Uniqueness of is_featured is intended but not enforced; if
        // several rows are flagged an arbitrary one wins.
        let project = sqlx::query_as::<_, ProjectWithOwner>(
            &format!("{PROJECT_WITH_OWNER} WHERE p.is_featured = TRUE AND {VISIBLE} ORDER BY p.created_at DESC LIMIT 1")
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<ProjectWithOwner>, AppError> {
        let projects = sqlx::query_as::<_, ProjectWithOwner>(
            &format!("{PROJECT_WITH_OWNER} WHERE p.owner_id = $1 ORDER BY p.created_at DESC")
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn list_all(&self) -> Result<Vec<ProjectWithOwner>, AppError> {
        let projects = sqlx::query_as::<_, ProjectWithOwner>(
            &format!("{PROJECT_WITH_OWNER} ORDER BY p.created_at DESC")
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn toggle_validated(&self, id: &Uuid) -> Result<bool, AppError> {
        let validated: bool = sqlx::query_scalar(
            "UPDATE projects SET validated = NOT validated WHERE id = $1 RETURNING validated"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        Ok(validated)
    }

    async fn toggle_featured(&self, id: &Uuid) -> Result<bool, AppError> {
        // No mutual exclusion against other featured rows.
        let is_featured: bool = sqlx::query_scalar(
            "UPDATE projects SET is_featured = NOT is_featured WHERE id = $1 RETURNING is_featured"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        Ok(is_featured)
    }

    async fn update_project(
        &self,
        id: &Uuid,
        update: &UpdateProjectRequest,
        image_url: Option<&str>,
    ) -> Result<ProjectWithOwner, AppError> {
        // The row update and the category full-replace commit or roll
        // back together.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE projects SET
                title = $1,
                description = $2,
                short_description = $3,
                website_url = $4,
                github_url = $5,
                twitter_profile = $6,
                tags = $7,
                publish_date = $8,
                image_url = COALESCE($9, image_url)
            WHERE id = $10
            "#
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.short_description)
        .bind(&update.website_url)
        .bind(&update.github_url)
        .bind(&update.twitter_profile)
        .bind(&update.tags)
        .bind(update.publish_date)
        .bind(image_url)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        if let Some(category_ids) = &update.category_ids {
            sqlx::query("DELETE FROM project_categories WHERE project_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            if !category_ids.is_empty() {
                sqlx::query(
                    r#"
                    INSERT INTO project_categories (project_id, category_id)
                    SELECT $1, unnest($2::uuid[])
                    "#
                )
                .bind(id)
                .bind(category_ids)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_project(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        Ok(())
    }

    async fn category_ids_for(&self, id: &Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT category_id FROM project_categories WHERE project_id = $1"
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn related_by_categories(
        &self,
        id: &Uuid,
        category_ids: &[Uuid],
        limit: u32,
    ) -> Result<Vec<ProjectWithOwner>, AppError> {
        // DISTINCT collapses projects sharing more than one category;
        // no weighting by overlap count.
        let projects = sqlx::query_as::<_, ProjectWithOwner>(
            &format!(
                r#"
                SELECT DISTINCT p.id, p.owner_id, p.title, p.description, p.short_description,
                       p.image_url, p.website_url, p.github_url, p.twitter_profile,
                       p.tags, p.is_featured, p.validated, p.views_count,
                       p.publish_date, p.created_at, pr.username
                FROM projects p
                JOIN profiles pr ON pr.id = p.owner_id
                JOIN project_categories pc ON pc.project_id = p.id
                WHERE pc.category_id = ANY($1)
                  AND p.id <> $2
                  AND {VISIBLE}
                ORDER BY p.created_at DESC
                LIMIT $3
                "#
            )
        )
        .bind(category_ids)
        .bind(id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn recent_validated_excluding(&self, id: &Uuid, limit: u32) -> Result<Vec<ProjectWithOwner>, AppError> {
        let projects = sqlx::query_as::<_, ProjectWithOwner>(
            &format!("{PROJECT_WITH_OWNER} WHERE p.id <> $1 AND {VISIBLE} ORDER BY p.created_at DESC LIMIT $2")
        )
        .bind(id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn increment_views(&self, id: &Uuid) -> Result<i32, AppError> {
        let views: i32 = sqlx::query_scalar(
            "UPDATE projects SET views_count = views_count + 1 WHERE id = $1 RETURNING views_count"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        Ok(views)
    }
}
