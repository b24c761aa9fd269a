use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    entities::project::{NewProjectRequest, UpdateProjectRequest},
    errors::{AppError, StorageError},
    infrastructure::storage::images::ImageUpload,
};

/// Project multipart body: text fields plus an optional `image` file
/// part. The extractor spools the file to disk and enforces the size
/// cap while streaming; the bytes are content-sniffed before storage.
#[derive(Debug, MultipartForm)]
pub struct ProjectUpload {
    #[multipart(limit = "5MB")]
    pub image: Option<TempFile>,
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub short_description: Option<Text<String>>,
    pub website_url: Option<Text<String>>,
    pub github_url: Option<Text<String>>,
    pub twitter_profile: Option<Text<String>>,
    pub tags: Option<Text<String>>,
    pub publish_date: Option<Text<String>>,
    pub category_ids: Option<Text<String>>,
}

impl ProjectUpload {
    pub async fn into_new_project(self) -> Result<(NewProjectRequest, Option<ImageUpload>), AppError> {
        let image = read_image(self.image).await?;
        let request = NewProjectRequest {
            title: required("title", text(self.title))?,
            description: required("description", text(self.description))?,
            short_description: text(self.short_description),
            website_url: text(self.website_url),
            github_url: text(self.github_url),
            twitter_profile: text(self.twitter_profile),
            tags: split_tags(text(self.tags)),
        };

        Ok((request, image))
    }

    pub async fn into_update_project(self) -> Result<(UpdateProjectRequest, Option<ImageUpload>), AppError> {
        let image = read_image(self.image).await?;
        let request = UpdateProjectRequest {
            title: required("title", text(self.title))?,
            description: required("description", text(self.description))?,
            short_description: text(self.short_description),
            website_url: text(self.website_url),
            github_url: text(self.github_url),
            twitter_profile: text(self.twitter_profile),
            tags: split_tags(text(self.tags)),
            publish_date: parse_publish_date(text(self.publish_date))?,
            category_ids: parse_category_ids(self.category_ids.map(Text::into_inner))?,
        };

        Ok((request, image))
    }
}

/// An empty file part means no image was chosen.
async fn read_image(file: Option<TempFile>) -> Result<Option<ImageUpload>, AppError> {
    match file {
        Some(file) if file.size > 0 => {
            let bytes = tokio::fs::read(file.file.path())
                .await
                .map_err(StorageError::from)?;
            Ok(Some(ImageUpload::from_bytes(bytes)?))
        }
        _ => Ok(None),
    }
}

fn text(field: Option<Text<String>>) -> Option<String> {
    field
        .map(|t| t.into_inner().trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(key: &str, value: Option<String>) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::InvalidInput(format!("Field '{}' is required", key)))
}

fn split_tags(raw: Option<String>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_publish_date(raw: Option<String>) -> Result<Option<DateTime<Utc>>, AppError> {
    match raw {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(&raw)
                .map_err(|_| AppError::InvalidInput("publish_date must be an RFC 3339 timestamp".to_string()))?;
            Ok(Some(parsed.with_timezone(&Utc)))
        }
        None => Ok(None),
    }
}

/// An absent `category_ids` field leaves associations untouched; a
/// present one (even empty) fully replaces the set.
fn parse_category_ids(raw: Option<String>) -> Result<Option<Vec<Uuid>>, AppError> {
    match raw {
        Some(raw) => {
            let ids = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    Uuid::parse_str(s)
                        .map_err(|_| AppError::InvalidInput(format!("Invalid category id: {}", s)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(ids))
        }
        None => Ok(None),
    }
}
