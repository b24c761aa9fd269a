use std::borrow::Cow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 120;
const MAX_SHORT_DESCRIPTION_LENGTH: u64 = 200;
const MAX_TAGS: u64 = 10;
const MAX_TAG_LENGTH: u64 = 30;

/// Maximum related projects returned for a detail page.
pub const RELATED_PROJECTS_LIMIT: u32 = 6;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_profile: Option<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub validated: bool,
    pub views_count: i32,
    pub publish_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Project row joined with its owner's username, the shape every
/// read path returns.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectWithOwner {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_profile: Option<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub validated: bool,
    pub views_count: i32,
    pub publish_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub username: Option<String>,
}

#[derive(Debug, Validate)]
pub struct ProjectInsert {
    pub owner_id: Uuid,

    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    #[validate(length(max = MAX_SHORT_DESCRIPTION_LENGTH))]
    pub short_description: Option<String>,

    pub image_url: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub website_url: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub github_url: Option<String>,

    pub twitter_profile: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Submission form fields, parsed from the multipart body. The image
/// travels separately as raw bytes.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    #[validate(length(max = MAX_SHORT_DESCRIPTION_LENGTH))]
    pub short_description: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub website_url: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub github_url: Option<String>,

    pub twitter_profile: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewProjectRequest {
    /// Fresh submissions are never validated or featured, whatever the
    /// client claims.
    pub fn prepare_for_insert(self, owner_id: Uuid, image_url: Option<String>) -> ProjectInsert {
        ProjectInsert {
            owner_id,
            title: self.title,
            description: self.description,
            short_description: self.short_description,
            image_url,
            website_url: self.website_url,
            github_url: self.github_url,
            twitter_profile: self.twitter_profile,
            tags: self.tags,
            created_at: Utc::now(),
        }
    }
}

/// Full replacement of the editable fields, admin edit surface.
/// `category_ids`, when present, fully replaces the association set.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    #[validate(length(max = MAX_SHORT_DESCRIPTION_LENGTH))]
    pub short_description: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub website_url: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub github_url: Option<String>,

    pub twitter_profile: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    #[serde(default)]
    pub tags: Vec<String>,

    pub publish_date: Option<DateTime<Utc>>,

    pub category_ids: Option<Vec<Uuid>>,
}

/// Query parameters for the public listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListQuery {
    pub search: Option<String>,
    pub category: Option<Uuid>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectCreatedResponse {
    pub id: Uuid,
    pub validated: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: Uuid,
    pub value: bool,
}

#[derive(Debug, Serialize)]
pub struct ViewsResponse {
    pub id: Uuid,
    pub views_count: i32,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_optional_url(url: &str) -> Result<(), ValidationError> {
    validate_url(url)
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_tags(tags: &Vec<String>) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS as usize {
        return Err(new_validation_error("too_many_tags", "Too many tags provided"));
    }
    for tag in tags {
        if tag.is_empty() || tag.len() > MAX_TAG_LENGTH as usize {
            return Err(new_validation_error("invalid_tag_length", "Tag length must be within allowed range"));
        }
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().len() != title.len() {
        return Err(new_validation_error("title_whitespace", "Title must not have leading or trailing whitespace"));
    }
    Ok(())
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
