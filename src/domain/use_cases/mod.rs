pub mod auth;
pub mod projects;
pub mod moderation;
pub mod newsletter;
pub mod extractors;
