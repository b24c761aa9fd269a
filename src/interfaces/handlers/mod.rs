pub mod admin;
pub mod auth;
pub mod categories;
pub mod forms;
pub mod home;
pub mod json_error;
pub mod newsletter;
pub mod projects;
pub mod system;
