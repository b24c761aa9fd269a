pub mod project;
pub mod category;
pub mod profile;
pub mod newsletter;
pub mod token;
