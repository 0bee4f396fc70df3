pub mod assistant;
pub mod auth;
pub mod chatbot;
pub mod dashboard;
pub mod landing;
pub mod profile;
pub mod search;
pub mod upload;
