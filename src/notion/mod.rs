// Notion integration - HTTP adapter, value models, renderers, tool service
pub mod blocks;
pub mod client;
pub mod databases;
pub mod pages;
pub mod search;
pub mod service;
pub mod types;

pub use client::{ApiResponse, NotionClient};
pub use service::NotionService;
