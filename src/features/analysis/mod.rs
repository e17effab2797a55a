pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::AnalysisResult;
pub use services::{analyzer_from_config, CannedAnalyzer, ImageAnalyzer, RemoteAnalyzer};
