pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::{ImageUpload, UploadedImage, ALLOWED_MIME_TYPES, MAX_FILE_SIZE};
pub use services::{ImageStore, SimulatedImageStore, UploadPipeline};
