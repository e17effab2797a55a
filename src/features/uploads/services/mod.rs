mod pipeline;
mod store;

pub use pipeline::UploadPipeline;
pub use store::{ImageStore, SimulatedImageStore};
