mod analyzer;

pub use analyzer::{analyzer_from_config, CannedAnalyzer, ImageAnalyzer, RemoteAnalyzer};
