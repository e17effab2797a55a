pub mod report_handler;
pub mod wizard_handler;

pub use report_handler::*;
pub use wizard_handler::*;
