pub mod config;
pub mod git;
pub mod logging;
pub mod paths;
pub mod scaffold;
pub mod templates;

// Re-export commonly used types
pub use config::{CommitPolicy, ScaffoldConfig};
pub use scaffold::ScaffoldReport;
