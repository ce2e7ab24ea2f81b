//! Configuration types

mod app;
mod logging;
mod resolution;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use resolution::ResolutionConfig;
