//! Standard plugins.

mod logging;

pub use logging::LoggingPlugin;
