//! CLI library for testing purposes

pub mod logging;
pub mod mode;
pub mod path_glob;

pub use logging::setup_logger;
pub use mode::Mode;
pub use path_glob::expand_input_globs;
