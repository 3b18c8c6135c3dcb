pub mod completion;
pub mod config;
pub mod preload;
pub mod spec;
pub mod validate;
