pub mod config;
pub mod discovery;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod pacing;
pub mod pipeline;
pub mod record;
pub mod sink;
