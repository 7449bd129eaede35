pub mod client;
pub mod error;

pub use client::{MiraklClient, EXPORT_PATH};
pub use error::ClientError;
