pub use config::StoreConfig;
pub use document::{Document, Format};
pub use error::Result;
pub use outcome::Outcome;
pub use store::{Store, FILE_SUFFIX};

pub mod config;
pub mod document;
pub mod error;

mod outcome;
mod store;
