pub mod config;
pub mod crypto;
pub mod data;
pub mod decoder;
pub mod error;
pub mod format;
pub mod resolver;
pub mod rules;
pub mod stats;
pub mod summary;
pub mod text;
pub mod tools;
pub mod transport;

pub use data::GameData;
pub use decoder::{decode, RawRecord};
pub use error::{DataError, DecodeError};
pub use format::{Format, FormatDescriptor, FormatRegistry};
pub use summary::{summarize, Summary};
