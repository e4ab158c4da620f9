//! Input boundary: language file parsing and loading.
mod error;
mod json;
mod lang;
mod loader;
mod mapping;

pub use error::InputError;
pub use json::{
    flatten_json,
    parse_json,
};
pub use lang::parse_lang;
pub use loader::LangFileLoader;
pub use mapping::DirectMappingTable;
