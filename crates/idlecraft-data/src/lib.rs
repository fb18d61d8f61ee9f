pub mod builtin;
pub mod loader;
pub mod schema;

pub use builtin::builtin_catalog;
pub use loader::{ContentSource, DataLoadError, load_content_dir, load_or_builtin};
