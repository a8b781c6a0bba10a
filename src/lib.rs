pub use constants::Constants;
pub use error::{CoerceError, DataError};
pub use registry::Registry;
pub use store::DataStore;
pub use value::{Map, Value};

/// Main data layers (dependency flow: Store → Path → Value)
pub mod value; // Dynamic value model and coercion
pub mod path; // Dot-path traversal over nested mappings
pub mod store; // Ordered data store with typed access

/// Support modules (used across layers)
pub mod constants; // Named constant sets
pub mod error; // Error handling
pub mod registry; // Shared instance registry
pub mod utils; // String, list and sequence helpers

pub type Result<T> = std::result::Result<T, DataError>;
