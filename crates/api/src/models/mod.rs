pub mod document;
pub mod index;
pub mod kind;
pub mod metadata;
pub mod occurrence;
pub mod symbol;
pub mod util;

pub use document::*;
pub use index::*;
pub use kind::*;
pub use metadata::*;
pub use occurrence::*;
pub use symbol::*;
