pub mod collection;
pub mod types;

pub use collection::*;
pub use types::*;
