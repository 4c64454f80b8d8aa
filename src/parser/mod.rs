pub mod scan;
pub mod statement;

pub use scan::ParenMode;
pub use statement::*;
