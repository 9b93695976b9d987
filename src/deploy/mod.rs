pub mod collection;
pub mod errors;
pub mod initialize;
pub mod process;

pub use collection::*;
pub use errors::*;
pub use initialize::*;
pub use process::*;
