pub mod errors;
pub mod format;
pub mod parser;
pub mod storage;

pub use errors::*;
pub use format::*;
pub use parser::*;
pub use storage::*;
