pub mod data;
pub mod errors;
pub mod parser;
pub mod settings;

pub use data::*;
pub use errors::*;
pub use parser::*;
pub use settings::*;
