pub mod assets;
pub mod config_lines;
pub mod errors;
pub mod process;

pub use assets::*;
pub use config_lines::*;
pub use errors::*;
pub use process::*;
