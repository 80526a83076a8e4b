pub mod element;
pub mod error;
pub mod file_format;
pub mod header;
pub mod scaling;

pub use element::*;
pub use error::*;
pub use file_format::*;
pub use header::*;
pub use scaling::*;
