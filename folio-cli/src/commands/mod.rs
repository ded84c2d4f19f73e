//! CLI command implementations

mod process;
mod thumbnail;

pub use process::{process, ProcessOptions};
pub use thumbnail::{thumbnail, ThumbnailArgs};
