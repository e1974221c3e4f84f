mod client;
mod handle;
mod types;

pub use client::*;
pub use handle::ModelHandle;
pub use types::*;
