mod dispatch;
mod manifest;
mod resolve;

pub use dispatch::dispatch;
pub use resolve::{resolve, ResolvedBinary};
