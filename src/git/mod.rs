mod remote;
pub mod token;

pub use remote::{init_repository, origin_url, set_origin_url};
