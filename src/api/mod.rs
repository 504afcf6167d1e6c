pub mod client;
pub mod error;
pub mod traits;
pub mod types;
pub mod wire;

pub use client::HttpPropertyApi;
pub use error::ApiError;
pub use traits::PropertyApi;
pub use types::RequestParams;
