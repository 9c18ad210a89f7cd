pub mod core;
pub mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use self::core::{ApiClient, ApiProvider, ApiRequest, Method};
pub use http::HttpApiProvider;
