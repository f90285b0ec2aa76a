pub mod http;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use http::HttpApi;
pub use traits::MarketplaceApi;
pub use types::{PageRequest, SearchFilters};
