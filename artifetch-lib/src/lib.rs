pub mod api_client;
pub mod cache;
pub mod config;
pub mod download;
pub mod error;
pub mod github;
pub mod logging;
pub mod pagination;
pub mod pipeline;
pub mod selector;

#[cfg(test)]
pub mod test_helpers;
