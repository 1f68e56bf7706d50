pub mod client;
pub mod config;
pub mod download;
pub mod manifest;
pub mod materialize;
pub mod platform;
pub mod precondition;
pub mod proxy;
pub mod release;
pub mod version;
