//! Storage abstractions for service layer
//!
//! Holds the filesystem store for uploaded article assets.

pub mod asset_store;

pub use asset_store::AssetStore;
