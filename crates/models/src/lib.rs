pub mod errors;
pub mod db;
pub mod asset;
pub mod article;

pub use asset::AssetRef;

#[cfg(test)]
mod tests;
