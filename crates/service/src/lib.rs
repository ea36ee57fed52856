//! Service layer providing the article store on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Keeps uploaded asset files consistent with article rows.

pub mod errors;
pub mod article;
pub mod storage;
#[cfg(test)]
pub mod test_support;
