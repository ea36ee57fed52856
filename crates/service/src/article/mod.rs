//! Article module: three-layer architecture (domain, repository, service).
//!
//! The service owns the asset lifecycle; repositories only see resolved `AssetRef`s.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use repo::seaorm::SeaOrmArticleRepository;
pub use service::ArticleService;
