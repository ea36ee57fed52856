use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("asset storage error: {0}")]
    Asset(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Database or filesystem failure, as opposed to a caller mistake.
    pub fn is_storage(&self) -> bool {
        matches!(self, ServiceError::Db(_) | ServiceError::Asset(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_) | ServiceError::Model(models::errors::ModelError::Validation(_))
        )
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self { ServiceError::Asset(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn classification() {
        assert!(ServiceError::Db("x".into()).is_storage());
        assert!(ServiceError::Asset("x".into()).is_storage());
        assert!(!ServiceError::Model(ModelError::Validation("x".into())).is_storage());
        assert!(ServiceError::Model(ModelError::Validation("x".into())).is_validation());
        assert!(!ServiceError::not_found("article").is_storage());
        assert_eq!(ServiceError::not_found("article").to_string(), "not found: article not found");
    }
}
