use certkit_model::ModelError;
use thiserror::Error;

/// Common error type shared by the persistence layer and the tooling
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid template id: {0:?}")]
    InvalidTemplateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert_from_sources() {
        let io: CommonError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(io, CommonError::Io(_)));

        let invalid = CommonError::InvalidTemplateId("../x".to_string());
        assert_eq!(invalid.to_string(), "Invalid template id: \"../x\"");
    }
}
