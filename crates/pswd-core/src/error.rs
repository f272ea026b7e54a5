use thiserror::Error;

pub type PswdResult<T> = Result<T, PswdError>;

#[derive(Debug, Error)]
pub enum PswdError {
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for PswdError {
    fn from(e: toml::de::Error) -> Self {
        PswdError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: PswdError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, PswdError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: denied");
    }

    #[test]
    fn toml_errors_are_config_errors() {
        let err: PswdError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, PswdError::Config(_)));
    }
}
