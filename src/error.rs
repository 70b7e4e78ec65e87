pub type ChoreoResult<T> = Result<T, ChoreoError>;

#[derive(thiserror::Error, Debug)]
pub enum ChoreoError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChoreoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn missing_element(selector: impl Into<String>) -> Self {
        Self::MissingElement(selector.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ChoreoError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ChoreoError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(ChoreoError::fetch("x").to_string().contains("fetch error:"));
        assert!(ChoreoError::parse("x").to_string().contains("parse error:"));
        assert!(
            ChoreoError::missing_element("#door")
                .to_string()
                .contains("missing element: #door")
        );
        assert!(
            ChoreoError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ChoreoError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn json_errors_map_to_serde() {
        let err: ChoreoError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ChoreoError::Serde(_)));
    }
}
