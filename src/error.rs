use thiserror::Error;

/// Run-level extraction failures. Individual field misses never show up
/// here; they degrade to empty/null values in the record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("upstream returned status {status}: {message}")]
    Fetch { status: u16, message: String },

    #[error("no table row matched {context}")]
    RowNotFound { context: String },

    #[error("result set {name:?} not found in payload")]
    ResultSetNotFound { name: String },

    #[error("required anchor missing: {context}")]
    AnchorMissing { context: String },

    #[error("payload decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ExtractError {
    pub fn row_not_found(context: impl Into<String>) -> Self {
        ExtractError::RowNotFound { context: context.into() }
    }

    pub fn anchor_missing(context: impl Into<String>) -> Self {
        ExtractError::AnchorMissing { context: context.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::Fetch { .. } => "fetch_failure",
            ExtractError::RowNotFound { .. } => "row_not_found",
            ExtractError::ResultSetNotFound { .. } => "result_set_not_found",
            ExtractError::AnchorMissing { .. } => "anchor_missing",
            ExtractError::Decode(_) => "decode_failure",
        }
    }

    /// Structured `{kind, message}` object for the response boundary.
    pub fn report(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        })
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_kind_and_message() {
        let e = ExtractError::ResultSetNotFound { name: "CommonPlayerInfo".into() };
        let r = e.report();
        assert_eq!(r["kind"], "result_set_not_found");
        assert!(r["message"].as_str().unwrap().contains("CommonPlayerInfo"));
    }

    #[test]
    fn fetch_failure_surfaces_status() {
        let e = ExtractError::Fetch { status: 503, message: "Service Unavailable".into() };
        assert_eq!(e.kind(), "fetch_failure");
        assert!(e.to_string().contains("503"));
    }
}
