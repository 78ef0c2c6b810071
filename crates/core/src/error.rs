use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing, malformed, expired or badly signed credential.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The credential is valid but no local profile exists for its subject.
    #[error("User token valid but user not registered")]
    NotRegistered,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        messages.sort();
        CoreError::Validation(messages.join("; "))
    }
}
