//! Error types surfaced to the UI

use thiserror::Error;

/// A user action was refused locally; nothing was sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a document before continuing")]
    DocumentNotUploaded,

    #[error("The document or languages changed during upload. Please continue again")]
    DocumentChanged,

    #[error("Please choose a target language")]
    MissingTargetLanguage,

    #[error("Source and target languages must be different")]
    SameLanguages,

    #[error("This is the last step")]
    NoNextStep,

    #[error("Cancel or reset the current translation before going back")]
    JobInProgress,

    #[error("Translation can only be started from the final step")]
    NotAtExecute,

    #[error("A translation is already running")]
    JobAlreadyRunning,

    #[error("There is no translation job")]
    NoJob,

    #[error("You can select at most {0} glossaries")]
    SelectionFull(usize),

    #[error("This glossary is already selected")]
    AlreadySelected,

    #[error("Resolve the pending glossary conflict first")]
    ConflictPending,

    #[error("Another glossary is still loading")]
    SelectionBusy,

    #[error("Glossary name is required")]
    MissingName,

    #[error("Source and target languages are required")]
    MissingLanguages,

    #[error("Add at least one term with both a source and a target")]
    NoValidTerms,

    #[error("Term \"{0}\" needs both a source and a target")]
    IncompleteTerm(String),

    #[error("Duplicate source terms: {}", .0.join(", "))]
    DuplicateSources(Vec<String>),

    #[error("The term \"{0}\" already exists in this glossary")]
    DuplicateTerm(String),

    #[error("Source term cannot be empty")]
    EmptySource,

    #[error("Unknown term {0}")]
    UnknownTerm(String),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("No valid terms found. Use one \"source, target\" or \"source | target\" pair per line")]
    EmptyImport,

    #[error("All {0} terms already exist in the glossary")]
    AllDuplicates(usize),
}

/// A remote call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No usable response arrived (offline, CORS, timeout)
    #[error("No response from server. Please check your connection. ({0})")]
    Network(String),

    /// The server answered with a non-success status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The body did not match any known shape
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Persisted wizard state whose document fields disagree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionInconsistency {
    #[error("The uploaded document was lost after reload. Please upload it again")]
    MetadataWithoutDocumentId,

    #[error("The document details were lost after reload. Please upload it again")]
    DocumentIdWithoutMetadata,
}

/// Any failure a UI action can report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionInconsistency),
}

impl AppError {
    /// Text for a toast or inline banner.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_transparent() {
        let err = AppError::from(ValidationError::DuplicateSources(vec![
            "Contract".into(),
            "Party".into(),
        ]));
        assert_eq!(err.user_message(), "Duplicate source terms: Contract, Party");
        assert!(err.is_validation());

        let err = AppError::from(ApiError::Server {
            status: 409,
            message: "Glossary name already exists".into(),
        });
        assert_eq!(err.user_message(), "Glossary name already exists");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_api_error_status() {
        let err = ApiError::Server {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(ApiError::Network("offline".into()).status(), None);
    }
}
