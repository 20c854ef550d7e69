use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt not found: {0}")] NotFound(String),
    #[error("invalid tag name {0:?}: expected a bare markup name such as \"modifications\"")] InvalidTagName(String),
    #[error("invalid markup element {0:?}: expected a bare element name such as \"code\"")] InvalidElement(String),
    #[error("config error: {0}")] Config(String),
}

/// Violations of the reply grammar the downstream interpreter parses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("reply does not end with a <bolt-quick-actions> block")] MissingQuickActions,
    #[error("quick actions block is empty")] EmptyQuickActions,
    #[error("too many quick actions: {0} (at most 5)")] TooManyQuickActions(usize),
    #[error("unknown quick action type: {0}")] UnknownActionType(String),
    #[error("quick action of type {kind} must carry a `{expected}` attribute, found `{found}`")]
    WrongAttribute { kind: String, expected: String, found: String },
    #[error("quick action {kind} at position {position} breaks the implement, message, link, file ordering")]
    OutOfOrder { kind: String, position: usize },
    #[error("malformed quick action: {0}")] MalformedQuickAction(String),
    #[error("artifact {artifact}: {operation} action carries `{found}` instead of `{expected}`")]
    WrongTarget { artifact: String, operation: String, expected: String, found: String },
    #[error("artifact {artifact}: migration {file_path} is outside /supabase/migrations/")]
    MigrationOutsideDir { artifact: String, file_path: String },
    #[error("artifact {artifact}: migration {file_path} is not followed by a query")]
    UnpairedMigration { artifact: String, file_path: String },
    #[error("artifact {artifact}: query without a preceding migration")]
    UnpairedQuery { artifact: String },
    #[error("artifact {artifact}: migration {file_path} and its query differ")]
    BodyMismatch { artifact: String, file_path: String },
}
