//! System prompt assembly for the code-planning assistant.
//!
//! [`library`] selects a variant, [`prompt`] composes the document from
//! [`options::PromptOptions`], and [`wire`] holds the reply grammar the
//! document teaches (quick actions, paired migration/query actions).

pub mod cli;
pub mod config;
pub mod errors;
pub mod library;
pub mod log;
pub mod options;
pub mod prompt;
pub mod safety;
pub mod ux;
pub mod wire;

pub use errors::{PromptError, ProtocolError};
pub use library::{list_variants, resolve, PromptLibrary, PromptVariant, VariantInfo, LIBRARY};
pub use options::{ColorRole, ConnectionState, Credentials, DesignScheme, PromptOptions, SupabaseConnection};
pub use safety::{MarkupAllowlist, TagName};
