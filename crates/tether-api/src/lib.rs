//! tether-api: REST collaborators of the session pipeline
//!
//! Thin typed clients for the resources the pipeline consumes but does not
//! implement: agent settings, Git-provider listings, and conversation
//! search. Each call returns a scoped, typed error; a failed settings fetch
//! never takes down a repository listing.

pub mod conversations;
pub mod error;
pub mod git;
pub mod settings;

pub use conversations::{
    ConversationQuery, ConversationStatus, ConversationSummary, ConversationTrigger,
    ConversationsClient,
};
pub use error::{Error, Result};
pub use git::{Branch, GitClient, Microagent, RepoName, Repository};
pub use settings::SettingsClient;
