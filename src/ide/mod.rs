//! Completion and documentation APIs for editor integrations.
//!
//! Each function takes the tree and a resolver in and returns plain data;
//! conversion to a particular protocol happens at the caller.
//!
//! ## Usage
//!
//! The recommended way to use this module is through `SuggestionHost`:
//!
//! ```ignore
//! use keyhint::ide::SuggestionHost;
//!
//! let mut host = SuggestionHost::new(resolver);
//! host.load_source(source);
//!
//! let analysis = host.analysis();
//! let suggestions = analysis.key_suggestions("server.p");
//! ```

mod analysis;
mod completion;
mod documentation;

pub use analysis::{Analysis, SuggestionHost};
pub use completion::{CompletionConfig, CompletionItem, key_completions, value_completions};
pub use documentation::{
    DocumentationBuilder, documentation, documentation_for_key, documentation_for_value,
    type_hyperlink,
};

pub use crate::tree::{PathElement, Suggestion, SuggestionIcon, SuggestionKind};
