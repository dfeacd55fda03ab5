mod annotator;
mod classifier;
mod declaration;
mod engine;
mod files;
mod generator;
mod matcher;
mod mutation;
mod suppressor;
mod walker;

pub use annotator::{Annotation, Annotator, PassStats};
pub use classifier::VariableSubtype;
pub use declaration::{Category, DeclarationKind, DeclarationMatch, Insertion};
pub use generator::{describe_return, reduce_params, CommentGenerator};
pub use matcher::DeclarationMatcher;
pub use mutation::apply_insertions;
pub use suppressor::is_documented;
pub use walker::SourceWalker;

// Export the main engine
pub use engine::{Engine, FileFailure, FileReport, RunOptions, RunReport};
