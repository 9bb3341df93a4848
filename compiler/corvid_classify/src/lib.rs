//! Corvid classification.
//!
//! Assigns presentation tags (`keyword`, `class name`, `json - string`, ...)
//! to spans of a syntax tree for editors:
//!
//! - [`classify`] is the cancellable walk over the parts of a tree that
//!   intersect a set of target spans
//! - [`ClassifierRegistry`] maps every syntax kind to the ordered
//!   classifiers for it, resolved once when a classifier is registered
//! - [`syntactic`], [`semantic`] and [`embedded`] hold the built-in
//!   classifiers; [`ClassificationOptions`] selects among them
//!
//! Results are deduplicated: each `(span, tag)` pair appears once, however
//! many classifiers report it.

mod classifier;
pub mod embedded;
pub mod pool;
mod registry;
pub mod semantic;
pub mod syntactic;
mod types;
mod worker;

pub use classifier::{ClassificationContext, SyntaxClassifier};
pub use registry::{ClassificationOptions, ClassifierRegistry};
pub use semantic::{DeclarationIndex, SemanticModel, SymbolInfo, SymbolKind};
pub use types::{ClassificationType, ClassifiedSpan};
pub use worker::classify;
