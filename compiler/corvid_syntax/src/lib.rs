//! Corvid syntax trees.
//!
//! Trees come in two layers:
//!
//! - [`green`] elements are immutable, position-free and shared by `Arc`, so a
//!   new document version can reuse every unchanged subtree of the old one;
//! - [`SyntaxNode`] / [`SyntaxToken`] / [`SyntaxTrivia`] are cheap borrowed
//!   views that add absolute offsets.
//!
//! [`change_range`] compares two versions of a tree by identity and reports
//! the region of text that differs. [`TextChange`] describes the edit that
//! produced the new version.

mod builder;
pub mod change_range;
pub mod green;
mod kind;
mod red;
mod text;

pub use builder::{Checkpoint, TreeBuilder};
pub use change_range::{compute_change_range, ChangeRange, ChangeRangeOptions};
pub use green::{GreenElement, GreenNode, GreenToken, Trivia};
pub use kind::SyntaxKind;
pub use red::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia};
pub use text::{TextChange, TextChangeError};
