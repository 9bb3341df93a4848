//! The classifier interface.

use corvid_ir::{CancellationToken, Cancelled};
use corvid_syntax::{SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTrivia};

use crate::semantic::SemanticModel;
use crate::ClassifiedSpan;

/// What a classifier may consult besides the element it is given.
#[derive(Copy, Clone)]
pub struct ClassificationContext<'a> {
    root: SyntaxNode<'a>,
    semantic: Option<&'a dyn SemanticModel>,
    cancel: &'a CancellationToken,
}

impl<'a> ClassificationContext<'a> {
    pub fn new(
        root: SyntaxNode<'a>,
        semantic: Option<&'a dyn SemanticModel>,
        cancel: &'a CancellationToken,
    ) -> Self {
        ClassificationContext {
            root,
            semantic,
            cancel,
        }
    }

    pub fn root(&self) -> SyntaxNode<'a> {
        self.root
    }

    /// The semantic model, when semantic classification was requested.
    pub fn semantic(&self) -> Option<&'a dyn SemanticModel> {
        self.semantic
    }

    pub fn cancel(&self) -> &'a CancellationToken {
        self.cancel
    }

    /// The token immediately before `token` in the tree being classified.
    pub fn previous_token(&self, token: SyntaxToken<'_>) -> Option<SyntaxToken<'a>> {
        let start = token.full_span().start;
        let previous = self.root.token_at_offset(start.checked_sub(1)?)?;
        (previous.full_span().end == start).then_some(previous)
    }
}

/// A pluggable classifier.
///
/// The registry asks `handles_node` and `handles_token` once per kind when
/// the classifier is registered; the worker then calls the matching
/// `classify_*` method for every element of those kinds. Trivia kinds are
/// token kinds for this purpose. Classifiers append to `out`; spans that are
/// empty or carry an empty tag are discarded by the worker.
pub trait SyntaxClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn handles_node(&self, _kind: SyntaxKind) -> bool {
        false
    }

    fn handles_token(&self, _kind: SyntaxKind) -> bool {
        false
    }

    fn classify_node(
        &self,
        _node: SyntaxNode<'_>,
        _cx: &ClassificationContext<'_>,
        _out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        Ok(())
    }

    fn classify_token(
        &self,
        _token: SyntaxToken<'_>,
        _cx: &ClassificationContext<'_>,
        _out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        Ok(())
    }

    fn classify_trivia(
        &self,
        _trivia: SyntaxTrivia<'_>,
        _cx: &ClassificationContext<'_>,
        _out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        Ok(())
    }
}
