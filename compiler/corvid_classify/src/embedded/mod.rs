//! Languages embedded in string literals.
//!
//! [`EmbeddedLanguageClassifier`] is the only classifier that knows embedded
//! languages exist. For each string literal it asks the registered languages
//! in order; the first one that contributes a span wins and the rest are
//! skipped. Every language has a cheap syntactic pre-check so most literals
//! are rejected without being decoded.

pub mod json;
mod virtual_chars;

use std::fmt;
use std::sync::Arc;

use corvid_ir::Cancelled;
use corvid_syntax::{SyntaxKind, SyntaxToken};

pub use json::JsonLanguage;
pub use virtual_chars::{decode_string_literal, VirtualChar};

use crate::{ClassificationContext, ClassifiedSpan, SyntaxClassifier};

/// A language that may appear inside a string literal.
pub trait EmbeddedLanguage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether `token` could hold this language. Must be cheap.
    fn may_contain(&self, token: SyntaxToken<'_>, cx: &ClassificationContext<'_>) -> bool;

    /// Append classifications for the contents of `token`.
    fn classify(
        &self,
        token: SyntaxToken<'_>,
        cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled>;
}

/// First-match dispatch over the registered embedded languages.
#[derive(Clone, Default)]
pub struct EmbeddedLanguageClassifier {
    languages: Vec<Arc<dyn EmbeddedLanguage>>,
}

impl EmbeddedLanguageClassifier {
    pub fn new(languages: Vec<Arc<dyn EmbeddedLanguage>>) -> Self {
        EmbeddedLanguageClassifier { languages }
    }

    pub fn with_default_languages() -> Self {
        Self::new(vec![Arc::new(JsonLanguage)])
    }
}

impl fmt::Debug for EmbeddedLanguageClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.languages.iter().map(|language| language.name()))
            .finish()
    }
}

impl SyntaxClassifier for EmbeddedLanguageClassifier {
    fn name(&self) -> &'static str {
        "embedded languages"
    }

    fn handles_token(&self, kind: SyntaxKind) -> bool {
        kind == SyntaxKind::STRING_LITERAL
    }

    fn classify_token(
        &self,
        token: SyntaxToken<'_>,
        cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        for language in &self.languages {
            if !language.may_contain(token, cx) {
                continue;
            }
            let before = out.len();
            language.classify(token, cx, out)?;
            if out.len() > before {
                tracing::trace!(language = language.name(), "classified embedded language");
                break;
            }
        }
        Ok(())
    }
}
