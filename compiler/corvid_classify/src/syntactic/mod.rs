//! Classifiers that need nothing but the tree.

mod declarations;
mod directives;

use std::sync::Arc;

use corvid_ir::Cancelled;
use corvid_syntax::{SyntaxKind, SyntaxToken, SyntaxTrivia};

pub use declarations::DeclarationClassifier;
pub use directives::DirectiveClassifier;

use crate::{ClassificationContext, ClassificationType, ClassifiedSpan, SyntaxClassifier};

/// The syntactic classifiers in registration order.
pub fn classifiers() -> Vec<Arc<dyn SyntaxClassifier>> {
    vec![
        Arc::new(TokenClassifier),
        Arc::new(CommentClassifier),
        Arc::new(DirectiveClassifier),
        Arc::new(DeclarationClassifier),
    ]
}

/// Keywords, literals, operators, punctuation and identifiers by token kind.
#[derive(Copy, Clone, Debug, Default)]
pub struct TokenClassifier;

impl TokenClassifier {
    pub fn classification(kind: SyntaxKind) -> Option<ClassificationType> {
        let ty = match kind {
            _ if kind.is_control_keyword() => ClassificationType::CONTROL_KEYWORD,
            _ if kind.is_keyword() => ClassificationType::KEYWORD,
            SyntaxKind::INT_LITERAL | SyntaxKind::REAL_LITERAL => ClassificationType::NUMBER,
            SyntaxKind::STRING_LITERAL | SyntaxKind::CHAR_LITERAL => ClassificationType::STRING,
            _ if kind.is_operator() => ClassificationType::OPERATOR,
            _ if kind.is_punctuation() => ClassificationType::PUNCTUATION,
            SyntaxKind::IDENT => ClassificationType::IDENTIFIER,
            _ => return None,
        };
        Some(ty)
    }
}

impl SyntaxClassifier for TokenClassifier {
    fn name(&self) -> &'static str {
        "tokens"
    }

    fn handles_token(&self, kind: SyntaxKind) -> bool {
        kind.is_token() && Self::classification(kind).is_some()
    }

    fn classify_token(
        &self,
        token: SyntaxToken<'_>,
        _cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        if let Some(ty) = Self::classification(token.kind()) {
            out.push(ClassifiedSpan::new(token.span(), ty));
        }
        Ok(())
    }
}

/// `//` and `/* */` comments.
#[derive(Copy, Clone, Debug, Default)]
pub struct CommentClassifier;

impl SyntaxClassifier for CommentClassifier {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn handles_token(&self, kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT)
    }

    fn classify_trivia(
        &self,
        trivia: SyntaxTrivia<'_>,
        _cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        out.push(ClassifiedSpan::new(trivia.span(), ClassificationType::COMMENT));
        Ok(())
    }
}

#[cfg(test)]
mod tests;
