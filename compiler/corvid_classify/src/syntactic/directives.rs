use corvid_ir::Cancelled;
use corvid_syntax::{SyntaxKind, SyntaxNode};

use crate::{ClassificationContext, ClassificationType, ClassifiedSpan, SyntaxClassifier};

/// Preprocessor directives: `#` and the keyword as one preprocessor-keyword
/// span, the rest of the line as preprocessor text.
#[derive(Copy, Clone, Debug, Default)]
pub struct DirectiveClassifier;

impl SyntaxClassifier for DirectiveClassifier {
    fn name(&self) -> &'static str {
        "directives"
    }

    fn handles_node(&self, kind: SyntaxKind) -> bool {
        kind.is_directive()
    }

    fn classify_node(
        &self,
        node: SyntaxNode<'_>,
        _cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        let Some(hash) = node.child_token(SyntaxKind::HASH) else {
            return Ok(());
        };
        let keyword = match node.child_token(SyntaxKind::DIRECTIVE_KEYWORD) {
            Some(keyword) if !keyword.is_missing() => hash.span().merge(keyword.span()),
            _ => hash.span(),
        };
        out.push(ClassifiedSpan::new(
            keyword,
            ClassificationType::PREPROCESSOR_KEYWORD,
        ));
        if let Some(message) = node.child_token(SyntaxKind::DIRECTIVE_MESSAGE) {
            out.push(ClassifiedSpan::new(
                message.span(),
                ClassificationType::PREPROCESSOR_TEXT,
            ));
        }
        Ok(())
    }
}
