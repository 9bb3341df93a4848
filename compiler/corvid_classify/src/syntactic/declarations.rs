use corvid_ir::Cancelled;
use corvid_syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use smallvec::SmallVec;

use crate::{ClassificationContext, ClassificationType, ClassifiedSpan, SyntaxClassifier};

/// Names at their declaration site, classified by the declaring node.
#[derive(Copy, Clone, Debug, Default)]
pub struct DeclarationClassifier;

fn name_token(node: SyntaxNode<'_>) -> Option<SyntaxToken<'_>> {
    node.child_token(SyntaxKind::IDENT)
}

fn declarators(node: SyntaxNode<'_>) -> impl Iterator<Item = SyntaxToken<'_>> {
    node.child_nodes()
        .filter(|child| child.kind() == SyntaxKind::VARIABLE_DECLARATOR)
        .filter_map(name_token)
}

impl SyntaxClassifier for DeclarationClassifier {
    fn name(&self) -> &'static str {
        "declarations"
    }

    fn handles_node(&self, kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::CLASS_DECL
                | SyntaxKind::CONSTRUCTOR_DECL
                | SyntaxKind::METHOD_DECL
                | SyntaxKind::FIELD_DECL
                | SyntaxKind::PARAM
                | SyntaxKind::LOCAL_DECL_STMT
                | SyntaxKind::CATCH_CLAUSE
                | SyntaxKind::LABELED_STMT
                | SyntaxKind::GOTO_STMT
        )
    }

    fn classify_node(
        &self,
        node: SyntaxNode<'_>,
        _cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        let (names, ty): (SmallVec<[SyntaxToken<'_>; 2]>, _) = match node.kind() {
            SyntaxKind::CLASS_DECL => {
                let ty = if node.child_token(SyntaxKind::STRUCT_KW).is_some() {
                    ClassificationType::STRUCT_NAME
                } else {
                    ClassificationType::CLASS_NAME
                };
                (name_token(node).into_iter().collect(), ty)
            }
            // A constructor is named after its class.
            SyntaxKind::CONSTRUCTOR_DECL => (
                name_token(node).into_iter().collect(),
                ClassificationType::CLASS_NAME,
            ),
            SyntaxKind::METHOD_DECL => (
                name_token(node).into_iter().collect(),
                ClassificationType::METHOD_NAME,
            ),
            SyntaxKind::FIELD_DECL => (declarators(node).collect(), ClassificationType::FIELD_NAME),
            SyntaxKind::PARAM => (
                name_token(node).into_iter().collect(),
                ClassificationType::PARAMETER_NAME,
            ),
            SyntaxKind::LOCAL_DECL_STMT => {
                (declarators(node).collect(), ClassificationType::LOCAL_NAME)
            }
            SyntaxKind::CATCH_CLAUSE => (
                name_token(node).into_iter().collect(),
                ClassificationType::LOCAL_NAME,
            ),
            SyntaxKind::LABELED_STMT | SyntaxKind::GOTO_STMT => (
                name_token(node).into_iter().collect(),
                ClassificationType::LABEL_NAME,
            ),
            _ => return Ok(()),
        };
        out.extend(
            names
                .into_iter()
                .map(|name| ClassifiedSpan::new(name.span(), ty)),
        );
        Ok(())
    }
}
