use corvid_ir::{CancellationToken, Cancelled};
use corvid_syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use rustc_hash::FxHashMap;

use super::{SemanticModel, SymbolInfo, SymbolKind};

/// Names declared in one document, looked up by text.
///
/// Scopes are ignored: the first declaration of a name in document order
/// wins. Constants are static. Namespace names come from `using` directives.
#[derive(Clone, Debug, Default)]
pub struct DeclarationIndex {
    symbols: FxHashMap<String, SymbolInfo>,
}

fn has_modifier(node: SyntaxNode<'_>, modifier: SyntaxKind) -> bool {
    node.child_token(modifier).is_some()
}

impl DeclarationIndex {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build(root: SyntaxNode<'_>) -> Self {
        let mut index = DeclarationIndex::default();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            index.declare_from(node);
            stack.extend(node.children().rev().filter_map(SyntaxElement::into_node));
        }
        tracing::debug!(symbols = index.len(), "indexed declarations");
        index
    }

    fn declare_from(&mut self, node: SyntaxNode<'_>) {
        let is_static = has_modifier(node, SyntaxKind::STATIC_KW);
        match node.kind() {
            SyntaxKind::USING_DIRECTIVE => {
                for name in node.child_tokens().filter(|t| t.kind() == SyntaxKind::IDENT) {
                    self.declare(name, SymbolInfo::new(SymbolKind::Namespace));
                }
            }
            SyntaxKind::CLASS_DECL => {
                let kind = if has_modifier(node, SyntaxKind::STRUCT_KW) {
                    SymbolKind::Struct
                } else {
                    SymbolKind::Class
                };
                self.declare_name(node, SymbolInfo::new(kind).with_static(is_static));
            }
            SyntaxKind::METHOD_DECL => {
                self.declare_name(
                    node,
                    SymbolInfo::new(SymbolKind::Method).with_static(is_static),
                );
            }
            SyntaxKind::FIELD_DECL => {
                let is_static = is_static || has_modifier(node, SyntaxKind::CONST_KW);
                let info = SymbolInfo::new(SymbolKind::Field).with_static(is_static);
                for declarator in node.child_nodes() {
                    if declarator.kind() == SyntaxKind::VARIABLE_DECLARATOR {
                        self.declare_name(declarator, info);
                    }
                }
            }
            SyntaxKind::PARAM => self.declare_name(node, SymbolInfo::new(SymbolKind::Parameter)),
            SyntaxKind::LOCAL_DECL_STMT => {
                for declarator in node.child_nodes() {
                    if declarator.kind() == SyntaxKind::VARIABLE_DECLARATOR {
                        self.declare_name(declarator, SymbolInfo::new(SymbolKind::Local));
                    }
                }
            }
            SyntaxKind::CATCH_CLAUSE => {
                self.declare_name(node, SymbolInfo::new(SymbolKind::Local));
            }
            SyntaxKind::LABELED_STMT => self.declare_name(node, SymbolInfo::new(SymbolKind::Label)),
            _ => {}
        }
    }

    fn declare_name(&mut self, node: SyntaxNode<'_>, info: SymbolInfo) {
        if let Some(name) = node.child_token(SyntaxKind::IDENT) {
            self.declare(name, info);
        }
    }

    fn declare(&mut self, name: SyntaxToken<'_>, info: SymbolInfo) {
        if name.is_missing() {
            return;
        }
        self.symbols.entry(name.text().to_owned()).or_insert(info);
    }

    pub fn get(&self, name: &str) -> Option<SymbolInfo> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SemanticModel for DeclarationIndex {
    fn symbol_at(
        &self,
        token: SyntaxToken<'_>,
        cancel: &CancellationToken,
    ) -> Result<Option<SymbolInfo>, Cancelled> {
        cancel.check()?;
        if token.kind() != SyntaxKind::IDENT {
            return Ok(None);
        }
        Ok(self.get(token.text()))
    }
}
