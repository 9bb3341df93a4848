//! Classification through symbol information.
//!
//! Binding lives upstream; classifiers reach it through [`SemanticModel`].
//! [`DeclarationIndex`] is a model built from declarations alone, enough to
//! color uses of names declared in the same document.

mod index;

use corvid_ir::{CancellationToken, Cancelled};
use corvid_syntax::{SyntaxKind, SyntaxToken};

pub use index::DeclarationIndex;

use crate::{ClassificationContext, ClassificationType, ClassifiedSpan, SyntaxClassifier};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Class,
    Struct,
    Method,
    Field,
    Property,
    Parameter,
    Local,
    Label,
}

impl SymbolKind {
    pub fn classification(self) -> ClassificationType {
        match self {
            SymbolKind::Namespace => ClassificationType::NAMESPACE_NAME,
            SymbolKind::Class => ClassificationType::CLASS_NAME,
            SymbolKind::Struct => ClassificationType::STRUCT_NAME,
            SymbolKind::Method => ClassificationType::METHOD_NAME,
            SymbolKind::Field => ClassificationType::FIELD_NAME,
            SymbolKind::Property => ClassificationType::PROPERTY_NAME,
            SymbolKind::Parameter => ClassificationType::PARAMETER_NAME,
            SymbolKind::Local => ClassificationType::LOCAL_NAME,
            SymbolKind::Label => ClassificationType::LABEL_NAME,
        }
    }
}

/// What a name refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolInfo {
    pub kind: SymbolKind,
    pub is_static: bool,
}

impl SymbolInfo {
    pub fn new(kind: SymbolKind) -> Self {
        SymbolInfo {
            kind,
            is_static: false,
        }
    }

    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// Symbol information for the tree being classified.
pub trait SemanticModel: Send + Sync {
    /// The symbol `token` refers to, if it names one.
    fn symbol_at(
        &self,
        token: SyntaxToken<'_>,
        cancel: &CancellationToken,
    ) -> Result<Option<SymbolInfo>, Cancelled>;
}

fn symbol_of(
    token: SyntaxToken<'_>,
    cx: &ClassificationContext<'_>,
) -> Result<Option<SymbolInfo>, Cancelled> {
    match cx.semantic() {
        Some(model) => model.symbol_at(token, cx.cancel()),
        None => Ok(None),
    }
}

/// Identifiers by the kind of symbol they name.
#[derive(Copy, Clone, Debug, Default)]
pub struct NameClassifier;

impl SyntaxClassifier for NameClassifier {
    fn name(&self) -> &'static str {
        "names"
    }

    fn handles_token(&self, kind: SyntaxKind) -> bool {
        kind == SyntaxKind::IDENT
    }

    fn classify_token(
        &self,
        token: SyntaxToken<'_>,
        cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        if let Some(symbol) = symbol_of(token, cx)? {
            out.push(ClassifiedSpan::new(
                token.span(),
                symbol.kind.classification(),
            ));
        }
        Ok(())
    }
}

/// Adds `static symbol` to names of static members.
#[derive(Copy, Clone, Debug, Default)]
pub struct StaticSymbolClassifier;

impl SyntaxClassifier for StaticSymbolClassifier {
    fn name(&self) -> &'static str {
        "static symbols"
    }

    fn handles_token(&self, kind: SyntaxKind) -> bool {
        kind == SyntaxKind::IDENT
    }

    fn classify_token(
        &self,
        token: SyntaxToken<'_>,
        cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        if symbol_of(token, cx)?.is_some_and(|symbol| symbol.is_static) {
            out.push(ClassifiedSpan::new(
                token.span(),
                ClassificationType::STATIC_SYMBOL,
            ));
        }
        Ok(())
    }
}
