//! Classifier lookup by syntax kind.
//!
//! Each registered classifier is asked once, for every [`SyntaxKind`], whether
//! it handles nodes or tokens of that kind. The answers are stored in two
//! tables indexed by kind, so the worker's per-element lookup is a slice
//! index and never inspects the classifier again.

use std::fmt;
use std::sync::Arc;

use corvid_syntax::SyntaxKind;
use smallvec::SmallVec;

use crate::embedded::EmbeddedLanguageClassifier;
use crate::semantic::{NameClassifier, StaticSymbolClassifier};
use crate::syntactic;
use crate::SyntaxClassifier;

type ClassifierList = SmallVec<[Arc<dyn SyntaxClassifier>; 2]>;

/// Which built-in classifier groups [`ClassifierRegistry::builtin`] installs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClassificationOptions {
    /// Name and static-symbol classification through a semantic model.
    pub semantic: bool,
    /// Classification of languages embedded in string literals.
    pub embedded_languages: bool,
}

impl Default for ClassificationOptions {
    fn default() -> Self {
        ClassificationOptions {
            semantic: true,
            embedded_languages: true,
        }
    }
}

impl ClassificationOptions {
    /// Syntactic classifiers only.
    pub fn syntactic() -> Self {
        ClassificationOptions {
            semantic: false,
            embedded_languages: false,
        }
    }

    #[must_use]
    pub fn with_semantic(mut self, semantic: bool) -> Self {
        self.semantic = semantic;
        self
    }

    #[must_use]
    pub fn with_embedded_languages(mut self, embedded_languages: bool) -> Self {
        self.embedded_languages = embedded_languages;
        self
    }
}

/// Ordered classifiers per node kind and per token kind.
#[derive(Clone)]
pub struct ClassifierRegistry {
    classifiers: Vec<Arc<dyn SyntaxClassifier>>,
    nodes: Vec<ClassifierList>,
    tokens: Vec<ClassifierList>,
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierRegistry {
    /// A registry without classifiers.
    pub fn new() -> Self {
        let empty = || vec![ClassifierList::new(); SyntaxKind::ALL.len()];
        ClassifierRegistry {
            classifiers: Vec::new(),
            nodes: empty(),
            tokens: empty(),
        }
    }

    /// The built-in classifiers selected by `options`: syntactic first, then
    /// semantic, then embedded languages.
    pub fn builtin(options: &ClassificationOptions) -> Self {
        let mut registry = Self::new();
        for classifier in syntactic::classifiers() {
            registry.register(classifier);
        }
        if options.semantic {
            registry.register(Arc::new(NameClassifier));
            registry.register(Arc::new(StaticSymbolClassifier));
        }
        if options.embedded_languages {
            registry.register(Arc::new(EmbeddedLanguageClassifier::with_default_languages()));
        }
        tracing::debug!(
            classifiers = registry.len(),
            semantic = options.semantic,
            embedded = options.embedded_languages,
            "built classifier registry"
        );
        registry
    }

    /// Append `classifier`; it runs after every classifier registered
    /// before it for the kinds it handles.
    pub fn register(&mut self, classifier: Arc<dyn SyntaxClassifier>) -> &mut Self {
        for kind in SyntaxKind::ALL {
            if classifier.handles_node(kind) {
                self.nodes[kind as usize].push(Arc::clone(&classifier));
            }
            if classifier.handles_token(kind) {
                self.tokens[kind as usize].push(Arc::clone(&classifier));
            }
        }
        self.classifiers.push(classifier);
        self
    }

    #[must_use]
    pub fn with(mut self, classifier: Arc<dyn SyntaxClassifier>) -> Self {
        self.register(classifier);
        self
    }

    #[inline]
    pub fn node_classifiers(&self, kind: SyntaxKind) -> &[Arc<dyn SyntaxClassifier>] {
        &self.nodes[kind as usize]
    }

    /// Classifiers for a token or trivia kind.
    #[inline]
    pub fn token_classifiers(&self, kind: SyntaxKind) -> &[Arc<dyn SyntaxClassifier>] {
        &self.tokens[kind as usize]
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classifiers.iter().map(|classifier| classifier.name())
    }
}

impl fmt::Debug for ClassifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
