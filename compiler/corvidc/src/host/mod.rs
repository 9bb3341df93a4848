//! Open documents and the services that run over them.

mod document;
mod reclassify;

use std::path::Path;
use std::sync::Arc;

use corvid_cache::{CacheError, FileKey, MetadataCache};
use corvid_classify::semantic::{NameClassifier, StaticSymbolClassifier};
use corvid_classify::{classify, ClassifiedSpan, ClassifierRegistry, DeclarationIndex};
use corvid_diagnostic::{DiagnosticBag, DiagnosticSink};
use corvid_ir::{CancellationToken, Span};
use corvid_parse::{parse, reparse, Parse};
use corvid_syntax::{compute_change_range, ChangeRange, TextChange};
use rustc_hash::FxHashMap;

use crate::{HostError, ServicesConfig};

pub use document::{Document, DocumentId};
pub(crate) use reclassify::sort_spans;

/// Owner of every open document.
pub struct AnalysisHost {
    config: ServicesConfig,
    syntactic: ClassifierRegistry,
    semantic: ClassifierRegistry,
    files: MetadataCache<Parse>,
    documents: FxHashMap<DocumentId, Document>,
    next_id: u32,
}

impl AnalysisHost {
    pub fn new(config: ServicesConfig) -> Self {
        let syntactic =
            ClassifierRegistry::builtin(&config.classification.with_semantic(false));
        let semantic = if config.classification.semantic {
            ClassifierRegistry::new()
                .with(Arc::new(NameClassifier))
                .with(Arc::new(StaticSymbolClassifier))
        } else {
            ClassifierRegistry::new()
        };
        AnalysisHost {
            files: MetadataCache::new(&config.metadata_cache),
            config,
            syntactic,
            semantic,
            documents: FxHashMap::default(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &ServicesConfig {
        &self.config
    }

    /// Open an in-memory document.
    pub fn open(&mut self, text: &str) -> DocumentId {
        self.insert(Document::new(None, Arc::new(parse(text))))
    }

    /// Open the file at `path`.
    ///
    /// Opening a file that has not changed on disk since it was last opened
    /// shares the earlier parse, as long as some document still holds it.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn open_file(&mut self, path: &Path) -> Result<DocumentId, HostError> {
        let key = FileKey::for_file(path)?;
        let parse = self.files.get_or_load(&key, |path| {
            let text = std::fs::read_to_string(path).map_err(|e| CacheError::io(path, &e))?;
            Ok(parse(&text))
        })?;
        Ok(self.insert(Document::new(Some(path.to_path_buf()), parse)))
    }

    fn insert(&mut self, document: Document) -> DocumentId {
        let id = DocumentId::new(self.next_id);
        self.next_id += 1;
        self.documents.insert(id, document);
        tracing::debug!(%id, "opened document");
        id
    }

    pub fn close(&mut self, id: DocumentId) -> bool {
        self.documents.remove(&id).is_some()
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn documents(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    /// Apply `change` to the document and return what changed in its tree.
    ///
    /// A cached classification is updated by reclassifying only the region
    /// around the change. When the operation fails the document is left as
    /// it was.
    #[tracing::instrument(level = "debug", skip(self, change, cancel))]
    pub fn edit(
        &mut self,
        id: DocumentId,
        change: &TextChange,
        cancel: &CancellationToken,
    ) -> Result<ChangeRange, HostError> {
        let document = self
            .documents
            .get_mut(&id)
            .ok_or(HostError::UnknownDocument(id))?;
        let old = Arc::clone(&document.parse);
        let new = reparse(&old, change)?;
        let range = compute_change_range(old.green(), new.green(), &self.config.change_range, cancel)?;

        let classifications = match &document.classifications {
            Some(cached) if !range.is_empty() => {
                let (old_region, new_region) =
                    reclassify::dirty_region(old.syntax(), new.syntax(), range);
                Some(reclassify::reclassify(
                    cached,
                    range,
                    new.syntax(),
                    old_region,
                    new_region,
                    &self.syntactic,
                    cancel,
                )?)
            }
            _ => None,
        };

        document.parse = Arc::new(new);
        if classifications.is_some() {
            document.classifications = classifications;
        }
        document.version += 1;
        tracing::debug!(
            version = document.version,
            span = %range.span,
            new_len = range.new_len,
            "edited"
        );
        Ok(range)
    }

    /// Replace the document's text, as the smallest edit that produces it.
    pub fn set_text(
        &mut self,
        id: DocumentId,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<ChangeRange, HostError> {
        let document = self.document(id).ok_or(HostError::UnknownDocument(id))?;
        let change = TextChange::between(&document.text(), text);
        self.edit(id, &change, cancel)
    }

    /// Tags of everything in the document that intersects `span`, ordered
    /// by span.
    ///
    /// Syntactic tags come from the document's cache, computed on first use;
    /// name and static-symbol tags are computed from scratch.
    #[tracing::instrument(level = "debug", skip(self, cancel))]
    pub fn classify(
        &mut self,
        id: DocumentId,
        span: Span,
        cancel: &CancellationToken,
    ) -> Result<Vec<ClassifiedSpan>, HostError> {
        let document = self
            .documents
            .get_mut(&id)
            .ok_or(HostError::UnknownDocument(id))?;
        let root = document.parse.syntax();

        if document.classifications.is_none() {
            let mut spans = classify(root, &[root.full_span()], &self.syntactic, None, cancel)?;
            sort_spans(&mut spans);
            document.classifications = Some(spans);
        }
        let mut spans: Vec<ClassifiedSpan> = document
            .classifications
            .iter()
            .flatten()
            .filter(|classified| classified.span.intersects(span))
            .copied()
            .collect();

        if !self.semantic.is_empty() {
            let index = DeclarationIndex::build(root);
            spans.extend(classify(root, &[span], &self.semantic, Some(&index), cancel)?);
        }
        sort_spans(&mut spans);
        Ok(spans)
    }

    /// Parse diagnostics of the document, limited by the diagnostic
    /// configuration.
    pub fn diagnostics(&self, id: DocumentId) -> Result<DiagnosticBag, HostError> {
        let document = self.document(id).ok_or(HostError::UnknownDocument(id))?;
        let mut bag = DiagnosticBag::with_config(self.config.diagnostics.clone());
        for diagnostic in document.parse.errors() {
            bag.report(diagnostic.clone());
        }
        Ok(bag)
    }

    /// Number of file parses the metadata cache tracks.
    pub fn cached_files(&self) -> usize {
        self.files.len()
    }
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new(ServicesConfig::default())
    }
}
