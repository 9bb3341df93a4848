use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use corvid_classify::ClassifiedSpan;
use corvid_parse::Parse;
use corvid_syntax::SyntaxNode;

/// Handle of an open document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u32);

impl DocumentId {
    pub const fn new(raw: u32) -> Self {
        DocumentId(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One open document: its latest parse and, once requested, its syntactic
/// classification sorted by span.
#[derive(Debug)]
pub struct Document {
    pub(super) path: Option<PathBuf>,
    pub(super) version: u32,
    pub(super) parse: Arc<Parse>,
    pub(super) classifications: Option<Vec<ClassifiedSpan>>,
}

impl Document {
    pub(super) fn new(path: Option<PathBuf>, parse: Arc<Parse>) -> Self {
        Document {
            path,
            version: 0,
            parse,
            classifications: None,
        }
    }

    /// The file the document was opened from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of edits applied since the document was opened.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn parse(&self) -> &Arc<Parse> {
        &self.parse
    }

    pub fn syntax(&self) -> SyntaxNode<'_> {
        self.parse.syntax()
    }

    pub fn text(&self) -> String {
        self.parse.text()
    }

    /// The cached syntactic classification, if it has been computed.
    pub fn cached_classifications(&self) -> Option<&[ClassifiedSpan]> {
        self.classifications.as_deref()
    }
}
