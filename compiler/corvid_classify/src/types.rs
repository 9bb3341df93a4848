//! Classification tags and classified spans.

use std::fmt;

use corvid_ir::Span;

/// A presentation tag such as `keyword` or `class name`.
///
/// Tags are compared by their text. An empty tag means "no classification"
/// and is never reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassificationType(&'static str);

impl ClassificationType {
    pub const KEYWORD: Self = Self("keyword");
    pub const CONTROL_KEYWORD: Self = Self("keyword - control");
    pub const IDENTIFIER: Self = Self("identifier");
    pub const NUMBER: Self = Self("number");
    pub const STRING: Self = Self("string");
    pub const OPERATOR: Self = Self("operator");
    pub const PUNCTUATION: Self = Self("punctuation");
    pub const COMMENT: Self = Self("comment");
    pub const PREPROCESSOR_KEYWORD: Self = Self("preprocessor keyword");
    pub const PREPROCESSOR_TEXT: Self = Self("preprocessor text");

    pub const CLASS_NAME: Self = Self("class name");
    pub const STRUCT_NAME: Self = Self("struct name");
    pub const NAMESPACE_NAME: Self = Self("namespace name");
    pub const METHOD_NAME: Self = Self("method name");
    pub const FIELD_NAME: Self = Self("field name");
    pub const PROPERTY_NAME: Self = Self("property name");
    pub const PARAMETER_NAME: Self = Self("parameter name");
    pub const LOCAL_NAME: Self = Self("local name");
    pub const LABEL_NAME: Self = Self("label name");
    /// Additive: reported next to the name classification of a static member.
    pub const STATIC_SYMBOL: Self = Self("static symbol");

    pub const JSON_PROPERTY_NAME: Self = Self("json - property name");
    pub const JSON_STRING: Self = Self("json - string");
    pub const JSON_NUMBER: Self = Self("json - number");
    pub const JSON_KEYWORD: Self = Self("json - keyword");
    pub const JSON_PUNCTUATION: Self = Self("json - punctuation");
    pub const JSON_COMMENT: Self = Self("json - comment");
    pub const JSON_TEXT: Self = Self("json - text");

    pub const fn new(tag: &'static str) -> Self {
        ClassificationType(tag)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClassificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A `(span, tag)` pair produced by a classifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassifiedSpan {
    pub span: Span,
    pub ty: ClassificationType,
}

impl ClassifiedSpan {
    pub fn new(span: Span, ty: ClassificationType) -> Self {
        ClassifiedSpan { span, ty }
    }
}

impl fmt::Display for ClassifiedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}) {}", self.span.start, self.span.end, self.ty)
    }
}
