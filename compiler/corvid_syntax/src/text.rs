//! Text edits.

use corvid_ir::Span;

use crate::green::text_width;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextChangeError {
    #[error("edit {span} extends past the end of the text ({len} bytes)")]
    OutOfBounds { span: Span, len: usize },
    #[error("edit {span} does not fall on character boundaries")]
    NotCharBoundary { span: Span },
}

/// Replacement of `span` (in the old text) by `new_text`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextChange {
    pub span: Span,
    pub new_text: String,
}

impl TextChange {
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        TextChange {
            span,
            new_text: new_text.into(),
        }
    }

    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        Self::new(Span::point(at), text)
    }

    pub fn delete(span: Span) -> Self {
        Self::new(span, String::new())
    }

    /// Smallest single edit turning `old` into `new`.
    pub fn between(old: &str, new: &str) -> Self {
        let prefix = old
            .char_indices()
            .zip(new.chars())
            .find(|((_, a), b)| a != b)
            .map_or(old.len().min(new.len()), |((i, _), _)| i);
        let mut suffix = 0;
        for (a, b) in old[prefix..].chars().rev().zip(new[prefix..].chars().rev()) {
            if a != b {
                break;
            }
            suffix += a.len_utf8();
        }
        let start = text_width(&old[..prefix]);
        let old_end = text_width(&old[..old.len() - suffix]);
        TextChange::new(
            Span::new(start, old_end),
            &new[prefix..new.len() - suffix],
        )
    }

    pub fn new_len(&self) -> u32 {
        text_width(&self.new_text)
    }

    /// Net change in document length.
    pub fn delta(&self) -> i64 {
        i64::from(self.new_len()) - i64::from(self.span.len())
    }

    /// Span of the inserted text in the new document.
    pub fn new_span(&self) -> Span {
        Span::at(self.span.start, self.new_len())
    }

    /// `span` (old text) ends at or before the edit.
    pub fn is_before(&self, span: Span) -> bool {
        span.end <= self.span.start
    }

    /// `span` (old text) starts at or after the end of the edit.
    pub fn is_after(&self, span: Span) -> bool {
        span.start >= self.span.end
    }

    pub fn apply(&self, text: &str) -> Result<String, TextChangeError> {
        let range = self.span.to_range();
        if range.end > text.len() {
            return Err(TextChangeError::OutOfBounds {
                span: self.span,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(range.start) || !text.is_char_boundary(range.end) {
            return Err(TextChangeError::NotCharBoundary { span: self.span });
        }
        let mut out = String::with_capacity(text.len() - range.len() + self.new_text.len());
        out.push_str(&text[..range.start]);
        out.push_str(&self.new_text);
        out.push_str(&text[range.end..]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn insert_delete_replace() {
        let text = "int x;";
        assert_eq!(TextChange::insert(4, "yz").apply(text), Ok("int yzx;".to_owned()));
        assert_eq!(TextChange::delete(Span::new(3, 5)).apply(text), Ok("int;".to_owned()));
        let replace = TextChange::new(Span::new(0, 3), "long");
        assert_eq!(replace.apply(text), Ok("long x;".to_owned()));
        assert_eq!(replace.delta(), 1);
        assert_eq!(replace.new_span(), Span::new(0, 4));
    }

    #[test]
    fn apply_rejects_bad_spans() {
        assert!(matches!(
            TextChange::insert(10, "a").apply("abc"),
            Err(TextChangeError::OutOfBounds { .. })
        ));
        assert!(matches!(
            TextChange::insert(1, "a").apply("é"),
            Err(TextChangeError::NotCharBoundary { .. })
        ));
    }

    #[test]
    fn between_finds_minimal_edit() {
        let change = TextChange::between("int count = 1;", "int counter = 1;");
        assert_eq!(change, TextChange::insert(9, "er"));
        assert_eq!(change.apply("int count = 1;"), Ok("int counter = 1;".to_owned()));

        let same = TextChange::between("abc", "abc");
        assert_eq!(same, TextChange::insert(3, ""));
    }

    #[test]
    fn between_does_not_overlap_prefix_and_suffix() {
        let change = TextChange::between("aa", "aaa");
        assert_eq!(change.apply("aa"), Ok("aaa".to_owned()));
        assert_eq!(change.span.len() + 2, change.new_len() + 1);
    }

    #[test]
    fn before_and_after_are_exclusive() {
        let change = TextChange::new(Span::new(10, 20), "x");
        assert!(change.is_before(Span::new(0, 10)));
        assert!(!change.is_before(Span::new(5, 15)));
        assert!(change.is_after(Span::new(20, 30)));
        assert!(!change.is_after(Span::new(15, 25)));
    }
}
