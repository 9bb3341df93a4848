//! JSON inside string literals.
//!
//! A literal is treated as JSON when a `lang=json` (or `language=json`)
//! comment sits right before it, or when its contents look like an object or
//! an array. Marked literals are classified whatever they contain; unmarked
//! ones only when they lex as well-formed JSON, so `"[x]"` stays a string.
//!
//! Lexing runs over the decoded characters, so escapes inside the literal
//! are transparent and every classified span covers the source spelling.

use corvid_ir::{Cancelled, Span};
use corvid_syntax::{SyntaxKind, SyntaxToken, SyntaxTrivia};

use super::virtual_chars::{decode_string_literal, VirtualChar};
use super::EmbeddedLanguage;
use crate::{ClassificationContext, ClassificationType, ClassifiedSpan};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum JsonKind {
    Punctuation(char),
    String { terminated: bool },
    Number,
    /// `true`, `false` or `null`.
    Keyword,
    Word,
    Comment { terminated: bool },
    Unknown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct JsonToken {
    kind: JsonKind,
    span: Span,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct JsonLanguage;

fn is_json_marker(trivia: SyntaxTrivia<'_>) -> bool {
    if !matches!(
        trivia.kind(),
        SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT
    ) {
        return false;
    }
    let compact: String = trivia
        .text()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    compact.contains("lang=json") || compact.contains("language=json")
}

impl JsonLanguage {
    /// A marker comment in the literal's leading trivia or in the trailing
    /// trivia of the token before it.
    fn has_marker(token: SyntaxToken<'_>, cx: &ClassificationContext<'_>) -> bool {
        token.leading_trivia().any(is_json_marker)
            || cx
                .previous_token(token)
                .is_some_and(|previous| previous.trailing_trivia().any(is_json_marker))
    }

    fn looks_like_json(token: SyntaxToken<'_>) -> bool {
        let text = token.text();
        let inner = text
            .strip_prefix('"')
            .and_then(|text| text.strip_suffix('"'))
            .unwrap_or_default()
            .trim();
        (inner.starts_with('{') && inner.ends_with('}'))
            || (inner.starts_with('[') && inner.ends_with(']'))
    }
}

impl EmbeddedLanguage for JsonLanguage {
    fn name(&self) -> &'static str {
        "json"
    }

    fn may_contain(&self, token: SyntaxToken<'_>, cx: &ClassificationContext<'_>) -> bool {
        Self::looks_like_json(token) || Self::has_marker(token, cx)
    }

    fn classify(
        &self,
        token: SyntaxToken<'_>,
        cx: &ClassificationContext<'_>,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        cx.cancel().check()?;
        let Some(chars) = decode_string_literal(token) else {
            return Ok(());
        };
        let tokens = lex(&chars);
        if !Self::has_marker(token, cx) && !is_well_formed(&tokens) {
            return Ok(());
        }
        classify_tokens(&tokens, out);
        Ok(())
    }
}

fn lex(chars: &[VirtualChar]) -> Vec<JsonToken> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let start = i;
        let ch = chars[i].ch;
        i += 1;
        let kind = match ch {
            _ if ch.is_whitespace() => continue,
            '{' | '}' | '[' | ']' | ',' | ':' => JsonKind::Punctuation(ch),
            '"' | '\'' => {
                let mut terminated = false;
                while i < chars.len() {
                    let c = chars[i].ch;
                    i += 1;
                    if c == '\\' {
                        i += 1;
                    } else if c == ch {
                        terminated = true;
                        break;
                    }
                }
                i = i.min(chars.len());
                JsonKind::String { terminated }
            }
            '/' if chars.get(i).is_some_and(|c| c.ch == '/') => {
                while i < chars.len() && chars[i].ch != '\n' {
                    i += 1;
                }
                JsonKind::Comment { terminated: true }
            }
            '/' if chars.get(i).is_some_and(|c| c.ch == '*') => {
                i += 1;
                let mut terminated = false;
                while i < chars.len() {
                    if chars[i].ch == '*' && chars.get(i + 1).is_some_and(|c| c.ch == '/') {
                        i += 2;
                        terminated = true;
                        break;
                    }
                    i += 1;
                }
                JsonKind::Comment { terminated }
            }
            '-' | '0'..='9' => {
                while i < chars.len()
                    && matches!(chars[i].ch, '0'..='9' | '.' | 'e' | 'E' | '+' | '-')
                {
                    i += 1;
                }
                JsonKind::Number
            }
            _ if ch.is_alphabetic() || ch == '_' || ch == '$' => {
                while i < chars.len()
                    && (chars[i].ch.is_alphanumeric() || matches!(chars[i].ch, '_' | '$'))
                {
                    i += 1;
                }
                let word: String = chars[start..i].iter().map(|c| c.ch).collect();
                if matches!(word.as_str(), "true" | "false" | "null") {
                    JsonKind::Keyword
                } else {
                    JsonKind::Word
                }
            }
            _ => JsonKind::Unknown,
        };
        tokens.push(JsonToken {
            kind,
            span: chars[start].span.merge(chars[i - 1].span),
        });
    }
    tokens
}

/// Strict JSON: terminated strings, no comments or bare words, balanced
/// brackets.
fn is_well_formed(tokens: &[JsonToken]) -> bool {
    let mut open = Vec::new();
    for token in tokens {
        match token.kind {
            JsonKind::Punctuation(c @ ('{' | '[')) => open.push(c),
            JsonKind::Punctuation(close @ ('}' | ']')) => {
                let expected = if close == '}' { '{' } else { '[' };
                if open.pop() != Some(expected) {
                    return false;
                }
            }
            JsonKind::String { terminated: false }
            | JsonKind::Comment { .. }
            | JsonKind::Word
            | JsonKind::Unknown => return false,
            _ => {}
        }
    }
    open.is_empty()
}

fn classify_tokens(tokens: &[JsonToken], out: &mut Vec<ClassifiedSpan>) {
    for (index, token) in tokens.iter().enumerate() {
        let followed_by_colon = tokens[index + 1..]
            .iter()
            .find(|next| !matches!(next.kind, JsonKind::Comment { .. }))
            .is_some_and(|next| next.kind == JsonKind::Punctuation(':'));
        let ty = match token.kind {
            JsonKind::Punctuation(_) => ClassificationType::JSON_PUNCTUATION,
            JsonKind::String { .. } | JsonKind::Keyword | JsonKind::Word if followed_by_colon => {
                ClassificationType::JSON_PROPERTY_NAME
            }
            JsonKind::String { .. } => ClassificationType::JSON_STRING,
            JsonKind::Number => ClassificationType::JSON_NUMBER,
            JsonKind::Keyword => ClassificationType::JSON_KEYWORD,
            JsonKind::Comment { .. } => ClassificationType::JSON_COMMENT,
            JsonKind::Word | JsonKind::Unknown => ClassificationType::JSON_TEXT,
        };
        out.push(ClassifiedSpan::new(token.span, ty));
    }
}
