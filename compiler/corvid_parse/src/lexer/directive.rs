//! Preprocessor directives as structured trivia.
//!
//! `#region Setup` becomes a `REGION_DIRECTIVE` node holding a `HASH` token, a
//! `DIRECTIVE_KEYWORD` token and a `DIRECTIVE_MESSAGE` token, so classifiers
//! can color the pieces individually. Directives do not affect parsing.

use corvid_diagnostic::{Diagnostic, ErrorCode};
use corvid_ir::Span;
use corvid_syntax::{GreenElement, GreenNode, GreenToken, SyntaxKind, Trivia};

fn directive_kind(keyword: &str) -> Option<SyntaxKind> {
    let kind = match keyword {
        "region" => SyntaxKind::REGION_DIRECTIVE,
        "endregion" => SyntaxKind::END_REGION_DIRECTIVE,
        "if" => SyntaxKind::IF_DIRECTIVE,
        "else" => SyntaxKind::ELSE_DIRECTIVE,
        "endif" => SyntaxKind::ENDIF_DIRECTIVE,
        "define" => SyntaxKind::DEFINE_DIRECTIVE,
        "pragma" => SyntaxKind::PRAGMA_DIRECTIVE,
        _ => return None,
    };
    Some(kind)
}

/// Split off leading horizontal whitespace.
fn split_whitespace(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !matches!(c, ' ' | '\t' | '\r' | '\u{c}'))
        .unwrap_or(text.len());
    text.split_at(end)
}

fn whitespace_trivia(text: &str) -> Vec<Trivia> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Trivia::whitespace(text)]
    }
}

/// Build the trivia for one directive line (`text` starts with `#`, no newline).
pub(super) fn directive_trivia(text: &str, span: Span, errors: &mut Vec<Diagnostic>) -> Trivia {
    debug_assert!(text.starts_with('#'));
    let rest = text.get(1..).unwrap_or_default();
    let (after_hash, rest) = split_whitespace(rest);
    let keyword_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let (keyword, rest) = rest.split_at(keyword_len);
    let (after_keyword, message) = split_whitespace(rest);
    let trimmed = message.trim_end();
    let after_message = &message[trimmed.len()..];

    let kind = directive_kind(keyword).unwrap_or_else(|| {
        errors.push(
            Diagnostic::warning(ErrorCode::E1007)
                .with_message(format!("unknown preprocessor directive `#{keyword}`"))
                .with_label(span, "directive ignored"),
        );
        SyntaxKind::BAD_DIRECTIVE
    });

    let mut children: Vec<GreenElement> = vec![GreenToken::new(
        SyntaxKind::HASH,
        "#",
        Vec::new(),
        whitespace_trivia(after_hash),
    )
    .into()];
    let keyword_token = if keyword.is_empty() {
        GreenToken::missing(SyntaxKind::DIRECTIVE_KEYWORD)
    } else {
        GreenToken::new(
            SyntaxKind::DIRECTIVE_KEYWORD,
            keyword,
            Vec::new(),
            whitespace_trivia(after_keyword),
        )
    };
    children.push(keyword_token.into());
    if !trimmed.is_empty() {
        children.push(
            GreenToken::new(
                SyntaxKind::DIRECTIVE_MESSAGE,
                trimmed,
                Vec::new(),
                whitespace_trivia(after_message),
            )
            .into(),
        );
    }

    Trivia::structured(GreenNode::new(kind, children))
}
