//! The characters a string literal denotes, each mapped back to its source.

use corvid_ir::Span;
use corvid_syntax::{SyntaxKind, SyntaxToken};

/// One character of a literal's value and the source text spelling it
/// (`\n` spans two bytes, `A` six).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VirtualChar {
    pub ch: char,
    pub span: Span,
}

/// Decode the contents of a string literal token.
///
/// `None` for anything other than a terminated literal with valid escapes.
pub fn decode_string_literal(token: SyntaxToken<'_>) -> Option<Vec<VirtualChar>> {
    if token.kind() != SyntaxKind::STRING_LITERAL {
        return None;
    }
    let text = token.text();
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let base = token.span().start + 1;

    let mut chars = Vec::with_capacity(inner.len());
    let mut iter = inner.char_indices().peekable();
    while let Some((start, ch)) = iter.next() {
        let value = match ch {
            '"' => return None,
            '\\' => {
                let (_, escape) = iter.next()?;
                match escape {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    'b' => '\u{8}',
                    'f' => '\u{c}',
                    'v' => '\u{b}',
                    'a' => '\u{7}',
                    '\\' | '"' | '\'' => escape,
                    'u' => {
                        let mut code = 0;
                        for _ in 0..4 {
                            let (_, digit) = iter.next()?;
                            code = code * 16 + digit.to_digit(16)?;
                        }
                        char::from_u32(code)?
                    }
                    _ => return None,
                }
            }
            _ => ch,
        };
        let end = iter.peek().map_or(inner.len(), |&(next, _)| next);
        let start = u32::try_from(start).ok()?;
        let end = u32::try_from(end).ok()?;
        chars.push(VirtualChar {
            ch: value,
            span: Span::new(base + start, base + end),
        });
    }
    Some(chars)
}
