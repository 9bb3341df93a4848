//! Bitsets of token kinds for lookahead and error recovery.

use corvid_syntax::SyntaxKind;

// Every token kind must have a bit.
const _: () = assert!(
    (SyntaxKind::EOF as u16) < 128,
    "TokenSet uses a u128 bitset; token kinds must be < 128"
);

/// Set of token kinds with O(1) membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct TokenSet(u128);

impl TokenSet {
    pub(crate) const EMPTY: TokenSet = TokenSet(0);

    #[must_use]
    pub(crate) const fn with(self, kind: SyntaxKind) -> Self {
        TokenSet(self.0 | (1u128 << kind as u16))
    }

    pub(crate) const fn of(kinds: &[SyntaxKind]) -> Self {
        let mut set = TokenSet::EMPTY;
        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    #[must_use]
    pub(crate) const fn union(self, other: Self) -> Self {
        TokenSet(self.0 | other.0)
    }

    pub(crate) const fn contains(&self, kind: SyntaxKind) -> bool {
        (kind as u16) < 128 && self.0 & (1u128 << kind as u16) != 0
    }
}

pub(crate) const MODIFIERS: TokenSet = TokenSet::of(&[
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::STATIC_KW,
    SyntaxKind::CONST_KW,
]);

pub(crate) const PREDEFINED_TYPES: TokenSet = TokenSet::of(&[
    SyntaxKind::VOID_KW,
    SyntaxKind::BOOL_KW,
    SyntaxKind::INT_KW,
    SyntaxKind::LONG_KW,
    SyntaxKind::DOUBLE_KW,
    SyntaxKind::CHAR_KW,
    SyntaxKind::STRING_KW,
    SyntaxKind::OBJECT_KW,
    SyntaxKind::VAR_KW,
]);

pub(crate) const LITERALS: TokenSet = TokenSet::of(&[
    SyntaxKind::INT_LITERAL,
    SyntaxKind::REAL_LITERAL,
    SyntaxKind::STRING_LITERAL,
    SyntaxKind::CHAR_LITERAL,
    SyntaxKind::TRUE_KW,
    SyntaxKind::FALSE_KW,
    SyntaxKind::NULL_KW,
]);

pub(crate) const PREFIX_OPS: TokenSet = TokenSet::of(&[
    SyntaxKind::BANG,
    SyntaxKind::MINUS,
    SyntaxKind::PLUS,
    SyntaxKind::TILDE,
    SyntaxKind::PLUS2,
    SyntaxKind::MINUS2,
]);

pub(crate) const EXPR_START: TokenSet = LITERALS
    .union(PREFIX_OPS)
    .union(PREDEFINED_TYPES)
    .union(TokenSet::of(&[
        SyntaxKind::IDENT,
        SyntaxKind::THIS_KW,
        SyntaxKind::BASE_KW,
        SyntaxKind::L_PAREN,
        SyntaxKind::NEW_KW,
        SyntaxKind::TYPEOF_KW,
    ]));

/// Tokens that start a statement on their own.
pub(crate) const STMT_KEYWORDS: TokenSet = TokenSet::of(&[
    SyntaxKind::L_BRACE,
    SyntaxKind::SEMICOLON,
    SyntaxKind::IF_KW,
    SyntaxKind::WHILE_KW,
    SyntaxKind::DO_KW,
    SyntaxKind::FOR_KW,
    SyntaxKind::SWITCH_KW,
    SyntaxKind::BREAK_KW,
    SyntaxKind::CONTINUE_KW,
    SyntaxKind::RETURN_KW,
    SyntaxKind::GOTO_KW,
    SyntaxKind::TRY_KW,
    SyntaxKind::THROW_KW,
    SyntaxKind::CONST_KW,
]);

/// Where statement-level recovery stops skipping.
pub(crate) const STMT_RECOVERY: TokenSet = STMT_KEYWORDS
    .union(TokenSet::of(&[SyntaxKind::R_BRACE, SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW]));
