//! Bound tree: semantically resolved nodes consumed by lowering.
//!
//! Nodes live in a [`BoundArena`] as struct-of-arrays and are addressed by
//! [`BoundId`]. Child lists are [`BoundRange`]s into one flat list, so a node
//! is `Copy` and comparing two nodes never walks a tree.
//!
//! Flags are fixed at allocation. A lowering pass that needs a differently
//! tagged node allocates a new one.

mod arena;
mod dump;
mod kind;

use bitflags::bitflags;

use crate::symbols::FieldId;
use crate::{Name, Span};

pub use arena::BoundArena;
pub use dump::BoundDumper;
pub use kind::BoundKind;

define_id!(
    /// Index of a node in a [`BoundArena`].
    BoundId,
);

/// Defines a `(start, len)` range into one of the arena's flat lists.
macro_rules! define_range {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        #[repr(C)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            #[inline]
            pub(crate) fn to_range(self) -> std::ops::Range<usize> {
                self.start as usize..self.start as usize + self.len as usize
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({}..{})", stringify!($name), self.start, self.start + self.len)
            }
        }
    )* };
}

define_range!(
    /// Range of node IDs (arguments, statements, sections).
    BoundRange,
    /// Range of locals declared by a block or sequence.
    LocalRange,
);

bitflags! {
    /// Construction-time tags of a bound node.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BoundFlags: u8 {
        /// Fabricated by lowering. Sequence-point insertion and debug info skip it.
        const COMPILER_GENERATED = 1;
        /// Node or a descendant failed to bind or lower.
        const HAS_ERRORS = 1 << 1;
    }
}

/// Compile-time constant. Doubles are stored as bits to keep `Eq + Hash`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(u64),
    Char(char),
    Str(Name),
}

impl ConstValue {
    pub fn double(value: f64) -> Self {
        ConstValue::Double(value.to_bits())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    BitAnd,
    BitOr,
    Xor,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::Xor => "^",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
        }
    }

    /// Produces `bool` regardless of operand types.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    BitNot,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Initializer of a field or a top-level statement, in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoundInitializer {
    /// `field = value`, attributed to the field's declarator.
    Field {
        field: FieldId,
        value: BoundId,
        declarator: Span,
    },
    /// A top-level statement of a script or interactive submission.
    GlobalStatement { statement: BoundId },
}
