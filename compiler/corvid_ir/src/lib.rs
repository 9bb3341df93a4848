//! Corvid IR - core data structures shared by every compiler stage.
//!
//! - [`Span`] byte ranges into source text
//! - [`Name`] interned identifiers backed by [`StringInterner`]
//! - [`CancellationToken`] cooperative cancellation for long-running services
//! - [`symbols`] the symbol table consumed by lowering
//! - [`bound`] the flat, arena-allocated bound tree
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: strings become `Name(u32)`, types become `TypeId(u32)`
//! - **Flatten Everything**: bound nodes are addressed by `BoundId(u32)`, child
//!   lists are ranges into a shared list
//! - **Tag at construction**: node flags are fixed when a node is allocated

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

/// Defines a `u32` index newtype with an `INVALID` sentinel.
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for "no value".
            pub const INVALID: Self = Self(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }
    )* };
}

pub mod bound;
mod cancel;
mod interner;
mod name;
mod span;
pub mod symbols;

pub use cancel::{CancellationToken, Cancelled};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
