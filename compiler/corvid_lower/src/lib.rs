//! Corvid lowering.
//!
//! Rewrites bound trees into the simplified form later stages consume:
//!
//! - [`SyntheticFactory`] builds compiler-generated nodes attributed to one
//!   syntax span and resolves the library members lowering depends on
//! - [`rewrite_constructor_initializers`] turns field and global-statement
//!   initializers into the statements prepended to a constructor body
//! - [`find_unmatched_labels`] reports the jump targets a subtree references
//!   without declaring, which decides whether it may be moved
//! - [`lower_method_body`] replaces structured control flow with labels and
//!   gotos
//!
//! Every node a pass fabricates carries `BoundFlags::COMPILER_GENERATED`.

mod control_flow;
mod error;
pub mod factory;
mod initializers;
mod labels;
pub mod members;
mod module;
mod validate;

#[cfg(test)]
mod test_helpers;

pub use control_flow::lower_method_body;
pub use error::{LowerError, MissingPredefinedMember};
pub use factory::{LoopLabels, SyntheticFactory};
pub use initializers::rewrite_constructor_initializers;
pub use labels::{find_unmatched_labels, is_relocatable, UnmatchedLabelCache};
pub use members::{MemberResolver, SpecialMember, WellKnownMember, WellKnownType};
pub use module::{ModuleBuilder, SynthesizedMembers};
