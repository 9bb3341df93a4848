use super::{SpecialType, SymbolTable, TypeId};

/// Classification of a conversion between two types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Conversion {
    Identity,
    /// Widening numeric conversion (`int -> long`, `char -> int`, ...).
    ImplicitNumeric,
    /// Reference type to a base type or `object`.
    ImplicitReference,
    /// Value type to `object`.
    Boxing,
    None,
}

impl Conversion {
    pub fn exists(self) -> bool {
        self != Conversion::None
    }

    pub fn is_identity(self) -> bool {
        self == Conversion::Identity
    }
}

pub(super) fn classify(table: &SymbolTable, from: TypeId, to: TypeId) -> Conversion {
    if from == to {
        return Conversion::Identity;
    }
    // Error types convert silently so one binding error does not cascade.
    if table.is_error(from) || table.is_error(to) {
        return Conversion::Identity;
    }

    let from_special = table.type_symbol(from).special;
    let to_special = table.type_symbol(to).special;
    if let (Some(f), Some(t)) = (from_special, to_special) {
        if is_widening(f, t) {
            return Conversion::ImplicitNumeric;
        }
    }

    if to_special == Some(SpecialType::Object) {
        if table.is_void(from) {
            return Conversion::None;
        }
        return if table.type_symbol(from).is_reference_type() {
            Conversion::ImplicitReference
        } else {
            Conversion::Boxing
        };
    }

    if table.type_symbol(from).is_reference_type() && table.base_chain(from).any(|t| t == to) {
        return Conversion::ImplicitReference;
    }

    Conversion::None
}

fn is_widening(from: SpecialType, to: SpecialType) -> bool {
    use SpecialType::{Char, Double, Int, Long};
    matches!(
        (from, to),
        (Int, Long) | (Int, Double) | (Long, Double) | (Char, Int) | (Char, Long) | (Char, Double)
    )
}
