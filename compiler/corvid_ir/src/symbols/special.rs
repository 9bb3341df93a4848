use super::TypeKind;

/// Types the compiler knows by fixed identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialType {
    Object = 0,
    Void,
    Bool,
    Int,
    Long,
    Double,
    Char,
    String,
    Error,
}

impl SpecialType {
    pub const COUNT: usize = 9;

    /// `Object` comes first so the others can name it as their base.
    pub const ALL: [SpecialType; Self::COUNT] = [
        SpecialType::Object,
        SpecialType::Void,
        SpecialType::Bool,
        SpecialType::Int,
        SpecialType::Long,
        SpecialType::Double,
        SpecialType::Char,
        SpecialType::String,
        SpecialType::Error,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            SpecialType::Object => "object",
            SpecialType::Void => "void",
            SpecialType::Bool => "bool",
            SpecialType::Int => "int",
            SpecialType::Long => "long",
            SpecialType::Double => "double",
            SpecialType::Char => "char",
            SpecialType::String => "string",
            SpecialType::Error => "?error",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            SpecialType::Object => "System.Object",
            SpecialType::Void => "System.Void",
            SpecialType::Bool => "System.Boolean",
            SpecialType::Int => "System.Int32",
            SpecialType::Long => "System.Int64",
            SpecialType::Double => "System.Double",
            SpecialType::Char => "System.Char",
            SpecialType::String => "System.String",
            SpecialType::Error => "<error>",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<SpecialType> {
        Self::ALL
            .into_iter()
            .find(|s| *s != SpecialType::Error && s.keyword() == keyword)
    }

    pub(super) fn type_kind(self) -> TypeKind {
        match self {
            SpecialType::Object | SpecialType::String => TypeKind::Class,
            SpecialType::Error => TypeKind::Error,
            _ => TypeKind::Struct,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SpecialType::Int | SpecialType::Long | SpecialType::Double | SpecialType::Char
        )
    }
}
