//! Symbol table consumed by lowering.
//!
//! Binding is an upstream concern: whoever produces the bound tree fills the
//! table through the `add_*` methods. Lowering reads it, and appends the
//! locals, labels and fields it synthesizes.

mod conversion;
mod special;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{Name, SharedInterner};

pub use conversion::Conversion;
pub use special::SpecialType;

define_id!(
    /// Index of a type in the [`SymbolTable`].
    TypeId,
    /// Index of a method (including constructors and lambdas).
    MethodId,
    FieldId,
    PropertyId,
    /// Index of a local variable, user-declared or synthesized.
    LocalId,
    /// Index of a jump target scoped to a method body.
    LabelId,
);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Array { element: TypeId },
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSymbol {
    pub name: Name,
    /// Namespace-qualified name, e.g. `System.String`.
    pub full_name: Name,
    pub kind: TypeKind,
    pub base: Option<TypeId>,
    pub special: Option<SpecialType>,
}

impl TypeSymbol {
    pub fn is_reference_type(&self) -> bool {
        matches!(self.kind, TypeKind::Class | TypeKind::Array { .. })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Ordinary,
    Constructor,
    StaticConstructor,
    /// Constructor of an interactive submission. Parameter 1 receives the
    /// value of the submission's trailing expression.
    SubmissionConstructor,
    Lambda,
}

impl MethodKind {
    /// Kinds that run field initializers.
    pub fn is_constructor_like(self) -> bool {
        matches!(
            self,
            MethodKind::Constructor
                | MethodKind::StaticConstructor
                | MethodKind::SubmissionConstructor
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterSymbol {
    pub name: Name,
    pub ty: TypeId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: Name,
    pub containing_type: TypeId,
    pub kind: MethodKind,
    pub is_static: bool,
    pub params: Vec<ParameterSymbol>,
    pub return_type: TypeId,
    /// Method a lambda is nested in; `None` for top-level methods.
    pub enclosing: Option<MethodId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: Name,
    pub containing_type: TypeId,
    pub ty: TypeId,
    pub is_static: bool,
    pub synthesized: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySymbol {
    pub name: Name,
    pub containing_type: TypeId,
    pub ty: TypeId,
    pub is_static: bool,
    pub getter: Option<MethodId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalSymbol {
    pub name: Name,
    pub ty: TypeId,
    /// Temporary introduced by lowering.
    pub synthesized: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelSymbol {
    pub name: Name,
    pub generated: bool,
}

/// A named member of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Member {
    Method(MethodId),
    Field(FieldId),
    Property(PropertyId),
}

pub struct SymbolTable {
    interner: SharedInterner,
    types: Vec<TypeSymbol>,
    methods: Vec<MethodSymbol>,
    fields: Vec<FieldSymbol>,
    properties: Vec<PropertySymbol>,
    locals: Vec<LocalSymbol>,
    labels: Vec<LabelSymbol>,
    special_types: [TypeId; SpecialType::COUNT],
    types_by_full_name: FxHashMap<Name, TypeId>,
    members: FxHashMap<(TypeId, Name), SmallVec<[Member; 2]>>,
    array_types: FxHashMap<TypeId, TypeId>,
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "symbol counts never exceed u32"
)]
fn next_id(len: usize) -> u32 {
    debug_assert!(len < u32::MAX as usize);
    len as u32
}

impl SymbolTable {
    /// Create a table with every [`SpecialType`] registered.
    pub fn new(interner: SharedInterner) -> Self {
        let mut table = SymbolTable {
            interner,
            types: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            locals: Vec::new(),
            labels: Vec::new(),
            special_types: [TypeId::INVALID; SpecialType::COUNT],
            types_by_full_name: FxHashMap::default(),
            members: FxHashMap::default(),
            array_types: FxHashMap::default(),
        };
        for special in SpecialType::ALL {
            let kind = special.type_kind();
            let base = match special {
                SpecialType::Object | SpecialType::Error => None,
                _ => Some(table.special_types[SpecialType::Object as usize]),
            };
            let id = table.add_type_named(special.keyword(), special.full_name(), kind, base);
            table.types[id.index()].special = Some(special);
            table.special_types[special as usize] = id;
        }
        table
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    // Types

    pub fn special_type(&self, special: SpecialType) -> TypeId {
        self.special_types[special as usize]
    }

    pub fn add_type(&mut self, symbol: TypeSymbol) -> TypeId {
        let id = TypeId::new(next_id(self.types.len()));
        self.types_by_full_name.insert(symbol.full_name, id);
        self.types.push(symbol);
        id
    }

    fn add_type_named(
        &mut self,
        name: &str,
        full_name: &str,
        kind: TypeKind,
        base: Option<TypeId>,
    ) -> TypeId {
        let symbol = TypeSymbol {
            name: self.intern(name),
            full_name: self.intern(full_name),
            kind,
            base,
            special: None,
        };
        self.add_type(symbol)
    }

    /// Register a class. The simple name is the last dotted segment.
    pub fn add_class(&mut self, full_name: &str, base: Option<TypeId>) -> TypeId {
        let simple = full_name.rsplit('.').next().unwrap_or(full_name);
        let base = base.or(Some(self.special_type(SpecialType::Object)));
        self.add_type_named(simple, full_name, TypeKind::Class, base)
    }

    pub fn add_struct(&mut self, full_name: &str) -> TypeId {
        let simple = full_name.rsplit('.').next().unwrap_or(full_name);
        let object = self.special_type(SpecialType::Object);
        self.add_type_named(simple, full_name, TypeKind::Struct, Some(object))
    }

    /// Single-dimensional array of `element`, created on first request.
    pub fn array_type(&mut self, element: TypeId) -> TypeId {
        if let Some(&id) = self.array_types.get(&element) {
            return id;
        }
        let elem_name = self.name_str(self.type_symbol(element).full_name);
        let full_name = format!("{elem_name}[]");
        let object = self.special_type(SpecialType::Object);
        let id = self.add_type_named(
            &full_name,
            &full_name,
            TypeKind::Array { element },
            Some(object),
        );
        self.array_types.insert(element, id);
        id
    }

    pub fn type_symbol(&self, id: TypeId) -> &TypeSymbol {
        &self.types[id.index()]
    }

    pub fn find_type(&self, full_name: &str) -> Option<TypeId> {
        let name = self.interner.get(full_name)?;
        self.types_by_full_name.get(&name).copied()
    }

    /// Display name of a type: its keyword for special types, otherwise the
    /// simple name.
    pub fn type_name(&self, id: TypeId) -> &'static str {
        if !id.is_valid() {
            return "?";
        }
        self.name_str(self.type_symbol(id).name)
    }

    pub fn is_void(&self, id: TypeId) -> bool {
        id == self.special_type(SpecialType::Void)
    }

    pub fn is_error(&self, id: TypeId) -> bool {
        id == self.special_type(SpecialType::Error)
    }

    /// Iterate `ty` followed by its base types.
    pub fn base_chain(&self, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        std::iter::successors(Some(ty), move |&t| {
            if t.is_valid() {
                self.type_symbol(t).base
            } else {
                None
            }
        })
        .filter(|t| t.is_valid())
    }

    pub fn classify_conversion(&self, from: TypeId, to: TypeId) -> Conversion {
        conversion::classify(self, from, to)
    }

    // Members

    fn index_member(&mut self, ty: TypeId, name: Name, member: Member) {
        self.members.entry((ty, name)).or_default().push(member);
    }

    pub fn add_method(&mut self, symbol: MethodSymbol) -> MethodId {
        let id = MethodId::new(next_id(self.methods.len()));
        self.index_member(symbol.containing_type, symbol.name, Member::Method(id));
        self.methods.push(symbol);
        id
    }

    pub fn add_field(&mut self, symbol: FieldSymbol) -> FieldId {
        let id = FieldId::new(next_id(self.fields.len()));
        self.index_member(symbol.containing_type, symbol.name, Member::Field(id));
        self.fields.push(symbol);
        id
    }

    pub fn add_property(&mut self, symbol: PropertySymbol) -> PropertyId {
        let id = PropertyId::new(next_id(self.properties.len()));
        self.index_member(symbol.containing_type, symbol.name, Member::Property(id));
        self.properties.push(symbol);
        id
    }

    pub fn method(&self, id: MethodId) -> &MethodSymbol {
        &self.methods[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &FieldSymbol {
        &self.fields[id.index()]
    }

    pub fn property(&self, id: PropertyId) -> &PropertySymbol {
        &self.properties[id.index()]
    }

    /// Members declared directly on `ty` with the given name, in declaration order.
    pub fn members(&self, ty: TypeId, name: Name) -> &[Member] {
        self.members
            .get(&(ty, name))
            .map_or(&[], |members| members.as_slice())
    }

    /// Methods named `name` declared directly on `ty`.
    pub fn methods_named(&self, ty: TypeId, name: Name) -> impl Iterator<Item = MethodId> + '_ {
        self.members(ty, name).iter().filter_map(|m| match m {
            Member::Method(id) => Some(*id),
            _ => None,
        })
    }

    /// Innermost non-lambda method containing `method`.
    pub fn top_level_method(&self, method: MethodId) -> MethodId {
        let mut current = method;
        while let Some(outer) = self.method(current).enclosing {
            current = outer;
        }
        current
    }

    // Locals and labels

    pub fn add_local(&mut self, symbol: LocalSymbol) -> LocalId {
        let id = LocalId::new(next_id(self.locals.len()));
        self.locals.push(symbol);
        id
    }

    pub fn local(&self, id: LocalId) -> &LocalSymbol {
        &self.locals[id.index()]
    }

    pub fn add_label(&mut self, symbol: LabelSymbol) -> LabelId {
        let id = LabelId::new(next_id(self.labels.len()));
        self.labels.push(symbol);
        id
    }

    pub fn label(&self, id: LabelId) -> &LabelSymbol {
        &self.labels[id.index()]
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn local_count(&self) -> usize {
        self.locals.len()
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("types", &self.types.len())
            .field("methods", &self.methods.len())
            .field("fields", &self.fields.len())
            .field("locals", &self.locals.len())
            .field("labels", &self.labels.len())
            .finish_non_exhaustive()
    }
}
