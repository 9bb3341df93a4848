use corvid_ir::symbols::{FieldId, TypeId};
use rustc_hash::FxHashMap;

/// Receives the declarations lowering synthesizes, grouped by containing type.
pub trait ModuleBuilder {
    fn add_synthesized_field(&mut self, containing_type: TypeId, field: FieldId);
    fn add_synthesized_type(&mut self, containing_type: TypeId, ty: TypeId);
}

/// In-memory [`ModuleBuilder`].
#[derive(Clone, Debug, Default)]
pub struct SynthesizedMembers {
    fields: FxHashMap<TypeId, Vec<FieldId>>,
    types: FxHashMap<TypeId, Vec<TypeId>>,
}

impl SynthesizedMembers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields synthesized into `ty`, in creation order.
    pub fn fields_of(&self, ty: TypeId) -> &[FieldId] {
        self.fields.get(&ty).map_or(&[], Vec::as_slice)
    }

    /// Types nested into `ty`, in creation order.
    pub fn types_of(&self, ty: TypeId) -> &[TypeId] {
        self.types.get(&ty).map_or(&[], Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.types.is_empty()
    }
}

impl ModuleBuilder for SynthesizedMembers {
    fn add_synthesized_field(&mut self, containing_type: TypeId, field: FieldId) {
        self.fields.entry(containing_type).or_default().push(field);
    }

    fn add_synthesized_type(&mut self, containing_type: TypeId, ty: TypeId) {
        self.types.entry(containing_type).or_default().push(ty);
    }
}
