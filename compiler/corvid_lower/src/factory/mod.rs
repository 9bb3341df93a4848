//! Synthetic node factory.
//!
//! Lowering passes build every node they fabricate through a
//! [`SyntheticFactory`]. The factory attributes nodes to its current syntax
//! span, tags them `COMPILER_GENERATED`, derives result types from the
//! symbol table, and resolves the library members a rewrite needs.
//!
//! # State
//!
//! The factory tracks the method being lowered, the nearest enclosing
//! non-lambda method and the type declaring both. Whenever a type is set,
//! both methods must be declared in it; debug builds check this on every
//! change.

mod lookup;
mod statements;

use corvid_diagnostic::{Diagnostic, DiagnosticSink};
use corvid_ir::bound::{
    BinaryOp, BoundArena, BoundFlags, BoundId, BoundKind, BoundRange, ConstValue, LocalRange, UnaryOp,
};
use corvid_ir::symbols::{
    FieldId, FieldSymbol, LocalId, LocalSymbol, Member, MethodId, PropertyId, SpecialType,
    SymbolTable, TypeId, TypeKind,
};
use corvid_ir::{Name, Span};

use crate::members::{MemberDescriptor, MemberResolver, SpecialMember, WellKnownMember, WellKnownType};
use crate::{MissingPredefinedMember, ModuleBuilder};

pub(crate) use statements::debug_assert_distinct_case_labels;
pub use statements::LoopLabels;

pub struct SyntheticFactory<'a> {
    arena: &'a mut BoundArena,
    symbols: &'a mut SymbolTable,
    sink: &'a mut dyn DiagnosticSink,
    module: &'a mut dyn ModuleBuilder,
    span: Span,
    current_type: Option<TypeId>,
    current_method: Option<MethodId>,
    top_level_method: Option<MethodId>,
    next_label: u32,
}

impl<'a> SyntheticFactory<'a> {
    pub fn new(
        arena: &'a mut BoundArena,
        symbols: &'a mut SymbolTable,
        sink: &'a mut dyn DiagnosticSink,
        module: &'a mut dyn ModuleBuilder,
    ) -> Self {
        SyntheticFactory {
            arena,
            symbols,
            sink,
            module,
            span: Span::DUMMY,
            current_type: None,
            current_method: None,
            top_level_method: None,
            next_label: 0,
        }
    }

    pub fn arena(&self) -> &BoundArena {
        self.arena
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.symbols
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.sink.report(diagnostic);
    }

    // State

    pub fn span(&self) -> Span {
        self.span
    }

    /// Attribute subsequent nodes to `span`. Returns the previous span.
    pub fn set_span(&mut self, span: Span) -> Span {
        std::mem::replace(&mut self.span, span)
    }

    pub fn current_type(&self) -> Option<TypeId> {
        self.current_type
    }

    pub fn current_method(&self) -> Option<MethodId> {
        self.current_method
    }

    pub fn top_level_method(&self) -> Option<MethodId> {
        self.top_level_method
    }

    /// Make `method` current. Its declaring type becomes the current type.
    pub fn set_method(&mut self, method: MethodId) {
        self.current_type = Some(self.symbols.method(method).containing_type);
        self.current_method = Some(method);
        self.top_level_method = Some(self.symbols.top_level_method(method));
        self.check_state();
    }

    pub fn set_current_type(&mut self, ty: Option<TypeId>) {
        self.current_type = ty;
        self.check_state();
    }

    fn check_state(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let Some(ty) = self.current_type else {
            return;
        };
        for method in [self.current_method, self.top_level_method].into_iter().flatten() {
            let declared_in = self.symbols.method(method).containing_type;
            debug_assert_eq!(
                declared_in,
                ty,
                "factory method `{}` is declared in `{}`, not the current type `{}`",
                self.symbols.name_str(self.symbols.method(method).name),
                self.symbols.type_name(declared_in),
                self.symbols.type_name(ty),
            );
        }
    }

    // Allocation

    fn alloc(&mut self, kind: BoundKind, ty: TypeId) -> BoundId {
        self.arena
            .alloc(kind, self.span, ty, BoundFlags::COMPILER_GENERATED)
    }

    fn alloc_statement(&mut self, kind: BoundKind) -> BoundId {
        self.alloc(kind, TypeId::INVALID)
    }

    /// Copy of `original` with a new kind, keeping its span, type and flags.
    pub(crate) fn rebuild(&mut self, original: BoundId, kind: BoundKind) -> BoundId {
        let span = self.arena.span(original);
        let ty = self.arena.ty(original);
        let flags = self.arena.flags(original);
        self.arena.alloc(kind, span, ty, flags)
    }

    pub(crate) fn alloc_list(&mut self, ids: &[BoundId]) -> BoundRange {
        self.arena.alloc_list(ids.iter().copied())
    }

    /// `{ <bad>; }`, standing in for a body that could not be lowered.
    pub fn error_block(&mut self) -> BoundId {
        let flags = BoundFlags::COMPILER_GENERATED | BoundFlags::HAS_ERRORS;
        let expr = self.bad_expression(&[]);
        let statement = self.arena.alloc(
            BoundKind::ExpressionStatement { expr },
            self.span,
            TypeId::INVALID,
            flags,
        );
        let statements = self.arena.alloc_list([statement]);
        self.arena.alloc(
            BoundKind::Block {
                locals: LocalRange::EMPTY,
                statements,
            },
            self.span,
            TypeId::INVALID,
            flags,
        )
    }

    fn error_type(&self) -> TypeId {
        self.symbols.special_type(SpecialType::Error)
    }

    pub fn special_type(&self, special: SpecialType) -> TypeId {
        self.symbols.special_type(special)
    }

    // Expressions

    pub fn literal(&mut self, value: ConstValue, ty: TypeId) -> BoundId {
        self.alloc(BoundKind::Literal(value), ty)
    }

    pub fn null(&mut self) -> BoundId {
        let object = self.special_type(SpecialType::Object);
        self.literal(ConstValue::Null, object)
    }

    pub fn bool(&mut self, value: bool) -> BoundId {
        let ty = self.special_type(SpecialType::Bool);
        self.literal(ConstValue::Bool(value), ty)
    }

    pub fn int(&mut self, value: i64) -> BoundId {
        let ty = self.special_type(SpecialType::Int);
        self.literal(ConstValue::Int(value), ty)
    }

    pub fn string(&mut self, value: &str) -> BoundId {
        let name = self.symbols.intern(value);
        let ty = self.special_type(SpecialType::String);
        self.literal(ConstValue::Str(name), ty)
    }

    pub fn default_value(&mut self, ty: TypeId) -> BoundId {
        self.alloc(BoundKind::DefaultValue, ty)
    }

    /// `this` of the current method.
    pub fn this(&mut self) -> BoundId {
        debug_assert!(
            self.current_method
                .is_some_and(|m| !self.symbols.method(m).is_static),
            "`this` requires a current instance method"
        );
        let ty = self.current_type.unwrap_or_else(|| self.error_type());
        self.alloc(BoundKind::ThisRef, ty)
    }

    pub fn base(&mut self) -> BoundId {
        let ty = self
            .current_type
            .and_then(|ty| self.symbols.type_symbol(ty).base)
            .unwrap_or_else(|| self.error_type());
        self.alloc(BoundKind::BaseRef, ty)
    }

    /// Parameter `index` of the current method.
    pub fn parameter(&mut self, index: u32) -> BoundId {
        let ty = self
            .current_method
            .and_then(|m| self.symbols.method(m).params.get(index as usize))
            .map(|param| param.ty);
        debug_assert!(ty.is_some(), "current method has no parameter {index}");
        let ty = ty.unwrap_or_else(|| self.error_type());
        self.alloc(BoundKind::Parameter(index), ty)
    }

    pub fn local(&mut self, local: LocalId) -> BoundId {
        let ty = self.symbols.local(local).ty;
        self.alloc(BoundKind::Local(local), ty)
    }

    /// `expr` converted to `ty`. Identity conversions return `expr` itself.
    pub fn convert(&mut self, expr: BoundId, ty: TypeId) -> BoundId {
        let conversion = self.symbols.classify_conversion(self.arena.ty(expr), ty);
        if conversion.is_identity() {
            return expr;
        }
        self.alloc(
            BoundKind::Conversion {
                operand: expr,
                conversion,
            },
            ty,
        )
    }

    pub fn array(&mut self, element_type: TypeId, elements: &[BoundId]) -> BoundId {
        let ty = self.symbols.array_type(element_type);
        let elements = self.arena.alloc_list(elements.iter().copied());
        self.alloc(
            BoundKind::ArrayCreation {
                element_type,
                elements,
            },
            ty,
        )
    }

    pub fn array_access(&mut self, array: BoundId, index: BoundId) -> BoundId {
        let ty = match self.symbols.type_symbol(self.arena.ty(array)).kind {
            TypeKind::Array { element } => element,
            _ => self.error_type(),
        };
        self.alloc(BoundKind::ArrayAccess { array, index }, ty)
    }

    pub fn sequence(
        &mut self,
        locals: &[LocalId],
        side_effects: &[BoundId],
        value: BoundId,
    ) -> BoundId {
        let locals = self.arena.alloc_locals(locals.iter().copied());
        let side_effects = self.arena.alloc_list(side_effects.iter().copied());
        let ty = self.arena.ty(value);
        self.alloc(
            BoundKind::Sequence {
                locals,
                side_effects,
                value,
            },
            ty,
        )
    }

    pub fn binary(&mut self, op: BinaryOp, left: BoundId, right: BoundId, ty: TypeId) -> BoundId {
        self.alloc(BoundKind::Binary { op, left, right }, ty)
    }

    pub fn equals(&mut self, left: BoundId, right: BoundId) -> BoundId {
        let ty = self.special_type(SpecialType::Bool);
        self.binary(BinaryOp::Eq, left, right, ty)
    }

    pub fn not_equals(&mut self, left: BoundId, right: BoundId) -> BoundId {
        let ty = self.special_type(SpecialType::Bool);
        self.binary(BinaryOp::NotEq, left, right, ty)
    }

    pub fn logical_and(&mut self, left: BoundId, right: BoundId) -> BoundId {
        let ty = self.special_type(SpecialType::Bool);
        self.binary(BinaryOp::LogicalAnd, left, right, ty)
    }

    pub fn not(&mut self, operand: BoundId) -> BoundId {
        let ty = self.special_type(SpecialType::Bool);
        self.alloc(
            BoundKind::Unary {
                op: UnaryOp::Not,
                operand,
            },
            ty,
        )
    }

    pub fn conditional(
        &mut self,
        condition: BoundId,
        when_true: BoundId,
        when_false: BoundId,
        ty: TypeId,
    ) -> BoundId {
        self.alloc(
            BoundKind::Conditional {
                condition,
                when_true,
                when_false,
            },
            ty,
        )
    }

    /// `typeof(ty)`, typed as `System.Type`.
    pub fn type_of(&mut self, operand_type: TypeId) -> Result<BoundId, MissingPredefinedMember> {
        let ty = self.well_known_type(WellKnownType::SystemType)?;
        Ok(self.alloc(BoundKind::TypeOf { operand_type }, ty))
    }

    pub fn new_object(&mut self, ctor: MethodId, args: &[BoundId]) -> BoundId {
        let ty = self.symbols.method(ctor).containing_type;
        let args = self.arena.alloc_list(args.iter().copied());
        self.alloc(BoundKind::ObjectCreation { ctor, args }, ty)
    }

    /// Placeholder for an expression that could not be synthesized.
    pub fn bad_expression(&mut self, children: &[BoundId]) -> BoundId {
        let children = self.arena.alloc_list(children.iter().copied());
        let ty = self.error_type();
        self.arena.alloc(
            BoundKind::BadExpression { children },
            self.span,
            ty,
            BoundFlags::COMPILER_GENERATED | BoundFlags::HAS_ERRORS,
        )
    }

    // Temporaries

    /// Fresh unnamed local of type `ty`.
    pub fn synthesized_local(&mut self, ty: TypeId) -> LocalId {
        self.symbols.add_local(LocalSymbol {
            name: Name::EMPTY,
            ty,
            synthesized: true,
        })
    }

    /// Store `expr` in a fresh temporary. Returns the temporary and the
    /// assignment expression that initializes it.
    pub fn store_to_temp(&mut self, expr: BoundId) -> (LocalId, BoundId) {
        let temp = self.synthesized_local(self.arena.ty(expr));
        let target = self.local(temp);
        let store = self.assignment(target, expr);
        (temp, store)
    }

    // Member access

    pub fn assignment(&mut self, target: BoundId, value: BoundId) -> BoundId {
        let ty = self.arena.ty(target);
        self.alloc(BoundKind::Assignment { target, value }, ty)
    }

    pub fn call(&mut self, receiver: BoundId, method: MethodId, args: &[BoundId]) -> BoundId {
        let symbol = self.symbols.method(method);
        debug_assert_eq!(
            symbol.params.len(),
            args.len(),
            "argument count mismatch calling `{}`",
            self.symbols.name_str(symbol.name)
        );
        debug_assert_eq!(
            symbol.is_static,
            !receiver.is_valid(),
            "static methods take no receiver, instance methods require one"
        );
        let ty = symbol.return_type;
        let args = self.arena.alloc_list(args.iter().copied());
        self.alloc(
            BoundKind::Call {
                receiver,
                method,
                args,
            },
            ty,
        )
    }

    pub fn static_call(&mut self, method: MethodId, args: &[BoundId]) -> BoundId {
        self.call(BoundId::INVALID, method, args)
    }

    pub fn field(&mut self, receiver: BoundId, field: FieldId) -> BoundId {
        let ty = self.symbols.field(field).ty;
        self.alloc(BoundKind::FieldAccess { receiver, field }, ty)
    }

    pub fn static_field(&mut self, field: FieldId) -> BoundId {
        debug_assert!(self.symbols.field(field).is_static);
        self.field(BoundId::INVALID, field)
    }

    /// Read `property` through its getter.
    pub fn property(&mut self, receiver: BoundId, property: PropertyId) -> BoundId {
        let symbol = self.symbols.property(property);
        let (getter, ty) = (symbol.getter, symbol.ty);
        debug_assert!(getter.is_some(), "property has no getter");
        match getter {
            Some(getter) => self.call(receiver, getter, &[]),
            None => self.alloc(BoundKind::PropertyAccess { receiver, property }, ty),
        }
    }

    // Library members

    fn missing(&self, name: String) -> MissingPredefinedMember {
        tracing::debug!(member = %name, "missing predefined member");
        MissingPredefinedMember::new(name, self.span)
    }

    fn resolve(&self, descriptor: &MemberDescriptor) -> Result<Member, MissingPredefinedMember> {
        self.symbols
            .resolve_member(descriptor)
            .ok_or_else(|| self.missing(descriptor.qualified_name()))
    }

    fn resolve_method(&self, descriptor: &MemberDescriptor) -> Result<MethodId, MissingPredefinedMember> {
        match self.resolve(descriptor)? {
            Member::Method(id) => Ok(id),
            _ => Err(self.missing(descriptor.qualified_name())),
        }
    }

    pub fn well_known_type(&self, ty: WellKnownType) -> Result<TypeId, MissingPredefinedMember> {
        self.symbols
            .resolve_type(ty.full_name())
            .ok_or_else(|| self.missing(ty.full_name().to_owned()))
    }

    pub fn well_known_method(&self, member: WellKnownMember) -> Result<MethodId, MissingPredefinedMember> {
        self.resolve_method(&member.descriptor())
    }

    pub fn try_well_known_method(&self, member: WellKnownMember) -> Option<MethodId> {
        match self.symbols.resolve_member(&member.descriptor()) {
            Some(Member::Method(id)) => Some(id),
            _ => None,
        }
    }

    pub fn well_known_field(&self, member: WellKnownMember) -> Result<FieldId, MissingPredefinedMember> {
        let descriptor = member.descriptor();
        match self.resolve(&descriptor)? {
            Member::Field(id) => Ok(id),
            _ => Err(self.missing(descriptor.qualified_name())),
        }
    }

    pub fn try_well_known_field(&self, member: WellKnownMember) -> Option<FieldId> {
        match self.symbols.resolve_member(&member.descriptor()) {
            Some(Member::Field(id)) => Some(id),
            _ => None,
        }
    }

    pub fn well_known_property(
        &self,
        member: WellKnownMember,
    ) -> Result<PropertyId, MissingPredefinedMember> {
        let descriptor = member.descriptor();
        match self.resolve(&descriptor)? {
            Member::Property(id) => Ok(id),
            _ => Err(self.missing(descriptor.qualified_name())),
        }
    }

    pub fn try_well_known_property(&self, member: WellKnownMember) -> Option<PropertyId> {
        match self.symbols.resolve_member(&member.descriptor()) {
            Some(Member::Property(id)) => Some(id),
            _ => None,
        }
    }

    pub fn special_method(&self, member: SpecialMember) -> Result<MethodId, MissingPredefinedMember> {
        self.resolve_method(&member.descriptor())
    }

    pub fn special_property(
        &self,
        member: SpecialMember,
    ) -> Result<PropertyId, MissingPredefinedMember> {
        let descriptor = member.descriptor();
        match self.resolve(&descriptor)? {
            Member::Property(id) => Ok(id),
            _ => Err(self.missing(descriptor.qualified_name())),
        }
    }

    // Synthesized declarations

    /// Declare a compiler-generated field and hand it to the module builder.
    pub fn synthesize_field(
        &mut self,
        containing_type: TypeId,
        name: &str,
        ty: TypeId,
        is_static: bool,
    ) -> FieldId {
        let name = self.symbols.intern(name);
        let field = self.symbols.add_field(FieldSymbol {
            name,
            containing_type,
            ty,
            is_static,
            synthesized: true,
        });
        self.module.add_synthesized_field(containing_type, field);
        field
    }

    /// Declare a compiler-generated class nested in `containing_type`.
    pub fn synthesize_type(&mut self, containing_type: TypeId, name: &str) -> TypeId {
        let outer = self.symbols.type_symbol(containing_type).full_name;
        let full_name = format!("{}.{name}", self.symbols.name_str(outer));
        let ty = self.symbols.add_class(&full_name, None);
        self.module.add_synthesized_type(containing_type, ty);
        ty
    }
}
