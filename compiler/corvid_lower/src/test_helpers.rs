//! Shared fixture for lowering tests.

use corvid_diagnostic::DiagnosticBag;
use corvid_ir::bound::{BoundArena, BoundDumper, BoundFlags, BoundId, BoundKind, ConstValue};
use corvid_ir::symbols::{
    FieldId, FieldSymbol, LabelId, LabelSymbol, MethodId, MethodKind, MethodSymbol,
    ParameterSymbol, SpecialType, SymbolTable, TypeId,
};
use corvid_ir::{SharedInterner, Span};

use crate::{SynthesizedMembers, SyntheticFactory};

/// Class `Demo.C` with a constructor and `void Run(int x, bool flag)`.
pub(crate) struct Fixture {
    pub arena: BoundArena,
    pub symbols: SymbolTable,
    pub diagnostics: DiagnosticBag,
    pub module: SynthesizedMembers,
    pub class: TypeId,
    pub ctor: MethodId,
    pub run: MethodId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new(SharedInterner::new());
        let class = symbols.add_class("Demo.C", None);
        let void = symbols.special_type(SpecialType::Void);
        let int = symbols.special_type(SpecialType::Int);
        let bool_ty = symbols.special_type(SpecialType::Bool);
        let ctor = symbols.add_method(MethodSymbol {
            name: symbols.intern(".ctor"),
            containing_type: class,
            kind: MethodKind::Constructor,
            is_static: false,
            params: Vec::new(),
            return_type: void,
            enclosing: None,
        });
        let params = vec![
            ParameterSymbol {
                name: symbols.intern("x"),
                ty: int,
            },
            ParameterSymbol {
                name: symbols.intern("flag"),
                ty: bool_ty,
            },
        ];
        let run = symbols.add_method(MethodSymbol {
            name: symbols.intern("Run"),
            containing_type: class,
            kind: MethodKind::Ordinary,
            is_static: false,
            params,
            return_type: void,
            enclosing: None,
        });
        Fixture {
            arena: BoundArena::new(),
            symbols,
            diagnostics: DiagnosticBag::new(),
            module: SynthesizedMembers::new(),
            class,
            ctor,
            run,
        }
    }

    pub fn ty(&self, special: SpecialType) -> TypeId {
        self.symbols.special_type(special)
    }

    /// Factory positioned in `method`.
    pub fn factory_in(&mut self, method: MethodId) -> SyntheticFactory<'_> {
        let mut factory = SyntheticFactory::new(
            &mut self.arena,
            &mut self.symbols,
            &mut self.diagnostics,
            &mut self.module,
        );
        factory.set_method(method);
        factory
    }

    pub fn add_field(&mut self, name: &str, special: SpecialType, is_static: bool) -> FieldId {
        let field = FieldSymbol {
            name: self.symbols.intern(name),
            containing_type: self.class,
            ty: self.ty(special),
            is_static,
            synthesized: false,
        };
        self.symbols.add_field(field)
    }

    pub fn user_label(&mut self, name: &str) -> LabelId {
        let name = self.symbols.intern(name);
        self.symbols.add_label(LabelSymbol {
            name,
            generated: false,
        })
    }

    /// Node as the binder would produce it: user-attributed, no flags.
    pub fn node(&mut self, kind: BoundKind, ty: TypeId) -> BoundId {
        self.arena.alloc(kind, Span::new(1, 2), ty, BoundFlags::empty())
    }

    pub fn statement(&mut self, kind: BoundKind) -> BoundId {
        self.node(kind, TypeId::INVALID)
    }

    pub fn int(&mut self, value: i64) -> BoundId {
        let ty = self.ty(SpecialType::Int);
        self.node(BoundKind::Literal(ConstValue::Int(value)), ty)
    }

    pub fn param(&mut self, index: u32) -> BoundId {
        let ty = self.symbols.method(self.run).params[index as usize].ty;
        self.node(BoundKind::Parameter(index), ty)
    }

    /// `Parameter(index);` as an expression statement.
    pub fn use_param(&mut self, index: u32) -> BoundId {
        let expr = self.param(index);
        self.statement(BoundKind::ExpressionStatement { expr })
    }

    #[allow(dead_code)]
    pub fn list(&mut self, statements: &[BoundId]) -> BoundId {
        let statements = self.arena.alloc_list(statements.iter().copied());
        self.statement(BoundKind::StatementList { statements })
    }

    pub fn dump(&self, id: BoundId) -> String {
        BoundDumper::new(&self.arena, &self.symbols)
            .with_method(self.run)
            .statement(id)
    }

    pub fn dump_in(&self, method: MethodId, id: BoundId) -> String {
        BoundDumper::new(&self.arena, &self.symbols)
            .with_method(method)
            .statement(id)
    }

    #[allow(dead_code)]
    pub fn label_name(&self, label: LabelId) -> &'static str {
        self.symbols.name_str(self.symbols.label(label).name)
    }
}
