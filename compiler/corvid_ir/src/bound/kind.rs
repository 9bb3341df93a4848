use super::{BinaryOp, BoundId, BoundRange, ConstValue, LocalRange, UnaryOp};
use crate::symbols::{Conversion, FieldId, LabelId, LocalId, MethodId, PropertyId, TypeId};

/// Bound node variants.
///
/// Optional children use [`BoundId::INVALID`]. A member access with an
/// `INVALID` receiver is static.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundKind {
    // Expressions
    Literal(ConstValue),
    DefaultValue,
    Local(LocalId),
    Parameter(u32),
    ThisRef,
    BaseRef,
    FieldAccess {
        receiver: BoundId,
        field: FieldId,
    },
    PropertyAccess {
        receiver: BoundId,
        property: PropertyId,
    },
    Call {
        receiver: BoundId,
        method: MethodId,
        args: BoundRange,
    },
    ObjectCreation {
        ctor: MethodId,
        args: BoundRange,
    },
    Assignment {
        target: BoundId,
        value: BoundId,
    },
    Binary {
        op: BinaryOp,
        left: BoundId,
        right: BoundId,
    },
    Unary {
        op: UnaryOp,
        operand: BoundId,
    },
    Conversion {
        operand: BoundId,
        conversion: Conversion,
    },
    Conditional {
        condition: BoundId,
        when_true: BoundId,
        when_false: BoundId,
    },
    ArrayCreation {
        element_type: TypeId,
        elements: BoundRange,
    },
    ArrayAccess {
        array: BoundId,
        index: BoundId,
    },
    /// Evaluate `side_effects` in order with `locals` in scope, then `value`.
    Sequence {
        locals: LocalRange,
        side_effects: BoundRange,
        value: BoundId,
    },
    TypeOf {
        operand_type: TypeId,
    },
    /// Placeholder for an expression that could not be bound or synthesized.
    BadExpression {
        children: BoundRange,
    },

    // Statements
    Block {
        locals: LocalRange,
        statements: BoundRange,
    },
    /// Statements without a scope of their own.
    StatementList {
        statements: BoundRange,
    },
    ExpressionStatement {
        expr: BoundId,
    },
    LocalDeclaration {
        local: LocalId,
        initializer: BoundId,
    },
    Return {
        value: BoundId,
    },
    Goto {
        label: LabelId,
    },
    ConditionalGoto {
        condition: BoundId,
        jump_if_true: bool,
        label: LabelId,
    },
    Label {
        label: LabelId,
    },
    Labeled {
        label: LabelId,
        body: BoundId,
    },
    If {
        condition: BoundId,
        consequence: BoundId,
        alternative: BoundId,
    },
    While {
        condition: BoundId,
        body: BoundId,
        break_label: LabelId,
        continue_label: LabelId,
    },
    DoWhile {
        body: BoundId,
        condition: BoundId,
        break_label: LabelId,
        continue_label: LabelId,
    },
    For {
        initializer: BoundId,
        condition: BoundId,
        increment: BoundId,
        body: BoundId,
        break_label: LabelId,
        continue_label: LabelId,
    },
    Switch {
        expr: BoundId,
        sections: BoundRange,
        break_label: LabelId,
    },
    SwitchSection {
        labels: BoundRange,
        statements: BoundRange,
    },
    /// `case value:` or `default:` when `value` is `None`.
    SwitchLabel {
        value: Option<ConstValue>,
        label: LabelId,
    },
    Try {
        try_block: BoundId,
        catches: BoundRange,
        finally_block: BoundId,
    },
    CatchBlock {
        exception_type: Option<TypeId>,
        local: Option<LocalId>,
        body: BoundId,
    },
    /// `throw expr;`, or a rethrow when `expr` is `INVALID`.
    Throw {
        expr: BoundId,
    },
    /// Debugger stop attributed to the node's span.
    SequencePoint {
        statement: BoundId,
    },
    NoOp,
}

impl BoundKind {
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            BoundKind::Block { .. }
                | BoundKind::StatementList { .. }
                | BoundKind::ExpressionStatement { .. }
                | BoundKind::LocalDeclaration { .. }
                | BoundKind::Return { .. }
                | BoundKind::Goto { .. }
                | BoundKind::ConditionalGoto { .. }
                | BoundKind::Label { .. }
                | BoundKind::Labeled { .. }
                | BoundKind::If { .. }
                | BoundKind::While { .. }
                | BoundKind::DoWhile { .. }
                | BoundKind::For { .. }
                | BoundKind::Switch { .. }
                | BoundKind::SwitchSection { .. }
                | BoundKind::SwitchLabel { .. }
                | BoundKind::Try { .. }
                | BoundKind::CatchBlock { .. }
                | BoundKind::Throw { .. }
                | BoundKind::SequencePoint { .. }
                | BoundKind::NoOp
        )
    }

    /// Short variant name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            BoundKind::Literal(_) => "Literal",
            BoundKind::DefaultValue => "DefaultValue",
            BoundKind::Local(_) => "Local",
            BoundKind::Parameter(_) => "Parameter",
            BoundKind::ThisRef => "ThisRef",
            BoundKind::BaseRef => "BaseRef",
            BoundKind::FieldAccess { .. } => "FieldAccess",
            BoundKind::PropertyAccess { .. } => "PropertyAccess",
            BoundKind::Call { .. } => "Call",
            BoundKind::ObjectCreation { .. } => "ObjectCreation",
            BoundKind::Assignment { .. } => "Assignment",
            BoundKind::Binary { .. } => "Binary",
            BoundKind::Unary { .. } => "Unary",
            BoundKind::Conversion { .. } => "Conversion",
            BoundKind::Conditional { .. } => "Conditional",
            BoundKind::ArrayCreation { .. } => "ArrayCreation",
            BoundKind::ArrayAccess { .. } => "ArrayAccess",
            BoundKind::Sequence { .. } => "Sequence",
            BoundKind::TypeOf { .. } => "TypeOf",
            BoundKind::BadExpression { .. } => "BadExpression",
            BoundKind::Block { .. } => "Block",
            BoundKind::StatementList { .. } => "StatementList",
            BoundKind::ExpressionStatement { .. } => "ExpressionStatement",
            BoundKind::LocalDeclaration { .. } => "LocalDeclaration",
            BoundKind::Return { .. } => "Return",
            BoundKind::Goto { .. } => "Goto",
            BoundKind::ConditionalGoto { .. } => "ConditionalGoto",
            BoundKind::Label { .. } => "Label",
            BoundKind::Labeled { .. } => "Labeled",
            BoundKind::If { .. } => "If",
            BoundKind::While { .. } => "While",
            BoundKind::DoWhile { .. } => "DoWhile",
            BoundKind::For { .. } => "For",
            BoundKind::Switch { .. } => "Switch",
            BoundKind::SwitchSection { .. } => "SwitchSection",
            BoundKind::SwitchLabel { .. } => "SwitchLabel",
            BoundKind::Try { .. } => "Try",
            BoundKind::CatchBlock { .. } => "CatchBlock",
            BoundKind::Throw { .. } => "Throw",
            BoundKind::SequencePoint { .. } => "SequencePoint",
            BoundKind::NoOp => "NoOp",
        }
    }
}
