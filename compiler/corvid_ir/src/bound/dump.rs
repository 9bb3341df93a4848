use std::fmt::Write;

use super::{BoundArena, BoundId, BoundKind, BoundRange, ConstValue};
use crate::symbols::{LabelId, LocalId, MethodId, SymbolTable};
use crate::Name;

/// Renders bound trees as C#-like text for tests and trace output.
///
/// Sequence points are transparent. Compiler-generated temporaries print as
/// `tmpN` where `N` is the local's index.
pub struct BoundDumper<'a> {
    arena: &'a BoundArena,
    symbols: &'a SymbolTable,
    method: Option<MethodId>,
}

impl<'a> BoundDumper<'a> {
    pub fn new(arena: &'a BoundArena, symbols: &'a SymbolTable) -> Self {
        BoundDumper {
            arena,
            symbols,
            method: None,
        }
    }

    /// Resolve parameter names against `method`.
    #[must_use]
    pub fn with_method(mut self, method: MethodId) -> Self {
        self.method = Some(method);
        self
    }

    /// Render a statement (or statement list) as indented lines.
    pub fn statement(&self, id: BoundId) -> String {
        let mut lines = Vec::new();
        self.write_statement(id, 0, &mut lines);
        lines.join("\n")
    }

    /// Render an expression on one line.
    pub fn expr(&self, id: BoundId) -> String {
        let mut out = String::new();
        self.write_expr(id, &mut out);
        out
    }

    fn label(&self, label: LabelId) -> &'static str {
        self.symbols.name_str(self.symbols.label(label).name)
    }

    fn local(&self, local: LocalId) -> String {
        let symbol = self.symbols.local(local);
        if symbol.synthesized || symbol.name == Name::EMPTY {
            format!("tmp{}", local.raw())
        } else {
            self.symbols.name_str(symbol.name).to_owned()
        }
    }

    fn write_args(&self, args: BoundRange, out: &mut String) {
        for (i, arg) in self.arena.list(args).iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_expr(*arg, out);
        }
    }

    fn write_operand(&self, id: BoundId, out: &mut String) {
        let nested = matches!(
            self.arena.kind(id),
            BoundKind::Binary { .. } | BoundKind::Conditional { .. } | BoundKind::Assignment { .. }
        );
        if nested {
            out.push('(');
            self.write_expr(id, out);
            out.push(')');
        } else {
            self.write_expr(id, out);
        }
    }

    fn write_receiver(&self, receiver: BoundId, static_owner: &str, out: &mut String) {
        if receiver.is_valid() {
            self.write_operand(receiver, out);
        } else {
            out.push_str(static_owner);
        }
        out.push('.');
    }

    fn write_expr(&self, id: BoundId, out: &mut String) {
        if !id.is_valid() {
            out.push_str("<none>");
            return;
        }
        let symbols = self.symbols;
        match self.arena.kind(id) {
            BoundKind::Literal(value) => self.write_literal(value, out),
            BoundKind::DefaultValue => {
                let _ = write!(out, "default({})", symbols.type_name(self.arena.ty(id)));
            }
            BoundKind::Local(local) => out.push_str(&self.local(local)),
            BoundKind::Parameter(index) => {
                let name = self.method.and_then(|m| {
                    symbols
                        .method(m)
                        .params
                        .get(index as usize)
                        .map(|p| symbols.name_str(p.name))
                });
                match name {
                    Some(name) => out.push_str(name),
                    None => {
                        let _ = write!(out, "arg{index}");
                    }
                }
            }
            BoundKind::ThisRef => out.push_str("this"),
            BoundKind::BaseRef => out.push_str("base"),
            BoundKind::FieldAccess { receiver, field } => {
                let field = symbols.field(field);
                self.write_receiver(receiver, symbols.type_name(field.containing_type), out);
                out.push_str(symbols.name_str(field.name));
            }
            BoundKind::PropertyAccess { receiver, property } => {
                let property = symbols.property(property);
                self.write_receiver(receiver, symbols.type_name(property.containing_type), out);
                out.push_str(symbols.name_str(property.name));
            }
            BoundKind::Call {
                receiver,
                method,
                args,
            } => {
                let method = symbols.method(method);
                self.write_receiver(receiver, symbols.type_name(method.containing_type), out);
                out.push_str(symbols.name_str(method.name));
                out.push('(');
                self.write_args(args, out);
                out.push(')');
            }
            BoundKind::ObjectCreation { ctor, args } => {
                let _ = write!(
                    out,
                    "new {}(",
                    symbols.type_name(symbols.method(ctor).containing_type)
                );
                self.write_args(args, out);
                out.push(')');
            }
            BoundKind::Assignment { target, value } => {
                self.write_expr(target, out);
                out.push_str(" = ");
                self.write_expr(value, out);
            }
            BoundKind::Binary { op, left, right } => {
                self.write_operand(left, out);
                let _ = write!(out, " {} ", op.as_str());
                self.write_operand(right, out);
            }
            BoundKind::Unary { op, operand } => {
                out.push_str(op.as_str());
                self.write_operand(operand, out);
            }
            BoundKind::Conversion { operand, .. } => {
                let _ = write!(out, "({})", symbols.type_name(self.arena.ty(id)));
                self.write_operand(operand, out);
            }
            BoundKind::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.write_operand(condition, out);
                out.push_str(" ? ");
                self.write_operand(when_true, out);
                out.push_str(" : ");
                self.write_operand(when_false, out);
            }
            BoundKind::ArrayCreation {
                element_type,
                elements,
            } => {
                let _ = write!(out, "new {}[] {{ ", symbols.type_name(element_type));
                self.write_args(elements, out);
                out.push_str(" }");
            }
            BoundKind::ArrayAccess { array, index } => {
                self.write_operand(array, out);
                out.push('[');
                self.write_expr(index, out);
                out.push(']');
            }
            BoundKind::Sequence {
                locals,
                side_effects,
                value,
            } => {
                out.push_str("sequence(");
                for local in self.arena.locals(locals) {
                    let _ = write!(out, "local {}; ", self.local(*local));
                }
                for effect in self.arena.list(side_effects) {
                    self.write_expr(*effect, out);
                    out.push_str("; ");
                }
                self.write_expr(value, out);
                out.push(')');
            }
            BoundKind::TypeOf { operand_type } => {
                let _ = write!(out, "typeof({})", symbols.type_name(operand_type));
            }
            BoundKind::BadExpression { .. } => out.push_str("<bad>"),
            other => {
                let _ = write!(out, "<{}>", other.name());
            }
        }
    }

    fn line(indent: usize, text: impl AsRef<str>, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", "    ".repeat(indent), text.as_ref()));
    }

    fn write_nested(&self, id: BoundId, indent: usize, lines: &mut Vec<String>) {
        if matches!(self.arena.kind(id), BoundKind::Block { .. }) {
            self.write_statement(id, indent, lines);
        } else {
            self.write_statement(id, indent + 1, lines);
        }
    }

    fn write_statement(&self, id: BoundId, indent: usize, lines: &mut Vec<String>) {
        if !id.is_valid() {
            return;
        }
        match self.arena.kind(id) {
            BoundKind::Block { locals, statements } => {
                Self::line(indent, "{", lines);
                for local in self.arena.locals(locals) {
                    let ty = self.symbols.type_name(self.symbols.local(*local).ty);
                    Self::line(indent + 1, format!("{ty} {};", self.local(*local)), lines);
                }
                for stmt in self.arena.list(statements) {
                    self.write_statement(*stmt, indent + 1, lines);
                }
                Self::line(indent, "}", lines);
            }
            BoundKind::StatementList { statements } => {
                for stmt in self.arena.list(statements) {
                    self.write_statement(*stmt, indent, lines);
                }
            }
            BoundKind::SequencePoint { statement } => {
                self.write_statement(statement, indent, lines);
            }
            BoundKind::ExpressionStatement { expr } => {
                Self::line(indent, format!("{};", self.expr(expr)), lines);
            }
            BoundKind::LocalDeclaration { local, initializer } => {
                let ty = self.symbols.type_name(self.symbols.local(local).ty);
                let text = if initializer.is_valid() {
                    format!("{ty} {} = {};", self.local(local), self.expr(initializer))
                } else {
                    format!("{ty} {};", self.local(local))
                };
                Self::line(indent, text, lines);
            }
            BoundKind::Return { value } => {
                let text = if value.is_valid() {
                    format!("return {};", self.expr(value))
                } else {
                    "return;".to_owned()
                };
                Self::line(indent, text, lines);
            }
            BoundKind::Goto { label } => {
                Self::line(indent, format!("goto {};", self.label(label)), lines);
            }
            BoundKind::ConditionalGoto {
                condition,
                jump_if_true,
                label,
            } => {
                let not = if jump_if_true { "" } else { "!" };
                let text = format!(
                    "if {not}({}) goto {};",
                    self.expr(condition),
                    self.label(label)
                );
                Self::line(indent, text, lines);
            }
            BoundKind::Label { label } => {
                Self::line(indent, format!("{}:", self.label(label)), lines);
            }
            BoundKind::Labeled { label, body } => {
                Self::line(indent, format!("{}:", self.label(label)), lines);
                self.write_statement(body, indent, lines);
            }
            BoundKind::If {
                condition,
                consequence,
                alternative,
            } => {
                Self::line(indent, format!("if ({})", self.expr(condition)), lines);
                self.write_nested(consequence, indent, lines);
                if alternative.is_valid() {
                    Self::line(indent, "else", lines);
                    self.write_nested(alternative, indent, lines);
                }
            }
            BoundKind::While {
                condition, body, ..
            } => {
                Self::line(indent, format!("while ({})", self.expr(condition)), lines);
                self.write_nested(body, indent, lines);
            }
            BoundKind::DoWhile {
                body, condition, ..
            } => {
                Self::line(indent, "do", lines);
                self.write_nested(body, indent, lines);
                Self::line(indent, format!("while ({});", self.expr(condition)), lines);
            }
            BoundKind::For {
                initializer,
                condition,
                increment,
                body,
                ..
            } => {
                let init = if initializer.is_valid() {
                    self.statement(initializer).trim().trim_end_matches(';').to_owned()
                } else {
                    String::new()
                };
                let cond = if condition.is_valid() {
                    self.expr(condition)
                } else {
                    String::new()
                };
                let incr = if increment.is_valid() {
                    self.statement(increment).trim().trim_end_matches(';').to_owned()
                } else {
                    String::new()
                };
                Self::line(indent, format!("for ({init}; {cond}; {incr})"), lines);
                self.write_nested(body, indent, lines);
            }
            BoundKind::Switch { expr, sections, .. } => {
                Self::line(indent, format!("switch ({})", self.expr(expr)), lines);
                Self::line(indent, "{", lines);
                for section in self.arena.list(sections) {
                    self.write_statement(*section, indent + 1, lines);
                }
                Self::line(indent, "}", lines);
            }
            BoundKind::SwitchSection { labels, statements } => {
                for label in self.arena.list(labels) {
                    self.write_statement(*label, indent, lines);
                }
                for stmt in self.arena.list(statements) {
                    self.write_statement(*stmt, indent + 1, lines);
                }
            }
            BoundKind::SwitchLabel { value, .. } => {
                let text = match value {
                    Some(value) => {
                        let mut literal = String::new();
                        self.write_literal(value, &mut literal);
                        format!("case {literal}:")
                    }
                    None => "default:".to_owned(),
                };
                Self::line(indent, text, lines);
            }
            BoundKind::Try {
                try_block,
                catches,
                finally_block,
            } => {
                Self::line(indent, "try", lines);
                self.write_nested(try_block, indent, lines);
                for catch in self.arena.list(catches) {
                    self.write_statement(*catch, indent, lines);
                }
                if finally_block.is_valid() {
                    Self::line(indent, "finally", lines);
                    self.write_nested(finally_block, indent, lines);
                }
            }
            BoundKind::CatchBlock {
                exception_type,
                local,
                body,
            } => {
                let header = match (exception_type, local) {
                    (Some(ty), Some(local)) => {
                        format!("catch ({} {})", self.symbols.type_name(ty), self.local(local))
                    }
                    (Some(ty), None) => format!("catch ({})", self.symbols.type_name(ty)),
                    (None, _) => "catch".to_owned(),
                };
                Self::line(indent, header, lines);
                self.write_nested(body, indent, lines);
            }
            BoundKind::Throw { expr } => {
                let text = if expr.is_valid() {
                    format!("throw {};", self.expr(expr))
                } else {
                    "throw;".to_owned()
                };
                Self::line(indent, text, lines);
            }
            BoundKind::NoOp => Self::line(indent, ";", lines),
            _ => Self::line(indent, format!("{};", self.expr(id)), lines),
        }
    }

    fn write_literal(&self, value: ConstValue, out: &mut String) {
        match value {
            ConstValue::Null => out.push_str("null"),
            ConstValue::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            ConstValue::Int(i) => {
                let _ = write!(out, "{i}");
            }
            ConstValue::Double(bits) => {
                let _ = write!(out, "{:?}", f64::from_bits(bits));
            }
            ConstValue::Char(c) => {
                let _ = write!(out, "{c:?}");
            }
            ConstValue::Str(name) => {
                let _ = write!(out, "{:?}", self.symbols.name_str(name));
            }
        }
    }
}
