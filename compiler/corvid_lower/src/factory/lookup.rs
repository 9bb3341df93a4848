//! Method search by name.
//!
//! Walks the receiver type and then its bases. The first type declaring an
//! applicable overload decides the result: a unique candidate whose
//! parameter types equal the argument types wins; failing that, a unique
//! candidate every argument converts to implicitly. Anything else is an
//! error reported through the sink.

use std::fmt::Write;

use corvid_diagnostic::{Diagnostic, ErrorCode};
use corvid_ir::bound::BoundId;
use corvid_ir::symbols::{MethodId, SymbolTable, TypeId};
use smallvec::SmallVec;

use super::SyntheticFactory;
use crate::members::MemberResolver;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Resolution {
    Found(MethodId),
    Ambiguous(SmallVec<[MethodId; 4]>),
    NotFound,
}

fn select_overload(symbols: &SymbolTable, candidates: &[MethodId], args: &[TypeId]) -> Resolution {
    let arity_matches: SmallVec<[MethodId; 4]> = candidates
        .iter()
        .copied()
        .filter(|&m| symbols.method(m).params.len() == args.len())
        .collect();

    let exact: SmallVec<[MethodId; 4]> = arity_matches
        .iter()
        .copied()
        .filter(|&m| {
            symbols
                .method(m)
                .params
                .iter()
                .zip(args)
                .all(|(param, &arg)| param.ty == arg)
        })
        .collect();
    match exact.as_slice() {
        [] => {}
        [only] => return Resolution::Found(*only),
        _ => return Resolution::Ambiguous(exact),
    }

    let applicable: SmallVec<[MethodId; 4]> = arity_matches
        .iter()
        .copied()
        .filter(|&m| {
            symbols
                .method(m)
                .params
                .iter()
                .zip(args)
                .all(|(param, &arg)| symbols.classify_conversion(arg, param.ty).exists())
        })
        .collect();
    match applicable.as_slice() {
        [] => Resolution::NotFound,
        [only] => Resolution::Found(*only),
        _ => Resolution::Ambiguous(applicable),
    }
}

impl SyntheticFactory<'_> {
    /// Call the instance method `name` on `receiver`, choosing the overload
    /// from the argument types.
    ///
    /// Reports a diagnostic and returns a `BadExpression` with `HAS_ERRORS`
    /// when no overload or more than one applies.
    pub fn call_by_name(&mut self, receiver: BoundId, name: &str, args: &[BoundId]) -> BoundId {
        let ty = self.arena.ty(receiver);
        self.call_by_name_in(receiver, ty, name, args)
    }

    /// Like [`call_by_name`](Self::call_by_name) for static methods of `ty`.
    pub fn static_call_by_name(&mut self, ty: TypeId, name: &str, args: &[BoundId]) -> BoundId {
        self.call_by_name_in(BoundId::INVALID, ty, name, args)
    }

    fn call_by_name_in(
        &mut self,
        receiver: BoundId,
        ty: TypeId,
        name: &str,
        args: &[BoundId],
    ) -> BoundId {
        let is_static = !receiver.is_valid();
        let arg_types: SmallVec<[TypeId; 4]> = args.iter().map(|&arg| self.arena.ty(arg)).collect();

        let mut resolution = Resolution::NotFound;
        for owner in self.symbols.base_chain(ty) {
            let candidates: SmallVec<[MethodId; 4]> = self
                .symbols
                .methods_declared(owner, name)
                .into_iter()
                .filter(|&m| self.symbols.method(m).is_static == is_static)
                .collect();
            resolution = select_overload(self.symbols, &candidates, &arg_types);
            if resolution != Resolution::NotFound {
                break;
            }
        }

        match resolution {
            Resolution::Found(method) => {
                let params: SmallVec<[TypeId; 4]> =
                    self.symbols.method(method).params.iter().map(|p| p.ty).collect();
                let converted: SmallVec<[BoundId; 4]> = args
                    .iter()
                    .zip(params)
                    .map(|(&arg, param)| self.convert(arg, param))
                    .collect();
                self.call(receiver, method, &converted)
            }
            Resolution::Ambiguous(candidates) => {
                let mut message = format!(
                    "call to `{}.{name}` is ambiguous between",
                    self.symbols.type_name(ty)
                );
                for (i, candidate) in candidates.iter().enumerate() {
                    let sep = if i == 0 { " " } else { " and " };
                    let _ = write!(message, "{sep}`{}`", self.signature(*candidate));
                }
                let diagnostic = Diagnostic::error(ErrorCode::E2003)
                    .with_message(message)
                    .with_label(self.span, "ambiguous call synthesized here");
                self.report(diagnostic);
                self.bad_expression(args)
            }
            Resolution::NotFound => {
                let diagnostic = Diagnostic::error(ErrorCode::E2002)
                    .with_message(format!(
                        "no method `{}.{name}` accepts arguments ({})",
                        self.symbols.type_name(ty),
                        self.type_list(&arg_types)
                    ))
                    .with_label(self.span, "call synthesized here");
                self.report(diagnostic);
                self.bad_expression(args)
            }
        }
    }

    fn type_list(&self, types: &[TypeId]) -> String {
        types
            .iter()
            .map(|&ty| self.symbols.type_name(ty))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn signature(&self, method: MethodId) -> String {
        let symbol = self.symbols.method(method);
        let params: SmallVec<[TypeId; 4]> = symbol.params.iter().map(|p| p.ty).collect();
        format!(
            "{}({})",
            self.symbols.name_str(symbol.name),
            self.type_list(&params)
        )
    }
}

#[cfg(test)]
mod tests {
    use corvid_ir::symbols::{MethodKind, MethodSymbol, ParameterSymbol, SpecialType};
    use corvid_ir::SharedInterner;

    use super::*;

    fn method(symbols: &mut SymbolTable, owner: TypeId, params: &[TypeId]) -> MethodId {
        let params = params
            .iter()
            .map(|&ty| ParameterSymbol {
                name: symbols.intern("p"),
                ty,
            })
            .collect();
        let symbol = MethodSymbol {
            name: symbols.intern("M"),
            containing_type: owner,
            kind: MethodKind::Ordinary,
            is_static: true,
            params,
            return_type: symbols.special_type(SpecialType::Void),
            enclosing: None,
        };
        symbols.add_method(symbol)
    }

    #[test]
    fn exact_match_beats_convertible_match() {
        let mut symbols = SymbolTable::new(SharedInterner::new());
        let owner = symbols.add_class("N.C", None);
        let int = symbols.special_type(SpecialType::Int);
        let long = symbols.special_type(SpecialType::Long);
        let widening = method(&mut symbols, owner, &[long]);
        let exact = method(&mut symbols, owner, &[int]);

        let candidates = [widening, exact];
        assert_eq!(
            select_overload(&symbols, &candidates, &[int]),
            Resolution::Found(exact)
        );
        assert_eq!(
            select_overload(&symbols, &candidates, &[long]),
            Resolution::Found(widening)
        );
    }

    #[test]
    fn several_convertible_matches_are_ambiguous() {
        let mut symbols = SymbolTable::new(SharedInterner::new());
        let owner = symbols.add_class("N.C", None);
        let char_ty = symbols.special_type(SpecialType::Char);
        let long = symbols.special_type(SpecialType::Long);
        let double = symbols.special_type(SpecialType::Double);
        let a = method(&mut symbols, owner, &[long]);
        let b = method(&mut symbols, owner, &[double]);

        let resolution = select_overload(&symbols, &[a, b], &[char_ty]);
        assert_eq!(resolution, Resolution::Ambiguous([a, b].into_iter().collect()));
    }

    #[test]
    fn arity_and_convertibility_filter_candidates() {
        let mut symbols = SymbolTable::new(SharedInterner::new());
        let owner = symbols.add_class("N.C", None);
        let int = symbols.special_type(SpecialType::Int);
        let string = symbols.special_type(SpecialType::String);
        let unary = method(&mut symbols, owner, &[string]);
        let binary = method(&mut symbols, owner, &[int, int]);

        assert_eq!(
            select_overload(&symbols, &[unary, binary], &[int]),
            Resolution::NotFound
        );
    }
}
