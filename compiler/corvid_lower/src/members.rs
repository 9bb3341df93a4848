//! Library members lowering depends on by fixed identity.
//!
//! A member is named by a [`MemberDescriptor`]: declaring type, name, kind,
//! staticness and parameter types, all as fully qualified names. Resolution
//! goes through [`MemberResolver`] so the factory never assumes the members
//! exist.

use corvid_ir::symbols::{Member, MethodId, SymbolTable, TypeId};
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Field,
    Property,
}

/// Signature of a library member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberDescriptor {
    pub declaring_type: &'static str,
    pub name: &'static str,
    pub kind: MemberKind,
    pub is_static: bool,
    /// Full names of the parameter types. Empty for fields and properties.
    pub params: &'static [&'static str],
}

impl MemberDescriptor {
    const fn method(
        declaring_type: &'static str,
        name: &'static str,
        is_static: bool,
        params: &'static [&'static str],
    ) -> Self {
        MemberDescriptor {
            declaring_type,
            name,
            kind: MemberKind::Method,
            is_static,
            params,
        }
    }

    const fn property(declaring_type: &'static str, name: &'static str) -> Self {
        MemberDescriptor {
            declaring_type,
            name,
            kind: MemberKind::Property,
            is_static: false,
            params: &[],
        }
    }

    /// `Namespace.Type.Member`, as shown in diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type, self.name)
    }
}

/// Members of the special types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialMember {
    ObjectToString,
    ObjectEquals,
    ObjectGetHashCode,
    StringConcat,
    StringEquality,
    StringLength,
}

impl SpecialMember {
    pub const ALL: [SpecialMember; 6] = [
        SpecialMember::ObjectToString,
        SpecialMember::ObjectEquals,
        SpecialMember::ObjectGetHashCode,
        SpecialMember::StringConcat,
        SpecialMember::StringEquality,
        SpecialMember::StringLength,
    ];

    pub fn descriptor(self) -> MemberDescriptor {
        const OBJECT: &str = "System.Object";
        const STRING: &str = "System.String";
        match self {
            SpecialMember::ObjectToString => MemberDescriptor::method(OBJECT, "ToString", false, &[]),
            SpecialMember::ObjectEquals => {
                MemberDescriptor::method(OBJECT, "Equals", false, &[OBJECT])
            }
            SpecialMember::ObjectGetHashCode => {
                MemberDescriptor::method(OBJECT, "GetHashCode", false, &[])
            }
            SpecialMember::StringConcat => {
                MemberDescriptor::method(STRING, "Concat", true, &[STRING, STRING])
            }
            SpecialMember::StringEquality => {
                MemberDescriptor::method(STRING, "op_Equality", true, &[STRING, STRING])
            }
            SpecialMember::StringLength => MemberDescriptor::property(STRING, "Length"),
        }
    }
}

/// Library types outside the special set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WellKnownType {
    SystemType,
    SystemException,
    SystemIDisposable,
}

impl WellKnownType {
    pub fn full_name(self) -> &'static str {
        match self {
            WellKnownType::SystemType => "System.Type",
            WellKnownType::SystemException => "System.Exception",
            WellKnownType::SystemIDisposable => "System.IDisposable",
        }
    }
}

/// Library members outside the special types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WellKnownMember {
    TypeGetTypeFromHandle,
    ExceptionMessage,
    IDisposableDispose,
    MonitorEnter,
    MonitorExit,
}

impl WellKnownMember {
    pub fn descriptor(self) -> MemberDescriptor {
        match self {
            WellKnownMember::TypeGetTypeFromHandle => MemberDescriptor::method(
                "System.Type",
                "GetTypeFromHandle",
                true,
                &["System.RuntimeTypeHandle"],
            ),
            WellKnownMember::ExceptionMessage => {
                MemberDescriptor::property("System.Exception", "Message")
            }
            WellKnownMember::IDisposableDispose => {
                MemberDescriptor::method("System.IDisposable", "Dispose", false, &[])
            }
            WellKnownMember::MonitorEnter => MemberDescriptor::method(
                "System.Threading.Monitor",
                "Enter",
                true,
                &["System.Object"],
            ),
            WellKnownMember::MonitorExit => MemberDescriptor::method(
                "System.Threading.Monitor",
                "Exit",
                true,
                &["System.Object"],
            ),
        }
    }
}

/// Looks up library types and members for lowering.
pub trait MemberResolver {
    fn resolve_type(&self, full_name: &str) -> Option<TypeId>;

    /// The member matching `descriptor` exactly, if declared.
    fn resolve_member(&self, descriptor: &MemberDescriptor) -> Option<Member>;

    /// Methods named `name` declared directly on `ty`, in declaration order.
    fn methods_declared(&self, ty: TypeId, name: &str) -> SmallVec<[MethodId; 4]>;
}

impl MemberResolver for SymbolTable {
    fn resolve_type(&self, full_name: &str) -> Option<TypeId> {
        self.find_type(full_name)
    }

    fn resolve_member(&self, descriptor: &MemberDescriptor) -> Option<Member> {
        let ty = self.find_type(descriptor.declaring_type)?;
        let name = self.interner().get(descriptor.name)?;
        self.members(ty, name)
            .iter()
            .copied()
            .find(|member| matches_descriptor(self, descriptor, *member))
    }

    fn methods_declared(&self, ty: TypeId, name: &str) -> SmallVec<[MethodId; 4]> {
        match self.interner().get(name) {
            Some(name) => self.methods_named(ty, name).collect(),
            None => SmallVec::new(),
        }
    }
}

fn matches_descriptor(symbols: &SymbolTable, descriptor: &MemberDescriptor, member: Member) -> bool {
    match (descriptor.kind, member) {
        (MemberKind::Method, Member::Method(id)) => {
            let method = symbols.method(id);
            method.is_static == descriptor.is_static
                && method.params.len() == descriptor.params.len()
                && method
                    .params
                    .iter()
                    .zip(descriptor.params)
                    .all(|(param, expected)| full_name(symbols, param.ty) == *expected)
        }
        (MemberKind::Field, Member::Field(id)) => symbols.field(id).is_static == descriptor.is_static,
        (MemberKind::Property, Member::Property(id)) => {
            symbols.property(id).is_static == descriptor.is_static
        }
        _ => false,
    }
}

fn full_name(symbols: &SymbolTable, ty: TypeId) -> &'static str {
    symbols.name_str(symbols.type_symbol(ty).full_name)
}
