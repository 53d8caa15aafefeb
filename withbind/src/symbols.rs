//! Symbol-side declarations: type definitions, constructors, builder factory
//! methods, and their parameters.
//!
//! These are the host's declarations mirrored into a form the resolver can
//! interrogate. Everything here is plain data in declaration order; the
//! resolver never mutates a definition, and candidate ordering falls out of
//! the `Vec` order the host registered.

use bitflags::bitflags;
use ordered_float::OrderedFloat;

use crate::types::{AssemblyId, DefId, Ty};

/// By-reference passing mode of a parameter or argument.
///
/// `RefReadonly` is declaration-only; call sites write `ref`, `in`, `out`,
/// or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    None,
    Ref,
    In,
    RefReadonly,
    Out,
}

impl RefKind {
    /// The surface keyword, empty for by-value.
    pub fn keyword(self) -> &'static str {
        match self {
            RefKind::None => "",
            RefKind::Ref => "ref",
            RefKind::In => "in",
            RefKind::RefReadonly => "ref readonly",
            RefKind::Out => "out",
        }
    }
}

/// Declared accessibility of a member or type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    ProtectedInternal,
    Internal,
    Protected,
    Private,
}

impl Accessibility {
    /// Partial visibility order: true when `self` is visible everywhere
    /// `other` is.
    pub fn at_least_as_visible_as(self, other: Accessibility) -> bool {
        use Accessibility::*;
        match (self, other) {
            (Public, _) => true,
            (ProtectedInternal, Public) => false,
            (ProtectedInternal, _) => true,
            (Internal, Internal | Private) => true,
            (Internal, _) => false,
            (Protected, Protected | Private) => true,
            (Protected, _) => false,
            (Private, Private) => true,
            (Private, _) => false,
        }
    }
}

/// `[Obsolete]` metadata on a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObsoleteInfo {
    pub message: Option<String>,
    /// Error-grade obsoletion removes the candidate from selection.
    pub is_error: bool,
}

bitflags! {
    /// Declared constraints on a generic type parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConstraintFlags: u8 {
        /// The `class` constraint: argument must be a reference type.
        const REFERENCE_TYPE = 1 << 0;
        /// The `struct` constraint: argument must be a non-nullable value type.
        const VALUE_TYPE = 1 << 1;
        /// The `allows ref struct` anti-constraint: by-ref-like arguments ok.
        const ALLOWS_REF_STRUCT = 1 << 2;
    }
}

/// A generic type parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamDef {
    pub name: String,
    pub constraints: ConstraintFlags,
}

impl TypeParamDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), constraints: ConstraintFlags::empty() }
    }

    pub fn with_constraints(name: impl Into<String>, constraints: ConstraintFlags) -> Self {
        Self { name: name.into(), constraints }
    }
}

/// A compile-time constant, used for optional-parameter defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Int(i64),
    Float(OrderedFloat<f64>),
    Bool(bool),
    Str(String),
    Null,
    /// `default` of the parameter's type (zero value / empty span).
    DefaultOf(Ty),
}

/// One declared parameter of a constructor or factory method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Ty,
    pub ref_kind: RefKind,
    /// Present exactly when the parameter is optional.
    pub default: Option<ConstValue>,
    /// Trailing `params` collection parameter.
    pub is_params: bool,
    /// `scoped` annotation: the callee promises not to retain the reference.
    pub scoped: bool,
}

impl Param {
    /// A required by-value parameter.
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            ref_kind: RefKind::None,
            default: None,
            is_params: false,
            scoped: false,
        }
    }

    pub fn by_ref(mut self, kind: RefKind) -> Self {
        self.ref_kind = kind;
        self
    }

    pub fn optional(mut self, default: ConstValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn params(mut self) -> Self {
        self.is_params = true;
        self
    }

    pub fn scoped(mut self) -> Self {
        self.scoped = true;
        self
    }

    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

/// A declared instance constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub params: Vec<Param>,
    pub accessibility: Accessibility,
    pub obsolete: Option<ObsoleteInfo>,
    /// The declaration itself failed to load (missing reference etc.).
    pub use_site_error: bool,
    /// Overload-resolution priority; higher wins before betterness runs.
    pub priority: i32,
}

impl Constructor {
    pub fn new(params: Vec<Param>) -> Self {
        Self {
            params,
            accessibility: Accessibility::Public,
            obsolete: None,
            use_site_error: false,
            priority: 0,
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_obsolete(mut self, info: ObsoleteInfo) -> Self {
        self.obsolete = Some(info);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_use_site_error(mut self) -> Self {
        self.use_site_error = true;
        self
    }

    pub fn is_parameterless(&self) -> bool {
        self.params.is_empty()
    }
}

/// One overload of a builder type's static factory method.
///
/// `params` is the declared list including the span-of-elements parameter;
/// `items_index` marks which one it is. Enumeration normalizes this into
/// explicit parameters plus an items slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryMethod {
    pub name: String,
    pub type_params: Vec<TypeParamDef>,
    pub params: Vec<Param>,
    pub items_index: usize,
    pub accessibility: Accessibility,
    pub obsolete: Option<ObsoleteInfo>,
    pub use_site_error: bool,
    /// `[UnmanagedCallersOnly]` methods are never callable from here.
    pub unmanaged_callers_only: bool,
    pub priority: i32,
}

impl FactoryMethod {
    pub fn new(name: impl Into<String>, params: Vec<Param>, items_index: usize) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            params,
            items_index,
            accessibility: Accessibility::Public,
            obsolete: None,
            use_site_error: false,
            unmanaged_callers_only: false,
            priority: 0,
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeParamDef>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_obsolete(mut self, info: ObsoleteInfo) -> Self {
        self.obsolete = Some(info);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_use_site_error(mut self) -> Self {
        self.use_site_error = true;
        self
    }

    pub fn unmanaged_callers_only(mut self) -> Self {
        self.unmanaged_callers_only = true;
        self
    }
}

/// What sort of definition a [`TypeDef`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Class,
    Struct {
        /// By-ref-like (`ref struct`): values cannot escape to the heap.
        ref_like: bool,
    },
    Interface,
}

/// A type definition registered in the universe.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub assembly: AssemblyId,
    pub accessibility: Accessibility,
    pub kind: TypeDefKind,
    pub type_params: Vec<TypeParamDef>,
    /// Base class, expressed over this def's own type parameters. `None` for
    /// structs, interfaces, and root classes.
    pub base: Option<Ty>,
    /// Declaration order; candidate enumeration preserves it.
    pub constructors: Vec<Constructor>,
    /// Implemented interfaces, over this def's own type parameters.
    pub interfaces: Vec<Ty>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, assembly: AssemblyId, kind: TypeDefKind) -> Self {
        Self {
            name: name.into(),
            assembly,
            accessibility: Accessibility::Public,
            kind,
            type_params: Vec::new(),
            base: None,
            constructors: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeParamDef>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_base(mut self, base: Ty) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_constructors(mut self, constructors: Vec<Constructor>) -> Self {
        self.constructors = constructors;
        self
    }

    pub fn with_interfaces(mut self, interfaces: Vec<Ty>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn is_reference_type(&self) -> bool {
        matches!(self.kind, TypeDefKind::Class | TypeDefKind::Interface)
    }

    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeDefKind::Struct { .. })
    }

    pub fn is_ref_like(&self) -> bool {
        matches!(self.kind, TypeDefKind::Struct { ref_like: true })
    }

    /// The `Ty` referring to this definition with the given type arguments.
    pub fn ty(&self, def: DefId, args: Vec<Ty>) -> Ty {
        Ty::named(def, self.name.clone(), args)
    }
}
