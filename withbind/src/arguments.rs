//! Call-site inputs: the normalized `with(...)` element and its arguments.
//!
//! The host front end lowers each argument expression into an [`ArgValue`]
//! carrying the answers to the queries resolution needs (static type, escape
//! scope, value category). The resolver never sees the expression itself.

use crate::span::Span;
use crate::symbols::RefKind;
use crate::types::{AssemblyId, DefId, Ty};

/// Lexical nesting depth used by escape analysis.
///
/// `0` is the widest scope (static storage / caller-visible); larger values
/// are deeper, shorter-lived scopes. A value at depth `d` may be stored
/// anywhere at depth `>= d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeDepth(pub u32);

impl ScopeDepth {
    pub const WIDEST: ScopeDepth = ScopeDepth(0);

    /// True when `self` outlives `other`.
    pub fn wider_than(self, other: ScopeDepth) -> bool {
        self.0 < other.0
    }

    pub fn deeper(self) -> ScopeDepth {
        ScopeDepth(self.0 + 1)
    }
}

/// The facts resolution needs about one argument expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgValue {
    /// Statically inferred type of the expression.
    pub ty: Ty,
    /// Scope the expression's value can safely escape to.
    pub escape: ScopeDepth,
    /// The expression designates addressable storage (a variable).
    pub is_variable: bool,
    /// The storage is assignable (required for `out`).
    pub is_writable: bool,
    /// The argument carries a `scoped` annotation at the call site.
    pub scoped: bool,
    pub span: Span,
}

impl ArgValue {
    /// A plain rvalue of the given type: not addressable, not writable,
    /// escaping anywhere.
    pub fn of(ty: Ty) -> Self {
        Self {
            ty,
            escape: ScopeDepth::WIDEST,
            is_variable: false,
            is_writable: false,
            scoped: false,
            span: Span::dummy(),
        }
    }

    /// An addressable, writable local of the given type.
    pub fn variable(ty: Ty) -> Self {
        Self { is_variable: true, is_writable: true, ..Self::of(ty) }
    }

    pub fn escaping_at(mut self, depth: ScopeDepth) -> Self {
        self.escape = depth;
        self
    }

    pub fn scoped(mut self) -> Self {
        self.scoped = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.is_writable = false;
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// One argument inside `with(...)`, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub value: ArgValue,
    /// `ref` / `in` / `out` as written; [`RefKind::RefReadonly`] never
    /// appears at a call site.
    pub ref_kind: RefKind,
    /// Present for `name: expr` arguments.
    pub name: Option<String>,
}

impl Argument {
    pub fn positional(value: ArgValue) -> Self {
        Self { value, ref_kind: RefKind::None, name: None }
    }

    pub fn named(name: impl Into<String>, value: ArgValue) -> Self {
        Self { value, ref_kind: RefKind::None, name: Some(name.into()) }
    }

    pub fn by_ref(mut self, kind: RefKind) -> Self {
        self.ref_kind = kind;
        self
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// A normalized `with(...)` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithElement {
    pub args: Vec<Argument>,
    /// Position of the element within the collection literal; anything but
    /// `0` is rejected up front.
    pub element_index: usize,
    pub span: Span,
}

impl WithElement {
    pub fn new(args: Vec<Argument>) -> Self {
        Self { args, element_index: 0, span: Span::dummy() }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn at_element(mut self, index: usize) -> Self {
        self.element_index = index;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Where resolution is happening, for accessibility and escape checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Assembly the call site compiles into.
    pub assembly: AssemblyId,
    /// Innermost type declaration containing the call site, if any.
    pub enclosing_type: Option<DefId>,
    /// Scope the constructed collection lives in.
    pub scope_depth: ScopeDepth,
}

impl CallSite {
    pub fn new(assembly: AssemblyId) -> Self {
        Self { assembly, enclosing_type: None, scope_depth: ScopeDepth::WIDEST }
    }

    pub fn in_type(mut self, def: DefId) -> Self {
        self.enclosing_type = Some(def);
        self
    }

    pub fn at_depth(mut self, depth: ScopeDepth) -> Self {
        self.scope_depth = depth;
        self
    }
}
