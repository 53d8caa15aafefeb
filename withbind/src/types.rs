//! The type representation shared by targets, parameters, and arguments.
//!
//! Types are immutable trees behind an `Arc`, so cloning one is a pointer
//! copy. Resolution never mutates a type; generic instantiation produces a
//! fresh tree via [`Ty::substitute`].
//!
//! Named types carry their display name alongside the [`DefId`] so that
//! diagnostics can render a signature without a symbol-table lookup. The
//! authoritative definition (constructors, constraints, accessibility) always
//! lives in the universe keyed by the `DefId`.

use std::fmt;
use std::sync::Arc;

/// Identifies a type definition in the universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

/// Identifies the assembly (module/compilation unit) a definition lives in.
///
/// Used only for `internal` accessibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssemblyId(pub u32);

/// Built-in scalar types, named after their surface keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimTy {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Bool,
    Char,
    Str,
    Object,
}

impl PrimTy {
    pub fn is_numeric(self) -> bool {
        !matches!(self, PrimTy::Bool | PrimTy::Str | PrimTy::Object)
    }

    /// The surface keyword for this primitive.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimTy::Int8 => "sbyte",
            PrimTy::UInt8 => "byte",
            PrimTy::Int16 => "short",
            PrimTy::UInt16 => "ushort",
            PrimTy::Int32 => "int",
            PrimTy::UInt32 => "uint",
            PrimTy::Int64 => "long",
            PrimTy::UInt64 => "ulong",
            PrimTy::Float32 => "float",
            PrimTy::Float64 => "double",
            PrimTy::Bool => "bool",
            PrimTy::Char => "char",
            PrimTy::Str => "string",
            PrimTy::Object => "object",
        }
    }
}

/// A reference to a generic type parameter by position.
///
/// Constructor parameters refer to the owning type's parameter list; factory
/// method parameters refer to the method's own list. The two are never mixed
/// inside one signature, so a flat index is enough.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TyParamRef {
    pub index: u32,
    /// Display name (`T`, `TKey`); not identity.
    pub name: String,
}

/// A type. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ty {
    kind: Arc<TyKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TyKind {
    Prim(PrimTy),
    /// A class, struct, or interface reference.
    Named {
        def: DefId,
        name: String,
        args: Vec<Ty>,
    },
    /// A single- or multi-dimensional array. `rank >= 1`.
    Array { element: Ty, rank: u32 },
    /// A contiguous by-reference-only view over elements.
    Span { element: Ty, read_only: bool },
    /// An uninstantiated generic type parameter.
    Param(TyParamRef),
    /// The statically-unchecked type; rejected wherever it reaches binding.
    Dynamic,
    /// Produced by the host for unresolvable expressions; converts freely.
    Error,
}

impl Ty {
    pub fn new(kind: TyKind) -> Self {
        Self { kind: Arc::new(kind) }
    }

    pub fn kind(&self) -> &TyKind {
        &self.kind
    }

    // Shorthand constructors for common shapes.

    pub fn prim(p: PrimTy) -> Self {
        Ty::new(TyKind::Prim(p))
    }

    pub fn int() -> Self {
        Ty::prim(PrimTy::Int32)
    }

    pub fn string() -> Self {
        Ty::prim(PrimTy::Str)
    }

    pub fn object() -> Self {
        Ty::prim(PrimTy::Object)
    }

    pub fn named(def: DefId, name: impl Into<String>, args: Vec<Ty>) -> Self {
        Ty::new(TyKind::Named { def, name: name.into(), args })
    }

    pub fn array(element: Ty, rank: u32) -> Self {
        Ty::new(TyKind::Array { element, rank })
    }

    pub fn span_of(element: Ty) -> Self {
        Ty::new(TyKind::Span { element, read_only: false })
    }

    pub fn read_only_span_of(element: Ty) -> Self {
        Ty::new(TyKind::Span { element, read_only: true })
    }

    pub fn param(index: u32, name: impl Into<String>) -> Self {
        Ty::new(TyKind::Param(TyParamRef { index, name: name.into() }))
    }

    pub fn dynamic() -> Self {
        Ty::new(TyKind::Dynamic)
    }

    pub fn error() -> Self {
        Ty::new(TyKind::Error)
    }

    /// The `DefId` behind a named type, if this is one.
    pub fn as_named(&self) -> Option<(DefId, &[Ty])> {
        match self.kind() {
            TyKind::Named { def, args, .. } => Some((*def, args)),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind(), TyKind::Error)
    }

    /// True if `dynamic` appears anywhere in the tree.
    pub fn contains_dynamic(&self) -> bool {
        match self.kind() {
            TyKind::Dynamic => true,
            TyKind::Prim(_) | TyKind::Param(_) | TyKind::Error => false,
            TyKind::Named { args, .. } => args.iter().any(Ty::contains_dynamic),
            TyKind::Array { element, .. } | TyKind::Span { element, .. } => {
                element.contains_dynamic()
            }
        }
    }

    /// True if an uninstantiated `Param` appears anywhere in the tree.
    pub fn contains_param(&self) -> bool {
        match self.kind() {
            TyKind::Param(_) => true,
            TyKind::Prim(_) | TyKind::Dynamic | TyKind::Error => false,
            TyKind::Named { args, .. } => args.iter().any(Ty::contains_param),
            TyKind::Array { element, .. } | TyKind::Span { element, .. } => {
                element.contains_param()
            }
        }
    }

    /// Replace every `Param(i)` with `args[i]`.
    ///
    /// Out-of-range parameter references are left untouched; the universe
    /// integrity check reports them as malformed rather than panicking here.
    pub fn substitute(&self, args: &[Ty]) -> Ty {
        match self.kind() {
            TyKind::Param(p) => match args.get(p.index as usize) {
                Some(replacement) => replacement.clone(),
                None => self.clone(),
            },
            TyKind::Prim(_) | TyKind::Dynamic | TyKind::Error => self.clone(),
            TyKind::Named { def, name, args: targs } => {
                if targs.is_empty() {
                    self.clone()
                } else {
                    Ty::named(
                        *def,
                        name.clone(),
                        targs.iter().map(|t| t.substitute(args)).collect(),
                    )
                }
            }
            TyKind::Array { element, rank } => Ty::array(element.substitute(args), *rank),
            TyKind::Span { element, read_only } => Ty::new(TyKind::Span {
                element: element.substitute(args),
                read_only: *read_only,
            }),
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TyKind::Prim(p) => f.write_str(p.keyword()),
            TyKind::Named { name, args, .. } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TyKind::Array { element, rank } => {
                write!(f, "{}[", element)?;
                for _ in 1..*rank {
                    write!(f, ",")?;
                }
                write!(f, "]")
            }
            TyKind::Span { element, read_only } => {
                let name = if *read_only { "ReadOnlySpan" } else { "Span" };
                write!(f, "{}<{}>", name, element)
            }
            TyKind::Param(p) => f.write_str(&p.name),
            TyKind::Dynamic => f.write_str("dynamic"),
            TyKind::Error => f.write_str("<error>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_surface_syntax() {
        assert_eq!(Ty::int().to_string(), "int");
        assert_eq!(Ty::array(Ty::int(), 1).to_string(), "int[]");
        assert_eq!(Ty::array(Ty::string(), 2).to_string(), "string[,]");
        assert_eq!(Ty::read_only_span_of(Ty::int()).to_string(), "ReadOnlySpan<int>");
        assert_eq!(
            Ty::named(DefId(3), "List", vec![Ty::int()]).to_string(),
            "List<int>"
        );
        assert_eq!(
            Ty::named(DefId(9), "Dictionary", vec![Ty::string(), Ty::int()]).to_string(),
            "Dictionary<string, int>"
        );
        assert_eq!(Ty::param(0, "T").to_string(), "T");
    }

    #[test]
    fn substitute_replaces_params_everywhere() {
        let template = Ty::read_only_span_of(Ty::param(0, "T"));
        let concrete = template.substitute(&[Ty::string()]);
        assert_eq!(concrete, Ty::read_only_span_of(Ty::string()));

        let nested = Ty::named(DefId(1), "List", vec![Ty::array(Ty::param(1, "U"), 1)]);
        let got = nested.substitute(&[Ty::int(), Ty::object()]);
        assert_eq!(
            got,
            Ty::named(DefId(1), "List", vec![Ty::array(Ty::object(), 1)])
        );
    }

    #[test]
    fn substitute_out_of_range_is_left_alone() {
        let t = Ty::param(4, "T");
        assert_eq!(t.substitute(&[Ty::int()]), t);
    }

    #[test]
    fn dynamic_detection_is_deep() {
        let t = Ty::named(DefId(0), "List", vec![Ty::dynamic()]);
        assert!(t.contains_dynamic());
        assert!(!Ty::object().contains_dynamic());
        assert!(Ty::array(Ty::dynamic(), 1).contains_dynamic());
    }

    #[test]
    fn clones_share_structure() {
        let a = Ty::named(DefId(7), "HashSet", vec![Ty::int()]);
        let b = a.clone();
        assert_eq!(a, b);
    }
}
