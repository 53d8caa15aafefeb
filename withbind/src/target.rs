//! Collection-construction targets.
//!
//! A target classifies the type a collection expression is being converted
//! to. Classification itself is the host's job (it knows conversions and
//! attribute lookup); the resolver only consumes the result.

use crate::types::{DefId, Ty, TyKind};

/// Which well-known collection interface a target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    Enumerable,
    ReadOnlyCollection,
    ReadOnlyList,
    Collection,
    List,
    Dictionary,
    ReadOnlyDictionary,
}

impl InterfaceKind {
    /// Read-only-shaped interfaces have no construction path; a `with(...)`
    /// element must be empty.
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            InterfaceKind::Enumerable
                | InterfaceKind::ReadOnlyCollection
                | InterfaceKind::ReadOnlyList
                | InterfaceKind::ReadOnlyDictionary
        )
    }

    pub fn is_dictionary_shaped(self) -> bool {
        matches!(self, InterfaceKind::Dictionary | InterfaceKind::ReadOnlyDictionary)
    }

    /// The interface's display name, without type arguments.
    pub fn name(self) -> &'static str {
        match self {
            InterfaceKind::Enumerable => "IEnumerable",
            InterfaceKind::ReadOnlyCollection => "IReadOnlyCollection",
            InterfaceKind::ReadOnlyList => "IReadOnlyList",
            InterfaceKind::Collection => "ICollection",
            InterfaceKind::List => "IList",
            InterfaceKind::Dictionary => "IDictionary",
            InterfaceKind::ReadOnlyDictionary => "IReadOnlyDictionary",
        }
    }
}

/// The classified target of a collection expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionTarget {
    /// `T[]` or `T[,]`. Arrays are materialized directly; construction
    /// arguments are never supported on them.
    Array { element: Ty, rank: u32 },
    /// `Span<T>` / `ReadOnlySpan<T>`. Like arrays, never argument-constructible.
    Span { element: Ty, read_only: bool },
    /// One of the well-known collection interfaces, with its type arguments
    /// (one for sequences, key + value for dictionaries).
    Interface { kind: InterfaceKind, args: Vec<Ty> },
    /// A concrete class or struct constructed through its own constructors.
    UserDefined { ty: Ty },
    /// A type with a collection-builder attribute naming a factory method.
    BuilderBacked {
        ty: Ty,
        builder: DefId,
        method_name: String,
    },
    /// A generic type parameter. Only an empty `with()` is meaningful.
    TypeParameter { name: String },
}

impl CollectionTarget {
    /// The element type elements convert to (value type for dictionaries is
    /// the pair; callers needing key/value split use `Interface::args`).
    pub fn element_ty(&self) -> Option<&Ty> {
        match self {
            CollectionTarget::Array { element, .. } | CollectionTarget::Span { element, .. } => {
                Some(element)
            }
            CollectionTarget::Interface { args, .. } => args.first(),
            CollectionTarget::UserDefined { .. }
            | CollectionTarget::BuilderBacked { .. }
            | CollectionTarget::TypeParameter { .. } => None,
        }
    }

    /// Display string of the target type for diagnostics.
    pub fn display(&self) -> String {
        match self {
            CollectionTarget::Array { element, rank } => {
                Ty::array(element.clone(), *rank).to_string()
            }
            CollectionTarget::Span { element, read_only } => {
                let t = if *read_only {
                    Ty::read_only_span_of(element.clone())
                } else {
                    Ty::span_of(element.clone())
                };
                t.to_string()
            }
            CollectionTarget::Interface { kind, args } => {
                let mut s = String::from(kind.name());
                s.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        s.push_str(", ");
                    }
                    s.push_str(&arg.to_string());
                }
                s.push('>');
                s
            }
            CollectionTarget::UserDefined { ty } | CollectionTarget::BuilderBacked { ty, .. } => {
                ty.to_string()
            }
            CollectionTarget::TypeParameter { name } => name.clone(),
        }
    }

    /// True for targets whose values are by-ref-like regardless of the
    /// universe (spans). Named ref structs are answered by the universe.
    pub fn is_span(&self) -> bool {
        matches!(self, CollectionTarget::Span { .. })
    }

    /// The named type being constructed, for user-defined and builder-backed
    /// targets.
    pub fn constructed_def(&self) -> Option<DefId> {
        match self {
            CollectionTarget::UserDefined { ty } | CollectionTarget::BuilderBacked { ty, .. } => {
                match ty.kind() {
                    TyKind::Named { def, .. } => Some(*def),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
