//! Implicit-conversion classification.
//!
//! Binding needs two questions answered about an argument/parameter pair:
//! does an implicit conversion exist at all (applicability), and when two
//! candidates both accept the argument, which parameter type is the better
//! conversion target (selection). Both are pure over the universe.
//!
//! The conversion set is the one that matters for construction arguments:
//! identity, numeric widening, reference conversions through base classes
//! and interfaces, boxing to `object`, and `Span` to `ReadOnlySpan`.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;

use crate::types::{PrimTy, Ty, TyKind};
use crate::universe::{Universe, UniverseError};

/// How an argument converts to a parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    Identity,
    /// Widening between numeric primitives.
    Numeric,
    /// Reference conversion to a base class or implemented interface.
    Reference,
    /// Value type to `object`.
    Boxing,
    /// `Span<T>` to `ReadOnlySpan<T>`.
    Span,
}

/// Classify the implicit conversion from `from` to `to`, or `None` when no
/// implicit conversion exists.
pub fn classify<U: Universe + ?Sized>(
    universe: &U,
    from: &Ty,
    to: &Ty,
) -> Result<Option<Conversion>, UniverseError> {
    // Error types convert freely so one bad expression does not cascade.
    if from.is_error() || to.is_error() {
        return Ok(Some(Conversion::Identity));
    }
    if from == to {
        return Ok(Some(Conversion::Identity));
    }

    match (from.kind(), to.kind()) {
        (TyKind::Prim(f), TyKind::Prim(t)) => {
            if *t == PrimTy::Object {
                return Ok(Some(if universe.is_reference_type(from)? {
                    Conversion::Reference
                } else {
                    Conversion::Boxing
                }));
            }
            Ok(widens_to(*f, *t).then_some(Conversion::Numeric))
        }
        (_, TyKind::Prim(PrimTy::Object)) => {
            if universe.is_ref_like(from)? {
                // By-ref-like values never box.
                Ok(None)
            } else if universe.is_reference_type(from)? {
                Ok(Some(Conversion::Reference))
            } else if universe.is_value_type(from)? {
                Ok(Some(Conversion::Boxing))
            } else {
                Ok(None)
            }
        }
        (
            TyKind::Span { element: fe, read_only: false },
            TyKind::Span { element: te, read_only: true },
        ) => Ok((fe == te).then_some(Conversion::Span)),
        (TyKind::Named { .. }, TyKind::Named { .. }) => {
            if reference_convertible(universe, from, to)? {
                Ok(Some(Conversion::Reference))
            } else {
                Ok(None)
            }
        }
        (TyKind::Array { element: fe, rank: fr }, TyKind::Array { element: te, rank: tr }) => {
            // Array covariance over reference elements.
            if fr == tr
                && universe.is_reference_type(fe)?
                && matches!(classify(universe, fe, te)?, Some(Conversion::Identity | Conversion::Reference))
            {
                Ok(Some(Conversion::Reference))
            } else {
                Ok(None)
            }
        }
        _ => Ok(None),
    }
}

/// True when `t1` is a better conversion target than `t2` for an argument of
/// type `from` (both are assumed applicable). `Greater` means `t1` wins.
pub fn compare_targets<U: Universe + ?Sized>(
    universe: &U,
    from: &Ty,
    t1: &Ty,
    t2: &Ty,
) -> Result<Ordering, UniverseError> {
    if t1 == t2 {
        return Ok(Ordering::Equal);
    }

    let c1 = classify(universe, from, t1)?;
    let c2 = classify(universe, from, t2)?;
    match (c1 == Some(Conversion::Identity), c2 == Some(Conversion::Identity)) {
        (true, false) => return Ok(Ordering::Greater),
        (false, true) => return Ok(Ordering::Less),
        _ => {}
    }

    // Neither (or both) identity: the more specific target wins, where
    // "more specific" means it converts implicitly to the other one-way.
    let t1_to_t2 = classify(universe, t1, t2)?.is_some();
    let t2_to_t1 = classify(universe, t2, t1)?.is_some();
    Ok(match (t1_to_t2, t2_to_t1) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    })
}

/// Implicit numeric widenings between primitives.
fn widens_to(from: PrimTy, to: PrimTy) -> bool {
    use PrimTy::*;
    match from {
        Int8 => matches!(to, Int16 | Int32 | Int64 | Float32 | Float64),
        UInt8 => matches!(to, Int16 | UInt16 | Int32 | UInt32 | Int64 | UInt64 | Float32 | Float64),
        Int16 => matches!(to, Int32 | Int64 | Float32 | Float64),
        UInt16 => matches!(to, Int32 | UInt32 | Int64 | UInt64 | Float32 | Float64),
        Int32 => matches!(to, Int64 | Float32 | Float64),
        UInt32 => matches!(to, Int64 | UInt64 | Float32 | Float64),
        Int64 => matches!(to, Float32 | Float64),
        UInt64 => matches!(to, Float32 | Float64),
        Char => matches!(to, UInt16 | Int32 | UInt32 | Int64 | UInt64 | Float32 | Float64),
        Float32 => matches!(to, Float64),
        Float64 | Bool | Str | Object => false,
    }
}

/// Walk base classes and (transitively) interfaces looking for `to`.
fn reference_convertible<U: Universe + ?Sized>(
    universe: &U,
    from: &Ty,
    to: &Ty,
) -> Result<bool, UniverseError> {
    let to_def = match to.kind() {
        TyKind::Named { def, .. } => *def,
        _ => return Ok(false),
    };
    if !universe.type_def(to_def)?.is_reference_type() {
        return Ok(false);
    }

    let mut seen: FxHashSet<Ty> = FxHashSet::default();
    let mut work: Vec<Ty> = vec![from.clone()];
    while let Some(cur) = work.pop() {
        if cur == *to {
            // The starting type itself was handled by the identity check;
            // anything found through the walk is a proper conversion.
            if cur != *from {
                return Ok(true);
            }
        }
        if !seen.insert(cur.clone()) {
            continue;
        }
        let (def, args) = match cur.kind() {
            TyKind::Named { def, args, .. } => (*def, args.clone()),
            _ => continue,
        };
        let td = universe.type_def(def)?;
        if let Some(base) = &td.base {
            work.push(base.substitute(&args));
        }
        for iface in &td.interfaces {
            work.push(iface.substitute(&args));
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{TypeDef, TypeDefKind};
    use crate::types::{AssemblyId, DefId};
    use crate::universe::MemoryUniverse;

    /// A small class hierarchy: `Derived : Base : object`, `Base : IFace<T>`.
    fn hierarchy() -> (MemoryUniverse, Ty, Ty, Ty) {
        let mut u = MemoryUniverse::new();
        let iface = u.add_type(
            TypeDef::new("IFace", AssemblyId(0), TypeDefKind::Interface)
                .with_type_params(vec![crate::symbols::TypeParamDef::new("T")]),
        );
        let base = u.add_type(
            TypeDef::new("Base", AssemblyId(0), TypeDefKind::Class)
                .with_interfaces(vec![Ty::named(iface, "IFace", vec![Ty::int()])]),
        );
        let derived = u.add_type(
            TypeDef::new("Derived", AssemblyId(0), TypeDefKind::Class)
                .with_base(Ty::named(base, "Base", vec![])),
        );
        let iface_ty = Ty::named(iface, "IFace", vec![Ty::int()]);
        let base_ty = Ty::named(base, "Base", vec![]);
        let derived_ty = Ty::named(derived, "Derived", vec![]);
        (u, iface_ty, base_ty, derived_ty)
    }

    #[test]
    fn identity_and_widening() {
        let u = MemoryUniverse::new();
        assert_eq!(classify(&u, &Ty::int(), &Ty::int()).unwrap(), Some(Conversion::Identity));
        assert_eq!(
            classify(&u, &Ty::int(), &Ty::prim(PrimTy::Int64)).unwrap(),
            Some(Conversion::Numeric)
        );
        assert_eq!(
            classify(&u, &Ty::prim(PrimTy::Int64), &Ty::int()).unwrap(),
            None
        );
        assert_eq!(classify(&u, &Ty::string(), &Ty::int()).unwrap(), None);
    }

    #[test]
    fn object_conversions_split_reference_and_boxing() {
        let u = MemoryUniverse::new();
        assert_eq!(
            classify(&u, &Ty::string(), &Ty::object()).unwrap(),
            Some(Conversion::Reference)
        );
        assert_eq!(
            classify(&u, &Ty::int(), &Ty::object()).unwrap(),
            Some(Conversion::Boxing)
        );
        // Spans never reach the heap.
        assert_eq!(
            classify(&u, &Ty::span_of(Ty::int()), &Ty::object()).unwrap(),
            None
        );
    }

    #[test]
    fn base_and_interface_walks() {
        let (u, iface_ty, base_ty, derived_ty) = hierarchy();
        assert_eq!(
            classify(&u, &derived_ty, &base_ty).unwrap(),
            Some(Conversion::Reference)
        );
        assert_eq!(
            classify(&u, &derived_ty, &iface_ty).unwrap(),
            Some(Conversion::Reference)
        );
        assert_eq!(
            classify(&u, &base_ty, &iface_ty).unwrap(),
            Some(Conversion::Reference)
        );
        assert_eq!(classify(&u, &base_ty, &derived_ty).unwrap(), None);
        // Wrong instantiation of the interface does not match.
        let (u2, _, _, _) = hierarchy();
        let wrong = Ty::named(DefId(0), "IFace", vec![Ty::string()]);
        assert_eq!(classify(&u2, &derived_ty, &wrong).unwrap(), None);
    }

    #[test]
    fn span_to_read_only_span() {
        let u = MemoryUniverse::new();
        assert_eq!(
            classify(&u, &Ty::span_of(Ty::int()), &Ty::read_only_span_of(Ty::int())).unwrap(),
            Some(Conversion::Span)
        );
        assert_eq!(
            classify(&u, &Ty::read_only_span_of(Ty::int()), &Ty::span_of(Ty::int())).unwrap(),
            None
        );
    }

    #[test]
    fn identity_target_beats_implicit() {
        let u = MemoryUniverse::new();
        assert_eq!(
            compare_targets(&u, &Ty::string(), &Ty::string(), &Ty::object()).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            compare_targets(&u, &Ty::string(), &Ty::object(), &Ty::string()).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn narrower_numeric_target_wins() {
        let u = MemoryUniverse::new();
        // int argument, long vs double parameters: long converts to double
        // one-way, so long is the better target.
        assert_eq!(
            compare_targets(&u, &Ty::int(), &Ty::prim(PrimTy::Int64), &Ty::prim(PrimTy::Float64))
                .unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            compare_targets(&u, &Ty::int(), &Ty::prim(PrimTy::Float64), &Ty::prim(PrimTy::Int64))
                .unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn unrelated_targets_compare_equal() {
        let u = MemoryUniverse::new();
        assert_eq!(
            compare_targets(&u, &Ty::error(), &Ty::string(), &Ty::int()).unwrap(),
            Ordering::Equal
        );
    }
}
