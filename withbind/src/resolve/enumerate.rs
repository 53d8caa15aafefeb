//! Candidate enumeration per target kind.
//!
//! # Algorithm Overview
//!
//! Each target variant has its own arm:
//!
//! - arrays and spans never construct through arguments; the presence of a
//!   `with(...)` element is itself the error,
//! - read-only interfaces and type parameters accept an empty `with()` only
//!   and bind no call,
//! - mutable interfaces enumerate the constructors of the well-known
//!   realization type,
//! - user-defined types enumerate their declared constructors,
//! - builder-backed types enumerate the factory overloads that fit the
//!   collection-builder shape.
//!
//! `Private` and `Protected` members invisible from the call site are
//! filtered here; `internal` reachability is a constraint-checker verdict.
//! Candidate order is declaration order throughout, which fixes the order of
//! ambiguity listings.

use tracing::debug;

use crate::arguments::{CallSite, WithElement};
use crate::diagnostics::{DiagCode, Diagnostic};
use crate::symbols::Accessibility;
use crate::target::{CollectionTarget, InterfaceKind};
use crate::types::{AssemblyId, DefId, Ty, TyKind};
use crate::universe::{CandidateId, Universe, UniverseError};

use super::candidate::Candidate;
use super::constraints::check_type_args;

/// The candidates for one target, plus the ownership facts the constraint
/// checker needs.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    /// Declaration order. May be empty when every member was invisible.
    pub list: Vec<Candidate>,
    /// Assembly of the type declaring the candidates.
    pub owner_assembly: AssemblyId,
    /// The declaring type (constructed type, or builder type for factories).
    pub owner_def: Option<DefId>,
}

/// What enumeration decided for a target.
#[derive(Debug, Clone)]
pub enum Enumeration {
    /// The target takes the (empty) argument list without binding any
    /// construct call.
    NoCall,
    /// The target rejects the argument list outright.
    Rejected(Diagnostic),
    /// Candidates to push through binding and checking.
    Candidates(CandidateSet),
}

/// Enumerate construction candidates for `target`.
///
/// The `with` element has already passed the leading-position and dynamic
/// pre-checks; only its presence and emptiness matter here.
pub fn enumerate<U: Universe + ?Sized>(
    universe: &U,
    target: &CollectionTarget,
    site: &CallSite,
    with: Option<&WithElement>,
) -> Result<Enumeration, UniverseError> {
    let with_span = with.map(|w| w.span);
    let non_empty = with.is_some_and(|w| !w.is_empty());

    let outcome = match target {
        CollectionTarget::Array { rank, .. } => {
            if with.is_none() {
                Enumeration::NoCall
            } else if *rank > 1 {
                Enumeration::Rejected(
                    Diagnostic::error(DiagCode::TargetNotConstructible, vec![target.display()])
                        .with_span_opt(with_span),
                )
            } else {
                Enumeration::Rejected(
                    Diagnostic::error(
                        DiagCode::ArgumentsNotSupportedForType,
                        vec![target.display()],
                    )
                    .with_span_opt(with_span),
                )
            }
        }
        CollectionTarget::Span { .. } => {
            if with.is_none() {
                Enumeration::NoCall
            } else {
                Enumeration::Rejected(
                    Diagnostic::error(
                        DiagCode::ArgumentsNotSupportedForType,
                        vec![target.display()],
                    )
                    .with_span_opt(with_span),
                )
            }
        }
        CollectionTarget::Interface { kind, args } => {
            if kind.is_read_only() {
                if non_empty {
                    Enumeration::Rejected(
                        Diagnostic::error(DiagCode::ArgumentsMustBeEmpty, vec![target.display()])
                            .with_span_opt(with_span),
                    )
                } else {
                    Enumeration::NoCall
                }
            } else {
                enumerate_realization(universe, *kind, args, site)?
            }
        }
        CollectionTarget::UserDefined { ty } => match ty.as_named() {
            Some((def, type_args)) => enumerate_ctors(universe, def, type_args, site)?,
            None => Enumeration::Rejected(
                Diagnostic::error(DiagCode::TargetNotConstructible, vec![target.display()])
                    .with_span_opt(with_span),
            ),
        },
        CollectionTarget::BuilderBacked { ty, builder, method_name } => {
            enumerate_factories(universe, ty, *builder, method_name, site)?
        }
        CollectionTarget::TypeParameter { name } => {
            if non_empty {
                Enumeration::Rejected(
                    Diagnostic::error(
                        DiagCode::TypeParameterArgumentsRejected,
                        vec![name.clone()],
                    )
                    .with_span_opt(with_span),
                )
            } else {
                Enumeration::NoCall
            }
        }
    };

    if let Enumeration::Candidates(set) = &outcome {
        debug!(
            target = %target.display(),
            candidates = set.list.len(),
            "enumerated candidates"
        );
    }
    Ok(outcome)
}

/// Constructors of the well-known type realizing a mutable interface.
fn enumerate_realization<U: Universe + ?Sized>(
    universe: &U,
    kind: InterfaceKind,
    type_args: &[Ty],
    site: &CallSite,
) -> Result<Enumeration, UniverseError> {
    let (realization, member) = if kind.is_dictionary_shaped() {
        (universe.well_known_dictionary(), "Dictionary`2")
    } else {
        (universe.well_known_list(), "List`1")
    };
    match realization {
        Some(def) => enumerate_ctors(universe, def, type_args, site),
        None => Ok(Enumeration::Rejected(Diagnostic::error(
            DiagCode::MissingPredefinedMember,
            vec![member.to_string(), ".ctor".to_string()],
        ))),
    }
}

/// Declared constructors of `def` instantiated at `type_args`, minus members
/// invisible from the call site.
fn enumerate_ctors<U: Universe + ?Sized>(
    universe: &U,
    def: DefId,
    type_args: &[Ty],
    site: &CallSite,
) -> Result<Enumeration, UniverseError> {
    let td = universe.type_def(def)?;
    if td.type_params.len() != type_args.len() {
        return Err(UniverseError::MismatchedTypeArity {
            name: td.name.clone(),
            expected: td.type_params.len(),
            got: type_args.len(),
        });
    }
    let owner_display = td.ty(def, type_args.to_vec()).to_string();
    if let Some(diag) = check_type_args(universe, &owner_display, &td.type_params, type_args)? {
        return Ok(Enumeration::Rejected(diag));
    }

    let mut list = Vec::with_capacity(td.constructors.len());
    for (index, ctor) in td.constructors.iter().enumerate() {
        if !visible_here(universe, ctor.accessibility, def, site)? {
            continue;
        }
        list.push(Candidate::from_ctor(
            CandidateId::Ctor { owner: def, index },
            ctor,
            &td.name,
            owner_display.clone(),
            type_args,
        ));
    }
    Ok(Enumeration::Candidates(CandidateSet {
        list,
        owner_assembly: td.assembly,
        owner_def: Some(def),
    }))
}

/// Factory overloads of the builder's declared method that fit the
/// collection-builder shape: same generic arity as the target type and a
/// span-typed items parameter at the declared position.
fn enumerate_factories<U: Universe + ?Sized>(
    universe: &U,
    target_ty: &Ty,
    builder: DefId,
    method_name: &str,
    site: &CallSite,
) -> Result<Enumeration, UniverseError> {
    let Some((target_def, type_args)) = target_ty.as_named() else {
        return Ok(Enumeration::Rejected(Diagnostic::error(
            DiagCode::TargetNotConstructible,
            vec![target_ty.to_string()],
        )));
    };

    let target_td = universe.type_def(target_def)?;
    if target_td.type_params.len() != type_args.len() {
        return Err(UniverseError::MismatchedTypeArity {
            name: target_td.name.clone(),
            expected: target_td.type_params.len(),
            got: type_args.len(),
        });
    }
    let owner_display = target_ty.to_string();
    if let Some(diag) = check_type_args(universe, &owner_display, &target_td.type_params, type_args)?
    {
        return Ok(Enumeration::Rejected(diag));
    }

    let builder_td = universe.type_def(builder)?;
    let methods = universe.factory_methods(builder, method_name)?;

    let mut list = Vec::new();
    for (index, method) in methods.iter().enumerate() {
        if !visible_here(universe, method.accessibility, builder, site)? {
            continue;
        }
        // Method type arguments are the target's, positionally; overloads of
        // a different generic arity cannot be instantiated.
        if method.type_params.len() != type_args.len() {
            continue;
        }
        let Some(items) = method.params.get(method.items_index) else {
            continue;
        };
        if !matches!(items.ty.substitute(type_args).kind(), TyKind::Span { .. }) {
            continue;
        }
        list.push(Candidate::from_factory(
            CandidateId::Factory { builder, index },
            method,
            owner_display.clone(),
            type_args.to_vec(),
        ));
    }

    if list.is_empty() {
        return Ok(Enumeration::Rejected(Diagnostic::error(
            DiagCode::BuilderMethodNotFound,
            vec![method_name.to_string(), builder_td.name.clone()],
        )));
    }
    Ok(Enumeration::Candidates(CandidateSet {
        list,
        owner_assembly: builder_td.assembly,
        owner_def: Some(builder),
    }))
}

/// Enumeration-level visibility: `private` needs the call site inside the
/// declaring type, `protected` a derived (or the same) enclosing type. The
/// assembly-scoped accessibilities are judged later, per candidate.
fn visible_here<U: Universe + ?Sized>(
    universe: &U,
    accessibility: Accessibility,
    owner: DefId,
    site: &CallSite,
) -> Result<bool, UniverseError> {
    match accessibility {
        Accessibility::Private => Ok(site.enclosing_type == Some(owner)),
        Accessibility::Protected => match site.enclosing_type {
            Some(enclosing) => universe.derives_from(enclosing, owner),
            None => Ok(false),
        },
        _ => Ok(true),
    }
}
