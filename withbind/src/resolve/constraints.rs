//! Candidate constraint checking.
//!
//! After an argument list binds, a candidate must still be usable: its
//! generic arguments must satisfy their declared constraints, it must be
//! reachable from the call site, and declaration-level poison (use-site
//! errors, error-grade obsoletion, unmanaged-callers-only) must keep it out
//! of selection. The verdict is three-valued so warning-grade conditions ride
//! along with the eventual winner instead of failing resolution.

use crate::arguments::CallSite;
use crate::diagnostics::{DiagCode, Diagnostic};
use crate::symbols::{Accessibility, ConstraintFlags, TypeParamDef};
use crate::types::{AssemblyId, Ty};
use crate::universe::{Universe, UniverseError};

use super::candidate::Candidate;

/// Why an otherwise-bindable candidate is out of selection.
#[derive(Debug, Clone, PartialEq)]
pub enum ExcludeReason {
    /// A generic constraint failed; the diagnostic is reportable when the
    /// candidate was the only hope.
    Constraint(Diagnostic),
    /// Not reachable from the call site; excluded silently.
    Inaccessible,
    /// Error-grade `[Obsolete]`; replayed if this candidate would have won.
    Obsolete(Diagnostic),
    /// The declaration itself is broken; excluded as if absent.
    UseSiteError,
    /// `[UnmanagedCallersOnly]` members are never callable here.
    UnmanagedCallersOnly,
}

/// Outcome of checking one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintVerdict {
    Ok,
    /// Usable, with a warning attached to the final binding.
    Warn(Diagnostic),
    Exclude(ExcludeReason),
}

/// Check a type-argument list against its declared parameters.
///
/// Used both for the constructed type's own arguments (once per resolution)
/// and for factory-method generic arguments (per candidate). Returns the
/// first violation in declaration order.
pub fn check_type_args<U: Universe + ?Sized>(
    universe: &U,
    owner_display: &str,
    type_params: &[TypeParamDef],
    type_args: &[Ty],
) -> Result<Option<Diagnostic>, UniverseError> {
    for (tp, arg) in type_params.iter().zip(type_args) {
        if tp.constraints.contains(ConstraintFlags::REFERENCE_TYPE)
            && !universe.is_reference_type(arg)?
        {
            return Ok(Some(Diagnostic::error(
                DiagCode::RefConstraintNotSatisfied,
                vec![arg.to_string(), tp.name.clone(), owner_display.to_string()],
            )));
        }
        if tp.constraints.contains(ConstraintFlags::VALUE_TYPE) && !universe.is_value_type(arg)? {
            return Ok(Some(Diagnostic::error(
                DiagCode::ValConstraintNotSatisfied,
                vec![arg.to_string(), tp.name.clone(), owner_display.to_string()],
            )));
        }
        // By-ref-like arguments are rejected unless the parameter opts in.
        if !tp.constraints.contains(ConstraintFlags::ALLOWS_REF_STRUCT)
            && universe.is_ref_like(arg)?
        {
            return Ok(Some(Diagnostic::error(
                DiagCode::ValConstraintNotSatisfied,
                vec![arg.to_string(), tp.name.clone(), owner_display.to_string()],
            )));
        }
    }
    Ok(None)
}

/// Check everything about `candidate` that is not argument binding.
///
/// `owner_assembly` is the assembly the candidate is declared in;
/// `owner_def` its declaring type, for the derived-access part of
/// `protected internal`.
pub fn check_candidate<U: Universe + ?Sized>(
    universe: &U,
    site: &CallSite,
    candidate: &Candidate,
    owner_assembly: AssemblyId,
    owner_def: Option<crate::types::DefId>,
) -> Result<ConstraintVerdict, UniverseError> {
    if candidate.use_site_error {
        return Ok(ConstraintVerdict::Exclude(ExcludeReason::UseSiteError));
    }
    if candidate.unmanaged_callers_only {
        return Ok(ConstraintVerdict::Exclude(ExcludeReason::UnmanagedCallersOnly));
    }

    // Assembly-scoped accessibility. Lexical visibility (private, protected)
    // was already filtered during enumeration.
    match candidate.accessibility {
        Accessibility::Internal => {
            if site.assembly != owner_assembly {
                return Ok(ConstraintVerdict::Exclude(ExcludeReason::Inaccessible));
            }
        }
        Accessibility::ProtectedInternal => {
            let same_assembly = site.assembly == owner_assembly;
            let derived = match (site.enclosing_type, owner_def) {
                (Some(from), Some(owner)) => universe.derives_from(from, owner)?,
                _ => false,
            };
            if !same_assembly && !derived {
                return Ok(ConstraintVerdict::Exclude(ExcludeReason::Inaccessible));
            }
        }
        _ => {}
    }

    // Factory-method generic constraints over the inferred arguments.
    if let Some(diag) = check_type_args(
        universe,
        &candidate.short_name,
        &candidate.method_type_params,
        &candidate.method_type_args,
    )? {
        return Ok(ConstraintVerdict::Exclude(ExcludeReason::Constraint(diag)));
    }

    match &candidate.obsolete {
        Some(info) if info.is_error => {
            let mut args = vec![candidate.signature()];
            if let Some(msg) = &info.message {
                args.push(msg.clone());
            }
            Ok(ConstraintVerdict::Exclude(ExcludeReason::Obsolete(
                Diagnostic::error(DiagCode::ObsoleteError, args),
            )))
        }
        Some(info) => {
            let mut args = vec![candidate.signature()];
            if let Some(msg) = &info.message {
                args.push(msg.clone());
            }
            Ok(ConstraintVerdict::Warn(Diagnostic::warning(
                DiagCode::ObsoleteWarning,
                args,
            )))
        }
        None => Ok(ConstraintVerdict::Ok),
    }
}
