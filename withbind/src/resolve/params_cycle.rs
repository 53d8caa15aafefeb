//! Infinite-construction detection for params collections.
//!
//! # Algorithm Overview
//!
//! When the winner binds its `params` parameter, an instance of the
//! parameter's collection type must be synthesized. If that type's own
//! zero-argument construction path leads through another `params` parameter
//! of the same type (directly or through a chain of collection types), the
//! synthesis never terminates.
//!
//! The walk follows, per type, the constructor its zero-argument construction
//! would use: any visible constructor with no required parameters and no
//! `params` parameter is a terminating base case; failing that, the first
//! zero-bindable `params` constructor links to the next collection type.
//! Revisiting a type proves the chain is infinite. The walk is bounded by the
//! number of declared types, so it always terminates itself.
//!
//! A parameterless constructor less visible than the member that carries the
//! `params` parameter is not a usable base case; skipping one is reported as
//! an advisory even when a base case is found later in the chain.

use rustc_hash::FxHashSet;

use crate::diagnostics::{DiagCode, Diagnostic};
use crate::symbols::Constructor;
use crate::types::DefId;
use crate::universe::{CandidateId, Universe, UniverseError};

use super::candidate::Candidate;

/// What the detector found for one winning candidate.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// The infinite-chain error, when the synthesis cannot terminate.
    pub blocking: Option<Diagnostic>,
    /// Visibility advisories for skipped base cases.
    pub advisories: Vec<Diagnostic>,
}

/// Prove the winner's params collection can be synthesized, or report the
/// infinite chain.
///
/// A winner without a `params` parameter, or with an array/span-typed one
/// (synthesized natively, no constructor involved), trivially passes.
pub fn detect_cycle<U: Universe + ?Sized>(
    universe: &U,
    member: &Candidate,
) -> Result<CycleReport, UniverseError> {
    let mut report = CycleReport::default();
    let Some((_, params)) = member.params_param() else {
        return Ok(report);
    };
    let Some((start, _)) = params.ty.as_named() else {
        return Ok(report);
    };

    let mut seen: FxHashSet<DefId> = FxHashSet::default();
    let mut current = start;
    loop {
        if !seen.insert(current) {
            let td = universe.type_def(current)?;
            report.blocking = Some(Diagnostic::error(
                DiagCode::InfiniteParamsChain,
                vec![td.name.clone()],
            ));
            return Ok(report);
        }

        let td = universe.type_def(current)?;
        let mut next: Option<DefId> = None;
        let mut terminated = false;
        for (index, ctor) in td.constructors.iter().enumerate() {
            if !zero_bindable(ctor) {
                continue;
            }
            match params_collection(ctor) {
                None => {
                    if ctor.accessibility.at_least_as_visible_as(member.accessibility) {
                        terminated = true;
                        break;
                    }
                    let skipped = Candidate::from_ctor(
                        CandidateId::Ctor { owner: current, index },
                        ctor,
                        &td.name,
                        td.name.clone(),
                        &[],
                    );
                    report.advisories.push(Diagnostic::warning(
                        DiagCode::ParamsMemberLessVisible,
                        vec![skipped.signature(), member.signature()],
                    ));
                }
                Some(collection) => match collection.as_named() {
                    // Another constructed collection: follow the chain.
                    Some((def, _)) => {
                        if next.is_none() {
                            next = Some(def);
                        }
                    }
                    // Arrays and spans synthesize without a constructor.
                    None => {
                        terminated = true;
                        break;
                    }
                },
            }
        }

        if terminated {
            return Ok(report);
        }
        match next {
            Some(def) => current = def,
            // No zero-argument path at all: nothing to recurse into. The
            // declaration site owns that complaint.
            None => return Ok(report),
        }
    }
}

/// Can this constructor bind an empty argument list?
fn zero_bindable(ctor: &Constructor) -> bool {
    ctor.params.iter().all(|p| p.is_optional() || p.is_params)
}

/// The collection type a zero-argument call would have to synthesize.
fn params_collection(ctor: &Constructor) -> Option<&crate::types::Ty> {
    ctor.params.last().filter(|p| p.is_params).map(|p| &p.ty)
}
