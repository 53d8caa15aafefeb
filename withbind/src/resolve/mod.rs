//! The resolution pipeline.
//!
//! # Algorithm Overview
//!
//! `Resolver::resolve` drives one collection-construction expression through
//! the stages, each of which reports failure as data:
//!
//! 1. Element pre-checks: a `with(...)` element anywhere but first, or any
//!    argument typed `dynamic`, fails before candidates exist.
//! 2. [`enumerate`]: the target's candidate set, or an early outcome for
//!    targets that bind no construct call.
//! 3. Per candidate: [`constraints`] verdict, then [`bind`]. Candidates
//!    excluded silently vanish; constraint violations and binding failures
//!    are kept for failure reporting.
//! 4. [`betterness`]: priority filter, then a winner that beats every other
//!    applicable candidate, or the ambiguity listing.
//! 5. On the winner: error-grade obsoletion replay, [`escape`] validation,
//!    and the [`params_cycle`] termination proof.
//!
//! When nothing is applicable the most advanced failure is reported: a
//! constraint violation if one exists, otherwise the binding failure with the
//! highest `(rank, progress)`, ties going to the earliest candidate.

pub mod betterness;
pub mod bind;
pub mod candidate;
pub mod constraints;
pub mod conversions;
pub mod enumerate;
pub mod escape;
pub mod params_cycle;
pub mod ref_kinds;

use tracing::{debug, trace};

use crate::arguments::{Argument, CallSite, WithElement};
use crate::diagnostics::{DiagCode, Diagnostic};
use crate::target::CollectionTarget;
use crate::universe::{CandidateId, Universe, UniverseError};

pub use betterness::Selection;
pub use bind::{BindFailure, BindOutcome, Binding, BoundArg, FailureRank};
pub use candidate::{Candidate, ItemsSlot};
pub use constraints::{ConstraintVerdict, ExcludeReason};
pub use conversions::Conversion;
pub use enumerate::{CandidateSet, Enumeration};
pub use params_cycle::CycleReport;
pub use ref_kinds::RefCompat;

use betterness::select;
use bind::bind_arguments;
use constraints::check_candidate;
use enumerate::enumerate;
use escape::validate_escape;
use params_cycle::detect_cycle;

/// The chosen candidate with every parameter's value source, items slot
/// included for factory methods.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCall {
    pub candidate: CandidateId,
    /// One entry per declared parameter, declaration order.
    pub args: Vec<BoundArg>,
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The construct call, or `None` for targets built without one (arrays,
    /// spans, read-only interfaces, type parameters).
    pub call: Option<BoundCall>,
    /// Warnings that do not block the construction.
    pub advisories: Vec<Diagnostic>,
}

/// Terminal state of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Resolved),
    /// Normalized signatures of the tied candidates, declaration order.
    Ambiguous { candidates: Vec<String> },
    Failed(Diagnostic),
}

impl Resolution {
    /// The resolved outcome, if this is one.
    pub fn as_resolved(&self) -> Option<&Resolved> {
        match self {
            Resolution::Resolved(r) => Some(r),
            _ => None,
        }
    }

    /// The failure diagnostic, if this is one.
    pub fn as_failed(&self) -> Option<&Diagnostic> {
        match self {
            Resolution::Failed(d) => Some(d),
            _ => None,
        }
    }
}

/// Resolves collection-construction argument lists against a universe.
///
/// Carries no state besides the universe reference; one resolver can be
/// shared across threads and resolutions.
pub struct Resolver<'u, U: ?Sized> {
    universe: &'u U,
}

impl<'u, U: Universe + ?Sized> Resolver<'u, U> {
    pub fn new(universe: &'u U) -> Self {
        Self { universe }
    }

    pub fn universe(&self) -> &'u U {
        self.universe
    }

    /// Resolve one collection-construction expression.
    ///
    /// `with` is the literal's `with(...)` element if it has one; `None`
    /// resolves the zero-argument construction path. Errors are the fatal
    /// universe-inconsistency path only; every user-facing outcome is a
    /// [`Resolution`].
    pub fn resolve(
        &self,
        target: &CollectionTarget,
        with: Option<&WithElement>,
        site: &CallSite,
    ) -> Result<Resolution, UniverseError> {
        if let Some(w) = with {
            if w.element_index > 0 {
                return Ok(Resolution::Failed(
                    Diagnostic::error(DiagCode::ArgumentsMustBeFirst, Vec::new())
                        .with_span(w.span),
                ));
            }
            for (i, arg) in w.args.iter().enumerate() {
                if arg.value.ty.contains_dynamic() {
                    return Ok(Resolution::Failed(
                        Diagnostic::error(
                            DiagCode::DynamicBindingRejected,
                            vec![(i + 1).to_string()],
                        )
                        .with_span(arg.value.span),
                    ));
                }
            }
        }

        let set = match enumerate(self.universe, target, site, with)? {
            Enumeration::NoCall => {
                return Ok(Resolution::Resolved(Resolved {
                    call: None,
                    advisories: Vec::new(),
                }))
            }
            Enumeration::Rejected(diag) => return Ok(Resolution::Failed(diag)),
            Enumeration::Candidates(set) => set,
        };
        let args: &[Argument] = with.map_or(&[], |w| w.args.as_slice());

        if set.list.is_empty() {
            return Ok(Resolution::Failed(self.no_candidate_failure(target)?));
        }

        let mut applicable: Vec<Entry> = Vec::new();
        let mut failures: Vec<BindFailure> = Vec::new();
        let mut constraint_failures: Vec<Diagnostic> = Vec::new();

        for (index, candidate) in set.list.iter().enumerate() {
            let verdict = check_candidate(
                self.universe,
                site,
                candidate,
                set.owner_assembly,
                set.owner_def,
            )?;
            let (warn, obsolete) = match verdict {
                ConstraintVerdict::Ok => (None, None),
                ConstraintVerdict::Warn(d) => (Some(d), None),
                ConstraintVerdict::Exclude(ExcludeReason::Constraint(d)) => {
                    constraint_failures.push(d);
                    continue;
                }
                // Still binds and competes; the error surfaces only if it
                // would have won.
                ConstraintVerdict::Exclude(ExcludeReason::Obsolete(d)) => (None, Some(d)),
                ConstraintVerdict::Exclude(_) => continue,
            };
            match bind_arguments(self.universe, candidate, args)? {
                BindOutcome::Bound(binding) => {
                    applicable.push(Entry { index, binding, warn, obsolete });
                }
                BindOutcome::Failed(failure) => {
                    trace!(
                        candidate = %candidate.signature(),
                        failure = %failure.diag,
                        "candidate not applicable"
                    );
                    failures.push(failure);
                }
            }
        }
        debug!(
            applicable = applicable.len(),
            failed = failures.len(),
            "checked candidates"
        );

        if applicable.is_empty() {
            let diag = if let Some(d) = constraint_failures.into_iter().next() {
                d
            } else if let Some(best) = best_failure(failures) {
                best.diag
            } else {
                self.no_candidate_failure(target)?
            };
            return Ok(Resolution::Failed(diag));
        }

        let entries: Vec<(&Candidate, &Binding)> = applicable
            .iter()
            .map(|e| (&set.list[e.index], &e.binding))
            .collect();
        let chosen = match select(self.universe, args, &entries)? {
            Selection::Winner(i) => i,
            Selection::Ambiguous(tied) => {
                let candidates: Vec<String> = tied
                    .iter()
                    .map(|&i| set.list[applicable[i].index].signature())
                    .collect();
                return Ok(Resolution::Ambiguous { candidates });
            }
        };
        let entry = &applicable[chosen];
        let winner = &set.list[entry.index];

        if let Some(diag) = &entry.obsolete {
            return Ok(Resolution::Failed(diag.clone()));
        }

        let target_ref_like = self.target_is_ref_like(target)?;
        if let Some(diag) = validate_escape(
            self.universe,
            site,
            winner,
            &entry.binding,
            args,
            target_ref_like,
        )? {
            return Ok(Resolution::Failed(diag));
        }

        let cycle = detect_cycle(self.universe, winner)?;
        if let Some(diag) = cycle.blocking {
            return Ok(Resolution::Failed(diag));
        }

        let mut advisories = entry.binding.advisories.clone();
        if let Some(warn) = &entry.warn {
            advisories.push(warn.clone());
        }
        advisories.extend(cycle.advisories);

        debug!(winner = %winner.signature(), "resolution complete");
        Ok(Resolution::Resolved(Resolved {
            call: Some(BoundCall {
                candidate: winner.id,
                args: bound_args_with_items(winner, &entry.binding),
            }),
            advisories,
        }))
    }

    /// The terminal failure when every candidate vanished silently.
    fn no_candidate_failure(
        &self,
        target: &CollectionTarget,
    ) -> Result<Diagnostic, UniverseError> {
        match target {
            CollectionTarget::BuilderBacked { builder, method_name, .. } => {
                let builder_td = self.universe.type_def(*builder)?;
                Ok(Diagnostic::error(
                    DiagCode::BuilderMethodNotFound,
                    vec![method_name.clone(), builder_td.name.clone()],
                ))
            }
            _ => Ok(Diagnostic::error(
                DiagCode::NoApplicableCandidate,
                vec![target.display()],
            )),
        }
    }

    fn target_is_ref_like(&self, target: &CollectionTarget) -> Result<bool, UniverseError> {
        match target {
            CollectionTarget::Span { .. } => Ok(true),
            CollectionTarget::UserDefined { ty }
            | CollectionTarget::BuilderBacked { ty, .. } => self.universe.is_ref_like(ty),
            _ => Ok(false),
        }
    }
}

/// One applicable candidate, with the verdict notes that ride along.
struct Entry {
    index: usize,
    binding: Binding,
    warn: Option<Diagnostic>,
    obsolete: Option<Diagnostic>,
}

/// The most advanced failure: highest rank, then most arguments placed,
/// earliest candidate on a tie.
fn best_failure(failures: Vec<BindFailure>) -> Option<BindFailure> {
    let mut best: Option<BindFailure> = None;
    for f in failures {
        let further = match &best {
            None => true,
            Some(b) => (f.rank, f.progress) > (b.rank, b.progress),
        };
        if further {
            best = Some(f);
        }
    }
    best
}

/// The winner's per-parameter value sources, with the items slot restored to
/// its declared position for factory methods.
fn bound_args_with_items(winner: &Candidate, binding: &Binding) -> Vec<BoundArg> {
    let mut bound = binding.bound.clone();
    if let Some(items) = &winner.items {
        let at = items.declared_index.min(bound.len());
        bound.insert(at, BoundArg::Items);
    }
    bound
}
