//! Winner selection among applicable candidates.
//!
//! # Algorithm Overview
//!
//! 1. Keep only candidates carrying the highest declared priority.
//! 2. A winner must be strictly better than every other survivor; betterness
//!    is not transitive, so one pass of pairwise comparisons decides.
//! 3. With no winner, the maximal set (candidates no one beats) is reported
//!    as the ambiguity, in declaration order.
//!
//! Betterness of A over B: for every supplied argument A's parameter is at
//! least as good a conversion target, and for at least one strictly better.
//! Exact ties fall through to the structural tie-breaks: non-generic over
//! generic, normal form over expanded params, fewer synthesized defaults.

use tracing::debug;

use crate::arguments::Argument;
use crate::types::Ty;
use crate::universe::{Universe, UniverseError};

use super::bind::{params_element_ty, Binding, BoundArg};
use super::candidate::Candidate;
use super::conversions;

/// Outcome of selection over a non-empty applicable set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Index of the unique best candidate.
    Winner(usize),
    /// Indices of the tied candidates, declaration order.
    Ambiguous(Vec<usize>),
}

/// Select among applicable `(candidate, binding)` pairs.
pub fn select<U: Universe + ?Sized>(
    universe: &U,
    args: &[Argument],
    entries: &[(&Candidate, &Binding)],
) -> Result<Selection, UniverseError> {
    if entries.len() == 1 {
        return Ok(Selection::Winner(0));
    }

    let top = entries.iter().map(|(c, _)| c.priority).max().unwrap_or(0);
    let live: Vec<usize> = (0..entries.len())
        .filter(|&i| entries[i].0.priority == top)
        .collect();
    if live.len() == 1 {
        debug!(winner = %entries[live[0]].0.signature(), "selected by priority");
        return Ok(Selection::Winner(live[0]));
    }

    for &i in &live {
        let mut beats_all = true;
        for &j in &live {
            if i != j && !is_better(universe, args, entries[i], entries[j])? {
                beats_all = false;
                break;
            }
        }
        if beats_all {
            debug!(winner = %entries[i].0.signature(), "selected by betterness");
            return Ok(Selection::Winner(i));
        }
    }

    // No candidate beats everything: report the maximal set, or the whole
    // live set when betterness cycles leave nothing maximal.
    let mut maximal = Vec::new();
    for &i in &live {
        let mut beaten = false;
        for &j in &live {
            if i != j && is_better(universe, args, entries[j], entries[i])? {
                beaten = true;
                break;
            }
        }
        if !beaten {
            maximal.push(i);
        }
    }
    if maximal.len() < 2 {
        maximal = live;
    }
    Ok(Selection::Ambiguous(maximal))
}

/// Is `a` strictly better than `b` for this argument list?
fn is_better<U: Universe + ?Sized>(
    universe: &U,
    args: &[Argument],
    a: (&Candidate, &Binding),
    b: (&Candidate, &Binding),
) -> Result<bool, UniverseError> {
    use std::cmp::Ordering;

    let (ca, ba) = a;
    let (cb, bb) = b;

    let mut some_better = false;
    for (ai, arg) in args.iter().enumerate() {
        let ta = effective_param_ty(ca, ba, ai);
        let tb = effective_param_ty(cb, bb, ai);
        match conversions::compare_targets(universe, &arg.value.ty, &ta, &tb)? {
            Ordering::Less => return Ok(false),
            Ordering::Greater => some_better = true,
            Ordering::Equal => {}
        }
    }
    if some_better {
        return Ok(true);
    }

    // Conversion tie: structural preferences, in order.
    if ca.method_type_params.is_empty() && !cb.method_type_params.is_empty() {
        return Ok(true);
    }
    if !ba.expanded_params && bb.expanded_params {
        return Ok(true);
    }
    if ba.defaults_used < bb.defaults_used {
        return Ok(true);
    }
    Ok(false)
}

/// The parameter type argument `ai` converts to, element type when it went
/// into an expanded params collection.
fn effective_param_ty(candidate: &Candidate, binding: &Binding, ai: usize) -> Ty {
    let pi = binding.param_for_arg[ai];
    let p = &candidate.params[pi];
    match &binding.bound[pi] {
        BoundArg::ParamsCollection { .. } => params_element_ty(&p.ty),
        _ => p.ty.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::ArgValue;
    use crate::symbols::{ConstValue, Constructor, Param};
    use crate::types::DefId;
    use crate::universe::{CandidateId, MemoryUniverse};

    use super::super::bind::{bind_arguments, BindOutcome};

    fn cand(index: usize, params: Vec<Param>) -> Candidate {
        Candidate::from_ctor(
            CandidateId::Ctor { owner: DefId(1), index },
            &Constructor::new(params),
            "Bag",
            "Bag".into(),
            &[],
        )
    }

    fn prioritized(index: usize, params: Vec<Param>, priority: i32) -> Candidate {
        Candidate::from_ctor(
            CandidateId::Ctor { owner: DefId(1), index },
            &Constructor::new(params).with_priority(priority),
            "Bag",
            "Bag".into(),
            &[],
        )
    }

    fn args_of(types: &[Ty]) -> Vec<Argument> {
        types
            .iter()
            .map(|t| Argument::positional(ArgValue::of(t.clone())))
            .collect()
    }

    fn run(candidates: &[Candidate], args: &[Argument]) -> Selection {
        let u = MemoryUniverse::new();
        let bindings: Vec<Binding> = candidates
            .iter()
            .map(|c| match bind_arguments(&u, c, args).unwrap() {
                BindOutcome::Bound(b) => b,
                BindOutcome::Failed(f) => panic!("candidate did not bind: {}", f.diag),
            })
            .collect();
        let entries: Vec<(&Candidate, &Binding)> =
            candidates.iter().zip(bindings.iter()).collect();
        select(&u, args, &entries).unwrap()
    }

    #[test]
    fn lone_candidate_wins() {
        let c = cand(0, vec![Param::new("x", Ty::int())]);
        assert_eq!(run(&[c], &args_of(&[Ty::int()])), Selection::Winner(0));
    }

    #[test]
    fn identity_beats_widening() {
        let exact = cand(0, vec![Param::new("x", Ty::int())]);
        let widened = cand(1, vec![Param::new("x", Ty::prim(crate::types::PrimTy::Int64))]);
        assert_eq!(
            run(&[widened, exact], &args_of(&[Ty::int()])),
            Selection::Winner(1)
        );
    }

    #[test]
    fn symmetric_disagreement_is_ambiguous() {
        let a = cand(0, vec![Param::new("x", Ty::string()), Param::new("y", Ty::object())]);
        let b = cand(1, vec![Param::new("x", Ty::object()), Param::new("y", Ty::string())]);
        assert_eq!(
            run(&[a, b], &args_of(&[Ty::string(), Ty::string()])),
            Selection::Ambiguous(vec![0, 1])
        );
    }

    #[test]
    fn priority_breaks_the_symmetric_tie() {
        let a = prioritized(
            0,
            vec![Param::new("x", Ty::string()), Param::new("y", Ty::object())],
            1,
        );
        let b = cand(1, vec![Param::new("x", Ty::object()), Param::new("y", Ty::string())]);
        assert_eq!(
            run(&[a, b], &args_of(&[Ty::string(), Ty::string()])),
            Selection::Winner(0)
        );
    }

    #[test]
    fn winner_must_beat_every_other() {
        // a beats b, c beats b, but a and c split on the two arguments, so
        // nothing wins and the maximal pair is reported.
        let a = cand(0, vec![Param::new("x", Ty::string()), Param::new("y", Ty::object())]);
        let b = cand(1, vec![Param::new("x", Ty::object()), Param::new("y", Ty::object())]);
        let c = cand(2, vec![Param::new("x", Ty::object()), Param::new("y", Ty::string())]);
        assert_eq!(
            run(&[a, b, c], &args_of(&[Ty::string(), Ty::string()])),
            Selection::Ambiguous(vec![0, 2])
        );
    }

    #[test]
    fn non_params_form_beats_expanded() {
        let expanded = cand(0, vec![Param::new("xs", Ty::array(Ty::int(), 1)).params()]);
        let exact = cand(1, vec![Param::new("x", Ty::int())]);
        assert_eq!(
            run(&[expanded, exact], &args_of(&[Ty::int()])),
            Selection::Winner(1)
        );
    }

    #[test]
    fn fewer_defaults_wins() {
        let no_default = cand(0, vec![Param::new("x", Ty::int())]);
        let with_default = cand(
            1,
            vec![
                Param::new("x", Ty::int()),
                Param::new("y", Ty::int()).optional(ConstValue::Int(5)),
            ],
        );
        assert_eq!(
            run(&[with_default, no_default], &args_of(&[Ty::int()])),
            Selection::Winner(1)
        );
    }
}
