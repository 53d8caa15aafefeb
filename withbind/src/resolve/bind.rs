//! Argument-to-parameter binding for one candidate.
//!
//! # Algorithm Overview
//!
//! Binding runs in three passes, failing as data at the first unsatisfied
//! rule:
//!
//! 1. Shape: map positional arguments left-to-right, named arguments by
//!    exact name, collect the trailing params region, then fill remaining
//!    optional parameters from their defaults.
//! 2. Ref kinds: run every supplied pairing through the compatibility table
//!    and layer the value-category checks (addressability advisories, `out`
//!    writability) on top.
//! 3. Types: classify the implicit conversion for every supplied pairing.
//!
//! A failure records how far the candidate got (`rank`, then `progress`), so
//! the resolver can report the most advanced failure when nothing binds.

use tracing::trace;

use crate::arguments::Argument;
use crate::diagnostics::{DiagCode, Diagnostic};
use crate::symbols::{ConstValue, Param, RefKind};
use crate::types::{Ty, TyKind};
use crate::universe::{Universe, UniverseError};

use super::candidate::Candidate;
use super::conversions::{self, Conversion};
use super::ref_kinds::{self, RefCompat};

/// How one declared parameter receives its value.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundArg {
    /// A supplied argument, with the conversion applied to it.
    Supplied { arg_index: usize, conversion: Conversion },
    /// No argument; the declared default is synthesized.
    Default(ConstValue),
    /// The expanded params collection (possibly empty).
    ParamsCollection { arg_indices: Vec<usize> },
    /// The implicit span of collection elements.
    Items,
}

/// A successful binding of the argument list to one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// One entry per explicit parameter, declaration order.
    pub bound: Vec<BoundArg>,
    /// For each supplied argument, the explicit parameter it bound to.
    pub param_for_arg: Vec<usize>,
    /// The params parameter was bound in expanded form.
    pub expanded_params: bool,
    /// How many optional parameters were defaulted.
    pub defaults_used: usize,
    /// Warning-grade notes (ref relaxations, temporaries by reference).
    pub advisories: Vec<Diagnostic>,
}

/// How far a candidate got before failing; higher compares as further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FailureRank {
    Arity,
    Shape,
    RefKinds,
    Types,
}

/// A candidate-specific binding failure.
#[derive(Debug, Clone, PartialEq)]
pub struct BindFailure {
    pub diag: Diagnostic,
    pub rank: FailureRank,
    /// Arguments successfully placed before the failure.
    pub progress: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindOutcome {
    Bound(Binding),
    Failed(BindFailure),
}

/// Bind `args` against `candidate`.
pub fn bind_arguments<U: Universe + ?Sized>(
    universe: &U,
    candidate: &Candidate,
    args: &[Argument],
) -> Result<BindOutcome, UniverseError> {
    let mut binder = Binder::new(candidate, args);
    if let Some(failure) = binder.match_shape() {
        return Ok(BindOutcome::Failed(failure));
    }
    if let Some(failure) = binder.check_ref_kinds() {
        return Ok(BindOutcome::Failed(failure));
    }
    match binder.check_types(universe)? {
        Some(failure) => Ok(BindOutcome::Failed(failure)),
        None => Ok(BindOutcome::Bound(binder.finish())),
    }
}

/// Slot state per explicit parameter during matching.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Empty,
    Arg(usize),
    Collected(Vec<usize>),
    Defaulted,
}

struct Binder<'a> {
    candidate: &'a Candidate,
    args: &'a [Argument],
    slots: Vec<Slot>,
    param_for_arg: Vec<usize>,
    conversions: Vec<Option<Conversion>>,
    advisories: Vec<Diagnostic>,
    expanded_params: bool,
    defaults_used: usize,
    progress: usize,
}

impl<'a> Binder<'a> {
    fn new(candidate: &'a Candidate, args: &'a [Argument]) -> Self {
        Self {
            candidate,
            args,
            slots: vec![Slot::Empty; candidate.params.len()],
            param_for_arg: vec![usize::MAX; args.len()],
            conversions: vec![None; args.len()],
            advisories: Vec::new(),
            expanded_params: false,
            defaults_used: 0,
            progress: 0,
        }
    }

    fn fail(&self, rank: FailureRank, diag: Diagnostic) -> BindFailure {
        BindFailure { diag, rank, progress: self.progress }
    }

    fn arity_failure(&self) -> BindFailure {
        let count = self.args.len().to_string();
        let diag = if self.candidate.is_factory() {
            Diagnostic::error(
                DiagCode::BadFactoryArgCount,
                vec![self.candidate.short_name.clone(), count],
            )
        } else {
            Diagnostic::error(
                DiagCode::BadArgCount,
                vec![self.candidate.owner_display.clone(), count],
            )
        };
        self.fail(FailureRank::Arity, diag)
    }

    fn ordinal(&self, arg_index: usize) -> String {
        (arg_index + 1).to_string()
    }

    /// Pass 1: place every argument in a slot.
    fn match_shape(&mut self) -> Option<BindFailure> {
        let params = &self.candidate.params;
        let params_slot = self.candidate.params_param().map(|(i, _)| i);
        let mut next_positional = 0usize;
        let mut collected: Vec<usize> = Vec::new();
        let mut named_out_of_position = false;

        for (ai, arg) in self.args.iter().enumerate() {
            match &arg.name {
                Some(name) => {
                    let Some(pi) = params.iter().position(|p| &p.name == name) else {
                        return Some(self.fail(
                            FailureRank::Shape,
                            Diagnostic::error(
                                DiagCode::BadNamedArgument,
                                vec![self.candidate.short_name.clone(), name.clone()],
                            )
                            .with_span(arg.value.span),
                        ));
                    };
                    let taken = self.slots[pi] != Slot::Empty
                        || (Some(pi) == params_slot && !collected.is_empty());
                    if taken {
                        return Some(self.fail(
                            FailureRank::Shape,
                            Diagnostic::error(DiagCode::DuplicateArgument, vec![name.clone()])
                                .with_span(arg.value.span),
                        ));
                    }
                    self.slots[pi] = Slot::Arg(ai);
                    self.param_for_arg[ai] = pi;
                    if pi != ai {
                        named_out_of_position = true;
                    }
                    self.progress += 1;
                }
                None => {
                    // A positional argument may follow named ones only while
                    // every named argument so far sat in its own position.
                    if named_out_of_position {
                        return Some(self.fail(
                            FailureRank::Shape,
                            Diagnostic::error(
                                DiagCode::NamedBeforePositional,
                                vec![self.ordinal(ai)],
                            )
                            .with_span(arg.value.span),
                        ));
                    }
                    // Advance past parameters already claimed by name.
                    while next_positional < params.len()
                        && self.slots[next_positional] != Slot::Empty
                        && Some(next_positional) != params_slot
                    {
                        next_positional += 1;
                    }
                    if let Some(ps) = params_slot {
                        if next_positional >= ps {
                            collected.push(ai);
                            self.param_for_arg[ai] = ps;
                            self.progress += 1;
                            continue;
                        }
                    }
                    if next_positional >= params.len() {
                        return Some(self.arity_failure());
                    }
                    self.slots[next_positional] = Slot::Arg(ai);
                    self.param_for_arg[ai] = next_positional;
                    next_positional += 1;
                    self.progress += 1;
                }
            }
        }

        // Settle the params region. Whether the collection binds in normal
        // or expanded form needs conversions, so the type pass decides; an
        // empty region is a legal empty collection.
        if let Some(ps) = params_slot {
            if self.slots[ps] == Slot::Empty {
                self.slots[ps] = Slot::Collected(collected);
                self.expanded_params = true;
            } else if !collected.is_empty() {
                let name = params[ps].name.clone();
                return Some(self.fail(
                    FailureRank::Shape,
                    Diagnostic::error(DiagCode::DuplicateArgument, vec![name]),
                ));
            }
        }

        // Defaults for the rest; a required hole names the parameter.
        for (pi, p) in params.iter().enumerate() {
            if self.slots[pi] != Slot::Empty {
                continue;
            }
            if p.default.is_some() {
                self.slots[pi] = Slot::Defaulted;
                self.defaults_used += 1;
            } else {
                return Some(self.fail(
                    FailureRank::Shape,
                    Diagnostic::error(
                        DiagCode::NoCorrespondingArgument,
                        vec![p.name.clone(), self.candidate.short_name.clone()],
                    ),
                ));
            }
        }
        None
    }

    /// Pass 2: ref-kind table plus value-category layering.
    fn check_ref_kinds(&mut self) -> Option<BindFailure> {
        for (pi, p) in self.candidate.params.iter().enumerate() {
            match &self.slots[pi] {
                Slot::Arg(ai) => {
                    if let Some(failure) = self.check_one_ref(p, *ai) {
                        return Some(failure);
                    }
                }
                Slot::Collected(arg_indices) => {
                    // Elements of an expanded params collection pass by
                    // value; any keyword is malformed.
                    for &ai in arg_indices {
                        if self.args[ai].ref_kind != RefKind::None {
                            return Some(self.fail(
                                FailureRank::RefKinds,
                                Diagnostic::error(
                                    DiagCode::BadArgRef,
                                    vec![
                                        self.ordinal(ai),
                                        self.args[ai].ref_kind.keyword().to_string(),
                                    ],
                                )
                                .with_span(self.args[ai].value.span),
                            ));
                        }
                    }
                }
                Slot::Empty | Slot::Defaulted => {}
            }
        }
        None
    }

    fn check_one_ref(&mut self, p: &Param, ai: usize) -> Option<BindFailure> {
        let arg = &self.args[ai];
        match ref_kinds::check(p.ref_kind, arg.ref_kind) {
            RefCompat::Reject(code) => {
                let keyword = if arg.ref_kind == RefKind::None {
                    p.ref_kind.keyword()
                } else {
                    arg.ref_kind.keyword()
                };
                Some(self.fail(
                    FailureRank::RefKinds,
                    Diagnostic::error(code, vec![self.ordinal(ai), keyword.to_string()])
                        .with_span(arg.value.span),
                ))
            }
            RefCompat::AcceptWithAdvisory(code) => {
                self.advisories.push(
                    Diagnostic::warning(code, vec![self.ordinal(ai)]).with_span(arg.value.span),
                );
                self.finish_accepted_ref(p, ai)
            }
            RefCompat::Accept => self.finish_accepted_ref(p, ai),
        }
    }

    fn finish_accepted_ref(&mut self, p: &Param, ai: usize) -> Option<BindFailure> {
        let arg = &self.args[ai];
        match p.ref_kind {
            RefKind::Out => {
                if !arg.value.is_writable {
                    return Some(self.fail(
                        FailureRank::RefKinds,
                        Diagnostic::error(DiagCode::RefLvalueExpected, vec![self.ordinal(ai)])
                            .with_span(arg.value.span),
                    ));
                }
            }
            RefKind::In | RefKind::RefReadonly => {
                if arg.ref_kind == RefKind::None && !arg.value.is_variable {
                    self.advisories.push(
                        Diagnostic::warning(
                            DiagCode::InArgumentIsTemporary,
                            vec![self.ordinal(ai)],
                        )
                        .with_span(arg.value.span),
                    );
                }
            }
            RefKind::Ref => {
                if !arg.value.is_variable {
                    return Some(self.fail(
                        FailureRank::RefKinds,
                        Diagnostic::error(DiagCode::RefLvalueExpected, vec![self.ordinal(ai)])
                            .with_span(arg.value.span),
                    ));
                }
            }
            RefKind::None => {}
        }
        None
    }

    /// Pass 3: conversion classification per supplied pairing.
    fn check_types<U: Universe + ?Sized>(
        &mut self,
        universe: &U,
    ) -> Result<Option<BindFailure>, UniverseError> {
        for pi in 0..self.candidate.params.len() {
            let p = &self.candidate.params[pi];
            match self.slots[pi].clone() {
                Slot::Arg(ai) => {
                    let from = &self.args[ai].value.ty;
                    match conversions::classify(universe, from, &p.ty)? {
                        Some(conv) => self.conversions[ai] = Some(conv),
                        None => return Ok(Some(self.type_failure(ai, from, &p.ty))),
                    }
                }
                Slot::Collected(arg_indices) => {
                    // Normal form first: a lone argument that already is the
                    // collection takes the parameter whole.
                    if arg_indices.len() == 1 {
                        let ai = arg_indices[0];
                        let from = &self.args[ai].value.ty;
                        if let Some(conv) = conversions::classify(universe, from, &p.ty)? {
                            self.slots[pi] = Slot::Arg(ai);
                            self.conversions[ai] = Some(conv);
                            self.expanded_params = false;
                            continue;
                        }
                    }
                    let element = params_element_ty(&p.ty);
                    for &ai in &arg_indices {
                        let from = &self.args[ai].value.ty;
                        match conversions::classify(universe, from, &element)? {
                            Some(conv) => self.conversions[ai] = Some(conv),
                            None => return Ok(Some(self.type_failure(ai, from, &element))),
                        }
                    }
                }
                Slot::Empty | Slot::Defaulted => {}
            }
        }
        Ok(None)
    }

    fn type_failure(&self, ai: usize, from: &Ty, to: &Ty) -> BindFailure {
        self.fail(
            FailureRank::Types,
            Diagnostic::error(
                DiagCode::BadArgType,
                vec![self.ordinal(ai), from.to_string(), to.to_string()],
            )
            .with_span(self.args[ai].value.span),
        )
    }

    fn finish(self) -> Binding {
        let mut bound = Vec::with_capacity(self.slots.len());
        for (pi, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Slot::Arg(ai) => {
                    let conversion = self.conversions[ai].unwrap_or(Conversion::Identity);
                    bound.push(BoundArg::Supplied { arg_index: ai, conversion });
                }
                Slot::Collected(arg_indices) => {
                    bound.push(BoundArg::ParamsCollection { arg_indices });
                }
                Slot::Defaulted => {
                    let default = self.candidate.params[pi]
                        .default
                        .clone()
                        .unwrap_or(ConstValue::Null);
                    bound.push(BoundArg::Default(default));
                }
                Slot::Empty => {
                    // match_shape() fills every slot before finish() runs.
                    bound.push(BoundArg::Default(ConstValue::Null));
                }
            }
        }
        trace!(
            candidate = %self.candidate.signature(),
            defaults = self.defaults_used,
            expanded = self.expanded_params,
            "bound argument list"
        );
        Binding {
            bound,
            param_for_arg: self.param_for_arg,
            expanded_params: self.expanded_params,
            defaults_used: self.defaults_used,
            advisories: self.advisories,
        }
    }
}

/// Element type of a params collection parameter.
pub(super) fn params_element_ty(collection: &Ty) -> Ty {
    match collection.kind() {
        TyKind::Array { element, .. } | TyKind::Span { element, .. } => element.clone(),
        TyKind::Named { args, .. } if args.len() == 1 => args[0].clone(),
        _ => collection.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::ArgValue;
    use crate::symbols::Constructor;
    use crate::types::DefId;
    use crate::universe::{CandidateId, MemoryUniverse};

    fn cand(params: Vec<Param>) -> Candidate {
        Candidate::from_ctor(
            CandidateId::Ctor { owner: DefId(1), index: 0 },
            &Constructor::new(params),
            "Bag",
            "Bag<int>".into(),
            &[],
        )
    }

    fn pos(ty: Ty) -> Argument {
        Argument::positional(ArgValue::of(ty))
    }

    fn bind(candidate: &Candidate, args: &[Argument]) -> BindOutcome {
        bind_arguments(&MemoryUniverse::new(), candidate, args).unwrap()
    }

    fn expect_bound(outcome: BindOutcome) -> Binding {
        match outcome {
            BindOutcome::Bound(b) => b,
            BindOutcome::Failed(f) => panic!("expected binding, got {}", f.diag),
        }
    }

    fn expect_failure(outcome: BindOutcome) -> BindFailure {
        match outcome {
            BindOutcome::Failed(f) => f,
            BindOutcome::Bound(_) => panic!("expected failure, got binding"),
        }
    }

    #[test]
    fn positional_prefix_binds_in_order() {
        let c = cand(vec![Param::new("a", Ty::int()), Param::new("b", Ty::string())]);
        let b = expect_bound(bind(&c, &[pos(Ty::int()), pos(Ty::string())]));
        assert_eq!(b.param_for_arg, vec![0, 1]);
        assert_eq!(
            b.bound[0],
            BoundArg::Supplied { arg_index: 0, conversion: Conversion::Identity }
        );
        assert_eq!(b.defaults_used, 0);
    }

    #[test]
    fn named_arguments_bind_out_of_order() {
        let c = cand(vec![Param::new("a", Ty::int()), Param::new("b", Ty::string())]);
        let b = expect_bound(bind(
            &c,
            &[
                Argument::named("b", ArgValue::of(Ty::string())),
                Argument::named("a", ArgValue::of(Ty::int())),
            ],
        ));
        assert_eq!(b.param_for_arg, vec![1, 0]);
    }

    #[test]
    fn unknown_name_names_the_argument() {
        let c = cand(vec![Param::new("capacity", Ty::int())]);
        let f = expect_failure(bind(&c, &[Argument::named("unknown", ArgValue::of(Ty::int()))]));
        assert_eq!(f.diag.code, DiagCode::BadNamedArgument);
        assert_eq!(f.diag.args, vec!["Bag".to_string(), "unknown".to_string()]);
        assert_eq!(f.rank, FailureRank::Shape);
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let c = cand(vec![Param::new("a", Ty::int()), Param::new("b", Ty::int())]);
        let f = expect_failure(bind(
            &c,
            &[pos(Ty::int()), Argument::named("a", ArgValue::of(Ty::int()))],
        ));
        assert_eq!(f.diag.code, DiagCode::DuplicateArgument);
        assert_eq!(f.diag.args, vec!["a".to_string()]);
    }

    #[test]
    fn in_position_named_keeps_the_positional_tail_open() {
        let c = cand(vec![Param::new("a", Ty::int()), Param::new("b", Ty::string())]);
        let b = expect_bound(bind(
            &c,
            &[Argument::named("a", ArgValue::of(Ty::int())), pos(Ty::string())],
        ));
        assert_eq!(b.param_for_arg, vec![0, 1]);
    }

    #[test]
    fn positional_after_reordered_named_is_rejected() {
        let c = cand(vec![Param::new("a", Ty::int()), Param::new("b", Ty::string())]);
        let f = expect_failure(bind(
            &c,
            &[Argument::named("b", ArgValue::of(Ty::string())), pos(Ty::int())],
        ));
        assert_eq!(f.diag.code, DiagCode::NamedBeforePositional);
        assert_eq!(f.diag.args, vec!["2".to_string()]);
    }

    #[test]
    fn excess_positionals_report_count() {
        let c = cand(vec![Param::new("a", Ty::int())]);
        let f = expect_failure(bind(&c, &[pos(Ty::int()), pos(Ty::int())]));
        assert_eq!(f.diag.code, DiagCode::BadArgCount);
        assert_eq!(f.diag.args, vec!["Bag<int>".to_string(), "2".to_string()]);
        assert_eq!(f.rank, FailureRank::Arity);
    }

    #[test]
    fn missing_required_names_the_parameter() {
        let c = cand(vec![Param::new("a", Ty::int()), Param::new("b", Ty::int())]);
        let f = expect_failure(bind(&c, &[pos(Ty::int())]));
        assert_eq!(f.diag.code, DiagCode::NoCorrespondingArgument);
        assert_eq!(f.diag.args[0], "b");
    }

    #[test]
    fn missing_required_with_named_names_the_hole() {
        let c = cand(vec![Param::new("a", Ty::int()), Param::new("b", Ty::int())]);
        let f = expect_failure(bind(&c, &[Argument::named("b", ArgValue::of(Ty::int()))]));
        assert_eq!(f.diag.code, DiagCode::NoCorrespondingArgument);
        assert_eq!(f.diag.args[0], "a");
    }

    #[test]
    fn optionals_default_and_count() {
        let c = cand(vec![
            Param::new("a", Ty::int()),
            Param::new("b", Ty::int()).optional(ConstValue::Int(42)),
        ]);
        let b = expect_bound(bind(&c, &[pos(Ty::int())]));
        assert_eq!(b.bound[1], BoundArg::Default(ConstValue::Int(42)));
        assert_eq!(b.defaults_used, 1);
    }

    #[test]
    fn conversion_failure_carries_both_types() {
        let c = cand(vec![Param::new("a", Ty::int())]);
        let f = expect_failure(bind(&c, &[pos(Ty::string())]));
        assert_eq!(f.diag.code, DiagCode::BadArgType);
        assert_eq!(
            f.diag.args,
            vec!["1".to_string(), "string".to_string(), "int".to_string()]
        );
        assert_eq!(f.rank, FailureRank::Types);
    }

    #[test]
    fn widening_is_recorded() {
        let c = cand(vec![Param::new("a", Ty::prim(crate::types::PrimTy::Int64))]);
        let b = expect_bound(bind(&c, &[pos(Ty::int())]));
        assert_eq!(
            b.bound[0],
            BoundArg::Supplied { arg_index: 0, conversion: Conversion::Numeric }
        );
    }

    #[test]
    fn params_collects_trailing_arguments() {
        let c = cand(vec![
            Param::new("first", Ty::int()),
            Param::new("rest", Ty::array(Ty::int(), 1)).params(),
        ]);
        let b = expect_bound(bind(&c, &[pos(Ty::int()), pos(Ty::int()), pos(Ty::int())]));
        assert!(b.expanded_params);
        assert_eq!(b.bound[1], BoundArg::ParamsCollection { arg_indices: vec![1, 2] });
    }

    #[test]
    fn params_with_no_arguments_is_an_empty_collection() {
        let c = cand(vec![Param::new("rest", Ty::array(Ty::int(), 1)).params()]);
        let b = expect_bound(bind(&c, &[]));
        assert_eq!(b.bound[0], BoundArg::ParamsCollection { arg_indices: vec![] });
        assert!(b.expanded_params);
    }

    #[test]
    fn params_normal_form_takes_the_collection_whole() {
        let c = cand(vec![Param::new("rest", Ty::array(Ty::int(), 1)).params()]);
        let b = expect_bound(bind(&c, &[pos(Ty::array(Ty::int(), 1))]));
        assert!(!b.expanded_params);
        assert_eq!(
            b.bound[0],
            BoundArg::Supplied { arg_index: 0, conversion: Conversion::Identity }
        );
    }

    #[test]
    fn params_element_mismatch_reports_element_type() {
        let c = cand(vec![Param::new("rest", Ty::array(Ty::int(), 1)).params()]);
        let f = expect_failure(bind(&c, &[pos(Ty::string()), pos(Ty::int())]));
        assert_eq!(f.diag.code, DiagCode::BadArgType);
        assert_eq!(
            f.diag.args,
            vec!["1".to_string(), "string".to_string(), "int".to_string()]
        );
    }

    #[test]
    fn ref_mismatch_outranks_arity_in_progress() {
        let c = cand(vec![Param::new("a", Ty::int()).by_ref(RefKind::Ref)]);
        let f = expect_failure(bind(&c, &[pos(Ty::int())]));
        assert_eq!(f.diag.code, DiagCode::BadArgRef);
        assert_eq!(f.diag.args, vec!["1".to_string(), "ref".to_string()]);
        assert_eq!(f.rank, FailureRank::RefKinds);
    }

    #[test]
    fn out_requires_writable_storage() {
        let c = cand(vec![Param::new("a", Ty::int()).by_ref(RefKind::Out)]);
        let read_only = Argument::positional(ArgValue::variable(Ty::int()).read_only())
            .by_ref(RefKind::Out);
        let f = expect_failure(bind(&c, &[read_only]));
        assert_eq!(f.diag.code, DiagCode::RefLvalueExpected);

        let writable = Argument::positional(ArgValue::variable(Ty::int())).by_ref(RefKind::Out);
        expect_bound(bind(&c, &[writable]));
    }

    #[test]
    fn in_temporary_gets_an_advisory() {
        let c = cand(vec![Param::new("a", Ty::int()).by_ref(RefKind::In)]);
        let b = expect_bound(bind(&c, &[pos(Ty::int())]));
        assert_eq!(b.advisories.len(), 1);
        assert_eq!(b.advisories[0].code, DiagCode::InArgumentIsTemporary);

        let b = expect_bound(bind(&c, &[Argument::positional(ArgValue::variable(Ty::int()))]));
        assert!(b.advisories.is_empty());
    }

    #[test]
    fn ref_against_in_is_relaxed_with_advisory() {
        let c = cand(vec![Param::new("a", Ty::int()).by_ref(RefKind::In)]);
        let arg = Argument::positional(ArgValue::variable(Ty::int())).by_ref(RefKind::Ref);
        let b = expect_bound(bind(&c, &[arg]));
        assert_eq!(b.advisories.len(), 1);
        assert_eq!(b.advisories[0].code, DiagCode::RefTakenAsIn);
    }

    #[test]
    fn named_params_parameter_binds_normal_form() {
        let c = cand(vec![Param::new("rest", Ty::array(Ty::int(), 1)).params()]);
        let arg = Argument::named("rest", ArgValue::of(Ty::array(Ty::int(), 1)));
        let b = expect_bound(bind(&c, &[arg]));
        assert!(!b.expanded_params);
        assert_eq!(
            b.bound[0],
            BoundArg::Supplied { arg_index: 0, conversion: Conversion::Identity }
        );
    }

    #[test]
    fn error_type_arguments_bind_quietly() {
        let c = cand(vec![Param::new("a", Ty::int())]);
        let b = expect_bound(bind(&c, &[pos(Ty::error())]));
        assert_eq!(
            b.bound[0],
            BoundArg::Supplied { arg_index: 0, conversion: Conversion::Identity }
        );
    }
}
