//! Ref-safety validation of the winning candidate.
//!
//! Scope depths come from the host (`0` is the widest scope, larger is
//! deeper). Two directions can go wrong:
//!
//! - a `ref`/`out` parameter of a by-ref-like type can store construction
//!   state into the argument's storage; if that storage outlives the
//!   construction, references could dangle,
//! - a by-ref-like constructed value can retain a `ref`/`in` argument; if the
//!   argument dies before the construction's scope, the value would outlive
//!   its referent.
//!
//! A `scoped` annotation on either side of a pairing is the promise that the
//! reference is not retained, which removes the pairing from consideration.
//! Arguments are checked in call order and the first violation wins.

use crate::arguments::{Argument, CallSite};
use crate::diagnostics::{DiagCode, Diagnostic};
use crate::symbols::RefKind;
use crate::universe::{Universe, UniverseError};

use super::bind::Binding;
use super::candidate::Candidate;

/// Check the winner's by-ref pairings against the construction scope.
///
/// `target_ref_like` says whether the constructed value itself is by-ref-like
/// (and can therefore retain references to its arguments).
pub fn validate_escape<U: Universe + ?Sized>(
    universe: &U,
    site: &CallSite,
    candidate: &Candidate,
    binding: &Binding,
    args: &[Argument],
    target_ref_like: bool,
) -> Result<Option<Diagnostic>, UniverseError> {
    for (ai, arg) in args.iter().enumerate() {
        let param = &candidate.params[binding.param_for_arg[ai]];
        if param.scoped || arg.value.scoped {
            continue;
        }

        // Writable by-ref-like parameter: the callee can write construction
        // state into the argument's storage.
        if matches!(param.ref_kind, RefKind::Ref | RefKind::Out)
            && universe.is_ref_like(&param.ty)?
            && arg.value.escape.wider_than(site.scope_depth)
        {
            return Ok(Some(
                Diagnostic::error(
                    DiagCode::CallArgMixing,
                    vec![candidate.signature(), param.name.clone()],
                )
                .with_span(arg.value.span),
            ));
        }

        // By-ref-like construction retaining a reference to the argument.
        if target_ref_like
            && matches!(arg.ref_kind, RefKind::Ref | RefKind::In)
            && site.scope_depth.wider_than(arg.value.escape)
        {
            return Ok(Some(
                Diagnostic::error(DiagCode::EscapeVariable, vec![(ai + 1).to_string()])
                    .with_span(arg.value.span),
            ));
        }
    }
    Ok(None)
}
