//! Ref-kind compatibility between a declared parameter and a written
//! argument.
//!
//! This is a closed lookup table, deliberately free of argument facts: value
//! category (addressability, writability) is layered on by the binder, which
//! is the only place those facts exist. Keeping the table pure makes the
//! whole matrix testable by enumeration.

use crate::diagnostics::DiagCode;
use crate::symbols::RefKind;

/// Outcome of one parameter/argument ref-kind pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCompat {
    Accept,
    /// Allowed, with a warning-grade advisory attached to the binding.
    AcceptWithAdvisory(DiagCode),
    Reject(DiagCode),
}

impl RefCompat {
    pub fn is_accepted(self) -> bool {
        !matches!(self, RefCompat::Reject(_))
    }
}

/// Compatibility of an argument written with `arg` against a parameter
/// declared `param`.
pub fn check(param: RefKind, arg: RefKind) -> RefCompat {
    use RefCompat::*;
    use RefKind::*;

    // `ref readonly` cannot be written at a call site; fold it into `in` so
    // the function stays total over the enum square.
    let arg = if arg == RefReadonly { In } else { arg };

    match (param, arg) {
        (None, None) => Accept,
        (None, Ref | In | Out) => Reject(DiagCode::BadArgRef),

        (Ref, Ref) => Accept,
        (Ref, None | In | Out) => Reject(DiagCode::BadArgRef),

        (In, None) => Accept,
        (In, Ref) => AcceptWithAdvisory(DiagCode::RefTakenAsIn),
        (In, In) => Accept,
        (In, Out) => Reject(DiagCode::BadArgRef),

        (RefReadonly, None) => Accept,
        (RefReadonly, Ref) => Accept,
        (RefReadonly, In) => Accept,
        (RefReadonly, Out) => Reject(DiagCode::BadArgRef),

        (Out, Out) => Accept,
        (Out, None | Ref | In) => Reject(DiagCode::BadArgRef),

        // Unreachable after the fold above, kept for totality.
        (_, RefReadonly) => Reject(DiagCode::BadArgRef),
    }
}
