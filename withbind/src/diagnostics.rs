//! Structured diagnostics.
//!
//! The resolver reports outcomes as data: a code from a closed taxonomy plus
//! renderer-ordered substitution arguments. It never formats prose; the host
//! owns message templates and localization. The whole structure serializes
//! with `serde` so hosts can ship diagnostics across a process boundary.

use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// The closed set of diagnostic codes resolution can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagCode {
    // Target shape rejections, before any candidate exists.
    /// The target type can never be constructed (multidimensional array).
    TargetNotConstructible,
    /// Arrays and spans take no construction arguments at all.
    ArgumentsNotSupportedForType,
    /// The `with(...)` element must be the first element of the literal.
    ArgumentsMustBeFirst,
    /// Read-only interface targets accept only an empty `with()`.
    ArgumentsMustBeEmpty,
    /// An argument's static type involves `dynamic`.
    DynamicBindingRejected,
    /// A type-parameter target cannot take construction arguments.
    TypeParameterArgumentsRejected,

    // Candidate enumeration.
    /// Every candidate was rejected; args carry the target display.
    NoApplicableCandidate,
    /// The builder type has no usable factory method of the declared name.
    BuilderMethodNotFound,
    /// A well-known realization type is missing from the universe.
    MissingPredefinedMember,

    // Argument binding.
    /// Wrong argument count for a constructor target.
    BadArgCount,
    /// Wrong argument count for a builder factory method.
    BadFactoryArgCount,
    /// A named argument matches no parameter.
    BadNamedArgument,
    /// Two arguments bound to one parameter.
    DuplicateArgument,
    /// A positional argument follows a named one that moved the cursor.
    NamedBeforePositional,
    /// A required parameter has no corresponding argument.
    NoCorrespondingArgument,
    /// No implicit conversion from the argument to the parameter type.
    BadArgType,
    /// The argument's `ref`/`in`/`out` keyword does not fit the parameter.
    BadArgRef,
    /// An `out` argument must designate writable storage.
    RefLvalueExpected,

    // Constraint checking.
    /// A `class` constraint was not satisfied.
    RefConstraintNotSatisfied,
    /// A `struct` constraint (or span-element restriction) was not satisfied.
    ValConstraintNotSatisfied,

    // Selection.
    /// More than one maximal candidate.
    AmbiguousCandidates,

    // Ref safety.
    /// A capture parameter is paired with an argument that outlives the
    /// construction.
    CallArgMixing,
    /// A by-ref argument would be retained past its own lifetime.
    EscapeVariable,

    // Params collections.
    /// Constructing the params collection recursively requires itself.
    InfiniteParamsChain,
    /// The params base-case constructor is less visible than the member.
    ParamsMemberLessVisible,

    // Obsoletion.
    /// Warning-grade `[Obsolete]` on the chosen candidate.
    ObsoleteWarning,
    /// Error-grade `[Obsolete]`; the candidate cannot be chosen.
    ObsoleteError,

    // Advisories from ref-kind relaxations.
    /// `ref` written against an `in`/`ref readonly` parameter.
    RefTakenAsIn,
    /// A non-addressable value passed by implicit reference.
    InArgumentIsTemporary,
}

impl DiagCode {
    /// Whether the code is an error or a warning when nothing overrides it.
    pub fn default_severity(self) -> Severity {
        match self {
            DiagCode::ObsoleteWarning
            | DiagCode::ParamsMemberLessVisible
            | DiagCode::RefTakenAsIn
            | DiagCode::InArgumentIsTemporary => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One structured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagCode,
    pub severity: Severity,
    /// Substitution arguments in the order the host's template expects
    /// (type displays, member names, counts as decimal strings).
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn new(code: DiagCode, args: Vec<String>) -> Self {
        Self { code, severity: code.default_severity(), args, span: None }
    }

    pub fn error(code: DiagCode, args: Vec<String>) -> Self {
        Self { code, severity: Severity::Error, args, span: None }
    }

    pub fn warning(code: DiagCode, args: Vec<String>) -> Self {
        Self { code, severity: Severity::Warning, args, span: None }
    }

    /// Attaches a source location. Dummy spans mark synthesized nodes and
    /// are dropped rather than reported as `0..0`.
    pub fn with_span(mut self, span: Span) -> Self {
        if !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    pub fn with_span_opt(self, span: Option<Span>) -> Self {
        match span {
            Some(s) => self.with_span(s),
            None => self,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    // Compact form for logs and test failures, not user rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(", self.code)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
