//! Overload resolution for collection-construction argument lists.
//!
//! This crate resolves the `with(...)` element of a collection literal
//! against the target type's construction candidates, covering:
//!
//! - Candidate enumeration per target kind (arrays, spans, well-known
//!   interfaces, user-defined types, builder-backed types, type parameters)
//! - Positional and named argument binding with optional-parameter defaults
//!   and `params` collections in normal and expanded form
//! - Ref-kind compatibility (`ref`/`in`/`out`/`ref readonly`) with the
//!   relaxations and their advisories
//! - Generic constraint, accessibility, and obsoletion checking
//! - Betterness selection with overload-resolution priority
//! - Ref-safety validation over escape scopes
//! - Infinite params-collection construction detection
//!
//! # Architecture
//!
//! The host front end classifies the target, lowers the `with(...)` element,
//! and answers symbol queries through [`Universe`]; the resolver is a pure
//! function from those inputs to a [`Resolution`].
//!
//! ```text
//! ┌──────────┐    ┌───────────────────────────────────┐    ┌────────────┐
//! │  host    │───►│ enumerate → bind → constraints →  │───►│ Resolution │
//! │ front end│    │ select → ref safety → params cycle│    │ (data)     │
//! └──────────┘    └───────────────────────────────────┘    └────────────┘
//! ```
//!
//! Expected failures are ordinary values carrying a structured
//! [`Diagnostic`]; the only `Err` path is a malformed universe. The resolver
//! holds no mutable state, so one instance serves any number of resolutions,
//! concurrently if the host wants.

pub mod arguments;
pub mod diagnostics;
pub mod resolve;
pub mod span;
pub mod symbols;
pub mod target;
pub mod types;
pub mod universe;

pub use arguments::{ArgValue, Argument, CallSite, ScopeDepth, WithElement};
pub use diagnostics::{DiagCode, Diagnostic, Severity};
pub use resolve::{
    BoundArg, BoundCall, Candidate, Conversion, Resolution, Resolved, Resolver,
};
pub use span::Span;
pub use target::{CollectionTarget, InterfaceKind};
pub use types::{AssemblyId, DefId, PrimTy, Ty, TyKind};
pub use universe::{CandidateId, MemoryUniverse, Universe, UniverseError};
