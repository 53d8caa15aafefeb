//! The read-only symbol universe the resolver runs against.
//!
//! [`Universe`] is the seam between the resolver and the host's symbol
//! tables: pure data accessors, no policy. All resolution logic lives in
//! `resolve/`; a host embeds the engine by implementing this trait over its
//! own tables, or by loading declarations into [`MemoryUniverse`].
//!
//! Failures here are integrity errors, not user diagnostics: a universe that
//! answers inconsistently (an unknown `DefId`, a target instantiated with the
//! wrong generic arity) aborts resolution through `Result` rather than
//! producing a user-facing code.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::symbols::{FactoryMethod, TypeDef};
use crate::types::{DefId, Ty, TyKind};

/// Internal inconsistency in the host-supplied universe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniverseError {
    #[error("unknown type definition {0:?}")]
    UnknownTypeDef(DefId),
    #[error("type `{name}` expects {expected} type argument(s), got {got}")]
    MismatchedTypeArity { name: String, expected: usize, got: usize },
}

/// Identity of a candidate within the universe, stable across a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateId {
    /// `index` into the owner's declared constructor list.
    Ctor { owner: DefId, index: usize },
    /// `index` into the builder's factory overloads of the target's method
    /// name, in declaration order.
    Factory { builder: DefId, index: usize },
}

/// Read-only queries over the host's declarations.
pub trait Universe {
    fn type_def(&self, def: DefId) -> Result<&TypeDef, UniverseError>;

    /// The concrete type conventionally used to realize mutable list-shaped
    /// interfaces. `None` models a stripped-down runtime without it.
    fn well_known_list(&self) -> Option<DefId>;

    /// Realization type for mutable dictionary-shaped interfaces.
    fn well_known_dictionary(&self) -> Option<DefId>;

    /// Factory overloads named `name` on a builder type, declaration order.
    /// An unknown builder def is an integrity error; a known builder with no
    /// overloads of the name is an empty slice.
    fn factory_methods(&self, builder: DefId, name: &str)
        -> Result<&[FactoryMethod], UniverseError>;

    /// Whether `sub` is `sup` or derives from it through base classes.
    fn derives_from(&self, sub: DefId, sup: DefId) -> Result<bool, UniverseError> {
        if sub == sup {
            return Ok(true);
        }
        let mut seen: FxHashSet<DefId> = FxHashSet::default();
        let mut cur = sub;
        while seen.insert(cur) {
            let td = self.type_def(cur)?;
            match td.base.as_ref().and_then(|b| b.as_named()) {
                Some((base_def, _)) => {
                    if base_def == sup {
                        return Ok(true);
                    }
                    cur = base_def;
                }
                None => break,
            }
        }
        Ok(false)
    }

    /// Whether values of `ty` are by-ref-like (stack-only).
    fn is_ref_like(&self, ty: &Ty) -> Result<bool, UniverseError> {
        match ty.kind() {
            TyKind::Span { .. } => Ok(true),
            TyKind::Named { def, .. } => Ok(self.type_def(*def)?.is_ref_like()),
            _ => Ok(false),
        }
    }

    /// Whether `ty` is a reference type (for `class` constraints).
    fn is_reference_type(&self, ty: &Ty) -> Result<bool, UniverseError> {
        match ty.kind() {
            TyKind::Prim(p) => Ok(!p.is_numeric() && *p != crate::types::PrimTy::Bool),
            TyKind::Named { def, .. } => Ok(self.type_def(*def)?.is_reference_type()),
            TyKind::Array { .. } => Ok(true),
            TyKind::Dynamic => Ok(true),
            TyKind::Span { .. } | TyKind::Param(_) | TyKind::Error => Ok(false),
        }
    }

    /// Whether `ty` is a value type (for `struct` constraints).
    fn is_value_type(&self, ty: &Ty) -> Result<bool, UniverseError> {
        match ty.kind() {
            TyKind::Prim(p) => Ok(p.is_numeric() || *p == crate::types::PrimTy::Bool),
            TyKind::Named { def, .. } => Ok(self.type_def(*def)?.is_value_type()),
            TyKind::Span { .. } => Ok(true),
            _ => Ok(false),
        }
    }
}

/// An insertion-ordered, in-memory [`Universe`].
///
/// Hosts with modest symbol counts (and every test in this crate) load
/// declarations once and resolve against them; lookups never allocate.
#[derive(Debug, Default)]
pub struct MemoryUniverse {
    defs: FxHashMap<DefId, TypeDef>,
    builders: FxHashMap<DefId, IndexMap<String, Vec<FactoryMethod>>>,
    well_known_list: Option<DefId>,
    well_known_dictionary: Option<DefId>,
    next_def: u32,
}

impl MemoryUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type definition, allocating its `DefId`.
    pub fn add_type(&mut self, def: TypeDef) -> DefId {
        let id = DefId(self.next_def);
        self.next_def += 1;
        self.defs.insert(id, def);
        id
    }

    /// Register a type under a caller-chosen id (ids must not collide).
    pub fn insert_type(&mut self, id: DefId, def: TypeDef) {
        self.next_def = self.next_def.max(id.0 + 1);
        self.defs.insert(id, def);
    }

    /// Append a factory overload to a builder type, preserving order.
    pub fn add_factory_method(&mut self, builder: DefId, method: FactoryMethod) {
        self.builders
            .entry(builder)
            .or_default()
            .entry(method.name.clone())
            .or_default()
            .push(method);
    }

    pub fn set_well_known_list(&mut self, def: DefId) {
        self.well_known_list = Some(def);
    }

    pub fn set_well_known_dictionary(&mut self, def: DefId) {
        self.well_known_dictionary = Some(def);
    }

    /// The `Ty` naming a registered definition with the given arguments.
    pub fn ty_of(&self, def: DefId, args: Vec<Ty>) -> Result<Ty, UniverseError> {
        let td = self.type_def(def)?;
        Ok(td.ty(def, args))
    }
}

impl Universe for MemoryUniverse {
    fn type_def(&self, def: DefId) -> Result<&TypeDef, UniverseError> {
        self.defs.get(&def).ok_or(UniverseError::UnknownTypeDef(def))
    }

    fn well_known_list(&self) -> Option<DefId> {
        self.well_known_list
    }

    fn well_known_dictionary(&self) -> Option<DefId> {
        self.well_known_dictionary
    }

    fn factory_methods(
        &self,
        builder: DefId,
        name: &str,
    ) -> Result<&[FactoryMethod], UniverseError> {
        if !self.defs.contains_key(&builder) {
            return Err(UniverseError::UnknownTypeDef(builder));
        }
        Ok(self
            .builders
            .get(&builder)
            .and_then(|by_name| by_name.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }
}
