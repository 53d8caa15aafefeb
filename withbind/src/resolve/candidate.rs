//! Normalized construction candidates.
//!
//! Constructors and builder factory methods are normalized into one shape at
//! enumeration time: the explicit (user-bindable) parameter list with all
//! generic parameters substituted away, plus an optional record of where the
//! implicit items parameter sat in the declared signature. Binding, checking,
//! and selection all run over this shape and never look back at the raw
//! declaration.

use crate::symbols::{
    Accessibility, Constructor, FactoryMethod, ObsoleteInfo, Param, TypeParamDef,
};
use crate::types::Ty;
use crate::universe::CandidateId;

/// The implicit span-of-elements parameter of a factory method, remembered
/// only for signature display and arity accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemsSlot {
    /// Index in the declared parameter list.
    pub declared_index: usize,
    /// The instantiated parameter itself.
    pub param: Param,
}

/// A construction candidate, normalized and fully instantiated.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: CandidateId,
    /// Diagnostic short name: the type's short name for constructors, the
    /// method name for factories.
    pub short_name: String,
    /// Full display of the constructed type (`List<int>`).
    pub owner_display: String,
    /// Explicit parameters only, in declared order, instantiated.
    pub params: Vec<Param>,
    /// The implicit items parameter, absent for constructors.
    pub items: Option<ItemsSlot>,
    /// Method-level generic parameters with the arguments chosen for them
    /// (the target's type arguments, positionally). Empty for constructors.
    pub method_type_params: Vec<TypeParamDef>,
    pub method_type_args: Vec<Ty>,
    pub accessibility: Accessibility,
    pub obsolete: Option<ObsoleteInfo>,
    pub use_site_error: bool,
    pub unmanaged_callers_only: bool,
    pub priority: i32,
}

impl Candidate {
    /// Normalize a declared constructor, substituting the owning type's
    /// arguments into parameter types.
    pub fn from_ctor(
        id: CandidateId,
        ctor: &Constructor,
        short_name: &str,
        owner_display: String,
        type_args: &[Ty],
    ) -> Self {
        let params = ctor
            .params
            .iter()
            .map(|p| instantiate_param(p, type_args))
            .collect();
        Candidate {
            id,
            short_name: short_name.to_string(),
            owner_display,
            params,
            items: None,
            method_type_params: Vec::new(),
            method_type_args: Vec::new(),
            accessibility: ctor.accessibility,
            obsolete: ctor.obsolete.clone(),
            use_site_error: ctor.use_site_error,
            unmanaged_callers_only: false,
            priority: ctor.priority,
        }
    }

    /// Normalize a factory overload: split out the items parameter and
    /// substitute the method type arguments everywhere.
    pub fn from_factory(
        id: CandidateId,
        method: &FactoryMethod,
        owner_display: String,
        method_type_args: Vec<Ty>,
    ) -> Self {
        let mut params = Vec::with_capacity(method.params.len().saturating_sub(1));
        let mut items = None;
        for (i, p) in method.params.iter().enumerate() {
            let inst = instantiate_param(p, &method_type_args);
            if i == method.items_index {
                items = Some(ItemsSlot { declared_index: i, param: inst });
            } else {
                params.push(inst);
            }
        }
        Candidate {
            id,
            short_name: method.name.clone(),
            owner_display,
            params,
            items,
            method_type_params: method.type_params.clone(),
            method_type_args,
            accessibility: method.accessibility,
            obsolete: method.obsolete.clone(),
            use_site_error: method.use_site_error,
            unmanaged_callers_only: method.unmanaged_callers_only,
            priority: method.priority,
        }
    }

    pub fn is_factory(&self) -> bool {
        matches!(self.id, CandidateId::Factory { .. })
    }

    /// The trailing params-collection parameter, if declared.
    pub fn params_param(&self) -> Option<(usize, &Param)> {
        let last = self.params.last()?;
        if last.is_params {
            Some((self.params.len() - 1, last))
        } else {
            None
        }
    }

    /// Fewest arguments that can bind: required parameters only.
    pub fn min_arity(&self) -> usize {
        self.params
            .iter()
            .filter(|p| !p.is_optional() && !p.is_params)
            .count()
    }

    /// Most positional arguments accepted in non-expanded form.
    pub fn max_arity(&self) -> Option<usize> {
        if self.params_param().is_some() {
            None
        } else {
            Some(self.params.len())
        }
    }

    /// Render the full declared signature for ambiguity lists, with the
    /// items parameter shown at its declared position.
    pub fn signature(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.params.len() + 1);
        for p in &self.params {
            parts.push(render_param(p));
        }
        if let Some(items) = &self.items {
            let at = items.declared_index.min(parts.len());
            parts.insert(at, render_param(&items.param));
        }
        format!("{}({})", self.short_name, parts.join(", "))
    }
}

fn instantiate_param(p: &Param, type_args: &[Ty]) -> Param {
    if type_args.is_empty() {
        p.clone()
    } else {
        Param { ty: p.ty.substitute(type_args), ..p.clone() }
    }
}

fn render_param(p: &Param) -> String {
    let mut s = String::new();
    if p.is_params {
        s.push_str("params ");
    }
    let kw = p.ref_kind.keyword();
    if !kw.is_empty() {
        s.push_str(kw);
        s.push(' ');
    }
    s.push_str(&p.ty.to_string());
    s.push(' ');
    s.push_str(&p.name);
    if p.is_optional() {
        s.push_str(" = ...");
    }
    s
}
