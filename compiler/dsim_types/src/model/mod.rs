//! Name-based facade over a graph, a catalog and their interner.
//!
//! Scenario catalogs and tests spell types and members by name; `Model`
//! interns the names and forwards to [`TypeGraph`], [`MemberCatalog`] and
//! [`resolve`](crate::resolve).

use dsim_diagnostic::{Diagnostic, ErrorCode};
use dsim_ir::{ParamKind, ReturnKind, SharedInterner};

use crate::catalog::{BodyKind, CatalogError, MemberCatalog, OverloadMode};
use crate::format;
use crate::graph::{GraphError, TypeGraph, TypeKind};
use crate::resolve::{CallSite, ResolutionResult, ResolveError};
use crate::{MemberId, TypeId};

/// Errors from building a model or spelling a call by name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A name that is not registered as a type.
    #[error("no type named `{0}`")]
    UnknownName(String),
}

/// A type graph and member catalog addressed by name.
#[derive(Clone, Default)]
pub struct Model {
    names: SharedInterner,
    graph: TypeGraph,
    catalog: MemberCatalog,
}

impl Model {
    /// Create an empty model in source overload mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model whose catalog uses `mode`.
    pub fn with_mode(mode: OverloadMode) -> Self {
        Model {
            catalog: MemberCatalog::with_mode(mode),
            ..Self::default()
        }
    }

    #[inline]
    pub fn names(&self) -> &SharedInterner {
        &self.names
    }

    #[inline]
    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    #[inline]
    pub fn catalog(&self) -> &MemberCatalog {
        &self.catalog
    }

    // === Construction ===

    /// Declare an interface.
    pub fn interface(&mut self, name: &str, supertypes: &[&str]) -> Result<TypeId, ModelError> {
        self.add(name, TypeKind::Interface, supertypes)
    }

    /// Declare a class.
    pub fn class(&mut self, name: &str, supertypes: &[&str]) -> Result<TypeId, ModelError> {
        self.add(name, TypeKind::Class, supertypes)
    }

    fn add(&mut self, name: &str, kind: TypeKind, supertypes: &[&str]) -> Result<TypeId, ModelError> {
        let name = self.names.intern(name);
        let supertypes: Vec<_> = supertypes.iter().map(|s| self.names.intern(s)).collect();
        Ok(self.graph.add_type(name, kind, &supertypes)?)
    }

    /// Declare a member on an existing type.
    pub fn member(
        &mut self,
        owner: &str,
        name: &str,
        params: &[ParamKind],
        ret: ReturnKind,
        body: BodyKind,
    ) -> Result<MemberId, ModelError> {
        let owner = self.ty(owner)?;
        let name = self.names.intern(name);
        Ok(self.catalog.declare(owner, name, params, ret, body)?)
    }

    // === Queries ===

    /// Look up a type by name.
    pub fn ty(&self, name: &str) -> Result<TypeId, ModelError> {
        self.graph
            .lookup(self.names.intern(name))
            .ok_or_else(|| ModelError::UnknownName(name.to_string()))
    }

    /// Spell a call site: `declared` variable holding a `runtime` instance,
    /// cast through `casts` (innermost first), calling `name(args)`.
    pub fn call(
        &self,
        declared: &str,
        runtime: &str,
        casts: &[&str],
        name: &str,
        args: &[ParamKind],
    ) -> Result<CallSite, ModelError> {
        let mut site = CallSite::new(
            self.ty(declared)?,
            self.ty(runtime)?,
            self.names.intern(name),
            args,
        );
        for cast in casts {
            site = site.cast(self.ty(cast)?);
        }
        Ok(site)
    }

    pub fn resolve(&self, site: &CallSite) -> ResolutionResult {
        crate::resolve(&self.graph, &self.catalog, site)
    }

    pub fn resolve_all(&self, sites: &[CallSite]) -> Vec<ResolutionResult> {
        crate::resolve_all(&self.graph, &self.catalog, sites)
    }

    // === Rendering ===

    /// `ChildA.action()`.
    pub fn render_member(&self, id: MemberId) -> String {
        format::member(&self.graph, &self.catalog, &self.names, id)
    }

    pub fn render_type(&self, id: TypeId) -> &str {
        format::type_name(&self.graph, &self.names, id)
    }

    pub fn resolve_diagnostic(&self, error: &ResolveError) -> Diagnostic {
        error.to_diagnostic(&self.graph, &self.catalog, &self.names)
    }

    pub fn model_diagnostic(&self, error: &ModelError) -> Diagnostic {
        match error {
            ModelError::Graph(e) => e.to_diagnostic(&self.names),
            ModelError::Catalog(e) => e.to_diagnostic(&self.graph, &self.catalog, &self.names),
            ModelError::UnknownName(name) => Diagnostic::error(ErrorCode::E2006)
                .with_message(format!("no type named `{name}`"))
                .with_note(format!("the model declares {} types", self.graph.len())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test code uses unwrap for clarity")]
mod tests;
