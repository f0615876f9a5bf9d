//! Static method resolution for the dispatch simulator.
//!
//! # Architecture
//!
//! - [`TypeGraph`]: acyclic graph of interfaces and classes, with subtype,
//!   most-specific and default-provider queries
//! - [`MemberCatalog`]: the members each type declares
//! - [`resolve`]: picks a member for a [`CallSite`] against the static
//!   receiver type and dispatches it on the runtime receiver type
//! - [`Model`]: name-based facade that owns all three plus the interner
//!
//! A graph and catalog are built single-threaded, then frozen by sharing
//! them immutably; [`resolve_all`] resolves call sites in parallel.

mod catalog;
mod diagnostics;
pub mod format;
mod graph;
mod ids;
mod model;
mod resolve;

pub use catalog::{
    BodyKind, CatalogError, Member, MemberCatalog, OverloadMode, ParamList, Signature,
};
pub use graph::{GraphError, TypeDecl, TypeEntry, TypeGraph, TypeKind};
pub use ids::{MemberId, TypeId};
pub use model::{Model, ModelError};
pub use resolve::{resolve, resolve_all, CallSite, Resolution, ResolutionResult, ResolveError};
