//! Call-site resolution.
//!
//! Resolution runs in two phases:
//!
//! 1. **Static selection** picks one signature using only the static
//!    receiver type: applicability, declaring-type specificity, then
//!    parameter specificity.
//! 2. **Dispatch** finds the body that signature runs on the runtime
//!    receiver type: a visible class body wins, otherwise inherited
//!    interface defaults decide.
//!
//! Both phases are pure functions of `(graph, catalog, site)`, so any
//! number of call sites can be resolved in parallel over a frozen graph.

use dsim_ir::{Name, ParamKind};
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::catalog::{BodyKind, Member, MemberCatalog, ParamList};
use crate::graph::TypeGraph;
use crate::{MemberId, TypeId};

/// One call to resolve.
///
/// `((ChildC) ((Root) b)).doA()` with `ChildB b = new ChildC()` is
/// declared `ChildB`, runtime `ChildC`, casts `[Root, ChildC]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Type the receiver variable is declared as.
    pub declared: TypeId,

    /// Type actually instantiated.
    pub runtime: TypeId,

    /// Explicit casts applied to the receiver, innermost first.
    pub casts: SmallVec<[TypeId; 2]>,

    /// Member name.
    pub name: Name,

    /// Argument kinds.
    pub args: ParamList,
}

impl CallSite {
    pub fn new(declared: TypeId, runtime: TypeId, name: Name, args: &[ParamKind]) -> Self {
        CallSite {
            declared,
            runtime,
            casts: SmallVec::new(),
            name,
            args: SmallVec::from_slice(args),
        }
    }

    /// A call on a receiver declared as its own runtime type.
    pub fn on(ty: TypeId, name: Name, args: &[ParamKind]) -> Self {
        Self::new(ty, ty, name, args)
    }

    /// Wrap the receiver in one more cast.
    #[must_use]
    pub fn cast(mut self, target: TypeId) -> Self {
        self.casts.push(target);
        self
    }

    /// The type the call is checked against: the outermost cast, or the
    /// declared type when there is none.
    pub fn static_receiver(&self) -> TypeId {
        self.casts.last().copied().unwrap_or(self.declared)
    }
}

/// A successful resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// The member picked against the static receiver type.
    pub selected: MemberId,

    /// The member whose body runs on the runtime receiver type.
    pub target: MemberId,

    /// Owner of `target`.
    pub owner: TypeId,
}

/// Result of resolving one call site.
pub type ResolutionResult = Result<Resolution, ResolveError>;

/// Query-time failures.
///
/// None of these affect later queries; each call site is reported on its own.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ResolveError {
    /// A type id on the call site does not belong to the graph.
    #[error("type id is not part of this graph")]
    UnknownType { id: TypeId },

    /// The runtime receiver is not a subtype of the declared type or of a
    /// cast target.
    #[error("runtime receiver cannot be cast to the target type")]
    InvalidCast { runtime: TypeId, target: TypeId },

    /// No member of the static receiver accepts the arguments.
    #[error("no applicable member")]
    NoApplicableMember {
        receiver: TypeId,
        name: Name,
        args: ParamList,
    },

    /// More than one member remains after specificity ranking.
    #[error("ambiguous call between {} members", .candidates.len())]
    AmbiguousMembers {
        receiver: TypeId,
        candidates: Vec<MemberId>,
    },

    /// The runtime type inherits two or more bodies for the selected member
    /// and does not override it.
    #[error("conflicting inherited bodies from {} types", .providers.len())]
    DiamondConflict {
        runtime: TypeId,
        member: MemberId,
        providers: Vec<TypeId>,
    },

    /// The runtime type has no body for the selected member.
    #[error("selected member has no body on the runtime type")]
    UnimplementedMember { runtime: TypeId, member: MemberId },
}

/// Resolve one call site.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(name = site.name.raw(), runtime = site.runtime.raw())
)]
pub fn resolve(graph: &TypeGraph, catalog: &MemberCatalog, site: &CallSite) -> ResolutionResult {
    check_known(graph, site)?;
    check_casts(graph, site)?;

    let (selected, member) = select(graph, catalog, site)?;
    let resolution = dispatch(graph, catalog, site.runtime, selected, member)?;
    tracing::debug!(
        selected = selected.raw(),
        target = resolution.target.raw(),
        "resolved"
    );
    Ok(resolution)
}

/// Resolve many call sites in parallel.
///
/// Results come back in the order of `sites`.
pub fn resolve_all(
    graph: &TypeGraph,
    catalog: &MemberCatalog,
    sites: &[CallSite],
) -> Vec<ResolutionResult> {
    sites
        .par_iter()
        .map(|site| resolve(graph, catalog, site))
        .collect()
}

fn check_known(graph: &TypeGraph, site: &CallSite) -> Result<(), ResolveError> {
    let ids = [site.declared, site.runtime].into_iter().chain(site.casts.iter().copied());
    for id in ids {
        if !graph.contains(id) {
            return Err(ResolveError::UnknownType { id });
        }
    }
    Ok(())
}

/// The declared type first, then every cast in application order.
fn check_casts(graph: &TypeGraph, site: &CallSite) -> Result<(), ResolveError> {
    let targets = std::iter::once(site.declared).chain(site.casts.iter().copied());
    for target in targets {
        if !graph.is_subtype(site.runtime, target) {
            tracing::trace!(target = target.raw(), "invalid cast");
            return Err(ResolveError::InvalidCast {
                runtime: site.runtime,
                target,
            });
        }
    }
    Ok(())
}

/// Static selection against the static receiver type.
fn select<'c>(
    graph: &TypeGraph,
    catalog: &'c MemberCatalog,
    site: &CallSite,
) -> Result<(MemberId, &'c Member), ResolveError> {
    let receiver = site.static_receiver();

    let mut applicable: Vec<(MemberId, &Member)> = graph
        .ancestors(receiver)
        .into_iter()
        .flat_map(|ty| catalog.named(ty, site.name))
        .filter_map(|id| catalog.get(id).map(|m| (id, m)))
        .filter(|(_, m)| m.signature.is_applicable(&site.args))
        .collect();
    applicable.sort_unstable_by_key(|&(id, _)| id);

    if applicable.is_empty() {
        return Err(ResolveError::NoApplicableMember {
            receiver,
            name: site.name,
            args: site.args.clone(),
        });
    }
    tracing::trace!(count = applicable.len(), "applicable members");

    let owners: Vec<TypeId> = applicable.iter().map(|(_, m)| m.owner).collect();
    let specific = graph.most_specific(&owners);
    applicable.retain(|(_, m)| specific.contains(&m.owner));
    if specific.len() > 1 {
        return Err(ResolveError::AmbiguousMembers {
            receiver,
            candidates: applicable.iter().map(|&(id, _)| id).collect(),
        });
    }

    let narrowest: Vec<(MemberId, &Member)> = applicable
        .iter()
        .copied()
        .filter(|(id, m)| {
            !applicable.iter().any(|(other_id, other)| {
                other_id != id && other.signature.is_more_specific_than(&m.signature)
            })
        })
        .collect();

    match narrowest.as_slice() {
        [single] => Ok(*single),
        _ => Err(ResolveError::AmbiguousMembers {
            receiver,
            candidates: narrowest.iter().map(|&(id, _)| id).collect(),
        }),
    }
}

/// Find the body `member` runs on `runtime`.
fn dispatch(
    graph: &TypeGraph,
    catalog: &MemberCatalog,
    runtime: TypeId,
    selected: MemberId,
    member: &Member,
) -> ResolutionResult {
    let signature = &member.signature;
    let visible = graph.visible_declarations(catalog, runtime, signature);

    let concrete: Vec<(MemberId, TypeId)> = visible
        .iter()
        .filter_map(|&id| catalog.get(id).map(|m| (id, m)))
        .filter(|(_, m)| m.body == BodyKind::Concrete)
        .map(|(id, m)| (id, m.owner))
        .collect();

    match concrete.as_slice() {
        [(target, owner)] => {
            return Ok(Resolution {
                selected,
                target: *target,
                owner: *owner,
            });
        }
        [] => {}
        _ => {
            let mut providers: Vec<TypeId> = concrete.iter().map(|&(_, owner)| owner).collect();
            providers.sort_unstable();
            return Err(ResolveError::DiamondConflict {
                runtime,
                member: selected,
                providers,
            });
        }
    }

    let providers = graph.default_providers(catalog, runtime, signature);
    tracing::trace!(providers = providers.len(), "default providers");
    match providers.as_slice() {
        [owner] => match catalog.find(*owner, signature) {
            Some(target) => Ok(Resolution {
                selected,
                target,
                owner: *owner,
            }),
            None => Err(ResolveError::UnimplementedMember {
                runtime,
                member: selected,
            }),
        },
        [] => Err(ResolveError::UnimplementedMember {
            runtime,
            member: selected,
        }),
        _ => Err(ResolveError::DiamondConflict {
            runtime,
            member: selected,
            providers,
        }),
    }
}
