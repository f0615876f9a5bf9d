//! Member catalog.
//!
//! Members are the callable signatures a type declares. They are stored in
//! one append-only arena and indexed per owning type; the catalog does not
//! know about the type graph, so inherited members are found by walking
//! `TypeGraph::ancestors` and asking the catalog per type.

use dsim_ir::{Name, ParamKind, ReturnKind};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{MemberId, TypeId};

/// Parameter kinds of a member, inline up to four.
pub type ParamList = SmallVec<[ParamKind; 4]>;

/// What a member provides when dispatched to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BodyKind {
    /// No body. The member has to be implemented by a subtype.
    Abstract,
    /// An interface default body. Counts as a default provider.
    Default,
    /// A class body; overrides anything it shadows.
    Concrete,
}

impl BodyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyKind::Abstract => "abstract",
            BodyKind::Default => "default",
            BodyKind::Concrete => "concrete",
        }
    }
}

/// Which parts of a signature identify a declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum OverloadMode {
    /// Name and parameter kinds. The return kind is ignored.
    #[default]
    Source,
    /// Name, parameter kinds and return kind, so members may differ by
    /// return kind alone (as after aggressive overload renaming).
    Bytecode,
}

/// A member signature.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Signature {
    pub name: Name,
    pub params: ParamList,
    pub ret: ReturnKind,
}

impl Signature {
    pub fn new(name: Name, params: &[ParamKind], ret: ReturnKind) -> Self {
        Signature {
            name,
            params: SmallVec::from_slice(params),
            ret,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether a call with `args` can reach this signature.
    ///
    /// Arity must match exactly; every argument must widen to its parameter.
    pub fn is_applicable(&self, args: &[ParamKind]) -> bool {
        self.params.len() == args.len()
            && args
                .iter()
                .zip(&self.params)
                .all(|(&arg, &param)| arg.widens_to(param))
    }

    /// Whether every parameter of `self` widens to the matching parameter of
    /// `other`, and at least one is strictly narrower.
    ///
    /// Signatures with different arities are never comparable.
    pub fn is_more_specific_than(&self, other: &Signature) -> bool {
        if self.params.len() != other.params.len() {
            return false;
        }
        let mut strictly = false;
        for (&mine, &theirs) in self.params.iter().zip(&other.params) {
            if !mine.widens_to(theirs) {
                return false;
            }
            strictly |= mine.is_narrower_than(theirs);
        }
        strictly
    }
}

/// A member declared on a type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Member {
    pub owner: TypeId,
    pub signature: Signature,
    pub body: BodyKind,
}

/// Errors raised while registering members.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CatalogError {
    /// The owner already declares a member with the same identity.
    #[error("duplicate member declaration")]
    DuplicateMember {
        owner: TypeId,
        name: Name,
        existing: MemberId,
    },
}

/// All members of all types.
#[derive(Clone, Debug, Default)]
pub struct MemberCatalog {
    mode: OverloadMode,
    members: Vec<Member>,
    by_owner: FxHashMap<TypeId, Vec<MemberId>>,
}

impl MemberCatalog {
    /// Create an empty catalog in source overload mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog with the given overload mode.
    pub fn with_mode(mode: OverloadMode) -> Self {
        MemberCatalog {
            mode,
            ..Self::default()
        }
    }

    #[inline]
    pub fn mode(&self) -> OverloadMode {
        self.mode
    }

    /// Whether two signatures identify the same declaration under this
    /// catalog's overload mode.
    pub fn same_signature(&self, a: &Signature, b: &Signature) -> bool {
        a.name == b.name
            && a.params == b.params
            && (self.mode == OverloadMode::Source || a.ret == b.ret)
    }

    /// Register a member on `owner`.
    ///
    /// Fails if `owner` already declares a member with the same identity.
    pub fn declare(
        &mut self,
        owner: TypeId,
        name: Name,
        params: &[ParamKind],
        ret: ReturnKind,
        body: BodyKind,
    ) -> Result<MemberId, CatalogError> {
        let signature = Signature::new(name, params, ret);
        if let Some(existing) = self.find(owner, &signature) {
            tracing::debug!(owner = owner.raw(), name = name.raw(), "duplicate member");
            return Err(CatalogError::DuplicateMember {
                owner,
                name,
                existing,
            });
        }

        let id = MemberId::next(self.members.len());
        self.members.push(Member {
            owner,
            signature,
            body,
        });
        self.by_owner.entry(owner).or_default().push(id);
        Ok(id)
    }

    /// Get a member.
    #[inline]
    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.get(id.index())
    }

    /// Members declared directly on `owner`, in registration order.
    pub fn members_of(&self, owner: TypeId) -> &[MemberId] {
        self.by_owner.get(&owner).map(Vec::as_slice).unwrap_or_default()
    }

    /// Members declared directly on `owner` with the given name.
    pub fn named(&self, owner: TypeId, name: Name) -> impl Iterator<Item = MemberId> + '_ {
        self.members_of(owner)
            .iter()
            .copied()
            .filter(move |&id| self.get(id).is_some_and(|m| m.signature.name == name))
    }

    /// The member `owner` declares with the same identity as `signature`.
    pub fn find(&self, owner: TypeId, signature: &Signature) -> Option<MemberId> {
        self.members_of(owner).iter().copied().find(|&id| {
            self.get(id)
                .is_some_and(|m| self.same_signature(&m.signature, signature))
        })
    }

    /// Number of registered members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over all members in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (MemberId, &Member)> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, member)| (MemberId::next(i), member))
    }
}
