//! The declared type hierarchy.
//!
//! `TypeGraph` stores interfaces and classes together with their ordered
//! supertype lists, and answers the subtype and specificity questions the
//! resolver asks on every query.
//!
//! # Design
//!
//! - Types live in an append-only `Vec<TypeEntry>`; `TypeId` is the index
//! - `add_type` only accepts already-registered supertypes, so the vector
//!   is always in topological order and a supertype's id is smaller than
//!   the id of every type below it
//! - The reflexive-transitive closure is computed lazily, once, into a
//!   `OnceLock`. Only `add_type` (which needs `&mut self`) resets it, so a
//!   shared `&TypeGraph` is frozen and safe to query from many threads

use std::collections::VecDeque;
use std::sync::OnceLock;

use dsim_ir::Name;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::catalog::{BodyKind, MemberCatalog, Signature};
use crate::{MemberId, TypeId};

/// Whether a type was declared as an interface or a class.
///
/// Resolution treats both the same; the kind only shows up in diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Interface,
    Class,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Interface => "interface",
            TypeKind::Class => "class",
        }
    }
}

/// A registered type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    /// The type name.
    pub name: Name,

    /// Interface or class.
    pub kind: TypeKind,

    /// Direct supertypes, in declaration order, without duplicates.
    pub supertypes: Vec<TypeId>,
}

/// A type declaration that has not been placed in a graph yet.
///
/// Used by [`TypeGraph::from_declarations`], which accepts declarations in
/// any order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: Name,
    pub kind: TypeKind,
    pub supertypes: Vec<Name>,
}

impl TypeDecl {
    pub fn new(name: Name, kind: TypeKind, supertypes: &[Name]) -> Self {
        TypeDecl {
            name,
            kind,
            supertypes: supertypes.to_vec(),
        }
    }
}

/// Errors raised while building a type graph.
///
/// All of them are fatal to catalog building: the caller has to fix the
/// input. A failed `add_type` leaves the graph exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum GraphError {
    /// The name is already registered.
    #[error("duplicate type declaration")]
    DuplicateType { name: Name },

    /// A supertype is not registered yet.
    #[error("supertype is not registered")]
    UnknownSupertype { name: Name, supertype: Name },

    /// Registration would make a type its own ancestor.
    ///
    /// `cycle` lists the types on the cycle, starting from the lowest
    /// declaration in input order.
    #[error("supertype cycle through {} type(s)", .cycle.len())]
    CycleDetected { cycle: Vec<Name> },
}

/// Reflexive-transitive supertype closure, one ancestor set per type.
#[derive(Clone, Debug, Default)]
struct Closure {
    ancestors: Vec<FxHashSet<TypeId>>,
}

impl Closure {
    fn build(types: &[TypeEntry]) -> Self {
        let mut ancestors: Vec<FxHashSet<TypeId>> = Vec::with_capacity(types.len());
        for (i, entry) in types.iter().enumerate() {
            let mut set = FxHashSet::default();
            set.insert(TypeId::next(i));
            // Supertypes precede their subtypes, so their sets are complete.
            for &sup in &entry.supertypes {
                if let Some(sup_set) = ancestors.get(sup.index()) {
                    set.extend(sup_set.iter().copied());
                }
            }
            ancestors.push(set);
        }
        Closure { ancestors }
    }
}

/// Directed acyclic graph of declared types.
#[derive(Clone, Debug, Default)]
pub struct TypeGraph {
    /// All registered types, in topological (registration) order.
    types: Vec<TypeEntry>,

    /// Name → type id.
    by_name: FxHashMap<Name, TypeId>,

    /// Lazily computed reachability.
    closure: OnceLock<Closure>,
}

impl TypeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // === Construction ===

    /// Register a type whose supertypes are all registered already.
    ///
    /// Duplicate entries in `supertypes` are collapsed, keeping the first.
    /// Checks run in the order duplicate name, self-reference, unknown
    /// supertype; nothing is modified on failure.
    pub fn add_type(
        &mut self,
        name: Name,
        kind: TypeKind,
        supertypes: &[Name],
    ) -> Result<TypeId, GraphError> {
        if self.by_name.contains_key(&name) {
            tracing::debug!(name = name.raw(), "duplicate type");
            return Err(GraphError::DuplicateType { name });
        }

        if supertypes.contains(&name) {
            tracing::debug!(name = name.raw(), "type lists itself as a supertype");
            return Err(GraphError::CycleDetected { cycle: vec![name] });
        }

        let mut resolved = Vec::with_capacity(supertypes.len());
        for &supertype in supertypes {
            let Some(&id) = self.by_name.get(&supertype) else {
                tracing::debug!(
                    name = name.raw(),
                    supertype = supertype.raw(),
                    "unknown supertype"
                );
                return Err(GraphError::UnknownSupertype { name, supertype });
            };
            if !resolved.contains(&id) {
                resolved.push(id);
            }
        }

        let id = TypeId::next(self.types.len());
        self.types.push(TypeEntry {
            name,
            kind,
            supertypes: resolved,
        });
        self.by_name.insert(name, id);
        self.closure = OnceLock::new();
        Ok(id)
    }

    /// Build a graph from declarations given in any order.
    ///
    /// Declarations are placed in topological order with Kahn's algorithm;
    /// ties keep input order, so the same input always yields the same ids.
    /// Either every declaration is registered or an error is returned and
    /// no graph exists.
    pub fn from_declarations(decls: &[TypeDecl]) -> Result<Self, GraphError> {
        let mut position: FxHashMap<Name, usize> = FxHashMap::default();
        for (i, decl) in decls.iter().enumerate() {
            if position.insert(decl.name, i).is_some() {
                return Err(GraphError::DuplicateType { name: decl.name });
            }
        }

        // Edge sup → sub; in-degree counts distinct unregistered supertypes.
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); decls.len()];
        let mut pending: Vec<usize> = vec![0; decls.len()];
        for (i, decl) in decls.iter().enumerate() {
            let mut seen = FxHashSet::default();
            for &sup in &decl.supertypes {
                let Some(&j) = position.get(&sup) else {
                    return Err(GraphError::UnknownSupertype {
                        name: decl.name,
                        supertype: sup,
                    });
                };
                if seen.insert(j) {
                    dependents[j].push(i);
                    pending[i] += 1;
                }
            }
        }

        let mut ready: std::collections::BTreeSet<usize> =
            (0..decls.len()).filter(|&i| pending[i] == 0).collect();
        let mut graph = TypeGraph::new();
        while let Some(i) = ready.pop_first() {
            let decl = &decls[i];
            graph.add_type(decl.name, decl.kind, &decl.supertypes)?;
            for &dep in &dependents[i] {
                pending[dep] -= 1;
                if pending[dep] == 0 {
                    ready.insert(dep);
                }
            }
        }

        if graph.len() < decls.len() {
            let cycle = find_cycle(decls, &position, &pending);
            tracing::debug!(len = cycle.len(), "cycle among declarations");
            return Err(GraphError::CycleDetected { cycle });
        }

        Ok(graph)
    }

    // === Lookup ===

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether `id` belongs to this graph.
    #[inline]
    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.types.len()
    }

    /// Look up a type by name.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<TypeId> {
        self.by_name.get(&name).copied()
    }

    /// Get a type entry.
    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeEntry> {
        self.types.get(id.index())
    }

    /// Name of a type, `Name::EMPTY` for foreign ids.
    pub fn name(&self, id: TypeId) -> Name {
        self.get(id).map_or(Name::EMPTY, |e| e.name)
    }

    /// Kind of a type.
    pub fn kind(&self, id: TypeId) -> Option<TypeKind> {
        self.get(id).map(|e| e.kind)
    }

    /// Direct supertypes of a type, in declaration order.
    pub fn supertypes(&self, id: TypeId) -> &[TypeId] {
        self.get(id).map(|e| e.supertypes.as_slice()).unwrap_or_default()
    }

    /// Iterate over all types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeEntry)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, entry)| (TypeId::next(i), entry))
    }

    // === Subtyping ===

    fn closure(&self) -> &Closure {
        self.closure.get_or_init(|| {
            tracing::trace!(types = self.types.len(), "building reachability closure");
            Closure::build(&self.types)
        })
    }

    /// Whether `a` is `b` or `b` is reachable from `a` via supertype edges.
    pub fn is_subtype(&self, a: TypeId, b: TypeId) -> bool {
        self.closure()
            .ancestors
            .get(a.index())
            .is_some_and(|set| set.contains(&b))
    }

    /// Whether `a` is a subtype of `b` and not `b` itself.
    #[inline]
    pub fn is_strict_subtype(&self, a: TypeId, b: TypeId) -> bool {
        a != b && self.is_subtype(a, b)
    }

    /// The type itself followed by all transitive supertypes.
    ///
    /// Breadth-first, following each type's supertypes in declaration
    /// order; every ancestor appears once.
    pub fn ancestors(&self, id: TypeId) -> Vec<TypeId> {
        if !self.contains(id) {
            return Vec::new();
        }

        let mut visited = FxHashSet::default();
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(id);
        queue.push_back(id);

        while let Some(current) = queue.pop_front() {
            result.push(current);
            for &sup in self.supertypes(current) {
                if visited.insert(sup) {
                    queue.push_back(sup);
                }
            }
        }

        result
    }

    /// The members of `types` that have no strict subtype in `types`.
    ///
    /// Duplicates are collapsed; the result keeps first-occurrence order.
    /// More than one survivor means the set has no single most specific
    /// type, which callers report as an ambiguity.
    pub fn most_specific(&self, types: &[TypeId]) -> Vec<TypeId> {
        let mut unique: Vec<TypeId> = Vec::with_capacity(types.len());
        for &t in types {
            if !unique.contains(&t) {
                unique.push(t);
            }
        }

        unique
            .iter()
            .copied()
            .filter(|&t| !unique.iter().any(|&other| self.is_strict_subtype(other, t)))
            .collect()
    }

    // === Inherited declarations ===

    /// Declarations of `signature` that `ty` sees without an intervening
    /// override.
    ///
    /// Collects the matching member of every ancestor of `ty` (itself
    /// included) and keeps those whose owner is most specific. The result
    /// is sorted by member id.
    pub fn visible_declarations(
        &self,
        catalog: &MemberCatalog,
        ty: TypeId,
        signature: &Signature,
    ) -> Vec<MemberId> {
        let declared: Vec<(TypeId, MemberId)> = self
            .ancestors(ty)
            .into_iter()
            .filter_map(|t| catalog.find(t, signature).map(|m| (t, m)))
            .collect();

        let owners: Vec<TypeId> = declared.iter().map(|&(t, _)| t).collect();
        let visible = self.most_specific(&owners);

        let mut members: Vec<MemberId> = declared
            .into_iter()
            .filter(|(t, _)| visible.contains(t))
            .map(|(_, m)| m)
            .collect();
        members.sort_unstable();
        members
    }

    /// Types that hand `concrete` a default body for `signature`.
    ///
    /// Every visible declaration (see [`Self::visible_declarations`]) with
    /// a default body contributes its owner. A non-default declaration on
    /// `concrete` itself shadows every inherited default, so the result is
    /// then empty. Two or more providers mean a diamond the implementing
    /// type has to settle with its own override. Sorted by type id.
    pub fn default_providers(
        &self,
        catalog: &MemberCatalog,
        concrete: TypeId,
        signature: &Signature,
    ) -> Vec<TypeId> {
        let mut providers: Vec<TypeId> = self
            .visible_declarations(catalog, concrete, signature)
            .into_iter()
            .filter_map(|m| catalog.get(m))
            .filter(|member| member.body == BodyKind::Default)
            .map(|member| member.owner)
            .collect();
        providers.sort_unstable();
        providers
    }
}

/// Extract one cycle from the declarations Kahn's algorithm could not place.
///
/// Every unplaced declaration has at least one unplaced supertype, so
/// following the first such supertype from any unplaced node must revisit
/// a node; the revisited suffix is the cycle.
fn find_cycle(decls: &[TypeDecl], position: &FxHashMap<Name, usize>, pending: &[usize]) -> Vec<Name> {
    let Some(start) = (0..decls.len()).find(|&i| pending[i] > 0) else {
        return Vec::new();
    };

    let mut path: Vec<usize> = Vec::new();
    let mut on_path: FxHashMap<usize, usize> = FxHashMap::default();
    let mut current = start;
    loop {
        if let Some(&at) = on_path.get(&current) {
            return path[at..].iter().map(|&i| decls[i].name).collect();
        }
        on_path.insert(current, path.len());
        path.push(current);

        let next = decls[current]
            .supertypes
            .iter()
            .filter_map(|sup| position.get(sup).copied())
            .find(|&j| pending[j] > 0);
        match next {
            Some(j) => current = j,
            None => return path.iter().map(|&i| decls[i].name).collect(),
        }
    }
}
