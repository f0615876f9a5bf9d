//! Conversion of construction and resolution errors to diagnostics.

use dsim_diagnostic::{Diagnostic, ErrorCode};
use dsim_ir::StringLookup;

use crate::catalog::{CatalogError, MemberCatalog, OverloadMode};
use crate::format;
use crate::graph::{GraphError, TypeGraph};
use crate::resolve::ResolveError;

impl GraphError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GraphError::DuplicateType { .. } => ErrorCode::E1001,
            GraphError::UnknownSupertype { .. } => ErrorCode::E1002,
            GraphError::CycleDetected { .. } => ErrorCode::E1003,
        }
    }

    pub fn to_diagnostic(&self, names: &dyn StringLookup) -> Diagnostic {
        match self {
            GraphError::DuplicateType { name } => Diagnostic::error(self.code())
                .with_message(format!(
                    "type `{}` is declared more than once",
                    names.lookup(*name)
                ))
                .with_suggestion("rename one of the declarations"),

            GraphError::UnknownSupertype { name, supertype } => Diagnostic::error(self.code())
                .with_message(format!(
                    "type `{}` extends unknown type `{}`",
                    names.lookup(*name),
                    names.lookup(*supertype)
                ))
                .with_note("supertypes must be registered before the types that extend them"),

            GraphError::CycleDetected { cycle } => {
                let mut path: Vec<&str> = cycle.iter().map(|&n| names.lookup(n)).collect();
                if let Some(&first) = path.first() {
                    path.push(first);
                }
                Diagnostic::error(self.code())
                    .with_message(format!("supertype cycle: {}", path.join(" -> ")))
                    .with_note("a type may not be its own ancestor")
                    .with_suggestion("remove one of the supertype edges on the cycle")
            }
        }
    }
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::DuplicateMember { .. } => ErrorCode::E1004,
        }
    }

    pub fn to_diagnostic(
        &self,
        graph: &TypeGraph,
        catalog: &MemberCatalog,
        names: &dyn StringLookup,
    ) -> Diagnostic {
        match self {
            CatalogError::DuplicateMember {
                owner,
                name,
                existing,
            } => {
                let diag = Diagnostic::error(self.code())
                    .with_message(format!(
                        "`{}` already declares a member `{}` with the same identity",
                        format::type_name(graph, names, *owner),
                        names.lookup(*name)
                    ))
                    .with_note(format!(
                        "first declared as `{}`",
                        format::member(graph, catalog, names, *existing)
                    ));
                if catalog.mode() == OverloadMode::Source {
                    diag.with_note("return kinds are not part of a declaration's identity")
                } else {
                    diag
                }
            }
        }
    }
}

impl ResolveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::NoApplicableMember { .. } => ErrorCode::E2001,
            ResolveError::AmbiguousMembers { .. } => ErrorCode::E2002,
            ResolveError::DiamondConflict { .. } => ErrorCode::E2003,
            ResolveError::InvalidCast { .. } => ErrorCode::E2004,
            ResolveError::UnimplementedMember { .. } => ErrorCode::E2005,
            ResolveError::UnknownType { .. } => ErrorCode::E2006,
        }
    }

    /// Build a diagnostic listing the full conflicting set.
    pub fn to_diagnostic(
        &self,
        graph: &TypeGraph,
        catalog: &MemberCatalog,
        names: &dyn StringLookup,
    ) -> Diagnostic {
        let ty = |id| format::type_name(graph, names, id);
        let member = |id| format::member(graph, catalog, names, id);
        let sig = |id| {
            catalog.get(id).map_or_else(
                || format!("<unknown {id}>"),
                |m| format::signature(names, &m.signature, catalog.mode()),
            )
        };

        match self {
            ResolveError::UnknownType { id } => Diagnostic::error(self.code())
                .with_message(format!("type id `{id}` does not belong to this graph"))
                .with_note(format!("the graph has {} types", graph.len())),

            ResolveError::InvalidCast { runtime, target } => Diagnostic::error(self.code())
                .with_message(format!("cannot cast `{}` to `{}`", ty(*runtime), ty(*target)))
                .with_note(format!(
                    "runtime receiver `{}` is not a subtype of `{}`",
                    ty(*runtime),
                    ty(*target)
                )),

            ResolveError::NoApplicableMember {
                receiver,
                name,
                args,
            } => {
                let rendered: Vec<&str> = args.iter().map(|a| a.as_str()).collect();
                let candidates: Vec<_> = graph
                    .ancestors(*receiver)
                    .into_iter()
                    .flat_map(|t| catalog.named(t, *name))
                    .collect();
                let diag = Diagnostic::error(self.code())
                    .with_message(format!(
                        "no applicable member `{}({})` on `{}`",
                        names.lookup(*name),
                        rendered.join(", "),
                        ty(*receiver)
                    ))
                    .with_notes(candidates.iter().copied(), |id| {
                        format!("`{}` is not applicable", member(id))
                    });
                if candidates.is_empty() {
                    diag.with_note(format!(
                        "`{}` and its supertypes declare no member named `{}`",
                        ty(*receiver),
                        names.lookup(*name)
                    ))
                } else {
                    diag.with_note("arguments only widen along byte -> char -> int -> long -> float")
                }
            }

            ResolveError::AmbiguousMembers {
                receiver,
                candidates,
            } => {
                let owners: Vec<_> = candidates
                    .iter()
                    .filter_map(|&id| catalog.get(id).map(|m| m.owner))
                    .collect();
                let single_owner = owners.windows(2).all(|w| w[0] == w[1]);
                let title = candidates.first().map_or_else(String::new, |&id| sig(id));
                let diag = Diagnostic::error(self.code())
                    .with_message(format!("ambiguous call to `{title}` on `{}`", ty(*receiver)))
                    .with_notes(candidates.iter().copied(), |id| {
                        format!("candidate `{}`", member(id))
                    });
                if single_owner {
                    diag.with_suggestion("pass arguments whose kinds select a single overload, or rename one of the overloads")
                } else {
                    diag.with_suggestion(format!(
                        "cast the receiver to one of the declaring types, or override the member in `{}`",
                        ty(*receiver)
                    ))
                }
            }

            ResolveError::DiamondConflict {
                runtime,
                member: selected,
                providers,
            } => {
                let signature = sig(*selected);
                let mut diag = Diagnostic::error(self.code())
                    .with_message(format!(
                        "`{}` inherits conflicting bodies for `{signature}` from {}",
                        ty(*runtime),
                        format::type_set(graph, names, providers)
                    ))
                    .with_notes(providers.iter().copied(), |p| {
                        format!("body provided by `{}`", ty(p))
                    });
                if let (Some(&first), Some(m)) = (providers.first(), catalog.get(*selected)) {
                    let call = format::signature(names, &m.signature, OverloadMode::Source);
                    diag = diag.with_suggestion(format!(
                        "override `{call}` in `{}` and delegate with `{}.super.{call}`",
                        ty(*runtime),
                        ty(first)
                    ));
                }
                diag
            }

            ResolveError::UnimplementedMember {
                runtime,
                member: selected,
            } => Diagnostic::error(self.code())
                .with_message(format!(
                    "`{}` has no body for `{}`",
                    ty(*runtime),
                    member(*selected)
                ))
                .with_suggestion(format!(
                    "provide a body for `{}` in `{}` or one of its supertypes",
                    sig(*selected),
                    ty(*runtime)
                )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test code uses unwrap for clarity")]
mod tests;
