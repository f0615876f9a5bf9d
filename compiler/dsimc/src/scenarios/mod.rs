//! Built-in scenario catalogs.
//!
//! Each scenario is a small type hierarchy with labelled call sites and the
//! outcome every call site must produce. They mirror the classic
//! inheritance and overloading samples: a linear override chain, a diamond
//! of interface defaults, a zigzag of links between chains, and one class
//! full of overloads checked before and after aggressive renaming.

use dsim_diagnostic::ErrorCode;
use dsim_ir::{ParamKind, ReturnKind};
use dsim_types::{BodyKind, CallSite, Model, ModelError, OverloadMode, ResolutionResult};

mod diamond;
mod linear;
mod overload;
mod zigzag;

/// What a call site must resolve to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expected {
    /// Dispatch to this member, rendered as `Owner.member(params)`.
    Dispatch(&'static str),
    /// Fail with this error code.
    Error(ErrorCode),
}

impl Expected {
    /// Whether `result` meets the expectation.
    pub fn matches(&self, model: &Model, result: &ResolutionResult) -> bool {
        match (self, result) {
            (Expected::Dispatch(member), Ok(resolution)) => {
                model.render_member(resolution.target) == *member
            }
            (Expected::Error(code), Err(error)) => error.code() == *code,
            _ => false,
        }
    }
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Dispatch(member) => write!(f, "{member}"),
            Expected::Error(code) => write!(f, "error[{code}]"),
        }
    }
}

/// One labelled call site.
#[derive(Clone, Debug)]
pub struct Case {
    /// Short label, unique within its scenario (`case3`, `simple2/b`).
    pub label: &'static str,
    /// The call as it would be written in source.
    pub source: &'static str,
    pub site: CallSite,
    pub expected: Expected,
}

/// A model plus the call sites to check against it.
pub struct Scenario {
    /// `diamond`, `overload/bytecode`, ...
    pub name: &'static str,
    pub description: &'static str,
    pub model: Model,
    pub cases: Vec<Case>,
}

impl Scenario {
    /// Whether `selector` picks this scenario: an exact name, or the group
    /// before the slash (`overload` picks `overload/source` and
    /// `overload/bytecode`).
    pub fn is_selected_by(&self, selector: &str) -> bool {
        self.name == selector
            || self
                .name
                .split_once('/')
                .is_some_and(|(group, _)| group == selector)
    }
}

/// Argument list of a call without arguments.
pub(crate) const NO_ARGS: &[ParamKind] = &[];

/// Incremental scenario construction.
pub(crate) struct Builder {
    name: &'static str,
    description: &'static str,
    model: Model,
    cases: Vec<Case>,
}

impl Builder {
    pub(crate) fn new(name: &'static str, description: &'static str, mode: OverloadMode) -> Self {
        Builder {
            name,
            description,
            model: Model::with_mode(mode),
            cases: Vec::new(),
        }
    }

    pub(crate) fn interface(&mut self, name: &str, supertypes: &[&str]) -> Result<(), ModelError> {
        self.model.interface(name, supertypes).map(|_| ())
    }

    pub(crate) fn class(&mut self, name: &str, supertypes: &[&str]) -> Result<(), ModelError> {
        self.model.class(name, supertypes).map(|_| ())
    }

    pub(crate) fn member(
        &mut self,
        owner: &str,
        name: &str,
        params: &[ParamKind],
        ret: ReturnKind,
        body: BodyKind,
    ) -> Result<(), ModelError> {
        self.model.member(owner, name, params, ret, body).map(|_| ())
    }

    /// Add a call site: a `declared` variable holding a `runtime` instance,
    /// cast through `casts`, calling `name(args)`.
    pub(crate) fn case(
        &mut self,
        label: &'static str,
        source: &'static str,
        (declared, runtime): (&str, &str),
        casts: &[&str],
        (name, args): (&str, &[ParamKind]),
        expected: Expected,
    ) -> Result<(), ModelError> {
        let site = self.model.call(declared, runtime, casts, name, args)?;
        self.cases.push(Case {
            label,
            source,
            site,
            expected,
        });
        Ok(())
    }

    pub(crate) fn finish(self) -> Scenario {
        Scenario {
            name: self.name,
            description: self.description,
            model: self.model,
            cases: self.cases,
        }
    }
}

/// Names of all built-in scenarios, in run order.
pub const NAMES: [&str; 5] = [
    "linear",
    "diamond",
    "zigzag",
    "overload/source",
    "overload/bytecode",
];

/// Build every built-in scenario.
pub fn all() -> Result<Vec<Scenario>, ModelError> {
    Ok(vec![
        linear::build()?,
        diamond::build()?,
        zigzag::build()?,
        overload::build_source()?,
        overload::build_bytecode()?,
    ])
}

/// Build the scenarios `selector` picks; all of them for `None`.
pub fn select(selector: Option<&str>) -> Result<Vec<Scenario>, ModelError> {
    let mut scenarios = all()?;
    if let Some(selector) = selector {
        scenarios.retain(|s| s.is_selected_by(selector));
    }
    Ok(scenarios)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test code uses unwrap for clarity")]
mod tests;
