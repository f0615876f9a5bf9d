//! Parameter kinds and the fixed widening order.
//!
//! The simulator does not model a full type system. Every parameter and
//! argument is one of a closed set of kinds, and applicability between an
//! argument kind and a parameter kind is decided by a single chain:
//!
//! ```text
//! byte → char → int → long → float
//! ```
//!
//! `boolean` and `reference` sit outside the chain and only match themselves.
//! There is no boxing: a `reference` argument never matches a primitive
//! parameter and vice versa.

use std::fmt;

/// A parameter (or argument) kind.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ParamKind {
    Byte,
    Char,
    Int,
    Long,
    Float,
    Boolean,
    Reference,
}

impl ParamKind {
    /// Every kind, in declaration order.
    pub const ALL: [ParamKind; 7] = [
        ParamKind::Byte,
        ParamKind::Char,
        ParamKind::Int,
        ParamKind::Long,
        ParamKind::Float,
        ParamKind::Boolean,
        ParamKind::Reference,
    ];

    /// Position in the widening chain, `None` for kinds outside it.
    #[inline]
    const fn widening_rank(self) -> Option<u8> {
        match self {
            ParamKind::Byte => Some(0),
            ParamKind::Char => Some(1),
            ParamKind::Int => Some(2),
            ParamKind::Long => Some(3),
            ParamKind::Float => Some(4),
            ParamKind::Boolean | ParamKind::Reference => None,
        }
    }

    /// Whether a value of this kind can be passed where `target` is expected,
    /// using zero or more widening steps.
    pub fn widens_to(self, target: ParamKind) -> bool {
        if self == target {
            return true;
        }
        match (self.widening_rank(), target.widening_rank()) {
            (Some(from), Some(to)) => from <= to,
            _ => false,
        }
    }

    /// Whether this kind is strictly narrower than `other`: distinct, and
    /// `other` is reachable from it by widening.
    #[inline]
    pub fn is_narrower_than(self, other: ParamKind) -> bool {
        self != other && self.widens_to(other)
    }

    /// Keyword spelling of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamKind::Byte => "byte",
            ParamKind::Char => "char",
            ParamKind::Int => "int",
            ParamKind::Long => "long",
            ParamKind::Float => "float",
            ParamKind::Boolean => "boolean",
            ParamKind::Reference => "reference",
        }
    }

    /// Parse a keyword spelling.
    pub fn from_keyword(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared result of a member.
///
/// Only participates in declaration identity when a catalog runs in
/// bytecode overload mode, where members may differ by return kind alone.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub enum ReturnKind {
    #[default]
    Void,
    Value(ParamKind),
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnKind::Void => f.write_str("void"),
            ReturnKind::Value(kind) => kind.fmt(f),
        }
    }
}
