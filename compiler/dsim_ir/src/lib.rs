//! Vocabulary shared by the dsim crates.
//!
//! - [`Name`]: interned type and member names, produced by a
//!   [`StringInterner`] and read back through [`StringLookup`]
//! - [`ParamKind`] / [`ReturnKind`]: the closed set of parameter kinds and
//!   the widening order overload applicability is decided by
//!
//! Everything here is a small `Copy` value so graphs, catalogs and call
//! sites can hold them by value.

/// Fails the build if `$ty` is not `$size` bytes.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod param_kind;

pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use param_kind::{ParamKind, ReturnKind};

static_assert_size!(Name, 4);
static_assert_size!(ParamKind, 1);
static_assert_size!(ReturnKind, 1);
