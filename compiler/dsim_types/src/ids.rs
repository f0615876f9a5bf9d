//! Arena handles for types and members.
//!
//! Types live in a `TypeGraph` and members in a `MemberCatalog`; both are
//! append-only arenas, so a handle is just the 32-bit position of its
//! record. Handles are `Copy`, compare in O(1), and order by registration.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $display:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw arena position.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw arena position.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub(crate) const fn index(self) -> usize {
                self.0 as usize
            }

            /// Handle for the next record of an arena holding `len` records.
            #[expect(
                clippy::cast_possible_truncation,
                reason = "catalogs are far below u32::MAX records"
            )]
            pub(crate) fn next(len: usize) -> Self {
                Self(len as u32)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($display, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Handle to a type registered in a `TypeGraph`.
    TypeId,
    "type"
);

arena_id!(
    /// Handle to a member registered in a `MemberCatalog`.
    MemberId,
    "member"
);

const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
const _: () = assert!(std::mem::size_of::<MemberId>() == 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_registration() {
        assert!(TypeId::from_raw(1) < TypeId::from_raw(2));
        assert_eq!(MemberId::next(7), MemberId::from_raw(7));
    }

    #[test]
    fn ids_render_with_their_arena() {
        assert_eq!(format!("{:?}", TypeId::from_raw(3)), "TypeId(3)");
        assert_eq!(TypeId::from_raw(3).to_string(), "type#3");
        assert_eq!(MemberId::from_raw(0).to_string(), "member#0");
    }
}
