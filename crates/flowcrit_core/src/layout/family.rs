//! # Header layout
//!
//! The header layout is the fixed set of header fields a matching engine sees, each owning a
//! bit range of one ternary string. Fields are selected at compile time by cargo features
//! (`tag`, `sport`, `dport`, `sip`, `dip`, `proto`, `tos`, `ethtype`) and laid out from bit 0
//! upward in that order by `build.rs`.
//!
//! ## Example
//! ```
//! use flowcrit_core::layout::family::{HeaderLayout, LayoutDecl};
//!
//! if let Some(sport) = HeaderLayout.get_field_declaration("sport") {
//!     assert_eq!(sport.width(), 16);
//! }
//! assert!(HeaderLayout.get_field_declaration("ttl").is_none());
//! ```

/// Describes a field in the header layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: &'static str,
    pub from: usize,
    pub to: usize,
}

impl FieldDeclaration {
    #[inline]
    pub fn width(&self) -> usize {
        self.to - self.from
    }
}

pub trait LayoutDecl {
    fn get_field_declaration(&self, name: &str) -> Option<FieldDeclaration>;

    fn field_declarations(&self) -> Vec<FieldDeclaration>;
}

pub struct HeaderLayout;

pub mod constant {
    use super::{FieldDeclaration, HeaderLayout, LayoutDecl};
    use bitvec::order::Lsb0;

    include!(concat!(env!("OUT_DIR"), "/codegen.rs"));

    pub const GLOBAL_LAYOUT: HeaderLayout = HeaderLayout;

    pub type HeaderBitOrder = Lsb0;
    pub type HeaderBitStore = u8;

    pub const HEADERSTORENUM: usize = MAX_POS / HeaderBitStore::BITS as usize;

    impl LayoutDecl for HeaderLayout {
        fn get_field_declaration(&self, name: &str) -> Option<FieldDeclaration> {
            FIELD_MAP
                .get_entry(name)
                .map(|(field_name, (from, to))| FieldDeclaration {
                    name: field_name,
                    from: *from,
                    to: *to,
                })
        }

        fn field_declarations(&self) -> Vec<FieldDeclaration> {
            FIELD_MAP
                .entries()
                .map(|(field_name, (from, to))| FieldDeclaration {
                    name: field_name,
                    from: *from,
                    to: *to,
                })
                .collect()
        }
    }
}
