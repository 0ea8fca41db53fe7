//! Re-exports the flowcrit member crates under one roof.
pub use flowcrit_core as crit;
pub use flowcrit_io as io;

#[allow(missing_docs)]
pub mod prelude {
    #[doc(hidden)]
    pub use flowcrit_core::prelude::*;
    #[doc(hidden)]
    pub use flowcrit_io::prelude::*;
}
