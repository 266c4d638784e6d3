//! Notes system: flat text notes confined to a single sandbox directory.
//!
//! Every operation validates the filename through [`sanitize`] before it
//! touches the filesystem. The agent reaches the store only through the
//! note tools in `crate::tools`.

pub mod error;
pub mod file_ops;
pub mod sanitize;
pub mod store;

pub use error::NoteError;
pub use store::NoteStore;
