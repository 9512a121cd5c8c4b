//! UnixFS-v1 block encoding.
//!
//! - [`Encoder`] - Stateless encoding engine parameterized by config, block
//!   factory, and link-block callback

mod unixfs;

pub use unixfs::{EMPTY_FILE_BLOCK, Encoder, NodeOrigin};
