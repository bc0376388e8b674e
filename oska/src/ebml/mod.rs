//! EBML primitives
//!
//! Matroska is framed with EBML ([RFC 8794]): every element is an ID, a size, and a
//! payload, with IDs and sizes encoded as variable-length integers. This module holds
//! the integer codec and the element-level reader the rest of the crate is built on.
//!
//! [RFC 8794]: https://www.rfc-editor.org/rfc/rfc8794.html

pub(crate) mod element_id;
pub(crate) mod element_reader;
pub(crate) mod vint;

pub use vint::{ElementId, VInt};
