#[allow(clippy::module_inception)]
mod object;

mod kind;

pub mod commit;
pub mod tree;

pub use kind::ObjectKind;
pub use object::{Encoded, Object, encode};

pub const SPACE_BYTE: u8 = b' ';
pub const NULL_BYTE: u8 = b'\0';
