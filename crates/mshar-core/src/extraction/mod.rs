//! Unpacking archives in-process, without running the script.

pub mod unpack;

pub use unpack::unpack_members;
