//! Frame composition and sequence assembly.

pub mod composite;
pub mod frame;
pub mod sequence;
