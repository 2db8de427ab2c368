//! Code generation commands

pub mod keys;
pub mod types;
