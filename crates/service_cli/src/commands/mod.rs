//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod custom;
pub mod gaussian;
pub mod mutation;
pub mod uniform;
pub mod weighted;
