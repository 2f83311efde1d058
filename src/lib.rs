//! Tile world viewer (workspace facade crate).
//!
//! Re-exports the member crates under `tile_world::{types,assets,core,input,term}`
//! and adds scene configuration for the binary.

pub mod config;

pub use tile_world_assets as assets;
pub use tile_world_core as core;
pub use tile_world_input as input;
pub use tile_world_term as term;
pub use tile_world_types as types;
