//! Beeswarm layout for categorical plots.
//!
//! Places every record on its category's axis position so that no two markers
//! of the same group overlap, moving points sideways only as far as needed.
//! Values are never changed. The library computes coordinates only; drawing is
//! left to the caller.

pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod output;
pub mod render;
mod wasm;

pub use error::{PlacementExhausted, Result, SwarmError};
pub use geometry::{Orientation, Point};
pub use input::DataPoint;
pub use layout::swarm::{build_swarm, swarm_offsets};
pub use layout::{GroupKey, GroupSummary, LayoutConfig, PlacedPoint, SwarmLayout, layout_swarm};
pub use wasm::swarm_layout;
