//! Simulation core for the navgraph backdrop.
//!
//! Everything here is renderer-agnostic: a node field, a synthetic neighbour
//! graph, a phase scheduler and a greedy path walk, driven one frame at a
//! time from an external animation clock.

pub mod backdrop;
pub mod beat;
pub mod decor;
pub mod field;
pub mod graph;
pub mod log;
pub mod path;
pub mod schedule;
pub mod search;

pub use backdrop::{Backdrop, BackdropParams};
pub use beat::{Beat, ScheduledTask};
pub use field::{FieldParams, Node, NodeField};
pub use graph::NeighborGraph;
pub use log::LifecycleLog;
pub use path::greedy_path;
pub use schedule::{Phase, PhasePoint, PhaseTable, Scheduler, Transition};
pub use search::{FrameView, NodeStyle, SearchState};
