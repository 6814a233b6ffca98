//! Demoucron path relaxation: step history, optimal path and playback.
//!
//! Everything here is a pure function of the node and edge lists; nothing
//! touches the DOM or storage.

mod path;
mod playback;
mod rank;
mod relax;
mod types;

pub use path::{Solution, find_sink, find_source, walk};
pub use playback::{PlaybackState, StepView};
pub use rank::topological_ranks;
pub use relax::{Matrix, Predecessors, Relaxation, Step, compute_steps};
pub use types::{CellRef, Edge, Mode, Node, NodeId, PathEdge, format_value};
