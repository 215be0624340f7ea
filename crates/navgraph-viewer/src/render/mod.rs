pub mod camera;
pub mod decor;
pub mod spatial;

pub use camera::setup_scene;
pub use decor::{animate_decor, spawn_decor};
pub use spatial::{draw_graph_edges, hover_detection, pose_graph, sync_graph};
