mod component;
pub mod layout;
mod render;
mod state;

pub use component::NebulaCanvas;
pub use layout::{LinkKind, NebulaLayout, NebulaLink, NebulaNode, build_layout, relevance_for_rank};
pub use state::{GraphPhase, NebulaState};
