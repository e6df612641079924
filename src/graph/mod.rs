//! 图核心模块
//!
//! 定义顶点、边和图的核心数据结构

mod edge;
mod graph;
pub(crate) mod scratch;
mod shared;
mod vertex;
mod view;

pub use edge::{Edge, EdgeId, EdgeRef};
pub use graph::{Graph, MergeMap};
pub use shared::SharedGraph;
pub use vertex::{Vertex, VertexId};
pub use view::GraphView;
