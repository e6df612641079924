//! 图算法模块
//!
//! 无状态算法函数：邻接矩阵、Dijkstra 最短路、连通子图提取、
//! 诱导子图、强连通分量与环检测。算法只借用图，不修改输入。

mod adjacency;
mod components;
mod cycles;
mod path;
mod scc;
mod shortest_path;
mod subgraph;

pub use adjacency::{adjacency_matrix, AdjacencyMatrix};
pub use components::{connected_components, connected_subgraph, connected_vertex_ids};
pub use cycles::{find_cycle, has_cycles};
pub use path::GraphPath;
pub use scc::strongly_connected_components;
pub use shortest_path::{shortest_paths, ShortestPathLookup};
pub use subgraph::subgraph;

use crate::error::{Error, Result};
use crate::graph::{GraphView, VertexId};

/// 要求图中全部边为有向边
fn require_directed<G: GraphView + ?Sized>(graph: &G, algorithm: &str) -> Result<()> {
    if let Some(edge) = graph.first_undirected_edge() {
        return Err(Error::InvalidInput(format!(
            "{} 要求全部为有向边，边 {} 是无向边",
            algorithm, edge.id
        )));
    }
    Ok(())
}

/// 迭代式 DFS 的栈帧：当前顶点及其后继列表
struct DfsFrame {
    vertex: VertexId,
    successors: Vec<VertexId>,
    next: usize,
}

impl DfsFrame {
    /// 按方向规则收集后继
    fn directed<G: GraphView + ?Sized>(graph: &G, vertex: VertexId) -> Self {
        let successors = graph
            .incident_edge_refs(vertex)
            .iter()
            .filter_map(|e| e.traverse_from(vertex))
            .collect();
        Self {
            vertex,
            successors,
            next: 0,
        }
    }

    /// 忽略方向收集邻居
    fn undirected<G: GraphView + ?Sized>(graph: &G, vertex: VertexId) -> Self {
        let successors = graph
            .incident_edge_refs(vertex)
            .iter()
            .filter_map(|e| e.opposite(vertex))
            .collect();
        Self {
            vertex,
            successors,
            next: 0,
        }
    }

    /// 取下一个未处理的后继
    fn next_successor(&mut self) -> Option<VertexId> {
        let next = self.successors.get(self.next).copied();
        if next.is_some() {
            self.next += 1;
        }
        next
    }
}
