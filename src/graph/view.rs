//! 只读图视图
//!
//! 不依赖负载类型的窄接口，只暴露基于 ID 的访问。
//! 不需要负载的算法（最短路、SCC、环检测、邻接矩阵）都面向此接口编写。

use super::edge::{EdgeId, EdgeRef};
use super::vertex::VertexId;

pub trait GraphView {
    /// 顶点数量
    fn vertex_count(&self) -> usize;

    /// 边数量
    fn edge_count(&self) -> usize;

    fn contains_vertex(&self, id: VertexId) -> bool;

    /// 全部顶点 ID，升序
    fn vertex_ids(&self) -> Vec<VertexId>;

    fn edge_ref(&self, id: EdgeId) -> Option<EdgeRef>;

    /// 全部边快照，按边 ID 升序
    fn edge_refs(&self) -> Vec<EdgeRef>;

    /// 顶点的关联边 ID；顶点不存在时为空
    fn incident_edge_ids(&self, vertex: VertexId) -> &[EdgeId];

    /// 顶点的关联边快照
    fn incident_edge_refs(&self, vertex: VertexId) -> Vec<EdgeRef> {
        self.incident_edge_ids(vertex)
            .iter()
            .filter_map(|&id| self.edge_ref(id))
            .collect()
    }

    /// ID 最小的无向边；全部为有向边（或无边）时为 None
    fn first_undirected_edge(&self) -> Option<EdgeRef> {
        self.edge_refs().into_iter().find(|e| !e.directed)
    }
}
