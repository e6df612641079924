//! 图路径
//!
//! 从起点出发、按方向规则首尾相接的边序列，并缓存累计长度

use crate::error::{Error, Result};
use crate::graph::{EdgeId, EdgeRef, VertexId};

/// 路径结果
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphPath {
    /// 起点
    start_vertex: VertexId,
    /// 当前终点
    end_vertex: VertexId,
    /// 路径上的边序列
    edges: Vec<EdgeRef>,
    /// 边权之和
    path_length: f64,
}

impl GraphPath {
    /// 只含起点的空路径
    pub fn new(start: VertexId) -> Self {
        Self {
            start_vertex: start,
            end_vertex: start,
            edges: Vec::new(),
            path_length: 0.0,
        }
    }

    /// 由边序列构建路径，逐条校验连续性
    pub fn from_edges<I>(start: VertexId, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeRef>,
    {
        let mut path = Self::new(start);
        for edge in edges {
            path.push(edge)?;
        }
        Ok(path)
    }

    /// 追加一条边
    ///
    /// 边必须能从当前终点出发：无向边任一端在终点即可，有向边要求 vertex1 为终点。
    pub fn push(&mut self, edge: EdgeRef) -> Result<()> {
        let next = edge.traverse_from(self.end_vertex).ok_or_else(|| {
            Error::InvalidInput(format!(
                "边 {} 无法从 {} 继续路径",
                edge.id, self.end_vertex
            ))
        })?;
        self.end_vertex = next;
        self.path_length += edge.weight;
        self.edges.push(edge);
        Ok(())
    }

    pub fn start_vertex(&self) -> VertexId {
        self.start_vertex
    }

    pub fn end_vertex(&self) -> VertexId {
        self.end_vertex
    }

    pub fn edges(&self) -> &[EdgeRef] {
        &self.edges
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.iter().map(|e| e.id).collect()
    }

    /// 依次经过的顶点，含起点和终点
    pub fn vertices(&self) -> Vec<VertexId> {
        let mut vertices = Vec::with_capacity(self.edges.len() + 1);
        let mut current = self.start_vertex;
        vertices.push(current);
        for edge in &self.edges {
            // push 已保证可达
            if let Some(next) = edge.traverse_from(current) {
                current = next;
                vertices.push(current);
            }
        }
        vertices
    }

    /// 边数
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn path_length(&self) -> f64 {
        self.path_length
    }
}
