//! 邻接矩阵
//!
//! 按无向图语义计数：每条边在 [i][j] 和 [j][i] 各加一，
//! 多重边累加，自环在对角线上加二。有向边同样按无向计数。

use crate::graph::{GraphView, VertexId};
use crate::metrics::{global_metrics, AlgorithmKind};
use tracing::debug;

/// 方阵，行列按顶点 ID 升序排列
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyMatrix {
    vertex_ids: Vec<VertexId>,
    cells: Vec<u32>,
}

impl AdjacencyMatrix {
    /// 阶数
    pub fn size(&self) -> usize {
        self.vertex_ids.len()
    }

    /// 行列对应的顶点 ID
    pub fn vertex_ids(&self) -> &[VertexId] {
        &self.vertex_ids
    }

    /// 顶点所在的行号
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.vertex_ids.binary_search(&id).ok()
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.size() + col]
    }

    /// 按顶点 ID 取值
    pub fn get_by_id(&self, a: VertexId, b: VertexId) -> Option<u32> {
        Some(self.get(self.index_of(a)?, self.index_of(b)?))
    }

    pub fn row(&self, row: usize) -> &[u32] {
        let n = self.size();
        &self.cells[row * n..(row + 1) * n]
    }

    /// 行和，即无向度数（自环计二）
    pub fn degree(&self, row: usize) -> u32 {
        self.row(row).iter().sum()
    }
}

/// 构建邻接矩阵
pub fn adjacency_matrix<G: GraphView + ?Sized>(graph: &G) -> AdjacencyMatrix {
    let metrics = global_metrics();
    let timer = metrics.start_algorithm(AlgorithmKind::AdjacencyMatrix);

    let vertex_ids = graph.vertex_ids();
    let n = vertex_ids.len();
    let mut matrix = AdjacencyMatrix {
        vertex_ids,
        cells: vec![0; n * n],
    };

    for edge in graph.edge_refs() {
        if let (Some(i), Some(j)) = (matrix.index_of(edge.vertex1), matrix.index_of(edge.vertex2)) {
            matrix.cells[i * n + j] += 1;
            matrix.cells[j * n + i] += 1;
        }
    }

    debug!(order = n, "adjacency matrix built");
    metrics.finish_algorithm(timer, true);
    matrix
}
