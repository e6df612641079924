//! 诱导子图
//!
//! 给定顶点集合，取这些顶点以及两端都在集合内的全部边，保留原有 ID。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::metrics::{global_metrics, AlgorithmKind};
use std::collections::BTreeSet;

/// 按顶点集合提取诱导子图；集合中的 ID 必须都存在
pub fn subgraph<V, E, I>(graph: &Graph<V, E>, vertex_ids: I) -> Result<Graph<V, E>>
where
    V: Clone,
    E: Clone,
    I: IntoIterator<Item = VertexId>,
{
    global_metrics().observe(AlgorithmKind::Subgraph, || {
        induced_subgraph(graph, vertex_ids)
    })
}

pub(super) fn induced_subgraph<V, E, I>(graph: &Graph<V, E>, vertex_ids: I) -> Result<Graph<V, E>>
where
    V: Clone,
    E: Clone,
    I: IntoIterator<Item = VertexId>,
{
    let keep: BTreeSet<VertexId> = vertex_ids.into_iter().collect();

    let mut vertices = Vec::with_capacity(keep.len());
    for &id in &keep {
        let vertex = graph
            .vertex(id)
            .ok_or_else(|| Error::MissingVertex(format!("顶点 {} 不存在", id)))?;
        vertices.push(vertex.clone());
    }

    let edges = graph
        .edges()
        .filter(|e| keep.contains(&e.vertex1()) && keep.contains(&e.vertex2()))
        .cloned();

    Graph::from_parts(vertices, edges)
}
