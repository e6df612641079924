//! 连通分量
//!
//! 可达性忽略边方向：从起点沿所有关联边做深度优先遍历。

use super::subgraph::induced_subgraph;
use super::DfsFrame;
use crate::error::{Error, Result};
use crate::graph::scratch::VertexScratch;
use crate::graph::{Graph, GraphView, VertexId};
use crate::metrics::{global_metrics, AlgorithmKind};
use tracing::debug;

/// 从 start 出发（忽略方向）可达的顶点，按首次访问顺序
pub fn connected_vertex_ids<G: GraphView + ?Sized>(graph: &G, start: VertexId) -> Result<Vec<VertexId>> {
    if !graph.contains_vertex(start) {
        return Err(Error::MissingVertex(format!("起点 {} 不存在", start)));
    }
    let mut visited = VertexScratch::for_graph(graph, false);
    Ok(explore(graph, start, &mut visited))
}

/// 提取 start 所在连通分量的诱导子图，保留原有 ID
pub fn connected_subgraph<V: Clone, E: Clone>(graph: &Graph<V, E>, start: VertexId) -> Result<Graph<V, E>> {
    global_metrics().observe(AlgorithmKind::ConnectedComponents, || {
        let ids = connected_vertex_ids(graph, start)?;
        debug!(start = %start, size = ids.len(), "connected component extracted");
        induced_subgraph(graph, ids)
    })
}

/// 将全部顶点划分为（弱）连通分量
///
/// 分量内按 ID 升序，分量之间按最小 ID 升序。
pub fn connected_components<G: GraphView + ?Sized>(graph: &G) -> Vec<Vec<VertexId>> {
    let metrics = global_metrics();
    let timer = metrics.start_algorithm(AlgorithmKind::ConnectedComponents);

    let mut visited = VertexScratch::for_graph(graph, false);
    let mut components = Vec::new();
    for root in visited.ids().to_vec() {
        if visited[root] {
            continue;
        }
        let mut component = explore(graph, root, &mut visited);
        component.sort_unstable();
        components.push(component);
    }

    debug!(count = components.len(), "connected components computed");
    metrics.finish_algorithm(timer, true);
    components
}

/// 迭代式 DFS，标记并返回本次访问到的顶点
fn explore<G: GraphView + ?Sized>(
    graph: &G,
    start: VertexId,
    visited: &mut VertexScratch<bool>,
) -> Vec<VertexId> {
    let mut order = vec![start];
    visited[start] = true;
    let mut stack = vec![DfsFrame::undirected(graph, start)];

    while let Some(frame) = stack.last_mut() {
        match frame.next_successor() {
            Some(next) => {
                if !visited[next] {
                    visited[next] = true;
                    order.push(next);
                    stack.push(DfsFrame::undirected(graph, next));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    order
}
