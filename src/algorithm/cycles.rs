//! 有向环检测
//!
//! 三色 DFS：White 未访问，Gray 在当前搜索路径上，Black 已完成。
//! 遇到指向 Gray 顶点的边即存在环。

use super::{require_directed, DfsFrame};
use crate::error::Result;
use crate::graph::scratch::VertexScratch;
use crate::graph::{GraphView, VertexId};
use crate::metrics::{global_metrics, AlgorithmKind};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// 有向图是否含环（自环也算）
///
/// 图中存在无向边时返回 `InvalidInput`。
pub fn has_cycles<G: GraphView + ?Sized>(graph: &G) -> Result<bool> {
    global_metrics().observe(AlgorithmKind::CycleDetection, || {
        Ok(search(graph)?.is_some())
    })
}

/// 找出一个环作为证据，形如 `[v0, v1, ..., v0]`
///
/// 根按 ID 升序尝试，结果确定。无环时返回 `None`。
pub fn find_cycle<G: GraphView + ?Sized>(graph: &G) -> Result<Option<Vec<VertexId>>> {
    global_metrics().observe(AlgorithmKind::CycleDetection, || search(graph))
}

fn search<G: GraphView + ?Sized>(graph: &G) -> Result<Option<Vec<VertexId>>> {
    require_directed(graph, "环检测")?;

    let mut colors = VertexScratch::for_graph(graph, Color::White);
    for root in colors.ids().to_vec() {
        if colors[root] != Color::White {
            continue;
        }
        if let Some(cycle) = visit(graph, root, &mut colors) {
            debug!(root = %root, length = cycle.len() - 1, "cycle found");
            return Ok(Some(cycle));
        }
    }
    Ok(None)
}

fn visit<G: GraphView + ?Sized>(
    graph: &G,
    root: VertexId,
    colors: &mut VertexScratch<Color>,
) -> Option<Vec<VertexId>> {
    colors[root] = Color::Gray;
    let mut stack = vec![DfsFrame::directed(graph, root)];

    while let Some(frame) = stack.last_mut() {
        let vertex = frame.vertex;
        match frame.next_successor() {
            Some(next) => match colors[next] {
                Color::White => {
                    colors[next] = Color::Gray;
                    stack.push(DfsFrame::directed(graph, next));
                }
                Color::Gray => {
                    // 栈上从 next 到当前顶点即为环
                    let start = stack.iter().position(|f| f.vertex == next)?;
                    let mut cycle: Vec<VertexId> = stack[start..].iter().map(|f| f.vertex).collect();
                    cycle.push(next);
                    return Some(cycle);
                }
                Color::Black => {}
            },
            None => {
                colors[vertex] = Color::Black;
                stack.pop();
            }
        }
    }
    None
}
