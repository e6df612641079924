//! 强连通分量（Tarjan）
//!
//! 递归版 Tarjan 在长链上会栈溢出，这里用显式调用栈展开。

use super::{require_directed, DfsFrame};
use crate::error::Result;
use crate::graph::scratch::VertexScratch;
use crate::graph::{GraphView, VertexId};
use crate::metrics::{global_metrics, AlgorithmKind};
use tracing::debug;

#[derive(Debug, Clone, Default)]
struct TarjanSlot {
    /// DFS 访问序号，None 表示尚未访问
    index: Option<usize>,
    lowlink: usize,
    on_stack: bool,
}

struct Tarjan {
    slots: VertexScratch<TarjanSlot>,
    next_index: usize,
    stack: Vec<VertexId>,
    components: Vec<Vec<VertexId>>,
}

impl Tarjan {
    fn new<G: GraphView + ?Sized>(graph: &G) -> Self {
        Self {
            slots: VertexScratch::for_graph(graph, TarjanSlot::default()),
            next_index: 0,
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn enter(&mut self, vertex: VertexId) {
        let slot = &mut self.slots[vertex];
        slot.index = Some(self.next_index);
        slot.lowlink = self.next_index;
        slot.on_stack = true;
        self.next_index += 1;
        self.stack.push(vertex);
    }

    fn strong_connect<G: GraphView + ?Sized>(&mut self, graph: &G, root: VertexId) {
        self.enter(root);
        let mut call_stack = vec![DfsFrame::directed(graph, root)];

        while let Some(frame) = call_stack.last_mut() {
            let vertex = frame.vertex;
            match frame.next_successor() {
                Some(next) => match self.slots[next].index {
                    None => {
                        self.enter(next);
                        call_stack.push(DfsFrame::directed(graph, next));
                    }
                    Some(next_index) if self.slots[next].on_stack => {
                        let slot = &mut self.slots[vertex];
                        slot.lowlink = slot.lowlink.min(next_index);
                    }
                    Some(_) => {}
                },
                None => {
                    call_stack.pop();
                    let lowlink = self.slots[vertex].lowlink;
                    if let Some(parent) = call_stack.last() {
                        let slot = &mut self.slots[parent.vertex];
                        slot.lowlink = slot.lowlink.min(lowlink);
                    }
                    if self.slots[vertex].index == Some(lowlink) {
                        self.pop_component(vertex);
                    }
                }
            }
        }
    }

    fn pop_component(&mut self, root: VertexId) {
        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.slots[member].on_stack = false;
            component.push(member);
            if member == root {
                break;
            }
        }
        self.components.push(component);
    }
}

/// 计算有向图的强连通分量
///
/// 图中存在无向边时返回 `InvalidInput`。结果中每个分量按 ID 升序，
/// 分量之间按最小 ID 升序，孤立顶点和自环顶点各自成为单元素分量。
pub fn strongly_connected_components<G: GraphView + ?Sized>(graph: &G) -> Result<Vec<Vec<VertexId>>> {
    global_metrics().observe(AlgorithmKind::StronglyConnected, || {
        require_directed(graph, "强连通分量")?;

        let mut tarjan = Tarjan::new(graph);
        for root in tarjan.slots.ids().to_vec() {
            if tarjan.slots[root].index.is_none() {
                tarjan.strong_connect(graph, root);
            }
        }

        let mut components = tarjan.components;
        for component in &mut components {
            component.sort_unstable();
        }
        components.sort_unstable_by_key(|c| c[0]);

        debug!(count = components.len(), "strongly connected components computed");
        Ok(components)
    })
}
