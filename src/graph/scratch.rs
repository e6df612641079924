//! 算法临时状态表
//!
//! 遍历算法的着色、访问标记、Tarjan 序号等临时状态不写在顶点上，
//! 而是存放在这里：按顶点 ID 索引，由单次算法调用创建并在返回时丢弃。

use super::vertex::VertexId;
use super::view::GraphView;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

pub(crate) struct VertexScratch<T> {
    positions: HashMap<VertexId, usize>,
    ids: Vec<VertexId>,
    slots: Vec<T>,
}

impl<T: Clone> VertexScratch<T> {
    /// 为图中每个顶点分配一个初始值槽位
    pub(crate) fn for_graph<G: GraphView + ?Sized>(graph: &G, init: T) -> Self {
        let ids = graph.vertex_ids();
        let positions = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let slots = vec![init; ids.len()];
        Self {
            positions,
            ids,
            slots,
        }
    }
}

impl<T> VertexScratch<T> {
    /// 顶点 ID，升序（与图的顶点顺序一致）
    pub(crate) fn ids(&self) -> &[VertexId] {
        &self.ids
    }
}

impl<T> Index<VertexId> for VertexScratch<T> {
    type Output = T;

    fn index(&self, id: VertexId) -> &T {
        &self.slots[self.positions[&id]]
    }
}

impl<T> IndexMut<VertexId> for VertexScratch<T> {
    fn index_mut(&mut self, id: VertexId) -> &mut T {
        let i = self.positions[&id];
        &mut self.slots[i]
    }
}
