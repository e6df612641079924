//! 顶点定义
//!
//! 顶点携带 ID、权重与调用方提供的负载；关联边列表由所属图维护

use crate::graph::edge::EdgeId;
use smallvec::SmallVec;
use std::fmt;

/// 顶点 ID（图内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub u32);

impl VertexId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for VertexId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// 关联边列表，多数顶点度数很小
pub(crate) type EdgeIdList = SmallVec<[EdgeId; 4]>;

/// 顶点
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex<V> {
    /// 顶点 ID
    id: VertexId,
    /// 关联边（由图维护，不参与序列化）
    #[cfg_attr(feature = "serde", serde(skip))]
    edge_ids: EdgeIdList,
    /// 顶点权重，含义由算法决定
    weight: f64,
    /// 负载
    payload: V,
}

impl<V> Vertex<V> {
    /// 创建新顶点，权重默认为 1
    pub fn new(id: VertexId, payload: V) -> Self {
        Self {
            id,
            edge_ids: SmallVec::new(),
            weight: 1.0,
            payload,
        }
    }

    /// 设置权重
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取关联边 ID
    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edge_ids
    }

    /// 度数（自环只计一次）
    pub fn degree(&self) -> usize {
        self.edge_ids.len()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn payload(&self) -> &V {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut V {
        &mut self.payload
    }

    /// 取出负载，消耗顶点
    pub fn into_payload(self) -> V {
        self.payload
    }

    /// 以新 ID 重建顶点，保留权重与负载（用于合并）
    pub(crate) fn reassigned(self, id: VertexId) -> Self {
        Self {
            id,
            edge_ids: SmallVec::new(),
            weight: self.weight,
            payload: self.payload,
        }
    }

    pub(crate) fn attach_edge(&mut self, edge_id: EdgeId) {
        if !self.edge_ids.contains(&edge_id) {
            self.edge_ids.push(edge_id);
        }
    }

    pub(crate) fn detach_edge(&mut self, edge_id: EdgeId) {
        self.edge_ids.retain(|e| *e != edge_id);
    }

    pub(crate) fn clear_edges(&mut self) {
        self.edge_ids.clear();
    }
}
