//! 边定义
//!
//! 边连接两个顶点，可为有向或无向；允许自环与多重边

use crate::graph::vertex::VertexId;
use std::fmt;

/// 边 ID（图内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// 边
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge<E> {
    /// 边 ID
    id: EdgeId,
    /// 第一个端点
    vertex1: VertexId,
    /// 第二个端点
    vertex2: VertexId,
    /// 有向边只能从 vertex1 走向 vertex2
    directed: bool,
    /// 通行代价
    weight: f64,
    /// 负载
    payload: E,
}

impl<E> Edge<E> {
    /// 创建无向边，权重默认为 1
    pub fn new(id: EdgeId, vertex1: VertexId, vertex2: VertexId, payload: E) -> Self {
        Self {
            id,
            vertex1,
            vertex2,
            directed: false,
            weight: 1.0,
            payload,
        }
    }

    /// 创建有向边 vertex1 -> vertex2
    pub fn new_directed(id: EdgeId, vertex1: VertexId, vertex2: VertexId, payload: E) -> Self {
        Self::new(id, vertex1, vertex2, payload).with_directed(true)
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn vertex1(&self) -> VertexId {
        self.vertex1
    }

    pub fn vertex2(&self) -> VertexId {
        self.vertex2
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_self_loop(&self) -> bool {
        self.vertex1 == self.vertex2
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut E {
        &mut self.payload
    }

    /// 取出负载，消耗边
    pub fn into_payload(self) -> E {
        self.payload
    }

    /// 不含负载的快照
    pub fn snapshot(&self) -> EdgeRef {
        EdgeRef {
            id: self.id,
            vertex1: self.vertex1,
            vertex2: self.vertex2,
            directed: self.directed,
            weight: self.weight,
        }
    }

    /// 以新 ID 和端点重建边，保留方向、权重与负载（用于合并）
    pub(crate) fn reassigned(self, id: EdgeId, vertex1: VertexId, vertex2: VertexId) -> Self {
        Self {
            id,
            vertex1,
            vertex2,
            directed: self.directed,
            weight: self.weight,
            payload: self.payload,
        }
    }
}

/// 边的结构快照：ID、端点、方向与权重
///
/// 算法结果只持有快照，不回引原图。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRef {
    pub id: EdgeId,
    pub vertex1: VertexId,
    pub vertex2: VertexId,
    pub directed: bool,
    pub weight: f64,
}

impl EdgeRef {
    /// 是否以 vertex 为端点
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.vertex1 == vertex || self.vertex2 == vertex
    }

    /// 忽略方向时，从 vertex 出发到达的另一端
    pub fn opposite(&self, vertex: VertexId) -> Option<VertexId> {
        if self.vertex1 == vertex {
            Some(self.vertex2)
        } else if self.vertex2 == vertex {
            Some(self.vertex1)
        } else {
            None
        }
    }

    /// 按方向规则从 vertex 出发能到达的顶点
    pub fn traverse_from(&self, vertex: VertexId) -> Option<VertexId> {
        if self.directed {
            (self.vertex1 == vertex).then_some(self.vertex2)
        } else {
            self.opposite(vertex)
        }
    }
}
