//! 图数据结构
//!
//! 图独占其中的全部顶点与边，负责 ID 分配并维护引用完整性：
//! - 每条边的两个端点都存在于图中
//! - 顶点的关联边列表恰好等于图中以它为端点的边集合

use super::edge::{Edge, EdgeId, EdgeRef};
use super::vertex::{Vertex, VertexId};
use super::view::GraphView;
use crate::error::{Error, Result};
use crate::metrics::global_metrics;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// 合并结果：被合并图中旧 ID 到新 ID 的映射
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeMap {
    pub vertices: IndexMap<VertexId, VertexId>,
    pub edges: IndexMap<EdgeId, EdgeId>,
}

impl MergeMap {
    /// 翻译顶点 ID
    pub fn vertex(&self, old: VertexId) -> Option<VertexId> {
        self.vertices.get(&old).copied()
    }

    /// 翻译边 ID
    pub fn edge(&self, old: EdgeId) -> Option<EdgeId> {
        self.edges.get(&old).copied()
    }
}

/// 图
///
/// `V` 为顶点负载，`E` 为边负载，图不检查负载内容。
/// 顶点和边按 ID 有序存放，所有按序遍历都是确定的。
#[derive(Debug, Clone)]
pub struct Graph<V = (), E = ()> {
    /// 顶点表
    vertices: BTreeMap<VertexId, Vertex<V>>,
    /// 边表
    edges: BTreeMap<EdgeId, Edge<E>>,
    /// 下一个未使用的顶点 ID（始终大于已有最大 ID）
    next_vertex_id: u64,
    /// 下一个未使用的边 ID
    next_edge_id: u128,
}

impl<V, E> Graph<V, E> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            vertices: BTreeMap::new(),
            edges: BTreeMap::new(),
            next_vertex_id: 0,
            next_edge_id: 0,
        }
    }

    /// 由外部提供的顶点和边构建图
    ///
    /// 逐个校验并插入；ID 计数器在构建完成时即为已有最大 ID + 1。
    pub fn from_parts<IV, IE>(vertices: IV, edges: IE) -> Result<Self>
    where
        IV: IntoIterator<Item = Vertex<V>>,
        IE: IntoIterator<Item = Edge<E>>,
    {
        let mut graph = Self::new();
        graph.add_vertices(vertices)?;
        graph.add_edges(edges)?;
        Ok(graph)
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    pub fn add_vertex(&mut self, mut vertex: Vertex<V>) -> Result<()> {
        let id = vertex.id();
        if self.vertices.contains_key(&id) {
            return Err(Error::DuplicateId(format!("顶点 {}", id)));
        }

        // 新加入的顶点在本图中还没有任何边
        vertex.clear_edges();
        self.next_vertex_id = self.next_vertex_id.max(u64::from(id.0) + 1);
        self.vertices.insert(id, vertex);

        trace!(vertex = %id, "vertex added");
        global_metrics().record_vertex_insert();
        Ok(())
    }

    /// 依次添加多个顶点；中途失败不回滚已添加的顶点
    pub fn add_vertices<I>(&mut self, vertices: I) -> Result<()>
    where
        I: IntoIterator<Item = Vertex<V>>,
    {
        for vertex in vertices {
            self.add_vertex(vertex)?;
        }
        Ok(())
    }

    /// 分配 ID 并添加顶点
    pub fn create_vertex(&mut self, payload: V) -> Result<VertexId> {
        let id = self.new_vertex_id()?;
        self.add_vertex(Vertex::new(id, payload))?;
        Ok(id)
    }

    /// 删除顶点及其全部关联边，返回顶点是否存在
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        self.take_vertex(id).is_some()
    }

    /// 删除顶点并交还所有权：顶点本身与被级联删除的边
    pub fn take_vertex(&mut self, id: VertexId) -> Option<(Vertex<V>, Vec<Edge<E>>)> {
        let incident: Vec<EdgeId> = self.vertices.get(&id)?.edge_ids().to_vec();
        let removed: Vec<Edge<E>> = incident
            .into_iter()
            .filter_map(|edge_id| self.take_edge(edge_id))
            .collect();
        let vertex = self.vertices.remove(&id)?;

        trace!(vertex = %id, cascaded = removed.len(), "vertex removed");
        global_metrics().record_vertex_remove();
        Some((vertex, removed))
    }

    /// 分配一个未使用的顶点 ID
    pub fn new_vertex_id(&mut self) -> Result<VertexId> {
        let id = u32::try_from(self.next_vertex_id)
            .map_err(|_| Error::IdSpaceExhausted("顶点 ID 已达 u32 上限".to_string()))?;
        self.next_vertex_id += 1;
        Ok(VertexId::new(id))
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<V>> {
        self.vertices.get(&id)
    }

    /// 获取可变顶点（只能修改权重与负载）
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex<V>> {
        self.vertices.get_mut(&id)
    }

    /// 全部顶点，按 ID 升序
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V>> {
        self.vertices.values()
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 边 ID 追加到每个不同端点的关联边列表中，自环只追加一次。
    pub fn add_edge(&mut self, edge: Edge<E>) -> Result<()> {
        let id = edge.id();
        if self.edges.contains_key(&id) {
            return Err(Error::DuplicateId(format!("边 {}", id)));
        }
        for endpoint in [edge.vertex1(), edge.vertex2()] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(Error::MissingVertex(format!(
                    "边 {} 的端点 {} 不存在",
                    id, endpoint
                )));
            }
        }

        for endpoint in [edge.vertex1(), edge.vertex2()] {
            if let Some(vertex) = self.vertices.get_mut(&endpoint) {
                vertex.attach_edge(id);
            }
        }
        self.next_edge_id = self.next_edge_id.max(u128::from(id.0) + 1);

        trace!(edge = %id, v1 = %edge.vertex1(), v2 = %edge.vertex2(), "edge added");
        self.edges.insert(id, edge);
        global_metrics().record_edge_insert();
        Ok(())
    }

    /// 依次添加多条边
    pub fn add_edges<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = Edge<E>>,
    {
        for edge in edges {
            self.add_edge(edge)?;
        }
        Ok(())
    }

    /// 删除边，返回边是否存在
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        self.take_edge(id).is_some()
    }

    /// 删除边并交还所有权
    pub fn take_edge(&mut self, id: EdgeId) -> Option<Edge<E>> {
        let edge = self.edges.remove(&id)?;
        for endpoint in [edge.vertex1(), edge.vertex2()] {
            if let Some(vertex) = self.vertices.get_mut(&endpoint) {
                vertex.detach_edge(id);
            }
        }

        trace!(edge = %id, "edge removed");
        global_metrics().record_edge_remove();
        Some(edge)
    }

    /// 分配一个未使用的边 ID
    pub fn new_edge_id(&mut self) -> Result<EdgeId> {
        let id = u64::try_from(self.next_edge_id)
            .map_err(|_| Error::IdSpaceExhausted("边 ID 已达 u64 上限".to_string()))?;
        self.next_edge_id += 1;
        Ok(EdgeId::new(id))
    }

    /// 用新 ID 连接两个顶点：无向、权重 1、默认负载
    pub fn connect_vertices(&mut self, v1: VertexId, v2: VertexId) -> Result<&Edge<E>>
    where
        E: Default,
    {
        self.connect_vertices_with(v1, v2, E::default(), false, 1.0)
    }

    /// 用新 ID 连接两个顶点，指定负载、方向与权重
    pub fn connect_vertices_with(
        &mut self,
        v1: VertexId,
        v2: VertexId,
        payload: E,
        directed: bool,
        weight: f64,
    ) -> Result<&Edge<E>> {
        // 先校验端点，失败时不消耗 ID
        for endpoint in [v1, v2] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(Error::MissingVertex(format!("顶点 {} 不存在", endpoint)));
            }
        }

        let id = self.new_edge_id()?;
        let edge = Edge::new(id, v1, v2, payload)
            .with_directed(directed)
            .with_weight(weight);
        self.add_edge(edge)?;
        Ok(&self.edges[&id])
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<E>> {
        self.edges.get(&id)
    }

    /// 获取可变边（只能修改权重与负载）
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge<E>> {
        self.edges.get_mut(&id)
    }

    /// 全部边，按 ID 升序
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> {
        self.edges.values()
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ==================== 邻接查询 ====================

    /// 顶点的关联边
    pub fn incident_edges(&self, id: VertexId) -> impl Iterator<Item = &Edge<E>> {
        self.vertices
            .get(&id)
            .map(|v| v.edge_ids())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |edge_id| self.edges.get(edge_id))
    }

    /// 连接两个顶点的所有边（不论方向），按边 ID 升序
    pub fn edges_between(&self, a: VertexId, b: VertexId) -> Vec<&Edge<E>> {
        let mut found: Vec<&Edge<E>> = self
            .incident_edges(a)
            .filter(|e| e.snapshot().opposite(a) == Some(b))
            .collect();
        found.sort_by_key(|e| e.id());
        found
    }

    /// 邻居顶点（忽略方向），按 ID 升序且去重
    pub fn neighbors(&self, id: VertexId) -> Vec<VertexId> {
        let mut result: Vec<VertexId> = self
            .incident_edges(id)
            .filter_map(|e| e.snapshot().opposite(id))
            .collect();
        result.sort_unstable();
        result.dedup();
        result
    }

    // ==================== 合并 ====================

    /// 将另一张图并入本图
    ///
    /// 被合并图中的每个顶点和边都在本图中获得新 ID，负载、权重和方向原样保留。
    /// 返回旧 ID 到新 ID 的完整映射，供调用方翻译外部引用。
    pub fn merge(&mut self, other: Graph<V, E>) -> Result<MergeMap> {
        let Graph {
            vertices, edges, ..
        } = other;
        let mut map = MergeMap {
            vertices: IndexMap::with_capacity(vertices.len()),
            edges: IndexMap::with_capacity(edges.len()),
        };

        for (old_id, vertex) in vertices {
            let new_id = self.new_vertex_id()?;
            self.add_vertex(vertex.reassigned(new_id))?;
            map.vertices.insert(old_id, new_id);
        }

        for (old_id, edge) in edges {
            let translate = |v: VertexId| {
                map.vertex(v)
                    .ok_or_else(|| Error::MissingVertex(format!("合并时端点 {} 不存在", v)))
            };
            let v1 = translate(edge.vertex1())?;
            let v2 = translate(edge.vertex2())?;
            let new_id = self.new_edge_id()?;
            self.add_edge(edge.reassigned(new_id, v1, v2))?;
            map.edges.insert(old_id, new_id);
        }

        debug!(
            vertices = map.vertices.len(),
            edges = map.edges.len(),
            "graph merged"
        );
        global_metrics().record_merge();
        Ok(map)
    }

    /// 合并另一张图的副本，原图保持不变
    pub fn merge_cloned(&mut self, other: &Graph<V, E>) -> Result<MergeMap>
    where
        V: Clone,
        E: Clone,
    {
        self.merge(other.clone())
    }

    // ==================== 校验 ====================

    /// 检查引用完整性，返回第一处违规
    pub fn check_invariants(&self) -> Result<()> {
        for edge in self.edges.values() {
            for endpoint in [edge.vertex1(), edge.vertex2()] {
                let vertex = self.vertices.get(&endpoint).ok_or_else(|| {
                    Error::InvalidInput(format!("边 {} 引用了不存在的顶点 {}", edge.id(), endpoint))
                })?;
                if !vertex.edge_ids().contains(&edge.id()) {
                    return Err(Error::InvalidInput(format!(
                        "顶点 {} 的关联边中缺少 {}",
                        endpoint,
                        edge.id()
                    )));
                }
            }
            if u128::from(edge.id().0) >= self.next_edge_id {
                return Err(Error::InvalidInput(format!("边计数器落后于 {}", edge.id())));
            }
        }

        for vertex in self.vertices.values() {
            let mut seen = HashSet::new();
            for &edge_id in vertex.edge_ids() {
                if !seen.insert(edge_id) {
                    return Err(Error::InvalidInput(format!(
                        "顶点 {} 的关联边 {} 重复",
                        vertex.id(),
                        edge_id
                    )));
                }
                let touches = self
                    .edges
                    .get(&edge_id)
                    .is_some_and(|e| e.snapshot().touches(vertex.id()));
                if !touches {
                    return Err(Error::InvalidInput(format!(
                        "顶点 {} 列出了无关的边 {}",
                        vertex.id(),
                        edge_id
                    )));
                }
            }
            if u64::from(vertex.id().0) >= self.next_vertex_id {
                return Err(Error::InvalidInput(format!("顶点计数器落后于 {}", vertex.id())));
            }
        }

        Ok(())
    }
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> GraphView for Graph<V, E> {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.keys().copied().collect()
    }

    fn edge_ref(&self, id: EdgeId) -> Option<EdgeRef> {
        self.edges.get(&id).map(Edge::snapshot)
    }

    fn edge_refs(&self) -> Vec<EdgeRef> {
        self.edges.values().map(Edge::snapshot).collect()
    }

    fn incident_edge_ids(&self, vertex: VertexId) -> &[EdgeId] {
        self.vertices
            .get(&vertex)
            .map(|v| v.edge_ids())
            .unwrap_or(&[])
    }

    fn first_undirected_edge(&self) -> Option<EdgeRef> {
        self.edges
            .values()
            .find(|e| !e.is_directed())
            .map(Edge::snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn vid(id: u32) -> VertexId {
        VertexId::new(id)
    }

    fn eid(id: u64) -> EdgeId {
        EdgeId::new(id)
    }

    fn path_graph(n: u32) -> Graph {
        let mut graph = Graph::new();
        for i in 0..n {
            graph.add_vertex(Vertex::new(vid(i), ())).unwrap();
        }
        for i in 1..n {
            graph.connect_vertices(vid(i - 1), vid(i)).unwrap();
        }
        graph
    }

    #[test]
    fn test_graph_basic() {
        let graph = path_graph(3);

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(vid(1)), vec![vid(0), vid(2)]);
        assert_eq!(graph.vertex(vid(1)).unwrap().degree(), 2);
        graph.check_invariants().unwrap();
    }

    #[test]
    fn test_duplicate_vertex_rejected() {
        let mut graph: Graph<&str> = Graph::new();
        graph.add_vertex(Vertex::new(vid(1), "first")).unwrap();

        let err = graph.add_vertex(Vertex::new(vid(1), "second")).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(_)));
        assert_eq!(*graph.vertex(vid(1)).unwrap().payload(), "first");
    }

    #[test]
    fn test_add_vertices_keeps_prefix_on_failure() {
        let mut graph: Graph = Graph::new();
        let result = graph.add_vertices(vec![
            Vertex::new(vid(0), ()),
            Vertex::new(vid(1), ()),
            Vertex::new(vid(0), ()),
            Vertex::new(vid(2), ()),
        ]);

        assert!(matches!(result, Err(Error::DuplicateId(_))));
        assert_eq!(graph.vertex_count(), 2);
        assert!(!graph.contains_vertex(vid(2)));
    }

    #[test]
    fn test_edge_requires_endpoints() {
        let mut graph: Graph = Graph::new();
        graph.add_vertex(Vertex::new(vid(0), ())).unwrap();

        let err = graph
            .add_edge(Edge::new(eid(0), vid(0), vid(5), ()))
            .unwrap_err();
        assert!(matches!(err, Error::MissingVertex(_)));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.vertex(vid(0)).unwrap().edge_ids().is_empty());

        let err = graph.connect_vertices(vid(9), vid(0)).unwrap_err();
        assert!(matches!(err, Error::MissingVertex(_)));
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut graph = path_graph(2);
        let existing = graph.edges().next().unwrap().id();

        let err = graph
            .add_edge(Edge::new(existing, vid(0), vid(1), ()))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateId(_)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_listed_once() {
        let mut graph = path_graph(1);
        graph
            .add_edge(Edge::new_directed(eid(10), vid(0), vid(0), ()))
            .unwrap();

        assert_eq!(graph.vertex(vid(0)).unwrap().edge_ids(), &[eid(10)]);
        assert_eq!(graph.neighbors(vid(0)), vec![vid(0)]);
        graph.check_invariants().unwrap();

        assert!(graph.remove_edge(eid(10)));
        assert!(graph.vertex(vid(0)).unwrap().edge_ids().is_empty());
    }

    #[test]
    fn test_remove_vertex_cascades() {
        let mut graph = path_graph(3);
        graph
            .add_edge(Edge::new(eid(100), vid(0), vid(1), ()))
            .unwrap();

        assert!(graph.remove_vertex(vid(1)));
        assert!(!graph.remove_vertex(vid(1)));

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.vertex(vid(0)).unwrap().edge_ids().is_empty());
        assert!(graph.vertex(vid(2)).unwrap().edge_ids().is_empty());
        graph.check_invariants().unwrap();
    }

    #[test]
    fn test_take_vertex_returns_ownership() {
        let mut graph: Graph<String, String> = Graph::new();
        graph.add_vertex(Vertex::new(vid(0), "a".to_string())).unwrap();
        graph.add_vertex(Vertex::new(vid(1), "b".to_string())).unwrap();
        graph
            .connect_vertices_with(vid(0), vid(1), "ab".to_string(), true, 2.0)
            .unwrap();

        let (vertex, edges) = graph.take_vertex(vid(0)).unwrap();
        assert_eq!(vertex.into_payload(), "a");
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].payload(), "ab");
        assert!(graph.take_vertex(vid(0)).is_none());
    }

    #[test]
    fn test_remove_edge_detaches_both_endpoints() {
        let mut graph = path_graph(2);
        let id = graph.edges().next().unwrap().id();

        assert!(graph.remove_edge(id));
        assert!(!graph.remove_edge(id));
        assert!(graph.vertex(vid(0)).unwrap().edge_ids().is_empty());
        assert!(graph.vertex(vid(1)).unwrap().edge_ids().is_empty());
    }

    #[test]
    fn test_id_allocation_skips_external_ids() {
        let mut graph: Graph = Graph::from_parts(
            vec![Vertex::new(vid(3), ()), Vertex::new(vid(40), ())],
            vec![Edge::new(eid(17), vid(3), vid(40), ())],
        )
        .unwrap();

        assert_eq!(graph.new_vertex_id().unwrap(), vid(41));
        let id = graph.connect_vertices(vid(3), vid(40)).unwrap().id();
        assert_eq!(id, eid(18));
        assert_eq!(graph.edges_between(vid(40), vid(3)).len(), 2);
    }

    #[test]
    fn test_vertex_id_space_exhausted() {
        let mut graph: Graph = Graph::new();
        graph.add_vertex(Vertex::new(vid(u32::MAX), ())).unwrap();

        let err = graph.new_vertex_id().unwrap_err();
        assert!(matches!(err, Error::IdSpaceExhausted(_)));
    }

    #[test]
    fn test_edge_mut_reweights() {
        let mut graph = path_graph(2);
        let id = graph.edges().next().unwrap().id();

        graph.edge_mut(id).unwrap().set_weight(0.5);
        assert_eq!(graph.edge(id).unwrap().weight(), 0.5);
        assert_eq!(graph.edge_ref(id).unwrap().weight, 0.5);
    }

    #[test]
    fn test_merge() {
        let mut a = path_graph(3);
        let mut b: Graph = Graph::new();
        b.add_vertex(Vertex::new(vid(0), ())).unwrap();
        b.add_vertex(Vertex::new(vid(7), ())).unwrap();
        b.add_edge(Edge::new_directed(eid(0), vid(7), vid(0), ()).with_weight(3.0))
            .unwrap();
        b.add_edge(Edge::new(eid(5), vid(0), vid(0), ())).unwrap();

        let original = b.clone();
        let map = a.merge(b).unwrap();

        assert_eq!(a.vertex_count(), 5);
        assert_eq!(a.edge_count(), 4);
        assert_eq!(map.vertices.len(), 2);
        assert_eq!(map.edges.len(), 2);
        a.check_invariants().unwrap();

        for edge in original.edges() {
            let merged = a.edge(map.edge(edge.id()).unwrap()).unwrap();
            assert_eq!(merged.vertex1(), map.vertex(edge.vertex1()).unwrap());
            assert_eq!(merged.vertex2(), map.vertex(edge.vertex2()).unwrap());
            assert_eq!(merged.is_directed(), edge.is_directed());
            assert_eq!(merged.weight(), edge.weight());
        }

        // 新 ID 不与原有 ID 冲突
        for new_id in map.vertices.values() {
            assert!(new_id.as_u32() >= 3);
        }
    }

    #[test]
    fn test_merge_cloned_leaves_source() {
        let mut a = path_graph(2);
        let b = path_graph(2);

        a.merge_cloned(&b).unwrap();
        assert_eq!(a.vertex_count(), 4);
        assert_eq!(b.vertex_count(), 2);
    }

    #[test]
    fn test_add_edges_keeps_prefix_on_failure() {
        let mut graph: Graph = Graph::new();
        graph
            .add_vertices((0..3).map(|i| Vertex::new(vid(i), ())))
            .unwrap();

        let result = graph.add_edges(vec![
            Edge::new(eid(10), vid(0), vid(1), ()),
            Edge::new_directed(eid(11), vid(1), vid(2), ()),
            Edge::new(eid(12), vid(2), vid(7), ()),
            Edge::new(eid(13), vid(0), vid(2), ()),
        ]);

        assert!(matches!(result, Err(Error::MissingVertex(_))));
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(eid(10)));
        assert!(graph.contains_edge(eid(11)));
        assert!(!graph.contains_edge(eid(13)));
        assert_eq!(graph.vertex(vid(1)).unwrap().edge_ids(), &[eid(10), eid(11)]);
        graph.check_invariants().unwrap();
    }

    #[test]
    fn test_first_undirected_edge() {
        let mut graph: Graph = Graph::new();
        assert!(graph.first_undirected_edge().is_none());

        graph
            .add_vertices((0..3).map(|i| Vertex::new(vid(i), ())))
            .unwrap();
        graph
            .add_edge(Edge::new_directed(eid(0), vid(0), vid(1), ()))
            .unwrap();
        assert!(graph.first_undirected_edge().is_none());

        graph.add_edge(Edge::new(eid(5), vid(1), vid(2), ())).unwrap();
        graph.add_edge(Edge::new(eid(3), vid(2), vid(0), ())).unwrap();
        assert_eq!(graph.first_undirected_edge().map(|e| e.id), Some(eid(3)));
    }

    #[test]
    fn test_from_parts() {
        let vertices = || (0..3).map(|i| Vertex::new(vid(i), ()));

        let graph: Graph = Graph::from_parts(
            vertices(),
            vec![
                Edge::new(eid(4), vid(0), vid(1), ()),
                Edge::new_directed(eid(8), vid(1), vid(2), ()),
            ],
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 2);
        graph.check_invariants().unwrap();

        let result: Result<Graph> = Graph::from_parts(
            vertices(),
            vec![
                Edge::new(eid(4), vid(0), vid(1), ()),
                Edge::new(eid(5), vid(1), vid(3), ()),
            ],
        );
        assert!(matches!(result, Err(Error::MissingVertex(_))));
    }

    #[test]
    fn test_random_mutations_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut graph: Graph = Graph::new();

        for _ in 0..20 {
            graph.create_vertex(()).unwrap();
        }

        for round in 0..400 {
            let ids = graph.vertex_ids();
            match rng.gen_range(0..10) {
                0 => {
                    if !ids.is_empty() {
                        let victim = ids[rng.gen_range(0..ids.len())];
                        assert!(graph.remove_vertex(victim));
                        assert!(graph
                            .edges()
                            .all(|e| e.vertex1() != victim && e.vertex2() != victim));
                    }
                }
                1 => {
                    graph.create_vertex(()).unwrap();
                }
                2 => {
                    let edge_ids: Vec<EdgeId> = graph.edges().map(Edge::id).collect();
                    if !edge_ids.is_empty() {
                        let victim = edge_ids[rng.gen_range(0..edge_ids.len())];
                        assert!(graph.remove_edge(victim));
                    }
                }
                _ => {
                    if !ids.is_empty() {
                        let a = ids[rng.gen_range(0..ids.len())];
                        let b = ids[rng.gen_range(0..ids.len())];
                        let directed = rng.gen_bool(0.5);
                        graph
                            .connect_vertices_with(a, b, (), directed, rng.gen_range(0.0..5.0))
                            .unwrap();
                    }
                }
            }
            if let Err(e) = graph.check_invariants() {
                panic!("round {}: {}", round, e);
            }
        }
    }
}
