//! 单源最短路径
//!
//! Dijkstra 算法。无向边双向可走，有向边只能从 vertex1 走向 vertex2。
//! 不可达的顶点不出现在距离表中（视为正无穷），非连通图不是错误。

use super::path::GraphPath;
use crate::error::{Error, Result};
use crate::graph::scratch::VertexScratch;
use crate::graph::{GraphView, VertexId};
use crate::metrics::{global_metrics, AlgorithmKind};
use priority_queue::PriorityQueue;
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;
use tracing::debug;

/// 可全序比较的距离
#[derive(Debug, Clone, Copy, PartialEq)]
struct Distance(f64);

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// 队列优先级：距离小者优先，距离相同时 ID 小者优先
type Priority = Reverse<(Distance, VertexId)>;

/// 最短路查询结果
///
/// 以固定源点为键：回溯表记录每个已到达顶点的前驱，距离表记录最短距离。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPathLookup {
    source: VertexId,
    backtrace: BTreeMap<VertexId, VertexId>,
    distances: BTreeMap<VertexId, f64>,
}

impl ShortestPathLookup {
    /// 源点
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// 最短距离；未到达时为 None
    pub fn distance(&self, target: VertexId) -> Option<f64> {
        self.distances.get(&target).copied()
    }

    /// 最短距离；未到达时为正无穷
    pub fn distance_to(&self, target: VertexId) -> f64 {
        self.distance(target).unwrap_or(f64::INFINITY)
    }

    /// 最短路上的前驱
    pub fn predecessor(&self, target: VertexId) -> Option<VertexId> {
        self.backtrace.get(&target).copied()
    }

    pub fn is_reachable(&self, target: VertexId) -> bool {
        self.distances.contains_key(&target)
    }

    /// 已到达的顶点（含源点），按 ID 升序
    pub fn reached_vertices(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.distances.iter().map(|(&v, &d)| (v, d))
    }

    /// 重建到目标的最短路径
    ///
    /// 沿回溯表从目标走回源点，每一跳在前驱与当前顶点之间的可走边中取权重最小者，
    /// 权重相同取边 ID 最小者（存在多重边时有意义），最后反转为源点到目标的顺序。
    pub fn path_to<G: GraphView + ?Sized>(&self, graph: &G, target: VertexId) -> Result<GraphPath> {
        if target == self.source {
            return Ok(GraphPath::new(self.source));
        }
        if !self.backtrace.contains_key(&target) {
            return Err(Error::NotReachable(format!(
                "{} 从 {} 不可达",
                target, self.source
            )));
        }

        let mut edges = Vec::new();
        let mut current = target;
        while current != self.source {
            let previous = self.predecessor(current).ok_or_else(|| {
                Error::NotReachable(format!("{} 没有回溯记录", current))
            })?;
            let edge = graph
                .incident_edge_refs(current)
                .into_iter()
                .filter(|e| e.traverse_from(previous) == Some(current))
                .min_by(|a, b| a.weight.total_cmp(&b.weight).then(a.id.cmp(&b.id)))
                .ok_or_else(|| {
                    Error::NotReachable(format!("{} 与 {} 之间已没有可走的边", previous, current))
                })?;
            edges.push(edge);
            if edges.len() > self.backtrace.len() {
                return Err(Error::InvalidInput("回溯表中存在环".to_string()));
            }
            current = previous;
        }

        edges.reverse();
        GraphPath::from_edges(self.source, edges)
    }
}

/// 计算单源最短路径
///
/// 任意边权为负或非有限值（NaN、±∞）时返回 `UnsupportedOperation`；源点不存在时返回 `MissingVertex`。
pub fn shortest_paths<G: GraphView + ?Sized>(graph: &G, source: VertexId) -> Result<ShortestPathLookup> {
    global_metrics().observe(AlgorithmKind::ShortestPath, || dijkstra(graph, source))
}

fn dijkstra<G: GraphView + ?Sized>(graph: &G, source: VertexId) -> Result<ShortestPathLookup> {
    if let Some(edge) = graph
        .edge_refs()
        .into_iter()
        .find(|e| !e.weight.is_finite() || e.weight < 0.0)
    {
        return Err(Error::UnsupportedOperation(format!(
            "边 {} 的权重为 {}，最短路只支持有限的非负权",
            edge.id, edge.weight
        )));
    }
    if !graph.contains_vertex(source) {
        return Err(Error::MissingVertex(format!("源点 {} 不存在", source)));
    }

    let mut visited = VertexScratch::for_graph(graph, false);
    let mut distances: BTreeMap<VertexId, f64> = BTreeMap::new();
    let mut backtrace: BTreeMap<VertexId, VertexId> = BTreeMap::new();
    let mut queue: PriorityQueue<VertexId, Priority> = PriorityQueue::new();

    distances.insert(source, 0.0);
    queue.push(source, Reverse((Distance(0.0), source)));

    while let Some((current, Reverse((Distance(current_distance), _)))) = queue.pop() {
        visited[current] = true;

        for edge in graph.incident_edge_refs(current) {
            let Some(next) = edge.traverse_from(current) else {
                continue;
            };
            if visited[next] {
                continue;
            }

            let candidate = current_distance + edge.weight;
            let improves = distances.get(&next).map_or(true, |&known| candidate < known);
            if improves {
                distances.insert(next, candidate);
                backtrace.insert(next, current);
                queue.push_increase(next, Reverse((Distance(candidate), next)));
            }
        }
    }

    debug!(
        source = %source,
        reached = distances.len(),
        total = graph.vertex_count(),
        "dijkstra finished"
    );

    Ok(ShortestPathLookup {
        source,
        backtrace,
        distances,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::fixtures::build;
    use crate::graph::{Edge, EdgeId, Graph, Vertex};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn vid(id: u32) -> VertexId {
        VertexId::new(id)
    }

    /// 0-1, 1-2, 1-3, 2-3 无向，边 ID 依次为 0..4
    fn diamond() -> Graph {
        build(&[0, 1, 2, 3], &[(0, 1), (1, 2), (1, 3), (2, 3)], false)
    }

    #[test]
    fn test_reweighted_undirected_distances() {
        let mut graph = diamond();
        graph.edge_mut(EdgeId::new(2)).unwrap().set_weight(0.5);

        let lookup = shortest_paths(&graph, vid(0)).unwrap();

        assert_eq!(lookup.distance_to(vid(0)), 0.0);
        assert_eq!(lookup.distance_to(vid(1)), 1.0);
        assert_eq!(lookup.distance_to(vid(2)), 2.0);
        assert_eq!(lookup.distance_to(vid(3)), 1.5);

        let path = lookup.path_to(&graph, vid(3)).unwrap();
        assert_eq!(path.vertices(), vec![vid(0), vid(1), vid(3)]);
        assert_eq!(path.path_length(), 1.5);
    }

    #[test]
    fn test_directed_parallel_edges() {
        let graph = build(
            &[0, 1, 2, 3, 4],
            &[(0, 1), (1, 2), (1, 2), (2, 3), (1, 4), (2, 4)],
            true,
        );

        let lookup = shortest_paths(&graph, vid(0)).unwrap();
        let path = lookup.path_to(&graph, vid(3)).unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path.path_length(), 3.0);
        assert_eq!(lookup.distance_to(vid(3)), 3.0);
        // 两条平行边等权，取 ID 较小者
        assert_eq!(path.edge_ids()[1], EdgeId::new(1));
    }

    #[test]
    fn test_parallel_edges_pick_lightest() {
        let mut graph = build(&[0, 1], &[(0, 1), (0, 1), (0, 1)], false);
        graph.edge_mut(EdgeId::new(0)).unwrap().set_weight(3.0);
        graph.edge_mut(EdgeId::new(2)).unwrap().set_weight(0.25);

        let lookup = shortest_paths(&graph, vid(0)).unwrap();
        let path = lookup.path_to(&graph, vid(1)).unwrap();

        assert_eq!(path.edge_ids(), vec![EdgeId::new(2)]);
        assert_eq!(lookup.distance_to(vid(1)), 0.25);
    }

    #[test]
    fn test_disconnected_vertex_is_infinite() {
        let mut graph = diamond();
        assert!(graph.remove_edge(EdgeId::new(0)));

        let lookup = shortest_paths(&graph, vid(0)).unwrap();

        assert_eq!(lookup.distance_to(vid(1)), f64::INFINITY);
        assert!(!lookup.is_reachable(vid(1)));
        assert_eq!(lookup.distance(vid(3)), None);
        assert!(matches!(
            lookup.path_to(&graph, vid(1)),
            Err(Error::NotReachable(_))
        ));
    }

    #[test]
    fn test_directed_edges_not_walked_backwards() {
        let graph = build(&[0, 1, 2], &[(1, 0), (1, 2)], true);
        let lookup = shortest_paths(&graph, vid(0)).unwrap();

        assert_eq!(lookup.reached_vertices().count(), 1);
        assert_eq!(lookup.distance_to(vid(2)), f64::INFINITY);
    }

    #[test]
    fn test_path_to_source_is_empty() {
        let graph = diamond();
        let lookup = shortest_paths(&graph, vid(2)).unwrap();

        let path = lookup.path_to(&graph, vid(2)).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.start_vertex(), vid(2));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut graph = diamond();
        graph.edge_mut(EdgeId::new(3)).unwrap().set_weight(-1.0);

        let err = shortest_paths(&graph, vid(0)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(_)));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        for weight in [f64::INFINITY, f64::NAN] {
            let mut graph = diamond();
            graph.edge_mut(EdgeId::new(3)).unwrap().set_weight(weight);

            let err = shortest_paths(&graph, vid(0)).unwrap_err();
            assert!(matches!(err, Error::UnsupportedOperation(_)));
        }
    }

    #[test]
    fn test_missing_source_rejected() {
        let graph = diamond();
        let err = shortest_paths(&graph, vid(42)).unwrap_err();
        assert!(matches!(err, Error::MissingVertex(_)));
    }

    #[test]
    fn test_tie_keeps_first_predecessor() {
        // 0 -> 1 -> 3 与 0 -> 2 -> 3 等长；1 先出队，3 的前驱保持为 1
        let graph = build(&[0, 1, 2, 3], &[(0, 1), (0, 2), (1, 3), (2, 3)], true);
        let lookup = shortest_paths(&graph, vid(0)).unwrap();

        assert_eq!(lookup.predecessor(vid(3)), Some(vid(1)));
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut graph = build(&[0, 1], &[(0, 1)], false);
        graph
            .add_edge(Edge::new(EdgeId::new(10), vid(0), vid(0), ()).with_weight(0.0))
            .unwrap();

        let lookup = shortest_paths(&graph, vid(0)).unwrap();
        assert_eq!(lookup.distance_to(vid(1)), 1.0);
        assert_eq!(lookup.predecessor(vid(0)), None);
    }

    #[test]
    fn test_random_graphs_deterministic_and_consistent() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let mut graph: Graph = Graph::new();
            let n = rng.gen_range(2..15u32);
            for i in 0..n {
                graph.add_vertex(Vertex::new(vid(i), ())).unwrap();
            }
            for _ in 0..rng.gen_range(0..40) {
                let a = vid(rng.gen_range(0..n));
                let b = vid(rng.gen_range(0..n));
                let weight = f64::from(rng.gen_range(0..8u8)) * 0.5;
                graph
                    .connect_vertices_with(a, b, (), rng.gen_bool(0.4), weight)
                    .unwrap();
            }

            let first = shortest_paths(&graph, vid(0)).unwrap();
            let second = shortest_paths(&graph, vid(0)).unwrap();
            assert_eq!(first, second);

            for (target, distance) in first.reached_vertices() {
                let path = first.path_to(&graph, target).unwrap();
                assert_eq!(path.path_length(), distance);
                assert_eq!(path.end_vertex(), target);
            }
        }
    }
}
