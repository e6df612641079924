//! 运行统计模块
//!
//! 收集图变更次数与各算法的调用次数、失败次数和耗时

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 算法种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmKind {
    AdjacencyMatrix,
    ShortestPath,
    ConnectedComponents,
    Subgraph,
    StronglyConnected,
    CycleDetection,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 6] = [
        AlgorithmKind::AdjacencyMatrix,
        AlgorithmKind::ShortestPath,
        AlgorithmKind::ConnectedComponents,
        AlgorithmKind::Subgraph,
        AlgorithmKind::StronglyConnected,
        AlgorithmKind::CycleDetection,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::AdjacencyMatrix => "adjacency_matrix",
            AlgorithmKind::ShortestPath => "shortest_path",
            AlgorithmKind::ConnectedComponents => "connected_components",
            AlgorithmKind::Subgraph => "subgraph",
            AlgorithmKind::StronglyConnected => "strongly_connected",
            AlgorithmKind::CycleDetection => "cycle_detection",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 全局统计
#[derive(Debug)]
pub struct Metrics {
    /// 图变更统计
    graph_stats: GraphStats,
    /// 每种算法一组计数
    algorithm_stats: [AlgorithmStats; 6],
    /// 启动时间
    start_time: Instant,
}

/// 图变更统计
#[derive(Debug, Default)]
struct GraphStats {
    vertices_inserted: AtomicU64,
    vertices_removed: AtomicU64,
    edges_inserted: AtomicU64,
    edges_removed: AtomicU64,
    merges: AtomicU64,
}

/// 单个算法的统计
#[derive(Debug, Default)]
struct AlgorithmStats {
    /// 调用次数
    runs: AtomicU64,
    /// 因前置条件等失败的次数
    failures: AtomicU64,
    /// 总耗时（微秒）
    total_duration_us: AtomicU64,
}

/// 单个算法的统计快照
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmSnapshot {
    pub algorithm: AlgorithmKind,
    pub runs: u64,
    pub failures: u64,
    pub avg_duration_ms: f64,
}

/// 可导出的统计快照
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    pub vertices_inserted: u64,
    pub vertices_removed: u64,
    pub edges_inserted: u64,
    pub edges_removed: u64,
    pub merges: u64,
    pub algorithms: Vec<AlgorithmSnapshot>,
    pub uptime_seconds: u64,
}

impl Metrics {
    /// 创建新的统计收集器
    pub fn new() -> Self {
        Self {
            graph_stats: GraphStats::default(),
            algorithm_stats: Default::default(),
            start_time: Instant::now(),
        }
    }

    pub fn record_vertex_insert(&self) {
        self.graph_stats
            .vertices_inserted
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_vertex_remove(&self) {
        self.graph_stats
            .vertices_removed
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_edge_insert(&self) {
        self.graph_stats.edges_inserted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_edge_remove(&self) {
        self.graph_stats.edges_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_merge(&self) {
        self.graph_stats.merges.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录算法开始
    pub fn start_algorithm(&self, kind: AlgorithmKind) -> AlgorithmTimer {
        self.algorithm_stats[kind.index()]
            .runs
            .fetch_add(1, Ordering::Relaxed);
        AlgorithmTimer::new(kind)
    }

    /// 记录算法完成
    pub fn finish_algorithm(&self, timer: AlgorithmTimer, success: bool) {
        let stats = &self.algorithm_stats[timer.kind.index()];
        if !success {
            stats.failures.fetch_add(1, Ordering::Relaxed);
        }
        let micros = duration_micros(timer.elapsed());
        // 累计值到顶后停在 u64::MAX，不回绕
        let _ = stats
            .total_duration_us
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |total| {
                Some(total.saturating_add(micros))
            });
    }

    /// 包装一次算法调用，按结果记录成功或失败
    pub fn observe<T, E>(
        &self,
        kind: AlgorithmKind,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let timer = self.start_algorithm(kind);
        let result = f();
        self.finish_algorithm(timer, result.is_ok());
        result
    }

    /// 获取统计快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let algorithms = AlgorithmKind::ALL
            .iter()
            .map(|&kind| {
                let stats = &self.algorithm_stats[kind.index()];
                let runs = stats.runs.load(Ordering::Relaxed);
                let total_us = stats.total_duration_us.load(Ordering::Relaxed);
                let avg_duration_ms = if runs > 0 {
                    (total_us as f64) / (runs as f64) / 1000.0
                } else {
                    0.0
                };
                AlgorithmSnapshot {
                    algorithm: kind,
                    runs,
                    failures: stats.failures.load(Ordering::Relaxed),
                    avg_duration_ms,
                }
            })
            .collect();

        MetricsSnapshot {
            vertices_inserted: self.graph_stats.vertices_inserted.load(Ordering::Relaxed),
            vertices_removed: self.graph_stats.vertices_removed.load(Ordering::Relaxed),
            edges_inserted: self.graph_stats.edges_inserted.load(Ordering::Relaxed),
            edges_removed: self.graph_stats.edges_removed.load(Ordering::Relaxed),
            merges: self.graph_stats.merges.load(Ordering::Relaxed),
            algorithms,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 重置所有统计
    pub fn reset(&self) {
        self.graph_stats.vertices_inserted.store(0, Ordering::Relaxed);
        self.graph_stats.vertices_removed.store(0, Ordering::Relaxed);
        self.graph_stats.edges_inserted.store(0, Ordering::Relaxed);
        self.graph_stats.edges_removed.store(0, Ordering::Relaxed);
        self.graph_stats.merges.store(0, Ordering::Relaxed);

        for stats in &self.algorithm_stats {
            stats.runs.store(0, Ordering::Relaxed);
            stats.failures.store(0, Ordering::Relaxed);
            stats.total_duration_us.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 算法计时器
pub struct AlgorithmTimer {
    kind: AlgorithmKind,
    start: Instant,
}

impl AlgorithmTimer {
    fn new(kind: AlgorithmKind) -> Self {
        Self {
            kind,
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

fn duration_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// 全局统计实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局统计实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}
