//! graphkit - 通用内存图与图算法
//!
//! 顶点和边携带任意负载，提供：
//! - 带 ID 分配、级联删除与合并的可变图
//! - Dijkstra 单源最短路与路径重建
//! - 连通子图、诱导子图提取
//! - Tarjan 强连通分量与三色环检测
//!
//! 图核心不绑定序列化框架；启用 `serde` feature 后核心类型派生
//! `Serialize` / `Deserialize`。CSV / JSON Lines 边列表读写只在
//! `cli` feature 下随命令行工具提供。

pub mod algorithm;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod graph;
pub mod metrics;

// 重导出常用类型
pub use algorithm::{AdjacencyMatrix, GraphPath, ShortestPathLookup};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, EdgeRef, Graph, GraphView, MergeMap, SharedGraph, Vertex, VertexId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
