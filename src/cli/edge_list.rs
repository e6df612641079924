//! 边列表导入导出
//!
//! 支持 CSV 与 JSON Lines 两种格式，字段相同：
//! `vertex1,vertex2[,weight][,directed][,id]`。
//! 缺省权重 1.0、缺省无向、缺省 ID 由图分配；顶点在首次出现时以默认负载创建。
//! 单行错误只计数并记录日志，不中断导入。
//!
//! 只服务于命令行工具；图核心不依赖这里的任何类型。

use crate::error::{Error, Result};
use crate::graph::{Edge, EdgeId, Graph, Vertex, VertexId};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 边记录（CSV 行 / JSON 对象）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub vertex1: u32,
    pub vertex2: u32,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub id: Option<u64>,
}

fn default_weight() -> f64 {
    1.0
}

impl EdgeRecord {
    fn from_edge<E>(edge: &Edge<E>) -> Self {
        Self {
            vertex1: edge.vertex1().as_u32(),
            vertex2: edge.vertex2().as_u32(),
            weight: edge.weight(),
            directed: edge.is_directed(),
            id: Some(edge.id().as_u64()),
        }
    }
}

/// 向已有图追加边列表
pub struct EdgeListImporter<'a, V, E> {
    graph: &'a mut Graph<V, E>,
}

impl<'a, V: Default, E: Default> EdgeListImporter<'a, V, E> {
    pub fn new(graph: &'a mut Graph<V, E>) -> Self {
        Self { graph }
    }

    /// 从 CSV 文件导入
    pub fn import_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_csv_reader(BufReader::new(file))
    }

    /// 从任意 CSV 源导入，首行为表头
    pub fn import_csv_reader<R: Read>(&mut self, reader: R) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        for (index, row) in rdr.deserialize::<EdgeRecord>().enumerate() {
            // 表头占第 1 行
            let line = index + 2;
            let outcome = row
                .map_err(Error::from)
                .and_then(|record| self.apply(record, &mut stats));
            if let Err(e) = outcome {
                warn!(line, error = %e, "skipping edge row");
                stats.errors += 1;
            }
        }

        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(?stats, "csv edge list imported");
        Ok(stats)
    }

    /// 从 JSON Lines 文件导入
    pub fn import_jsonl<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_jsonl_reader(BufReader::new(file))
    }

    /// 从任意 JSON Lines 源导入，空行跳过
    pub fn import_jsonl_reader<R: BufRead>(&mut self, reader: R) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let outcome = serde_json::from_str::<EdgeRecord>(&line)
                .map_err(|e| Error::ImportError(format!("JSON 解析错误: {}", e)))
                .and_then(|record| self.apply(record, &mut stats));
            if let Err(e) = outcome {
                warn!(line = line_no, error = %e, "skipping edge record");
                stats.errors += 1;
            }
        }

        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(?stats, "jsonl edge list imported");
        Ok(stats)
    }

    /// 写入一条记录，必要时创建端点
    fn apply(&mut self, record: EdgeRecord, stats: &mut ImportStats) -> Result<EdgeId> {
        if !record.weight.is_finite() {
            return Err(Error::ImportError(format!("权重无效: {}", record.weight)));
        }
        if let Some(id) = record.id {
            // 先查重，避免留下孤立的新顶点
            if self.graph.contains_edge(EdgeId::new(id)) {
                return Err(Error::DuplicateId(format!("边 e{}", id)));
            }
        }

        let v1 = self.ensure_vertex(VertexId::new(record.vertex1), stats)?;
        let v2 = self.ensure_vertex(VertexId::new(record.vertex2), stats)?;

        let id = match record.id {
            Some(id) => {
                let edge = Edge::new(EdgeId::new(id), v1, v2, E::default())
                    .with_directed(record.directed)
                    .with_weight(record.weight);
                self.graph.add_edge(edge)?;
                EdgeId::new(id)
            }
            None => self
                .graph
                .connect_vertices_with(v1, v2, E::default(), record.directed, record.weight)?
                .id(),
        };
        stats.edges_imported += 1;
        Ok(id)
    }

    fn ensure_vertex(&mut self, id: VertexId, stats: &mut ImportStats) -> Result<VertexId> {
        if !self.graph.contains_vertex(id) {
            self.graph.add_vertex(Vertex::new(id, V::default()))?;
            stats.vertices_imported += 1;
        }
        Ok(id)
    }
}

/// 从 CSV 文件构建新图
pub fn import_edges_csv<V, E, P>(path: P) -> Result<(Graph<V, E>, ImportStats)>
where
    V: Default,
    E: Default,
    P: AsRef<Path>,
{
    let mut graph = Graph::new();
    let stats = EdgeListImporter::new(&mut graph).import_csv(path)?;
    Ok((graph, stats))
}

/// 从 JSON Lines 文件构建新图
pub fn import_edges_jsonl<V, E, P>(path: P) -> Result<(Graph<V, E>, ImportStats)>
where
    V: Default,
    E: Default,
    P: AsRef<Path>,
{
    let mut graph = Graph::new();
    let stats = EdgeListImporter::new(&mut graph).import_jsonl(path)?;
    Ok((graph, stats))
}

/// 以 CSV 写出全部边（按边 ID 升序，带显式 ID）
///
/// 边列表只能表达有边的顶点，孤立顶点不会写出。
pub fn export_edges_csv<V, E, W: Write>(graph: &Graph<V, E>, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for edge in graph.edges() {
        wtr.serialize(EdgeRecord::from_edge(edge))?;
    }
    wtr.flush()?;
    Ok(())
}

/// 以 JSON Lines 写出全部边
pub fn export_edges_jsonl<V, E, W: Write>(graph: &Graph<V, E>, mut writer: W) -> Result<()> {
    for edge in graph.edges() {
        let line = serde_json::to_string(&EdgeRecord::from_edge(edge))
            .map_err(|e| Error::SerializationError(e.to_string()))?;
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}
