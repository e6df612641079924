//! 子命令实现
//!
//! 每个命令读取图、调用算法并返回格式化后的文本，由二进制负责输出。

use super::printer::Printer;
use crate::algorithm::{
    adjacency_matrix, connected_components, connected_vertex_ids, find_cycle, shortest_paths,
    strongly_connected_components,
};
use super::edge_list::{export_edges_csv, export_edges_jsonl, EdgeListImporter, ImportStats};
use crate::error::Result;
use crate::graph::{Graph, GraphView, MergeMap, VertexId};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// 边列表文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FileFormat {
    Csv,
    Jsonl,
}

impl FileFormat {
    /// 按扩展名推断，`.jsonl` / `.json` 为 JSON Lines，其余按 CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("json") => FileFormat::Jsonl,
            _ => FileFormat::Csv,
        }
    }
}

/// 读入边列表文件
pub fn load_graph(path: &Path, format: FileFormat) -> Result<(Graph, ImportStats)> {
    let mut graph = Graph::new();
    let stats = {
        let mut importer = EdgeListImporter::new(&mut graph);
        match format {
            FileFormat::Csv => importer.import_csv(path)?,
            FileFormat::Jsonl => importer.import_jsonl(path)?,
        }
    };
    info!(
        path = %path.display(),
        vertices = stats.vertices_imported,
        edges = stats.edges_imported,
        errors = stats.errors,
        "graph loaded"
    );
    Ok((graph, stats))
}

/// 写出边列表文件
pub fn save_graph(graph: &Graph, path: &Path, format: FileFormat) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    match format {
        FileFormat::Csv => export_edges_csv(graph, writer)?,
        FileFormat::Jsonl => export_edges_jsonl(graph, writer)?,
    }
    info!(path = %path.display(), edges = graph.edge_count(), "graph saved");
    Ok(())
}

/// stats：规模与算法统计
pub fn run_stats(printer: &Printer, graph: &Graph) -> String {
    printer.print_stats(graph)
}

/// shortest-path：单源距离表，或到 target 的具体路径
pub fn run_shortest_path(
    printer: &Printer,
    graph: &Graph,
    from: VertexId,
    to: Option<VertexId>,
) -> Result<String> {
    let lookup = shortest_paths(graph, from)?;

    match to {
        Some(target) => {
            let path = lookup.path_to(graph, target)?;
            let rows: Vec<Vec<String>> = path
                .edges()
                .iter()
                .zip(path.vertices().windows(2))
                .map(|(edge, hop)| {
                    vec![
                        edge.id.to_string(),
                        hop[0].to_string(),
                        hop[1].to_string(),
                        edge.weight.to_string(),
                    ]
                })
                .collect();
            let title = format!(
                "Path {} -> {} (length {})",
                from,
                target,
                Printer::format_distance(path.path_length())
            );
            Ok(printer.print_result(&title, &["Edge", "From", "To", "Weight"], &rows))
        }
        None => {
            let rows: Vec<Vec<String>> = graph
                .vertex_ids()
                .into_iter()
                .map(|id| {
                    let predecessor = lookup
                        .predecessor(id)
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    vec![
                        id.to_string(),
                        Printer::format_distance(lookup.distance_to(id)),
                        predecessor,
                    ]
                })
                .collect();
            let title = format!("Distances from {}", from);
            Ok(printer.print_result(&title, &["Vertex", "Distance", "Predecessor"], &rows))
        }
    }
}

/// components：全部连通分量，或 start 所在分量
pub fn run_components(printer: &Printer, graph: &Graph, start: Option<VertexId>) -> Result<String> {
    let components = match start {
        Some(start) => {
            let mut ids = connected_vertex_ids(graph, start)?;
            ids.sort_unstable();
            vec![ids]
        }
        None => connected_components(graph),
    };
    Ok(print_partition(printer, "Connected Components", &components))
}

/// scc：强连通分量
pub fn run_scc(printer: &Printer, graph: &Graph) -> Result<String> {
    let components = strongly_connected_components(graph)?;
    Ok(print_partition(printer, "Strongly Connected Components", &components))
}

/// cycles：是否有环并给出一个环
pub fn run_cycles(printer: &Printer, graph: &Graph) -> Result<String> {
    let rows = match find_cycle(graph)? {
        Some(cycle) => {
            let hops: Vec<String> = cycle.iter().map(|v| v.to_string()).collect();
            vec![vec![hops.join(" -> ")]]
        }
        None => Vec::new(),
    };
    Ok(printer.print_result("Cycles", &["Cycle"], &rows))
}

/// matrix：邻接矩阵
pub fn run_matrix(printer: &Printer, graph: &Graph) -> String {
    let matrix = adjacency_matrix(graph);
    let mut columns = vec![String::new()];
    columns.extend(matrix.vertex_ids().iter().map(|v| v.to_string()));
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();

    let rows: Vec<Vec<String>> = matrix
        .vertex_ids()
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let mut row = vec![id.to_string()];
            row.extend(matrix.row(i).iter().map(|c| c.to_string()));
            row
        })
        .collect();
    printer.print_result("Adjacency Matrix", &columns, &rows)
}

/// merge：把 other 并入 base，返回合并后的图与 ID 映射
pub fn run_merge(mut base: Graph, other: Graph) -> Result<(Graph, MergeMap)> {
    let map = base.merge(other)?;
    info!(
        vertices = base.vertex_count(),
        edges = base.edge_count(),
        remapped_vertices = map.vertices.len(),
        "graphs merged"
    );
    Ok((base, map))
}

fn print_partition(printer: &Printer, title: &str, components: &[Vec<VertexId>]) -> String {
    let rows: Vec<Vec<String>> = components
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                i.to_string(),
                c.len().to_string(),
                Printer::format_vertex_set(c),
            ]
        })
        .collect();
    printer.print_result(title, &["#", "Size", "Vertices"], &rows)
}
