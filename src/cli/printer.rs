//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::graph::{GraphView, VertexId};
use crate::metrics::MetricsSnapshot;
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 带标题的结果集
    pub fn print_result(&self, title: &str, columns: &[&str], rows: &[Vec<String>]) -> String {
        let heading = Self::heading(title);
        if columns.is_empty() || rows.is_empty() {
            return format!("{}Empty set\n", heading);
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}{}\n{} row(s)\n", heading, output, rows.len())
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印图统计信息
    pub fn print_stats<G: GraphView + ?Sized>(&self, graph: &G) -> String {
        let directed = graph.edge_refs().iter().filter(|e| e.directed).count();
        let self_loops = graph
            .edge_refs()
            .iter()
            .filter(|e| e.vertex1 == e.vertex2)
            .count();

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.add_row(row!["Directed Edges", directed.to_string()]);
        table.add_row(row!["Self Loops", self_loops.to_string()]);
        format!("{}{}", Self::heading("Graph"), table)
    }

    /// 打印算法运行统计
    pub fn print_metrics(&self, snapshot: &MetricsSnapshot) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Algorithm", "Runs", "Failures", "Avg (ms)"]);
        for stats in snapshot.algorithms.iter().filter(|a| a.runs > 0) {
            table.add_row(row![
                stats.algorithm,
                stats.runs.to_string(),
                stats.failures.to_string(),
                format!("{:.3}", stats.avg_duration_ms)
            ]);
        }
        format!("{}{}", Self::heading("Algorithm Metrics"), table)
    }

    /// 顶点列表的紧凑写法：`{v1, v2, v3}`
    pub fn format_vertex_set(ids: &[VertexId]) -> String {
        let items: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        format!("{{{}}}", items.join(", "))
    }

    /// 距离显示，不可达为 ∞
    pub fn format_distance(distance: f64) -> String {
        if distance.is_infinite() {
            "∞".to_string()
        } else {
            format!("{}", distance)
        }
    }

    /// 着色标题行
    pub fn heading(title: &str) -> String {
        format!("{}\n", title.bold().cyan())
    }
}
