//! graphkit 命令行工具
//!
//! 读取边列表文件并运行图算法

use anyhow::Context;
use clap::{Parser, Subcommand};
use graphkit::cli::commands::{self, FileFormat};
use graphkit::cli::edge_list::ImportStats;
use graphkit::cli::printer::{PrintMode, Printer};
use graphkit::graph::{Graph, VertexId};
use graphkit::metrics::global_metrics;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "graphkit", version)]
#[command(about = "图算法命令行工具：最短路、连通分量、强连通分量、环检测")]
struct Args {
    /// 输入边列表文件
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// 文件格式，缺省按扩展名推断
    #[arg(short, long, value_enum, global = true)]
    format: Option<FileFormat>,

    /// 日志级别 (trace, debug, info, warn, error)，GRAPHKIT_LOG 优先
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// 垂直显示结果
    #[arg(long, global = true)]
    vertical: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 图规模与算法统计
    Stats,
    /// Dijkstra 最短路
    ShortestPath {
        #[arg(long)]
        from: u32,
        #[arg(long)]
        to: Option<u32>,
    },
    /// 连通分量（忽略方向）
    Components {
        #[arg(long)]
        start: Option<u32>,
    },
    /// 强连通分量，要求全部为有向边
    Scc,
    /// 环检测，要求全部为有向边
    Cycles,
    /// 邻接矩阵
    Matrix,
    /// 合并两个边列表文件
    Merge {
        a: PathBuf,
        b: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_env("GRAPHKIT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("graphkit={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let printer = Printer::new(if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    });

    let output = match &args.command {
        Command::Merge { a, b, output } => {
            let (base, _) = load(a, args.format)?;
            let (other, _) = load(b, args.format)?;
            let (merged, map) = commands::run_merge(base, other)?;
            let format = args.format.unwrap_or_else(|| FileFormat::from_path(output));
            commands::save_graph(&merged, output, format)
                .with_context(|| format!("写入 {} 失败", output.display()))?;
            format!(
                "{}merged {} vertices, {} edges -> {}\n",
                Printer::heading("Merge"),
                map.vertices.len(),
                map.edges.len(),
                output.display()
            )
        }
        command => {
            let input = args
                .input
                .as_deref()
                .context("需要通过 --input 指定输入文件")?;
            let (graph, _) = load(input, args.format)?;
            run(&printer, &graph, command)?
        }
    };

    print!("{}", output);
    Ok(())
}

fn load(path: &Path, format: Option<FileFormat>) -> anyhow::Result<(Graph, ImportStats)> {
    let format = format.unwrap_or_else(|| FileFormat::from_path(path));
    let (graph, stats) = commands::load_graph(path, format)
        .with_context(|| format!("读取 {} 失败", path.display()))?;
    if stats.errors > 0 {
        warn!(path = %path.display(), errors = stats.errors, "some rows were skipped");
    }
    Ok((graph, stats))
}

fn run(printer: &Printer, graph: &Graph, command: &Command) -> anyhow::Result<String> {
    let output = match command {
        Command::Stats => format!(
            "{}{}",
            commands::run_stats(printer, graph),
            printer.print_metrics(&global_metrics().snapshot())
        ),
        Command::ShortestPath { from, to } => commands::run_shortest_path(
            printer,
            graph,
            VertexId::new(*from),
            to.map(VertexId::new),
        )?,
        Command::Components { start } => {
            commands::run_components(printer, graph, start.map(VertexId::new))?
        }
        Command::Scc => commands::run_scc(printer, graph)?,
        Command::Cycles => commands::run_cycles(printer, graph)?,
        Command::Matrix => commands::run_matrix(printer, graph),
        Command::Merge { .. } => anyhow::bail!("merge 不使用 --input"),
    };
    Ok(output)
}
