//! 命令行支持：边列表读写、结果打印与子命令实现

pub mod commands;
pub mod edge_list;
pub mod printer;

pub use printer::{PrintMode, Printer};
