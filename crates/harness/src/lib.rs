// lib.rs
// 并行基准执行库入口，声明并导出各子模块。
pub mod chunk_splitter;
pub mod config;
pub mod error;
pub mod harness;
pub mod process_executor;
pub mod result_merger;
pub mod sequential_executor;
pub mod task;
pub mod thread_executor;
pub mod worker;
