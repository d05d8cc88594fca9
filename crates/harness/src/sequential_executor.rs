// sequential_executor.rs
// 顺序执行器：单线程按输入顺序逐项执行任务，也是并行策略的块内执行单元。
use crate::error::Result;

/// 按输入顺序对每一项执行任务，结果顺序与输入严格一致。
/// 第一个失败的任务立即中止剩余项的执行。
pub fn run_sequential<I, O, F>(items: &[I], task: &F) -> Result<Vec<O>>
where
    F: Fn(&I) -> Result<O>,
{
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        results.push(task(item)?);
    }
    Ok(results)
}
