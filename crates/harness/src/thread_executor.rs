// thread_executor.rs
// 多线程执行器：每块一个线程，先全部启动再统一join，按块顺序合并结果。
use crate::chunk_splitter::split_chunks;
use crate::error::{Error, Result};
use crate::result_merger::merge_chunk_results;
use crate::sequential_executor::run_sequential;
use std::thread;

/// 多线程并行执行任务。
///
/// 输入经分块器切分后，每块由一个独立线程顺序执行，
/// 各线程只写入自己的私有结果槽，没有共享可变容器。
/// 启动纪律：所有线程先全部启动、再逐个join（边启动边join会退化为顺序执行）。
/// join按块发射顺序进行，合并后全局顺序与输入一致，与线程完成顺序无关。
/// 任意线程panic或任务失败时，其余线程仍会全部join完毕（作用域线程保证
/// 不泄漏），之后按块顺序返回第一个观察到的失败。
pub fn run_threaded<I, O, F>(items: &[I], task: F, worker_count: usize) -> Result<Vec<O>>
where
    I: Sync,
    O: Send,
    F: Fn(&I) -> Result<O> + Sync,
{
    let chunks = split_chunks(items, worker_count)?;

    let per_chunk: Vec<Result<Vec<O>>> = thread::scope(|scope| {
        let task = &task;
        // 先全部启动
        let handles: Vec<_> = chunks
            .iter()
            .map(|chunk| {
                let chunk: &[I] = chunk;
                scope.spawn(move || run_sequential(chunk, task))
            })
            .collect();
        // 再按块顺序全部join
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .map_err(|_| Error::WorkerError("工作线程panic".to_string()))
                    .and_then(|chunk_result| chunk_result)
            })
            .collect()
    });

    // 所有线程此时都已join，按块顺序取第一个失败
    let mut ordered = Vec::with_capacity(chunks.len());
    for chunk_results in per_chunk {
        ordered.push(chunk_results?);
    }
    merge_chunk_results(ordered, items.len())
}
