// worker.rs
// 子进程工作者的线协议：stdin读取块请求，stdout写回块结果，均为serde_json编码。
use crate::error::{Error, Result};
use crate::sequential_executor::run_sequential;
use crate::task::WireTask;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// 进程模式下默认的工作者参数：主进程以 `current_exe() worker` 重新执行自身，
/// 宿主二进制据此进入工作者入口
pub const WORKER_ARG: &str = "worker";

/// 发往子进程的块请求：任务本身与该块的全部输入项
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkerRequest<T, I> {
    /// 要执行的任务
    pub task: T,
    /// 本块的输入项
    pub chunk: Vec<I>,
}

/// 发送侧的借用版本，字段布局与 `WorkerRequest` 一致，避免整块克隆
#[derive(Serialize)]
pub(crate) struct WorkerRequestRef<'a, T, I> {
    pub task: &'a T,
    pub chunk: &'a [I],
}

/// 子进程写回的块结果
#[derive(Debug, Serialize, Deserialize)]
pub enum WorkerResponse<O> {
    /// 本块全部项的结果，顺序与块内输入一致
    Ok(Vec<O>),
    /// 块内某项任务失败，携带失败原因（子进程正常退出，由父进程定性为任务错误）
    Err(String),
}

/// 工作者入口：读取一个块请求，顺序执行，写回结果。
/// 宿主二进制在检测到工作者参数后应调用本函数并立即退出，
/// 期间不得向stdout写入任何其他内容。
pub fn run_worker<T: WireTask>(mut input: impl Read, mut output: impl Write) -> Result<()> {
    let mut payload = String::new();
    input.read_to_string(&mut payload)?;
    let request: WorkerRequest<T, T::Input> = serde_json::from_str(&payload)?;

    let response = match run_sequential(&request.chunk, &|item| request.task.apply(item)) {
        Ok(results) => WorkerResponse::Ok(results),
        Err(e) => WorkerResponse::Err(e.to_string()),
    };

    serde_json::to_writer(&mut output, &response)?;
    output.flush()?;
    Ok(())
}

/// 解析子进程写回的stdout内容
pub(crate) fn parse_response<O: serde::de::DeserializeOwned>(raw: &[u8]) -> Result<Vec<O>> {
    let response: WorkerResponse<O> = serde_json::from_slice(raw)
        .map_err(|e| Error::WorkerError(format!("子进程输出无法解析: {}", e)))?;
    match response {
        WorkerResponse::Ok(results) => Ok(results),
        WorkerResponse::Err(msg) => Err(Error::TaskError(msg)),
    }
}
