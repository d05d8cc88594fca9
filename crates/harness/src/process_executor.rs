// process_executor.rs
// 多进程执行器：有界子进程池按提交顺序派发块并按提交顺序收取结果。
use crate::chunk_splitter::split_chunks;
use crate::error::{Error, Result};
use crate::result_merger::merge_chunk_results;
use crate::task::WireTask;
use crate::worker::{self, WorkerRequestRef};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

/// 工作进程的启动方式。默认以 `current_exe() worker` 重新执行自身，
/// 由宿主二进制在该参数下进入工作者入口；测试可覆盖为任意命令。
#[derive(Debug, Clone)]
pub struct WorkerCommand {
    /// 可执行文件路径
    pub program: PathBuf,
    /// 传给工作进程的参数
    pub args: Vec<String>,
}

impl WorkerCommand {
    /// 指定任意工作进程命令
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// 默认命令：重新执行当前可执行文件并附加工作者参数
    pub fn current_exe() -> Result<Self> {
        let program = std::env::current_exe()
            .map_err(|e| Error::WorkerError(format!("无法定位当前可执行文件: {}", e)))?;
        Ok(Self {
            program,
            args: vec![worker::WORKER_ARG.to_string()],
        })
    }
}

/// 多进程执行器。
///
/// 池大小恰为 `worker_count`：同时在运行的子进程不超过该数量，
/// 块多于工作者时，收取最早提交的子进程后再派发下一块。
/// 结果严格按提交顺序收取（阻塞等待最早的未完成子进程），
/// 而非先到先得，从而保证全局顺序不变式。
/// 池的生命周期只覆盖一次批处理：`run` 返回前（无论成败）
/// 所有派发过的子进程都已被wait回收，失败路径上未完成的子进程先kill再回收。
pub struct ProcessPool {
    worker_count: usize,
    worker_cmd: WorkerCommand,
}

impl ProcessPool {
    /// 创建进程池，默认以当前可执行文件的工作者入口作为子进程
    pub fn new(worker_count: usize) -> Result<Self> {
        if worker_count == 0 {
            return Err(Error::ConfigError(
                "工作者数量必须为正整数".to_string(),
            ));
        }
        Ok(Self {
            worker_count,
            worker_cmd: WorkerCommand::current_exe()?,
        })
    }

    /// 覆盖工作进程命令（集成测试用）
    pub fn with_worker_command(mut self, worker_cmd: WorkerCommand) -> Self {
        self.worker_cmd = worker_cmd;
        self
    }

    /// 对整批输入执行任务，返回与输入同序的结果
    pub fn run<T: WireTask>(&self, items: &[T::Input], task: &T) -> Result<Vec<T::Output>> {
        let chunks = split_chunks(items, self.worker_count)?;
        let mut in_flight: VecDeque<Child> = VecDeque::new();

        match self.dispatch_chunks(&chunks, task, &mut in_flight) {
            Ok(per_chunk) => merge_chunk_results(per_chunk, items.len()),
            Err(e) => {
                // 快速失败，但先把仍在运行的子进程全部kill并回收，不留孤儿进程
                for mut child in in_flight {
                    let _ = child.kill();
                    let _ = child.wait();
                }
                Err(e)
            }
        }
    }

    /// 依序派发所有块，维持至多 worker_count 个在途子进程
    fn dispatch_chunks<T: WireTask>(
        &self,
        chunks: &[&[T::Input]],
        task: &T,
        in_flight: &mut VecDeque<Child>,
    ) -> Result<Vec<Vec<T::Output>>> {
        let mut per_chunk = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            if in_flight.len() >= self.worker_count {
                if let Some(child) = in_flight.pop_front() {
                    per_chunk.push(collect_child::<T>(child)?);
                }
            }
            in_flight.push_back(self.spawn_chunk(task, chunk)?);
        }
        while let Some(child) = in_flight.pop_front() {
            per_chunk.push(collect_child::<T>(child)?);
        }
        Ok(per_chunk)
    }

    /// 启动一个子进程并把块请求写入其stdin
    fn spawn_chunk<T: WireTask>(&self, task: &T, chunk: &[T::Input]) -> Result<Child> {
        let mut child = Command::new(&self.worker_cmd.program)
            .args(&self.worker_cmd.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::WorkerError(format!("启动工作进程失败: {}", e)))?;

        let request = WorkerRequestRef { task, chunk };
        let write_result = match child.stdin.take() {
            Some(mut stdin) => serde_json::to_writer(&mut stdin, &request)
                .map_err(|e| Error::WorkerError(format!("写入工作进程stdin失败: {}", e))),
            None => Err(Error::WorkerError("工作进程stdin不可用".to_string())),
        };
        if let Err(e) = write_result {
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
        Ok(child)
    }
}

/// 等待一个子进程结束并解析其块结果
fn collect_child<T: WireTask>(child: Child) -> Result<Vec<T::Output>> {
    let output = child
        .wait_with_output()
        .map_err(|e| Error::WorkerError(format!("等待工作进程失败: {}", e)))?;
    if !output.status.success() {
        return Err(Error::WorkerError(format!(
            "工作进程异常退出: {}",
            output.status
        )));
    }
    worker::parse_response(&output.stdout)
}
