// harness.rs
// 顶层编排器：按配置选择执行策略，对完整生命周期计时并产出运行报告。
use crate::config::{HarnessConfig, Mode};
use crate::error::Result;
use crate::process_executor::{ProcessPool, WorkerCommand};
use crate::sequential_executor::run_sequential;
use crate::task::WireTask;
use crate::thread_executor::run_threaded;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// 一次完整运行的报告：有序结果、耗时与运行标识
#[derive(Debug)]
pub struct RunReport<O> {
    /// 本次运行的唯一ID
    pub run_id: Uuid,
    /// 实际使用的执行模式
    pub mode: Mode,
    /// 实际使用的工作者数量
    pub worker_count: usize,
    /// 有序结果序列，results[i] 对应 inputs[i]
    pub results: Vec<O>,
    /// 墙钟耗时，覆盖 分块+派发+收集 的完整生命周期（含池的建立与回收）
    pub elapsed: Duration,
}

/// 基准编排器。
/// 自身无跨调用状态：每次 `run` 重新分块、重新建池、重新计时。
pub struct Harness {
    config: HarnessConfig,
    worker_cmd: Option<WorkerCommand>,
}

impl Harness {
    /// 创建编排器，配置非法时在任何任务开始前失败
    pub fn new(config: HarnessConfig) -> Result<Self> {
        config.validate()?;
        let host_cores = num_cpus::get();
        if config.worker_count > host_cores {
            tracing::warn!(
                workers = config.worker_count,
                host_cores,
                "工作者数量超过主机逻辑核心数，并行收益会下降"
            );
        }
        Ok(Self {
            config,
            worker_cmd: None,
        })
    }

    /// 覆盖进程模式的工作进程命令（集成测试用）
    pub fn with_worker_command(mut self, worker_cmd: WorkerCommand) -> Self {
        self.worker_cmd = Some(worker_cmd);
        self
    }

    /// 当前配置
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// 对整批输入执行任务并计时。
    /// 计时从分块前开始、到结果合并完成为止，池的建立与回收成本如实计入。
    pub fn run<T: WireTask>(&self, items: &[T::Input], task: &T) -> Result<RunReport<T::Output>> {
        let run_id = Uuid::new_v4();
        tracing::info!(
            %run_id,
            mode = self.config.mode.as_str(),
            workers = self.config.worker_count,
            items = items.len(),
            "开始执行"
        );

        let started = Instant::now();
        let results = match self.config.mode {
            Mode::Sequential => run_sequential(items, &|item| task.apply(item))?,
            Mode::Threaded => {
                run_threaded(items, |item| task.apply(item), self.config.worker_count)?
            }
            Mode::Multiprocess => {
                let mut pool = ProcessPool::new(self.config.worker_count)?;
                if let Some(worker_cmd) = &self.worker_cmd {
                    pool = pool.with_worker_command(worker_cmd.clone());
                }
                pool.run(items, task)?
            }
        };
        let elapsed = started.elapsed();

        tracing::info!(%run_id, ?elapsed, results = results.len(), "执行完成");
        Ok(RunReport {
            run_id,
            mode: self.config.mode,
            worker_count: self.config.worker_count,
            results,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::task::TaskKind;

    fn harness(mode: Mode, workers: Option<usize>) -> Harness {
        Harness::new(HarnessConfig::new(mode, workers).unwrap()).unwrap()
    }

    #[test]
    fn test_sequential_scenario() {
        let report = harness(Mode::Sequential, None)
            .run(&[4u64, 9, 11], &TaskKind::IsPrime)
            .unwrap();
        assert_eq!(report.results, vec![(4, false), (9, false), (11, true)]);
        assert_eq!(report.worker_count, 1);
    }

    #[test]
    fn test_threaded_matches_sequential() {
        let items: Vec<u64> = (10_000..10_100).collect();
        let sequential = harness(Mode::Sequential, None)
            .run(&items, &TaskKind::IsPrime)
            .unwrap();
        let threaded = harness(Mode::Threaded, Some(4))
            .run(&items, &TaskKind::IsPrime)
            .unwrap();
        assert_eq!(threaded.results.len(), 100);
        assert_eq!(threaded.results, sequential.results);
    }

    #[test]
    fn test_empty_input_all_thread_modes() {
        for mode in [Mode::Sequential, Mode::Threaded] {
            let report = harness(mode, Some(4)).run(&[], &TaskKind::IsPrime).unwrap();
            assert!(report.results.is_empty());
        }
    }

    #[test]
    fn test_invalid_config_fails_before_work() {
        let config = HarnessConfig {
            mode: Mode::Threaded,
            worker_count: 0,
        };
        assert!(matches!(Harness::new(config), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_elapsed_covers_whole_run() {
        let items: Vec<u64> = (0..4).collect();
        let report = harness(Mode::Threaded, Some(2))
            .run(&items, &TaskKind::SimulatedIo { delay_ms: 5 })
            .unwrap();
        // 每块两项、每项5ms：耗时必然覆盖真实执行
        assert!(report.elapsed.as_millis() >= 5);
        assert_eq!(report.results.len(), 4);
    }
}
