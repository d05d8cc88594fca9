// 集成测试：用真实的 parallel-bench 工作者入口驱动进程池。
use harness::config::{HarnessConfig, Mode};
use harness::harness::Harness;
use harness::process_executor::{ProcessPool, WorkerCommand};
use harness::sequential_executor::run_sequential;
use harness::task::{TaskKind, WireTask};
use harness::worker::WORKER_ARG;

fn worker_cmd() -> WorkerCommand {
    WorkerCommand::new(
        env!("CARGO_BIN_EXE_parallel-bench"),
        vec![WORKER_ARG.to_string()],
    )
}

#[test]
fn test_matches_sequential() {
    let items: Vec<u64> = (10_000..10_100).collect();
    let task = TaskKind::IsPrime;

    let expected = run_sequential(&items, &|n| task.apply(n)).unwrap();
    let pool = ProcessPool::new(4).unwrap().with_worker_command(worker_cmd());
    let results = pool.run(&items, &task).unwrap();

    assert_eq!(results.len(), 100);
    assert_eq!(results, expected);
}

#[test]
fn test_submission_order_with_more_chunks_than_workers() {
    // 10项4工作者 => 5块：池内至多4个子进程，结果仍按提交顺序
    let items: Vec<u64> = (0..10).collect();
    let pool = ProcessPool::new(4).unwrap().with_worker_command(worker_cmd());
    let results = pool.run(&items, &TaskKind::SimulatedIo { delay_ms: 1 }).unwrap();

    let expected: Vec<(u64, bool)> = items.iter().map(|n| (*n, true)).collect();
    assert_eq!(results, expected);
}

#[test]
fn test_degenerate_worker_count() {
    // 3项8工作者：不丢项、不重复
    let items: Vec<u64> = vec![4, 9, 11];
    let pool = ProcessPool::new(8).unwrap().with_worker_command(worker_cmd());
    let results = pool.run(&items, &TaskKind::IsPrime).unwrap();
    assert_eq!(results, vec![(4, false), (9, false), (11, true)]);
}

#[test]
fn test_harness_multiprocess_mode() {
    let items: Vec<u64> = (10_000..10_050).collect();
    let config = HarnessConfig::new(Mode::Multiprocess, Some(2)).unwrap();
    let harness = Harness::new(config)
        .unwrap()
        .with_worker_command(worker_cmd());

    let report = harness.run(&items, &TaskKind::IsPrime).unwrap();
    assert_eq!(report.results.len(), items.len());
    // 全局顺序不变式：results[i] 对应 items[i]
    for (item, (n, _)) in items.iter().zip(report.results.iter()) {
        assert_eq!(item, n);
    }
}
