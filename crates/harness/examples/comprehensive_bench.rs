use harness::config::{HarnessConfig, Mode};
use harness::error::Result;
use harness::harness::Harness;
use harness::task::TaskKind;
use prettytable::{row, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 综合基准示例：同一份随机数据分别以顺序模式与线程模式执行素数判定，
/// 校验两种模式结果完全一致，并用表格对比耗时。
/// 进程模式依赖宿主二进制的工作者入口，需通过 parallel-bench 本体运行。
fn main() -> Result<()> {
    println!("=== 综合基准：顺序 vs 多线程 ===");

    let items = generate_data(2_000, 42);
    println!("已生成 {} 个随机数（范围 [10000, 100000)）", items.len());

    let mut table = Table::new();
    table.add_row(row!["模式", "工作者", "输入项", "耗时(ms)", "素数个数"]);

    let mut baseline: Option<Vec<(u64, bool)>> = None;
    for (mode, workers) in [(Mode::Sequential, None), (Mode::Threaded, Some(4))] {
        let config = HarnessConfig::new(mode, workers)?;
        let harness = Harness::new(config)?;
        let report = harness.run(&items, &TaskKind::IsPrime)?;

        let primes = report.results.iter().filter(|(_, p)| *p).count();
        table.add_row(row![
            report.mode.as_str(),
            report.worker_count,
            report.results.len(),
            report.elapsed.as_millis(),
            primes
        ]);

        match &baseline {
            Some(expected) => {
                let matches = expected == &report.results;
                println!("模式等价性检查 ({}): {}", report.mode.as_str(), if matches { "通过" } else { "失败" });
            }
            None => baseline = Some(report.results),
        }
    }

    table.printstd();
    println!("=== 综合基准完成 ===");
    Ok(())
}

/// 生成固定种子的随机输入，保证示例可重复
fn generate_data(limit: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..limit).map(|_| rng.gen_range(10_000..100_000)).collect()
}
