// main.rs
// 基准命令行入口：解析参数、生成随机数据、选择执行策略并输出耗时对比。
// 同时承载进程模式的工作者入口（`parallel-bench worker`）。
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use harness::config::{HarnessConfig, Mode};
use harness::harness::Harness;
use harness::task::TaskKind;
use harness::worker::run_worker;
use prettytable::{row, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parallel-bench", about = "顺序/多线程/多进程三种执行策略的基准对比")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// 输入数组的元素数量
    #[arg(long, default_value_t = 400)]
    limit: usize,

    /// 执行模式（sequential / threaded / multiprocess）
    #[arg(long, default_value = "sequential")]
    mode: String,

    /// 工作者数量，缺省时按模式取默认值（线程8个，进程为逻辑核心数）
    #[arg(long)]
    workers: Option<usize>,

    /// 随机种子，指定后输入数据可重复
    #[arg(long)]
    seed: Option<u64>,

    /// 任务类型（is-prime / simulated-io）
    #[arg(long, default_value = "is-prime")]
    task: String,

    /// simulated-io 任务每项的休眠毫秒数
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,

    /// 三种模式各跑一遍同一份数据并输出对比表格
    #[arg(long)]
    compare: bool,

    /// 以JSON打印完整结果序列（默认只打印汇总表格）
    #[arg(long)]
    json: bool,

    /// 从JSON配置文件读取模式与工作者数量（CLI的--workers优先）
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// 进程模式的工作者入口：stdin读块请求，stdout写块结果
    #[command(hide = true)]
    Worker,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Worker) = cli.command {
        // 工作者模式：stdout是结果管道，不初始化任何stdout日志
        let stdin = io::stdin();
        let stdout = io::stdout();
        run_worker::<TaskKind>(stdin.lock(), stdout.lock())?;
        return Ok(());
    }

    // 日志走stderr，stdout留给表格与JSON输出
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let task = parse_task(&cli.task, cli.delay_ms)?;
    let items = generate_data(cli.limit, cli.seed);

    if cli.compare {
        return run_comparison(&items, &task, cli.workers);
    }

    let config = match &cli.config {
        Some(path) => HarnessConfig::from_config_file(path, cli.workers)
            .with_context(|| format!("加载配置文件 {} 失败", path.display()))?,
        None => HarnessConfig::new(cli.mode.parse()?, cli.workers)?,
    };

    let report = Harness::new(config)?.run(&items, &task)?;

    if cli.json {
        println!("{}", serde_json::to_string(&report.results)?);
    } else {
        let mut table = Table::new();
        table.add_row(row!["模式", "工作者", "输入项", "耗时(ms)", "素数个数"]);
        table.add_row(summary_row(&report));
        table.printstd();
    }
    Ok(())
}

/// 三种模式各跑一遍同一份数据，校验结果等价并打印对比表格
fn run_comparison(items: &[u64], task: &TaskKind, workers: Option<usize>) -> anyhow::Result<()> {
    let mut table = Table::new();
    table.add_row(row!["模式", "工作者", "输入项", "耗时(ms)", "素数个数"]);

    let mut baseline: Option<Vec<(u64, bool)>> = None;
    for mode in [Mode::Sequential, Mode::Threaded, Mode::Multiprocess] {
        let config = HarnessConfig::new(mode, workers)?;
        let report = Harness::new(config)?.run(items, task)?;
        table.add_row(summary_row(&report));

        match &baseline {
            Some(expected) => {
                if expected != &report.results {
                    bail!("模式 {} 的结果与顺序模式不一致", mode.as_str());
                }
            }
            None => baseline = Some(report.results),
        }
    }

    table.printstd();
    println!("三种模式结果完全一致");
    Ok(())
}

fn summary_row(report: &harness::harness::RunReport<(u64, bool)>) -> prettytable::Row {
    let primes = report.results.iter().filter(|(_, p)| *p).count();
    row![
        report.mode.as_str(),
        report.worker_count,
        report.results.len(),
        report.elapsed.as_millis(),
        primes
    ]
}

/// 生成随机输入数据，范围 [10000, 100000)
fn generate_data(limit: usize, seed: Option<u64>) -> Vec<u64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..limit).map(|_| rng.gen_range(10_000..100_000)).collect()
}

fn parse_task(name: &str, delay_ms: u64) -> anyhow::Result<TaskKind> {
    match name {
        "is-prime" => Ok(TaskKind::IsPrime),
        "simulated-io" => Ok(TaskKind::SimulatedIo { delay_ms }),
        other => bail!("未知任务 '{}'（可选: is-prime / simulated-io）", other),
    }
}
