// task.rs
// 任务边界：可跨进程序列化的任务trait，以及内置的基准任务（素数判定、模拟IO）。
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// 可在进程边界传递的任务函数抽象。
/// Rust 无法序列化闭包，因此进程模式下任务以命名值的形式传递，
/// 任务本身与其输入输出都要求可序列化。
/// 任务必须无状态、可安全重复执行，失败以 Err 显式返回而非哨兵值。
pub trait WireTask: Serialize + DeserializeOwned + Send + Sync {
    /// 单个输入项类型
    type Input: Serialize + DeserializeOwned + Clone + Send + Sync;
    /// 单个结果项类型
    type Output: Serialize + DeserializeOwned + Send;

    /// 对单个输入项执行任务
    fn apply(&self, item: &Self::Input) -> Result<Self::Output>;
}

/// 内置基准任务
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum TaskKind {
    /// 素数判定（CPU密集型）
    IsPrime,
    /// 模拟阻塞IO：每项休眠指定毫秒后返回（对应原始系统的阻塞网络请求场景）
    SimulatedIo { delay_ms: u64 },
}

impl WireTask for TaskKind {
    type Input = u64;
    type Output = (u64, bool);

    fn apply(&self, item: &u64) -> Result<(u64, bool)> {
        match self {
            TaskKind::IsPrime => Ok((*item, is_prime(*item))),
            TaskKind::SimulatedIo { delay_ms } => {
                std::thread::sleep(std::time::Duration::from_millis(*delay_ms));
                Ok((*item, true))
            }
        }
    }
}

/// 判断一个数是否为素数
/// 标准试除法：发现第一个因子立即返回，只试除到平方根。
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    // 用除法写上界，避免 i * i 在极大输入下溢出
    let mut i = 3u64;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}
