// config.rs
// 执行模式枚举与基准配置结构体，包含工作者数量的按模式默认值和config.json加载。
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// 线程模式的默认工作者数量
pub const DEFAULT_THREAD_WORKERS: usize = 8;

/// 执行模式：顺序执行、多线程、多进程
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// 单线程顺序执行
    Sequential,
    /// 多线程并行（共享内存）
    Threaded,
    /// 多进程并行（隔离内存，序列化通信）
    Multiprocess,
}

impl Mode {
    /// 模式名称，用于日志与表格输出
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Sequential => "sequential",
            Mode::Threaded => "threaded",
            Mode::Multiprocess => "multiprocess",
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    /// 非法模式字符串属于配置错误，在任何任务开始前失败
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sequential" => Ok(Mode::Sequential),
            "threaded" => Ok(Mode::Threaded),
            "multiprocess" => Ok(Mode::Multiprocess),
            other => Err(Error::ConfigError(format!(
                "未知的执行模式 '{}'（可选: sequential / threaded / multiprocess）",
                other
            ))),
        }
    }
}

/// 用于直接反序列化 config.json 的结构体
/// 使用 serde 属性来处理字段名不匹配的问题 (e.g., "workers" -> worker_count)
#[derive(Debug, Deserialize)]
pub(crate) struct HarnessConfigJson {
    mode: String,
    #[serde(rename = "workers")]
    worker_count: Option<usize>,
}

/// 基准配置，控制执行模式与工作者数量
/// 工作者数量未指定时按模式取默认值：
/// 顺序执行为1，线程模式为8，进程模式为主机逻辑核心数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// 执行模式
    pub mode: Mode,
    /// 工作者数量（线程数或进程数），必须为正
    pub worker_count: usize,
}

impl HarnessConfig {
    /// 创建配置；worker_count 为 None 时取模式默认值
    pub fn new(mode: Mode, worker_count: Option<usize>) -> Result<Self> {
        let worker_count = worker_count.unwrap_or_else(|| Self::default_workers(mode));
        let config = Self { mode, worker_count };
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 配置文件加载，CLI 传入的工作者数量优先于文件内容
    pub fn from_config_file(path: &Path, worker_override: Option<usize>) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigError(format!(
                "配置文件 {} 不存在",
                path.display()
            )));
        }
        let mut file = File::open(path)
            .map_err(|e| Error::ConfigError(format!("打开配置文件失败: {}", e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| Error::ConfigError(format!("读取配置文件失败: {}", e)))?;
        let config_json: HarnessConfigJson = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("解析配置文件失败: {}", e)))?;
        let mode = Mode::from_str(&config_json.mode)?;
        Self::new(mode, worker_override.or(config_json.worker_count))
    }

    /// 按模式返回默认工作者数量
    pub fn default_workers(mode: Mode) -> usize {
        match mode {
            Mode::Sequential => 1,
            Mode::Threaded => DEFAULT_THREAD_WORKERS,
            Mode::Multiprocess => num_cpus::get().max(1),
        }
    }

    /// 校验配置，非法值快速失败
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(Error::ConfigError(
                "工作者数量必须为正整数".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for HarnessConfig {
    /// 默认配置：顺序执行，单工作者
    fn default() -> Self {
        Self {
            mode: Mode::Sequential,
            worker_count: 1,
        }
    }
}
