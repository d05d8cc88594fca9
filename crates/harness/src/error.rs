// error.rs
// 定义项目通用的错误类型（如配置、任务、工作者、IO、序列化等）和Result类型。
use std::fmt;
use std::io;

/// 项目通用错误类型，涵盖配置、任务执行、工作者、IO、序列化等错误
#[derive(Debug)]
pub enum Error {
    /// 配置错误（非法模式、工作者数量为0等），在任何任务开始前快速失败
    ConfigError(String),
    /// 单个任务项执行失败
    TaskError(String),
    /// 工作者异常终止（线程panic、子进程崩溃、结果序列不完整）
    WorkerError(String),
    /// IO错误
    Io(io::Error),
    /// 序列化/反序列化错误
    Serde(serde_json::Error),
}

/// 通用结果类型
pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serde(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigError(msg) => write!(f, "配置错误: {}", msg),
            Error::TaskError(msg) => write!(f, "任务错误: {}", msg),
            Error::WorkerError(msg) => write!(f, "工作者错误: {}", msg),
            Error::Io(e) => write!(f, "IO错误: {}", e),
            Error::Serde(e) => write!(f, "序列化错误: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Serde(e) => Some(e),
            _ => None,
        }
    }
}
