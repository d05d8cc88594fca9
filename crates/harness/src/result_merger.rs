// result_merger.rs
// 结果合并器，按块发射顺序拼接各块结果并校验完整性。
use crate::error::{Error, Result};

/// 按块发射顺序拼接各块的结果序列。
/// 块是输入的连续切分，因此按此顺序拼接即还原全局输入顺序，
/// 与各块实际完成的先后无关。
/// 总长度与期望不符视为工作者错误，绝不静默返回截断的结果。
pub fn merge_chunk_results<O>(per_chunk: Vec<Vec<O>>, expected_len: usize) -> Result<Vec<O>> {
    let mut merged = Vec::with_capacity(expected_len);
    for chunk_results in per_chunk {
        merged.extend(chunk_results);
    }
    if merged.len() != expected_len {
        return Err(Error::WorkerError(format!(
            "结果数量 {} 与输入数量 {} 不一致",
            merged.len(),
            expected_len
        )));
    }
    Ok(merged)
}
