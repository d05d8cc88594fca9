// chunk_splitter.rs
// 分块器，负责将输入序列按工作者数量切分为连续、有序、无重叠无缺漏的块。
use crate::error::{Error, Result};

/// 将输入切分为连续的块。
///
/// 块大小为 `items.len() / worker_count`（整除），最后一块吸收余数，
/// 因此实际块数在整除不尽时可能多于或少于 `worker_count`。
/// 当 `worker_count > items.len()` 时整除结果为0，此时退化为
/// 每项一块（共 `items.len()` 块），保证任何输入项都不会被丢弃。
/// 空输入产生零个块。
pub fn split_chunks<I>(items: &[I], worker_count: usize) -> Result<Vec<&[I]>> {
    if worker_count == 0 {
        return Err(Error::ConfigError(
            "工作者数量必须为正整数".to_string(),
        ));
    }
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = items.len() / worker_count;
    if chunk_size == 0 {
        // 工作者多于输入项：退化为每项一块，不丢弃任何数据
        return Ok(items.chunks(1).collect());
    }

    let num_chunks = items.len() / chunk_size;
    let mut chunks = Vec::with_capacity(num_chunks);
    for chunk_id in 0..num_chunks {
        let start = chunk_id * chunk_size;
        // 最后一块延伸到序列末尾，吸收余数
        let end = if chunk_id == num_chunks - 1 {
            items.len()
        } else {
            start + chunk_size
        };
        chunks.push(&items[start..end]);
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 校验块集合恰好还原输入：连续、无重叠、无缺漏
    fn assert_covers(chunks: &[&[u64]], items: &[u64]) {
        let flat: Vec<u64> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
        assert_eq!(flat, items);
    }

    #[test]
    fn test_even_split() {
        let items: Vec<u64> = (0..8).collect();
        let chunks = split_chunks(&items, 4).unwrap();
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.len() == 2));
        assert_covers(&chunks, &items);
    }

    #[test]
    fn test_last_chunk_absorbs_remainder() {
        let items: Vec<u64> = (0..10).collect();
        let chunks = split_chunks(&items, 3).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 3);
        assert_eq!(chunks[1].len(), 3);
        assert_eq!(chunks[2].len(), 4);
        assert_covers(&chunks, &items);
    }

    #[test]
    fn test_chunk_count_may_exceed_workers() {
        // 10项4工作者：块大小2，产生5块
        let items: Vec<u64> = (0..10).collect();
        let chunks = split_chunks(&items, 4).unwrap();
        assert_eq!(chunks.len(), 5);
        assert_covers(&chunks, &items);
    }

    #[test]
    fn test_degenerate_more_workers_than_items() {
        // 3项8工作者：退化为每项一块，不丢数据
        let items: Vec<u64> = vec![4, 9, 11];
        let chunks = split_chunks(&items, 8).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 1));
        assert_covers(&chunks, &items);
    }

    #[test]
    fn test_single_worker() {
        let items: Vec<u64> = (0..7).collect();
        let chunks = split_chunks(&items, 1).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_covers(&chunks, &items);
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<u64> = Vec::new();
        let chunks = split_chunks(&items, 4).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let items: Vec<u64> = vec![1, 2, 3];
        assert!(matches!(
            split_chunks(&items, 0),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_completeness_over_worker_range() {
        let items: Vec<u64> = (0..23).collect();
        for workers in 1..=items.len() {
            let chunks = split_chunks(&items, workers).unwrap();
            assert_covers(&chunks, &items);
        }
    }
}
