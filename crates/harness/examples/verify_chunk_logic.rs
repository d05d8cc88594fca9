//! verify_chunk_logic.rs
//!
//! 这个示例的目的是验证 chunk_splitter 的核心逻辑是否正确。
//! 它会遍历几组典型配置并执行以下操作：
//! 1. 对每组 (输入规模, 工作者数量) 调用 `split_chunks`。
//! 2. 打印每个块的区间与大小。
//! 3. 校验所有块拼回后与原始输入完全一致（无重叠、无缺漏）。

use harness::chunk_splitter::split_chunks;
use harness::error::Result;

fn main() -> Result<()> {
    println!("=== 验证分块逻辑 ===");

    // 典型配置：整除、有余数、块数多于工作者、工作者多于输入项
    let cases = [(8usize, 4usize), (10, 3), (10, 4), (3, 8), (0, 4), (7, 1)];

    for (len, workers) in cases {
        let items: Vec<u64> = (0..len as u64).collect();
        let chunks = split_chunks(&items, workers)?;
        println!(
            "\n输入 {} 项 / {} 个工作者 => {} 个块",
            len,
            workers,
            chunks.len()
        );
        for (chunk_id, chunk) in chunks.iter().enumerate() {
            println!("  块 {}: {} 项 {:?}", chunk_id, chunk.len(), chunk);
        }

        // 拼回后必须与原始输入一致
        let flat: Vec<u64> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
        assert_eq!(flat, items, "块集合未能还原输入");
        println!("  还原校验: 通过");
    }

    println!("\n=== 分块逻辑验证完成 ===");
    Ok(())
}
