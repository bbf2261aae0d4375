//! 通用工具函数
//!
//! ID 生成、异步延迟、数组打乱、slug 化以及模拟故障的包装器。
//! 全部为无状态的纯函数（随机数除外）。

use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use showcase_shared::ShowcaseError;

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 随机部分的长度
const RANDOM_ID_LEN: usize = 8;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("静态正则表达式无效"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("静态正则表达式无效"));

/// 生成随机 ID
///
/// 格式为 `{prefix}{8 位 base36 随机字符}`，如 `prod_k3v9x0aa`
pub fn generate_random_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let random_part: String = (0..RANDOM_ID_LEN)
        .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
        .collect();
    format!("{prefix}{random_part}")
}

/// 生成自增数字 ID
///
/// 返回现有最大 ID 加一，没有现有 ID 时返回 `start_from`
pub fn generate_incremental_id(existing_ids: &[i64], start_from: i64) -> i64 {
    existing_ids
        .iter()
        .max()
        .map_or(start_from, |max| max + 1)
}

/// 异步等待指定毫秒数
pub async fn delay(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// 按索引批量生成数据
pub fn generate_mock_data<T, F>(count: usize, generator: F) -> Vec<T>
where
    F: FnMut(usize) -> T,
{
    (0..count).map(generator).collect()
}

/// 返回打乱顺序后的副本，原切片不变
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    let mut result = items.to_vec();
    result.shuffle(&mut rand::thread_rng());
    result
}

/// 转换为 URL 友好的 slug
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let hyphenated = SEPARATORS.replace_all(&stripped, "-");
    hyphenated.trim_matches('-').to_string()
}

/// 以给定概率在调用前注入失败
///
/// 命中概率时直接返回 `ShowcaseError::Network`，不调用 `operation`
pub async fn maybe_fail<F, Fut, T>(
    operation: F,
    error_rate: f64,
    error_message: &str,
) -> Result<T, ShowcaseError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ShowcaseError>>,
{
    if roll(error_rate) {
        return Err(ShowcaseError::Network(error_message.to_string()));
    }
    operation().await
}

/// 在调用前等待 `[min, max)` 范围内的随机时长
pub async fn with_random_delay<F, Fut, T>(operation: F, min: Duration, max: Duration) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let wait = if max > min {
        rand::thread_rng().gen_range(min..max)
    } else {
        min
    };
    tokio::time::sleep(wait).await;
    operation().await
}

/// 抽取 [0, 1) 均匀随机数并与概率比较
pub(crate) fn roll(probability: f64) -> bool {
    probability > 0.0 && rand::thread_rng().gen_range(0.0..1.0) < probability
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_random_id_format() {
        let id = generate_random_id("prod_");
        assert!(id.starts_with("prod_"));
        assert_eq!(id.len(), "prod_".len() + RANDOM_ID_LEN);
        assert!(
            id["prod_".len()..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_generate_random_id_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_random_id("")).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generate_incremental_id() {
        assert_eq!(generate_incremental_id(&[], 1), 1);
        assert_eq!(generate_incremental_id(&[3, 9, 4], 1), 10);
        assert_eq!(generate_incremental_id(&[-5], 100), -4);
    }

    #[test]
    fn test_generate_mock_data_passes_index() {
        let data = generate_mock_data(4, |i| i * 10);
        assert_eq!(data, vec![0, 10, 20, 30]);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let original: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle(&original);
        assert_eq!(shuffled.len(), original.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, original);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Home & Garden  "), "home-garden");
        assert_eq!(slugify("snake_case--and   spaces"), "snake-case-and-spaces");
        assert_eq!(slugify("--Trim Me--"), "trim-me");
    }

    #[test]
    fn test_roll_bounds() {
        assert!(!roll(0.0));
        assert!(!roll(-1.0));
        assert!((0..100).all(|_| roll(1.0)));
    }

    #[tokio::test]
    async fn test_maybe_fail() {
        let ok = maybe_fail(|| async { Ok(7) }, 0.0, "boom").await;
        assert_eq!(ok.unwrap(), 7);

        let err = maybe_fail(|| async { Ok(7) }, 1.0, "boom").await.unwrap_err();
        assert!(matches!(err, ShowcaseError::Network(ref msg) if msg == "boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_random_delay_waits_at_least_min() {
        let start = tokio::time::Instant::now();
        let value = with_random_delay(
            || async { "done" },
            Duration::from_millis(100),
            Duration::from_millis(200),
        )
        .await;
        let elapsed = start.elapsed();

        assert_eq!(value, "done");
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay() {
        let start = tokio::time::Instant::now();
        delay(250).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
