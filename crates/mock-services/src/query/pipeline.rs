//! 查询管线
//!
//! 将实体投影为 `serde_json::Value` 后按字段名处理，顺序固定：
//! 搜索、过滤、计数、排序、分页。

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use showcase_shared::Result;

use super::options::{QueryOptions, SortDirection, SortSpec};

/// 执行查询，返回当前页数据与分页前的总数
///
/// `searchable_fields` 为空时在所有顶层字符串字段中搜索
pub fn execute<T>(
    items: Vec<T>,
    options: &QueryOptions,
    searchable_fields: &[String],
) -> Result<(Vec<T>, usize)>
where
    T: Serialize,
{
    let mut rows = items
        .into_iter()
        .map(|item| Ok((serde_json::to_value(&item)?, item)))
        .collect::<Result<Vec<(Value, T)>>>()?;

    // 1. 搜索
    if let Some(q) = options.q.as_deref().filter(|q| !q.is_empty()) {
        let needle = q.to_lowercase();
        rows.retain(|(value, _)| matches_search(value, &needle, searchable_fields));
    }

    // 2. 过滤
    if !options.filters.is_empty() {
        rows.retain(|(value, _)| matches_filters(value, &options.filters));
    }

    // 3. 计数
    let count = rows.len();

    // 4. 排序
    if !options.sort.is_empty() {
        sort_rows(&mut rows, &options.sort);
    }

    // 5. 分页
    let page_size = options.page_size_or_default();
    let start = options.page_index().saturating_mul(page_size);
    let page = rows
        .into_iter()
        .skip(start)
        .take(page_size)
        .map(|(_, item)| item)
        .collect();

    Ok((page, count))
}

/// 关键字是否命中，只匹配字符串字段
fn matches_search(value: &Value, needle: &str, searchable_fields: &[String]) -> bool {
    let Value::Object(fields) = value else {
        return false;
    };

    let contains = |field: &Value| match field {
        Value::String(s) => s.to_lowercase().contains(needle),
        _ => false,
    };

    if searchable_fields.is_empty() {
        fields.values().any(contains)
    } else {
        searchable_fields
            .iter()
            .filter_map(|name| fields.get(name))
            .any(contains)
    }
}

/// 所有过滤条件都满足才保留
fn matches_filters(value: &Value, filters: &BTreeMap<String, Value>) -> bool {
    filters
        .iter()
        .filter(|(_, expected)| !expected.is_null())
        .all(|(name, expected)| {
            let actual = value.get(name).unwrap_or(&Value::Null);
            matches_filter(actual, expected)
        })
}

fn matches_filter(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(actual), Value::String(expected)) => actual
            .to_lowercase()
            .contains(&expected.to_lowercase()),
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}

/// 多键稳定排序，前一个键相等时比较下一个键
fn sort_rows<T>(rows: &mut [(Value, T)], sort: &[SortSpec]) {
    rows.sort_by(|(a, _), (b, _)| {
        for spec in sort {
            let left = a.get(&spec.field).unwrap_or(&Value::Null);
            let right = b.get(&spec.field).unwrap_or(&Value::Null);
            let ordering = match spec.direction {
                SortDirection::Asc => compare_values(left, right),
                SortDirection::Desc => compare_values(right, left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// JSON 值的全序比较
///
/// 不同类型按 null < bool < number < string < array < object 排列
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.total_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| compare_values(x, y))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
