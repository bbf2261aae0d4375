//! 查询模块
//!
//! 列表查询的参数、结果信封，以及搜索 → 过滤 → 计数 → 排序 → 分页的处理管线。

pub mod options;
pub mod pipeline;
pub mod result;

pub use options::{DEFAULT_PAGE_SIZE, QueryOptions, SortDirection, SortSpec};
pub use pipeline::{compare_values, execute};
pub use result::{APPLICATION_JSON, Blob, DataResult, EntityResult};
