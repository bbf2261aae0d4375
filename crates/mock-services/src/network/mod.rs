//! 网络模拟模块
//!
//! 为 mock 服务注入延迟、抖动与随机故障。

pub mod simulator;

pub use simulator::{NetworkOptions, NetworkSimulator, SimulatorConfig};
