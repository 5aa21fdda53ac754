//! 测试桩命名空间，集中暴露官方维护的最小 Coder 与包装器实现，供各 crate 的
//! 单元测试、集成测试与示例复用。
//!
//! # 设计背景（Why）
//! - 统一维护常见桩对象，避免在各处重复定义等价的测试类型；
//! - 当核心契约演进时，通过单点更新保证所有测试同步适配。
//!
//! # 使用方式（How）
//! - 通过 `use rill_core::test_stubs::coder::*;` 引入需要的桩类型；
//! - 桩对象是普通的公开类型，不依赖任何测试框架。

pub mod coder;
