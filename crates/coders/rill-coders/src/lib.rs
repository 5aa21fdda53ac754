#![warn(missing_docs)]

//! # rill-coders
//!
//! ## 教案意图（Why）
//! - **职责定位**：为各类 `rill-coder-*` 实现 crate 提供统一、稳定的编解码契约面，
//!   避免每个实现 crate 直接依赖完整的 `rill-core`；
//! - **架构价值**：通过集中 re-export 核心的 Coder/描述/注册中心稳定面，实现实现层
//!   的插拔替换，同时维持核心 crate 的演进节奏。
//!
//! ## 使用方式（How）
//! - 在实现 crate 中引入 `rill-coders`，即可访问 `Coder`、`CoderContext`、`CoderSpec`、
//!   注册中心与包装器能力等核心接口，并沿用 `rill-core` 的错误类型；
//! - 如需访问更底层的 `rill-core` 能力，可通过本 crate re-export 的模块扩展。
//!
//! ## 契约说明（What）
//! - 对外暴露的所有类型均来源于 `rill-core`，确保语义一致；
//! - 不额外引入状态或逻辑，纯粹扮演"接口整合层"。
//!
//! ## 风险提示（Trade-offs）
//! - 本 crate 为 re-export 形态，若核心层重构需同步更新此处映射。

/// 统一暴露核心错误类型。
pub use rill_core::CoreError;
/// 重新导出编解码契约模块，保持原有路径结构。
pub use rill_core::coder;
/// 暴露完整的错误模块，便于实现 crate 引用错误原因别名等类型。
pub use rill_core::error;
/// 暴露错误码常量命名空间。
pub use rill_core::error::codes;
/// 暴露统一的 `Result` 别名。
pub use rill_core::error::Result;
/// 重新导出包装器容器能力与类型解析设施。
pub use rill_core::wrapper;

/// 便捷 re-export：直接在 crate 根访问常用编解码接口。
pub use rill_core::{
    ArcDynCoder, Coder, CoderContext, CoderRegistry, CoderSpec, DynCoder, DynCoderFactory,
    DynWrapping, FnCoderFactory, OpaqueTypeEntry, TypeEntry, TypeRegistry, TypedCoderAdapter,
    TypedWrapperFactory, WrapperFactory, Wrapping,
};
