//! # rill-core Prelude
//!
//! ## 教案级说明（Why）
//! - **统一导入面**：为 Coder 实现 crate 提供稳定、浅路径的导入入口，
//!   避免业务代码中出现大量 `rill_core::coder::traits::...` 等深层路径；
//! - **范围控制**：仅收录跨模块高频依赖的契约类型；测试桩等边缘模块仍建议
//!   使用明确命名空间以提升可读性。
//!
//! ## 契约定义（What）
//! - **输出保证**：`use rill_core::prelude::*;` 后可稳定访问下列 re-export；
//! - **版本策略**：Prelude 仅收录稳定契约，新增导出遵循 SemVer 向后兼容。

pub use crate::coder::{
    ArcDynCoder, Coder, CoderContext, CoderRegistry, CoderSpec, DynCoder, DynCoderFactory,
    FnCoderFactory, TypedCoderAdapter,
};
pub use crate::error::{CoreError, Result, codes};
pub use crate::wrapper::{
    DynWrapping, TypeEntry, TypeRegistry, TypedWrapperFactory, WrapperFactory, Wrapping,
};
