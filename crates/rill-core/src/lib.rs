#![deny(unsafe_code)]
#![allow(private_bounds)]
#![doc = "rill-core: 分布式数据处理管道序列化层的编解码核心契约。"]
#![doc = ""]
#![doc = "== 定位与边界 =="]
#![doc = "本 crate 仅定义跨进程可复原的编解码（Coder）契约：泛型层与对象层的双层抽象、"]
#![doc = "可移植的自描述记录（CoderSpec）、Coder/类型双注册中心，以及稳定错误域。"]
#![doc = "具体的字节级 Coder 实现位于 `crates/coders/` 下的扩展 crate，核心不内置任何业务格式。"]
#![doc = ""]
#![doc = "== 兼容性治理 =="]
#![doc = "本 crate 遵守语义化版本 2.0 (SemVer)。错误码、CoderSpec 的 `@type` 标签与"]
#![doc = "`wrapperType` 等属性键是跨进程契约的一部分，任何变更均视为破坏性变更。"]

mod sealed;

pub mod coder;
pub mod error;
pub mod prelude;
pub mod test_stubs;
pub mod wrapper;

pub use coder::{
    ArcDynCoder, Coder, CoderContext, CoderRegistry, CoderSpec, DynCoder, DynCoderFactory,
    FnCoderFactory, TypedCoderAdapter,
};
pub use error::{CoreError, ErrorCause, Result, codes};
pub use wrapper::{
    DynWrapping, OpaqueTypeEntry, TypeEntry, TypeRegistry, TypedWrapperFactory, WrapperFactory,
    Wrapping,
};
