//! 编解码契约的聚合入口：上下文、双层抽象、可移植描述与注册中心。

pub mod context;
pub mod registry;
pub mod spec;
pub mod traits;

pub use context::CoderContext;
pub use registry::{CoderRegistry, DynCoderFactory, FnCoderFactory};
pub use spec::CoderSpec;
pub use traits::{ArcDynCoder, Coder, DynCoder, TypedCoderAdapter};
