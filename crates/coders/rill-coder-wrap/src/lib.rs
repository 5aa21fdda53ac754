#![deny(unsafe_code)]

//! # rill-coder-wrap
//!
//! ## 教案意图（Why）
//! - 管道中大量值类型是"单数据值容器"：业务记录被包进恰好持有一个 datum 的包装器里，
//!   字节表示却完全由内层数据值的 Coder 决定；
//! - 本 crate 提供包装器 Coder 适配器：编码端拆开包装器、委托内层 Coder，
//!   解码端构造空包装器、回填解码结果，字节层对包装器零开销、完全透明。
//!
//! ## 契约说明（What）
//! - 适配器恰好携带一个组件 Coder（arity = 1），可移植描述以 `@type = rill:coder:wrap`
//!   标识自身，以 `wrapperType` 属性记录包装器类型名；
//! - 确定性与内层组件同进退：内层确定则整体确定，内层的解释文案原样上抛；
//! - 跨进程重建经 [`WrapperCoderFactory`] 完成，包装器类型名由类型注册中心解析。

mod wrap;

pub use wrap::{
    ATTR_WRAPPER_TYPE, DynWrapperCoder, WRAPPER_CODER_TAG, WrapperCoder, WrapperCoderFactory,
    register_wrapper_coder,
};
