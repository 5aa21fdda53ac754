#![deny(unsafe_code)]

//! # rill-coder-std
//!
//! ## 教案意图（Why）
//! - 提供管道日常使用的标准值 Coder：变长无符号整数、UTF-8 文本与原始字节序列；
//! - 三者均为确定性叶子 Coder，可直接充当组合型 Coder（如包装器适配器）的内层组件；
//! - 验证外部实现 crate 如何只依赖 `rill-coders` 契约面完成编解码、自描述与注册。
//!
//! ## 契约说明（What）
//! - 变长整数采用 LEB128；文本与字节序列在嵌套上下文携带变长长度前缀，
//!   在外层上下文直接占满流的剩余部分；
//! - [`register_standard_coders`] 将全部标签登记到给定注册中心，供跨进程重建使用。

mod bytes;
mod utf8;
mod varint;

pub use bytes::BytesCoder;
pub use utf8::Utf8Coder;
pub use varint::{VarUintCoder, read_varuint, write_varuint};

use std::sync::Arc;

use rill_coders::{
    ArcDynCoder, CoderRegistry, CoreError, FnCoderFactory, TypedCoderAdapter, codes,
};

/// 将标准 Coder 的全部重建工厂登记到给定注册中心。
///
/// # 契约说明（What）
/// - **前置条件**：注册中心尚未登记同名标签，否则返回 `coder.tag_duplicate`；
/// - **后置条件**：`rill:coder:varuint`/`rill:coder:utf8`/`rill:coder:bytes` 三个标签
///   均可通过 [`CoderRegistry::instantiate`] 重建。
pub fn register_standard_coders(registry: &CoderRegistry) -> Result<(), CoreError> {
    registry.register(leaf_factory(VarUintCoder::TAG, || {
        TypedCoderAdapter::new(VarUintCoder::new())
    }))?;
    registry.register(leaf_factory(Utf8Coder::TAG, || {
        TypedCoderAdapter::new(Utf8Coder::new())
    }))?;
    registry.register(leaf_factory(BytesCoder::TAG, || {
        TypedCoderAdapter::new(BytesCoder::new())
    }))?;
    Ok(())
}

/// 构造叶子 Coder 的重建工厂：拒绝任何嵌套组件，随后调用无参构造器。
fn leaf_factory<D>(
    tag: &'static str,
    constructor: impl Fn() -> D + Send + Sync + 'static,
) -> Box<dyn rill_coders::DynCoderFactory>
where
    D: rill_coders::DynCoder,
{
    Box::new(FnCoderFactory::new(tag, move |_, components| {
        if !components.is_empty() {
            return Err(CoreError::new(
                codes::CODER_ARITY_MISMATCH,
                format!("expecting 0 components, got {}", components.len()),
            ));
        }
        Ok(Arc::new(constructor()) as ArcDynCoder)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_coders::CoderSpec;

    #[test]
    fn standard_tags_are_reconstructible() {
        let registry = CoderRegistry::new();
        register_standard_coders(&registry).expect("register");
        for tag in [VarUintCoder::TAG, Utf8Coder::TAG, BytesCoder::TAG] {
            let coder = registry.instantiate(&CoderSpec::new(tag)).expect("instantiate");
            assert_eq!(coder.coder_spec().tag(), tag);
        }
    }

    #[test]
    fn leaf_factory_rejects_unexpected_components() {
        // Why: 叶子标签带组件说明描述记录损坏，必须快速失败而非静默丢弃。
        let registry = CoderRegistry::new();
        register_standard_coders(&registry).expect("register");
        let corrupt =
            CoderSpec::new(VarUintCoder::TAG).with_component(CoderSpec::new(BytesCoder::TAG));
        let err = registry
            .instantiate(&corrupt)
            .expect_err("corrupt spec must fail");
        assert_eq!(err.code(), codes::CODER_ARITY_MISMATCH);
    }
}
