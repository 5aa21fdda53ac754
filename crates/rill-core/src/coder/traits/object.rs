use std::any::Any;
use std::io::{Read, Write};
use std::sync::Arc;

use crate::coder::context::CoderContext;
use crate::coder::spec::CoderSpec;
use crate::coder::traits::generic::Coder;
use crate::error::codes;
use crate::{CoreError, sealed::Sealed};

/// 共享所有权的对象层 Coder 引用，组合树与注册中心统一使用该形态。
pub type ArcDynCoder = Arc<dyn DynCoder>;

/// `DynCoder` 为对象层提供编解码能力的对象安全接口。
///
/// # 设计初衷（Why）
/// - Coder 注册中心需要存放多种实现的 trait 对象，跨进程重建路径在不知道具体泛型的
///   情况下组装 Coder 树；
/// - 与泛型 [`Coder`] 在功能上保持等价，差异仅在于类型擦除与运行时检查。
///
/// # 行为逻辑（How）
/// - `encode_dyn` 接收 `Any` 引用，尝试下转型为具体的值类型；
/// - `decode_dyn` 将解码结果打包为 `Box<dyn Any + Send + Sync>`，供上层再做类型还原；
/// - `components`/`coder_spec`/`verify_deterministic` 与泛型层语义一致。
///
/// # 契约说明（What）
/// - **前置条件**：调用方必须保证传入的 `Any` 与目标类型一致，否则得到
///   `coder.type_mismatch` 错误；
/// - **后置条件**：成功解码后，上层需按双方约定的类型信息进行 `downcast`；
/// - **性能权衡**：相较泛型层额外引入一次虚表跳转与一次堆分配。
pub trait DynCoder: Send + Sync + 'static + Sealed {
    /// 对象安全的编码入口。
    #[allow(unused_parens)]
    fn encode_dyn(
        &self,
        value: &(dyn Any + Send + Sync),
        out: &mut dyn Write,
        ctx: &CoderContext,
    ) -> crate::Result<(), CoreError>;

    /// 对象安全的解码入口。
    fn decode_dyn(
        &self,
        input: &mut dyn Read,
        ctx: &CoderContext,
    ) -> crate::Result<Box<dyn Any + Send + Sync>, CoreError>;

    /// 返回嵌套 Coder 序列。
    fn components(&self) -> Vec<ArcDynCoder>;

    /// 产出可移植的自描述记录。
    fn coder_spec(&self) -> CoderSpec;

    /// 断言字节级确定性。
    fn verify_deterministic(&self) -> crate::Result<(), CoreError>;
}

impl std::fmt::Debug for dyn DynCoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynCoder").finish_non_exhaustive()
    }
}

/// `TypedCoderAdapter` 将泛型 [`Coder`] 装箱为对象安全的 [`DynCoder`]。
///
/// # 设计初衷（Why）
/// - 让注册中心与组合树可以统一管理泛型实现与对象实现；
/// - 组合型 Coder 通过该适配器对外暴露内层组件，而自身仍走零成本泛型路径。
///
/// # 行为逻辑（How）
/// - 内部以 `Arc` 持有具体泛型实现，适配器与原实例共享所有权；
/// - `encode_dyn` 使用 `Any::downcast_ref` 做类型还原；
/// - `decode_dyn` 将泛型结果重新装箱，供调用方恢复为原始类型。
///
/// # 契约说明（What）
/// - **前置条件**：调用方需传入正确的 `Value` 类型；
/// - 类型不匹配时返回 `CoreError::new(codes::CODER_TYPE_MISMATCH, ..)`。
///
/// # 风险提示（Trade-offs）
/// - 每次调用都涉及一次 `downcast` 检查；热路径推荐直接使用泛型 [`Coder`]。
pub struct TypedCoderAdapter<C>
where
    C: Coder,
{
    inner: Arc<C>,
}

impl<C> TypedCoderAdapter<C>
where
    C: Coder,
{
    /// 使用给定的泛型实现构造适配器。
    pub fn new(inner: C) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// 基于共享引用构造适配器，与原实例共享所有权。
    pub fn from_arc(inner: Arc<C>) -> Self {
        Self { inner }
    }

    /// 访问内部泛型实现。
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C> DynCoder for TypedCoderAdapter<C>
where
    C: Coder,
{
    #[allow(unused_parens)]
    fn encode_dyn(
        &self,
        value: &(dyn Any + Send + Sync),
        out: &mut dyn Write,
        ctx: &CoderContext,
    ) -> crate::Result<(), CoreError> {
        match value.downcast_ref::<C::Value>() {
            Some(typed) => self.inner.encode(typed, out, ctx),
            None => Err(CoreError::new(
                codes::CODER_TYPE_MISMATCH,
                format!(
                    "期待类型 `{}`，实际收到不兼容类型",
                    std::any::type_name::<C::Value>(),
                ),
            )),
        }
    }

    fn decode_dyn(
        &self,
        input: &mut dyn Read,
        ctx: &CoderContext,
    ) -> crate::Result<Box<dyn Any + Send + Sync>, CoreError> {
        let value = self.inner.decode(input, ctx)?;
        Ok(Box::new(value))
    }

    fn components(&self) -> Vec<ArcDynCoder> {
        self.inner.components()
    }

    fn coder_spec(&self) -> CoderSpec {
        self.inner.coder_spec()
    }

    fn verify_deterministic(&self) -> crate::Result<(), CoreError> {
        self.inner.verify_deterministic()
    }
}
