use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::coder::spec::CoderSpec;
use crate::coder::traits::object::ArcDynCoder;
use crate::error::codes;
use crate::{CoreError, sealed::Sealed};

/// `DynCoderFactory` 定义按 `@type` 标签重建对象层 Coder 的工厂契约。
///
/// # 设计初衷（Why）
/// - 跨进程重建只共享"标签 → 工厂"的查表协定，工厂负责把描述记录还原为可用实例；
/// - 嵌套组件在派发前已由注册中心递归重建完毕，工厂只需校验并消费自己的那一层，
///   组合递归永远不落入具体 Coder 的实现。
///
/// # 契约说明（What）
/// - **前置条件**：`instantiate` 收到的 `spec.tag()` 与 [`tag`](Self::tag) 一致；
///   `components` 与 `spec.components()` 一一对应（已重建）；
/// - **后置条件**：成功返回的实例满足 [`DynCoder`](crate::DynCoder) 的全部契约；
/// - **错误语义**：属性缺失返回 `coder.spec_invalid`，组件数量不符返回
///   `coder.arity_mismatch`，均为快速失败且不可重试。
pub trait DynCoderFactory: Send + Sync + 'static + Sealed {
    /// 工厂服务的 `@type` 判别标签。
    fn tag(&self) -> &str;

    /// 基于描述记录与已重建的组件序列实例化 Coder。
    fn instantiate(
        &self,
        spec: &CoderSpec,
        components: Vec<ArcDynCoder>,
    ) -> crate::Result<ArcDynCoder, CoreError>;
}

/// `FnCoderFactory` 将构造闭包包装为 [`DynCoderFactory`]，服务无属性或简单属性的标签。
///
/// # 设计初衷（Why）
/// - 多数叶子 Coder 的重建只是"new 一个实例"，为其逐一手写工厂结构体是纯样板；
/// - 复杂工厂（如包装器适配器）仍应实现独立类型以承载自己的依赖。
///
/// # 风险提示（Trade-offs）
/// - 若闭包捕获状态，请确保满足 `Send + Sync + 'static` 要求，避免破坏线程安全。
pub struct FnCoderFactory<F>
where
    F: Fn(&CoderSpec, Vec<ArcDynCoder>) -> crate::Result<ArcDynCoder, CoreError>
        + Send
        + Sync
        + 'static,
{
    tag: Cow<'static, str>,
    constructor: F,
}

impl<F> FnCoderFactory<F>
where
    F: Fn(&CoderSpec, Vec<ArcDynCoder>) -> crate::Result<ArcDynCoder, CoreError>
        + Send
        + Sync
        + 'static,
{
    /// 以标签与构造闭包创建工厂。
    pub fn new(tag: impl Into<Cow<'static, str>>, constructor: F) -> Self {
        Self {
            tag: tag.into(),
            constructor,
        }
    }
}

impl<F> DynCoderFactory for FnCoderFactory<F>
where
    F: Fn(&CoderSpec, Vec<ArcDynCoder>) -> crate::Result<ArcDynCoder, CoreError>
        + Send
        + Sync
        + 'static,
{
    fn tag(&self) -> &str {
        &self.tag
    }

    fn instantiate(
        &self,
        spec: &CoderSpec,
        components: Vec<ArcDynCoder>,
    ) -> crate::Result<ArcDynCoder, CoreError> {
        (self.constructor)(spec, components)
    }
}

/// `CoderRegistry` 是 `@type` 标签到重建工厂的进程内注册中心。
///
/// # 设计背景（Why）
/// - 作为"可移植对象解析设施"，注册中心独占组合递归：先自底向上重建全部嵌套组件，
///   再按标签派发到对应工厂，使各 Coder 实现保持单层视角；
/// - 注册阶段集中在进程启动期，此后以读为主，`RwLock` 读路径无争用成本。
///
/// # 契约说明（What）
/// - **前置条件**：同一标签只允许注册一次，重复注册返回 `coder.tag_duplicate`；
/// - **后置条件**：`instantiate` 成功返回的实例可跨线程共享；
/// - **错误语义**：未注册标签返回 `coder.tag_unknown`；组件重建失败原样上抛。
#[derive(Default)]
pub struct CoderRegistry {
    factories: RwLock<HashMap<String, Box<dyn DynCoderFactory>>>,
}

impl CoderRegistry {
    /// 创建空注册中心。
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册新的重建工厂。
    pub fn register(&self, factory: Box<dyn DynCoderFactory>) -> crate::Result<(), CoreError> {
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let tag = factory.tag().to_owned();
        if factories.contains_key(&tag) {
            return Err(CoreError::new(
                codes::CODER_TAG_DUPLICATE,
                format!("coder tag `{}` is already registered", tag),
            ));
        }
        factories.insert(tag, factory);
        Ok(())
    }

    /// 从可移植描述记录递归重建对象层 Coder。
    ///
    /// # 行为逻辑（How）
    /// 1. 对 `spec.components()` 逐个递归调用自身，得到已重建的组件序列；
    /// 2. 按 `spec.tag()` 查表取工厂，未命中返回 `coder.tag_unknown`；
    /// 3. 将描述与组件交给工厂完成最后一层组装。
    pub fn instantiate(&self, spec: &CoderSpec) -> crate::Result<ArcDynCoder, CoreError> {
        let components = spec
            .components()
            .iter()
            .map(|component| self.instantiate(component))
            .collect::<crate::Result<Vec<_>, CoreError>>()?;
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let factory = factories.get(spec.tag()).ok_or_else(|| {
            CoreError::new(
                codes::CODER_TAG_UNKNOWN,
                format!("no coder factory registered for tag `{}`", spec.tag()),
            )
        })?;
        factory.instantiate(spec, components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::coder::traits::object::TypedCoderAdapter;
    use crate::test_stubs::coder::Fixed32Coder;

    fn fixed32_factory() -> Box<dyn DynCoderFactory> {
        Box::new(FnCoderFactory::new(Fixed32Coder::TAG, |_, components| {
            if !components.is_empty() {
                return Err(CoreError::new(
                    codes::CODER_ARITY_MISMATCH,
                    format!("expecting 0 components, got {}", components.len()),
                ));
            }
            Ok(Arc::new(TypedCoderAdapter::new(Fixed32Coder::new())) as ArcDynCoder)
        }))
    }

    #[test]
    fn duplicate_tag_registration_is_rejected() {
        // Why: 同一标签两个工厂会让跨进程重建结果依赖注册顺序，必须快速失败。
        let registry = CoderRegistry::new();
        registry.register(fixed32_factory()).expect("first register");
        let err = registry
            .register(fixed32_factory())
            .expect_err("duplicate must fail");
        assert_eq!(err.code(), codes::CODER_TAG_DUPLICATE);
    }

    #[test]
    fn unknown_tag_fails_with_stable_code() {
        // Why: 版本漂移产生的未知标签应表现为确定的规划期错误。
        let registry = CoderRegistry::new();
        let err = registry
            .instantiate(&CoderSpec::new("rill:coder:unknown"))
            .expect_err("unknown tag must fail");
        assert_eq!(err.code(), codes::CODER_TAG_UNKNOWN);
    }

    #[test]
    fn instantiate_dispatches_on_tag() {
        let registry = CoderRegistry::new();
        registry.register(fixed32_factory()).expect("register");
        let coder = registry
            .instantiate(&CoderSpec::new(Fixed32Coder::TAG))
            .expect("instantiate");
        assert_eq!(coder.coder_spec().tag(), Fixed32Coder::TAG);
    }
}
