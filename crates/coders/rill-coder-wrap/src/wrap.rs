use std::any::Any;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::sync::Arc;

use rill_coders::{
    ArcDynCoder, Coder, CoderContext, CoderRegistry, CoderSpec, CoreError, DynCoder,
    DynCoderFactory, DynWrapping, TypeRegistry, TypedCoderAdapter, WrapperFactory, Wrapping, codes,
};

/// 包装器 Coder 适配器在可移植描述中的判别标签。
pub const WRAPPER_CODER_TAG: &str = "rill:coder:wrap";

/// 记录包装器类型名的属性键，值为跨进程稳定的全限定类型名。
pub const ATTR_WRAPPER_TYPE: &str = "wrapperType";

/// `WrapperCoder` 是泛型层的包装器 Coder 适配器。
///
/// # 设计初衷（Why）
/// - 包装器本身不携带任何需要编码的信息，其字节表示就是内层数据值的字节表示；
/// - 适配器把"拆开/回填包装器"与"数据值编解码"两件事解耦：前者由 [`Wrapping`]
///   契约提供，后者全权委托给内层 Coder。
///
/// # 行为逻辑（How）
/// - 编码：读取 `value.datum()`，原样交给内层 Coder，不追加任何前后缀字节；
/// - 解码：先经 [`Wrapping::try_empty`] 构造空包装器（失败包装为
///   `coder.deserialization`），再委托内层解码，最后 `set_datum` 回填。
///
/// # 契约说明（What）
/// - **后置条件**：编码产物与内层 Coder 直接编码数据值的产物逐字节相同；
/// - `components()` 恰好返回一个元素；`verify_deterministic` 与内层同判。
pub struct WrapperCoder<W, C>
where
    W: Wrapping,
    C: Coder<Value = W::Datum>,
{
    datum_coder: Arc<C>,
    _marker: PhantomData<fn() -> W>,
}

impl<W, C> WrapperCoder<W, C>
where
    W: Wrapping,
    C: Coder<Value = W::Datum>,
{
    /// 以内层数据值 Coder 构造适配器。
    pub fn of(datum_coder: C) -> Self {
        Self::from_arc(Arc::new(datum_coder))
    }

    /// 基于共享引用构造适配器，与调用方共享内层 Coder 的所有权。
    pub fn from_arc(datum_coder: Arc<C>) -> Self {
        Self {
            datum_coder,
            _marker: PhantomData,
        }
    }

    /// 访问内层数据值 Coder。
    pub fn datum_coder(&self) -> &C {
        &self.datum_coder
    }
}

impl<W, C> Coder for WrapperCoder<W, C>
where
    W: Wrapping,
    C: Coder<Value = W::Datum>,
{
    type Value = W;

    fn encode(
        &self,
        value: &Self::Value,
        out: &mut dyn Write,
        ctx: &CoderContext,
    ) -> Result<(), CoreError> {
        self.datum_coder.encode(value.datum(), out, ctx)
    }

    fn decode(&self, input: &mut dyn Read, ctx: &CoderContext) -> Result<Self::Value, CoreError> {
        let mut wrapper = W::try_empty().map_err(|err| {
            CoreError::new(
                codes::CODER_DESERIALIZATION,
                format!(
                    "unable to deserialize record: empty wrapper `{}` could not be constructed",
                    W::TYPE_NAME,
                ),
            )
            .with_cause(err)
        })?;
        let datum = self.datum_coder.decode(input, ctx)?;
        wrapper.set_datum(datum);
        Ok(wrapper)
    }

    fn components(&self) -> Vec<ArcDynCoder> {
        vec![Arc::new(TypedCoderAdapter::from_arc(Arc::clone(
            &self.datum_coder,
        )))]
    }

    fn coder_spec(&self) -> CoderSpec {
        CoderSpec::new(WRAPPER_CODER_TAG)
            .with_component(self.datum_coder.coder_spec())
            .with_attribute(ATTR_WRAPPER_TYPE, W::TYPE_NAME)
    }

    fn verify_deterministic(&self) -> Result<(), CoreError> {
        self.datum_coder.verify_deterministic()
    }
}

/// `DynWrapperCoder` 是重建路径产出的对象层包装器 Coder。
///
/// # 设计背景（Why）
/// - 远端工作进程只持有描述记录，不知道包装器的具体 Rust 类型，
///   只能经由类型注册中心解析出的 [`WrapperFactory`] 构造空实例；
/// - 对象层值以 `Box<dyn DynWrapping>` 形态流转：编码端按该形态还原，
///   解码端也以该形态交回，调用方可经 `as_any` 还原为具体类型。
///
/// # 契约说明（What）
/// - **前置条件**：`encode_dyn` 收到的值必须是 `Box<dyn DynWrapping>` 且类型名
///   与本 Coder 登记的一致，否则返回 `coder.type_mismatch`；
/// - 解码路径中空包装器构造失败包装为 `coder.deserialization`，
///   数据值类型不符由 [`DynWrapping::set_datum_dyn`] 返回 `coder.type_mismatch`。
pub struct DynWrapperCoder {
    wrapper_type: String,
    factory: Arc<dyn WrapperFactory>,
    datum_coder: ArcDynCoder,
}

impl DynWrapperCoder {
    /// 以包装器构造工厂与内层 Coder 组装实例。
    pub fn new(factory: Arc<dyn WrapperFactory>, datum_coder: ArcDynCoder) -> Self {
        Self {
            wrapper_type: factory.type_name().to_owned(),
            factory,
            datum_coder,
        }
    }

    /// 本 Coder 服务的包装器类型名。
    pub fn wrapper_type(&self) -> &str {
        &self.wrapper_type
    }
}

impl DynCoder for DynWrapperCoder {
    #[allow(unused_parens)]
    fn encode_dyn(
        &self,
        value: &(dyn Any + Send + Sync),
        out: &mut dyn Write,
        ctx: &CoderContext,
    ) -> Result<(), CoreError> {
        let wrapper = value.downcast_ref::<Box<dyn DynWrapping>>().ok_or_else(|| {
            CoreError::new(
                codes::CODER_TYPE_MISMATCH,
                format!(
                    "期待包装器值 `Box<dyn DynWrapping>`（类型名 `{}`），实际收到不兼容类型",
                    self.wrapper_type,
                ),
            )
        })?;
        if wrapper.type_name() != self.wrapper_type {
            return Err(CoreError::new(
                codes::CODER_TYPE_MISMATCH,
                format!(
                    "期待包装器类型 `{}`，实际收到 `{}`",
                    self.wrapper_type,
                    wrapper.type_name(),
                ),
            ));
        }
        self.datum_coder.encode_dyn(wrapper.datum_dyn(), out, ctx)
    }

    fn decode_dyn(
        &self,
        input: &mut dyn Read,
        ctx: &CoderContext,
    ) -> Result<Box<dyn Any + Send + Sync>, CoreError> {
        let mut wrapper = self.factory.instantiate().map_err(|err| {
            CoreError::new(
                codes::CODER_DESERIALIZATION,
                format!(
                    "unable to deserialize record: empty wrapper `{}` could not be constructed",
                    self.wrapper_type,
                ),
            )
            .with_cause(err)
        })?;
        let datum = self.datum_coder.decode_dyn(input, ctx)?;
        wrapper.set_datum_dyn(datum)?;
        Ok(Box::new(wrapper))
    }

    fn components(&self) -> Vec<ArcDynCoder> {
        vec![Arc::clone(&self.datum_coder)]
    }

    fn coder_spec(&self) -> CoderSpec {
        CoderSpec::new(WRAPPER_CODER_TAG)
            .with_component(self.datum_coder.coder_spec())
            .with_attribute(ATTR_WRAPPER_TYPE, self.wrapper_type.as_str())
    }

    fn verify_deterministic(&self) -> Result<(), CoreError> {
        self.datum_coder.verify_deterministic()
    }
}

/// `WrapperCoderFactory` 按描述记录重建包装器 Coder 适配器。
///
/// # 行为逻辑（How）
/// 1. 读取 `wrapperType` 属性，缺失或非字符串返回 `coder.spec_invalid`；
/// 2. 校验组件数量恰为 1，否则返回 `coder.arity_mismatch`；
/// 3. 经类型注册中心解析类型名，未登记返回 `coder.type_unresolved`；
/// 4. 索取条目的包装器能力，类型存在但能力不符同样返回 `coder.type_unresolved`
///    （消息可区分两种原因）。
pub struct WrapperCoderFactory {
    types: Arc<TypeRegistry>,
}

impl WrapperCoderFactory {
    /// 以类型注册中心构造工厂。
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        Self { types }
    }
}

impl DynCoderFactory for WrapperCoderFactory {
    fn tag(&self) -> &str {
        WRAPPER_CODER_TAG
    }

    fn instantiate(
        &self,
        spec: &CoderSpec,
        mut components: Vec<ArcDynCoder>,
    ) -> Result<ArcDynCoder, CoreError> {
        let wrapper_type = spec.str_attribute(ATTR_WRAPPER_TYPE).ok_or_else(|| {
            CoreError::new(
                codes::CODER_SPEC_INVALID,
                format!(
                    "wrapper coder spec is missing the string attribute `{}`",
                    ATTR_WRAPPER_TYPE,
                ),
            )
        })?;
        if components.len() != 1 {
            return Err(CoreError::new(
                codes::CODER_ARITY_MISMATCH,
                format!("expecting 1 component, got {}", components.len()),
            ));
        }
        let entry = self.types.resolve(wrapper_type)?;
        let factory = entry.wrapper_factory().ok_or_else(|| {
            CoreError::new(
                codes::CODER_TYPE_UNRESOLVED,
                format!(
                    "type `{}` is registered but does not provide the wrapper capability",
                    wrapper_type,
                ),
            )
        })?;
        let datum_coder = components.remove(0);
        Ok(Arc::new(DynWrapperCoder::new(factory, datum_coder)))
    }
}

/// 将包装器 Coder 的重建工厂登记到给定 Coder 注册中心。
///
/// # 契约说明（What）
/// - **前置条件**：`rill:coder:wrap` 标签尚未登记，否则返回 `coder.tag_duplicate`。
pub fn register_wrapper_coder(
    registry: &CoderRegistry,
    types: Arc<TypeRegistry>,
) -> Result<(), CoreError> {
    registry.register(Box::new(WrapperCoderFactory::new(types)))
}
