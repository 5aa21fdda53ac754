//! 包装器容器能力与类型解析设施。
//!
//! # 教案定位（Why）
//! - "包装器"指恰好持有一个数据值（datum）的容器类型：可无参构造出空实例、
//!   可读取与安装数据值。包装器 Coder 适配器在编解码时依赖且仅依赖这一能力；
//! - 跨进程重建需要"按稳定字符串标识查表构造空实例"的类型解析设施。本模块以
//!   显式注册中心取代环境反射，使适配器对实例化的依赖可注入、可测试。

use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::codes;
use crate::CoreError;

/// `Wrapping` 是泛型层的包装器容器能力契约。
///
/// # 契约说明（What）
/// - [`TYPE_NAME`](Self::TYPE_NAME)：跨进程稳定的全限定类型名，作为可移植描述中的
///   `wrapperType` 属性值与类型注册中心的查表键；
/// - [`try_empty`](Self::try_empty)：无参构造空包装器；构造可能失败（如内部资源缺失），
///   失败原因由解码路径包装为 `coder.deserialization`；
/// - [`datum`](Self::datum)/[`set_datum`](Self::set_datum)：读取与安装数据值。
///
/// # 风险提示（Trade-offs）
/// - 空包装器在安装数据值之前的 `datum()` 语义由实现自定（缺省值或哨兵值均可），
///   适配器保证解码路径先安装后返回，正常流程不会观察到空态。
pub trait Wrapping: Send + Sync + 'static {
    /// 包装的数据值类型。
    type Datum: Send + Sync + 'static;

    /// 跨进程稳定的全限定类型名。
    const TYPE_NAME: &'static str;

    /// 无参构造一个空包装器。
    fn try_empty() -> crate::Result<Self, CoreError>
    where
        Self: Sized;

    /// 读取包装的数据值。
    fn datum(&self) -> &Self::Datum;

    /// 安装数据值。
    fn set_datum(&mut self, datum: Self::Datum);
}

/// `DynWrapping` 是对象层的包装器能力接口，经 blanket 实现对所有 [`Wrapping`] 自动可用。
///
/// # 设计初衷（Why）
/// - 重建路径在不知道具体包装器类型的情况下操作实例，需要对象安全的读取/安装入口；
/// - 与泛型层等价，差异仅在类型擦除与运行时 `downcast` 检查。
///
/// # 契约说明（What）
/// - `set_datum_dyn` 在数据值类型不符时返回 `coder.type_mismatch`，不改变包装器状态；
/// - `as_any` 供调用方将对象层包装器还原为具体类型。
pub trait DynWrapping: Send + Sync + 'static {
    /// 跨进程稳定的全限定类型名。
    fn type_name(&self) -> &'static str;

    /// 以 `Any` 形态读取数据值。
    fn datum_dyn(&self) -> &(dyn Any + Send + Sync);

    /// 以 `Any` 形态安装数据值；类型不符返回 `coder.type_mismatch`。
    fn set_datum_dyn(
        &mut self,
        datum: Box<dyn Any + Send + Sync>,
    ) -> crate::Result<(), CoreError>;

    /// 将自身视为 `Any`，供具体类型还原。
    fn as_any(&self) -> &(dyn Any + Send + Sync);
}

impl<W> DynWrapping for W
where
    W: Wrapping,
{
    fn type_name(&self) -> &'static str {
        W::TYPE_NAME
    }

    fn datum_dyn(&self) -> &(dyn Any + Send + Sync) {
        self.datum()
    }

    fn set_datum_dyn(
        &mut self,
        datum: Box<dyn Any + Send + Sync>,
    ) -> crate::Result<(), CoreError> {
        match datum.downcast::<W::Datum>() {
            Ok(typed) => {
                self.set_datum(*typed);
                Ok(())
            }
            Err(_) => Err(CoreError::new(
                codes::CODER_TYPE_MISMATCH,
                format!(
                    "包装器 `{}` 期待数据值类型 `{}`，实际收到不兼容类型",
                    W::TYPE_NAME,
                    std::any::type_name::<W::Datum>(),
                ),
            )),
        }
    }

    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        self
    }
}

/// `WrapperFactory` 是对象层的空包装器构造工厂。
///
/// # 契约说明（What）
/// - `instantiate` 返回尚未安装数据值的空实例；构造失败原样返回原因，由解码路径
///   决定是否包装为 `coder.deserialization`（构造失败属于解码期而非重建期错误）。
pub trait WrapperFactory: Send + Sync + 'static {
    /// 工厂服务的全限定类型名。
    fn type_name(&self) -> &str;

    /// 构造一个空包装器实例。
    fn instantiate(&self) -> crate::Result<Box<dyn DynWrapping>, CoreError>;
}

/// `TypedWrapperFactory` 将任意 [`Wrapping`] 类型适配为 [`WrapperFactory`]。
///
/// # 行为逻辑（How）
/// - 零尺寸结构体，仅以幻影参数记住目标类型；
/// - `instantiate` 调用 `W::try_empty` 并装箱为对象层实例。
pub struct TypedWrapperFactory<W>
where
    W: Wrapping,
{
    _marker: PhantomData<fn() -> W>,
}

impl<W> TypedWrapperFactory<W>
where
    W: Wrapping,
{
    /// 创建目标类型的工厂。
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<W> Default for TypedWrapperFactory<W>
where
    W: Wrapping,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> WrapperFactory for TypedWrapperFactory<W>
where
    W: Wrapping,
{
    fn type_name(&self) -> &str {
        W::TYPE_NAME
    }

    fn instantiate(&self) -> crate::Result<Box<dyn DynWrapping>, CoreError> {
        let wrapper = W::try_empty()?;
        Ok(Box::new(wrapper))
    }
}

/// `TypeEntry` 是类型注册中心的条目契约：可解析的类型名及其具备的能力。
///
/// # 设计背景（Why）
/// - 类型名可解析与类型具备包装器能力是两个独立判定：前者失败表示描述记录指向
///   未知类型，后者失败表示类型存在但"不可赋值"为包装器。二者都以
///   `coder.type_unresolved` 上报，但消息可区分；
/// - 以可选能力访问器建模，未来新增其他容器能力时按需扩展缺省方法即可。
pub trait TypeEntry: Send + Sync + 'static {
    /// 条目的全限定类型名。
    fn type_name(&self) -> &str;

    /// 若该类型具备包装器容器能力，返回其构造工厂。
    fn wrapper_factory(&self) -> Option<Arc<dyn WrapperFactory>> {
        None
    }
}

impl std::fmt::Debug for dyn TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry")
            .field("type_name", &self.type_name())
            .finish_non_exhaustive()
    }
}

impl<W> TypeEntry for TypedWrapperFactory<W>
where
    W: Wrapping,
{
    fn type_name(&self) -> &str {
        W::TYPE_NAME
    }

    fn wrapper_factory(&self) -> Option<Arc<dyn WrapperFactory>> {
        Some(Arc::new(TypedWrapperFactory::<W>::new()))
    }
}

/// `OpaqueTypeEntry` 表示可解析但不具备任何容器能力的类型名。
///
/// # 契约说明（What）
/// - 用于登记管道中存在、但不满足包装器契约的类型，使"类型存在但能力不符"
///   成为可测试、可观察的独立失败路径。
pub struct OpaqueTypeEntry {
    type_name: Cow<'static, str>,
}

impl OpaqueTypeEntry {
    /// 以全限定类型名创建条目。
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl TypeEntry for OpaqueTypeEntry {
    fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// `TypeRegistry` 是稳定类型名到 [`TypeEntry`] 的进程内注册中心（类型解析设施）。
///
/// # 设计背景（Why）
/// - 取代"环境反射 + 按名加载类"的来源语义：注册阶段集中在进程启动期，
///   解析阶段只读查表，依赖显式、行为可测试；
/// - 与 [`CoderRegistry`](crate::CoderRegistry) 分离：前者解析值容器类型，
///   后者解析 Coder 标签，二者演进节奏互不牵连。
///
/// # 契约说明（What）
/// - **前置条件**：同一类型名只允许注册一次，重复注册返回 `coder.type_duplicate`；
/// - **错误语义**：未登记的类型名返回 `coder.type_unresolved`，不可重试，
///   通常意味着描述记录损坏或双方版本不匹配。
#[derive(Default)]
pub struct TypeRegistry {
    entries: RwLock<HashMap<String, Arc<dyn TypeEntry>>>,
}

impl TypeRegistry {
    /// 创建空注册中心。
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个类型条目。
    pub fn register(&self, entry: Arc<dyn TypeEntry>) -> crate::Result<(), CoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let name = entry.type_name().to_owned();
        if entries.contains_key(&name) {
            return Err(CoreError::new(
                codes::CODER_TYPE_DUPLICATE,
                format!("type `{}` is already registered", name),
            ));
        }
        entries.insert(name, entry);
        Ok(())
    }

    /// 按全限定类型名解析条目。
    pub fn resolve(&self, type_name: &str) -> crate::Result<Arc<dyn TypeEntry>, CoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(type_name).cloned().ok_or_else(|| {
            CoreError::new(
                codes::CODER_TYPE_UNRESOLVED,
                format!("type `{}` is not registered", type_name),
            )
        })
    }
}
