/// 密封标记 trait，声明核心契约的扩展面由本工作区统一治理。
///
/// # 设计初衷（Why）
/// - `Coder`/`DynCoder` 等契约继承该标记，提醒实现者其方法集合与错误语义受核心版本策略约束；
/// - 采用全量 blanket 实现而非白名单：下游 crate 仍可自由实现契约，密封仅用于在
///   未来需要收紧扩展面时保留演进空间，而不构成当下的编译期壁垒。
///
/// # 契约说明（What）
/// - **后置条件**：任何 `?Sized` 类型均自动满足该标记，下游无需（也无法）显式实现。
pub(crate) trait Sealed {}

impl<T: ?Sized> Sealed for T {}
