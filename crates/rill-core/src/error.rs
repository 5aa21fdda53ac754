use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// `ErrorCause` 封装底层原因，保持 `Send + Sync` 以方便跨线程传递。
pub type ErrorCause = Box<dyn Error + Send + Sync + 'static>;

/// `Result` 为序列化层统一的返回值别名，默认错误类型为 [`CoreError`]。
///
/// # 设计意图（Why）
/// - 要求所有 Coder 实现共享相同的错误封装模型，便于管道规划阶段按稳定错误码聚合与拒绝；
/// - 避免在各处重复书写 `Result<_, CoreError>` 样板代码。
///
/// # 契约说明（What）
/// - **泛型参数**：`T` 为成功路径返回值；`E` 默认为 [`CoreError`]，可显式替换；
/// - **后置条件**：与标准库 `Result` 行为完全一致，可直接与 `?` 运算符协同工作。
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

/// `CoreError` 表示序列化层跨 crate 共享的稳定错误域。
///
/// # 设计背景（Why）
/// - 编解码失败必须在管道的规划阶段即可被精确分类（重建失败、元数协约失败、确定性缺失等），
///   因此以 `'static` 字符串错误码承载稳定语义，消息面向排障人员；
/// - 内层 Coder 的失败需要原样透传，外层仅在自己拥有的边界（重建、包装器实例化）上
///   包装更具体的错误，`cause` 字段保证 `source()` 链路完整。
///
/// # 逻辑解析（How）
/// - 构造后以 Builder 风格方法叠加底层原因；
/// - 错误码 `code` 始终为 `'static` 字符串，推荐使用 [`codes`] 模块中的常量。
///
/// # 契约说明（What）
/// - **前置条件**：调用方使用 [`codes`] 模块或遵循 `<域>.<语义>` 约定的自定义码值；
/// - **返回值**：拥有所有权的 `CoreError`，可安全跨线程移动（`Send + Sync + 'static`）；
/// - **后置条件**：除非显式调用 `with_cause`/`set_cause`，错误不包含底层原因。
///
/// # 风险提示（Trade-offs）
/// - 采用 `Cow` 保存消息，静态文案零分配，动态描述仅触发一次堆分配。
#[derive(Debug)]
pub struct CoreError {
    code: &'static str,
    message: Cow<'static, str>,
    cause: Option<ErrorCause>,
}

impl CoreError {
    /// 以稳定错误码与消息构造核心错误。
    ///
    /// # 契约说明（What）
    /// - **输入参数**：`code` 遵循 `<域>.<语义>` 约定；`message` 面向排障人员，
    ///   可为 `&'static str` 或堆分配字符串；
    /// - **后置条件**：`cause` 初始为空，可稍后通过 [`with_cause`](Self::with_cause) 填充。
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// 附带底层原因并返回新的核心错误。
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// 为现有错误设置底层原因。
    pub fn set_cause(&mut self, cause: impl Error + Send + Sync + 'static) {
        self.cause = Some(Box::new(cause));
    }

    /// 获取稳定错误码。
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 获取人类可读描述。
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 获取底层原因。
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|boxed| boxed.as_ref() as &(dyn Error + 'static))
    }
}

/// 序列化层内置的错误码常量集合，确保跨进程日志与测试具有稳定识别符。
///
/// # 设计背景（Why）
/// - 管道的分组、去重与重放正确性依赖编解码层的失败在规划阶段即被识别，
///   稳定错误码让调用方无需解析字符串即可分支处置；
/// - 错误码遵循 `<领域>.<语义>` 命名约定，方便在跨组件日志中检索与聚合。
///
/// # 契约说明（What）
/// - **使用前提**：错误码应由实现者封装进 [`CoreError`](crate::CoreError)；
/// - **演进承诺**：既有码值不得改名或复用，新增语义须登记新的常量。
pub mod codes {
    /// CoderSpec 重建时类型名无法解析，或解析出的类型不具备包装器能力。
    pub const CODER_TYPE_UNRESOLVED: &str = "coder.type_unresolved";
    /// CoderSpec 重建时嵌套组件数量不等于契约要求。
    pub const CODER_ARITY_MISMATCH: &str = "coder.arity_mismatch";
    /// 解码阶段包装器实例化失败（字节本身无碍，容器无法构建）。
    pub const CODER_DESERIALIZATION: &str = "coder.deserialization";
    /// `verify_deterministic` 判定编码结果不满足字节级确定性。
    pub const CODER_NON_DETERMINISTIC: &str = "coder.non_deterministic";
    /// 对象层动态派发遇到类型不匹配。
    pub const CODER_TYPE_MISMATCH: &str = "coder.type_mismatch";
    /// Coder 注册中心没有与 `@type` 标签对应的工厂。
    pub const CODER_TAG_UNKNOWN: &str = "coder.tag_unknown";
    /// Coder 注册中心发现重复的 `@type` 标签注册。
    pub const CODER_TAG_DUPLICATE: &str = "coder.tag_duplicate";
    /// 类型注册中心发现重复的类型名注册。
    pub const CODER_TYPE_DUPLICATE: &str = "coder.type_duplicate";
    /// 可移植描述记录缺少必需属性或属性形态非法。
    pub const CODER_SPEC_INVALID: &str = "coder.spec_invalid";
    /// 底层字节流读写失败。
    pub const CODER_IO: &str = "coder.io";
    /// 字节内容不符合 Coder 的格式约定。
    pub const CODER_DECODE: &str = "coder.decode";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        // Why: 日志聚合依赖 `[code] message` 的稳定展示格式。
        let err = CoreError::new(codes::CODER_DECODE, "bad bytes");
        assert_eq!(format!("{}", err), "[coder.decode] bad bytes");
    }

    #[test]
    fn cause_chain_is_reachable_via_source() {
        // Why: 外层包装错误时必须保留底层原因，供 `source()` 链路遍历。
        let inner = CoreError::new(codes::CODER_IO, "stream closed");
        let outer = CoreError::new(codes::CODER_DESERIALIZATION, "wrapper failed").with_cause(inner);
        let source = outer.source().expect("source present");
        assert!(source.to_string().contains("stream closed"));
    }
}
