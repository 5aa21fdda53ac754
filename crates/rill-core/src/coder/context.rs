/// `CoderContext` 描述一次编解码调用在字节流中的位置语义。
///
/// # 设计背景（Why）
/// - 同一个值出现在流的末尾（独占余下全部字节）与嵌入更大记录内部（必须自定界）时，
///   高效的线格式可以不同：前者允许省略长度前缀，后者必须携带；
/// - 上下文由管道执行引擎创建并贯穿整棵 Coder 组合树传递，组合型 Coder（如包装器适配器）
///   原样转发，叶子 Coder 据此选择是否写入定界信息。
///
/// # 契约说明（What）
/// - `outer()`：值独占流的剩余部分，解码方可读取至 EOF；
/// - `nested()`：值嵌入更大的字节序列，编码结果必须自定界；
/// - **后置条件**：实例不可变、可 `Copy`，跨线程传递无同步成本。
///
/// # 风险提示（Trade-offs）
/// - 两种上下文下的字节形态可能不同；跨进程双方必须对调用位置使用一致的上下文，
///   否则解码结果未定义。该约定由执行引擎保证，不在本层校验。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoderContext {
    whole_stream: bool,
}

impl CoderContext {
    /// 值独占字节流余下的全部内容。
    pub const fn outer() -> Self {
        Self { whole_stream: true }
    }

    /// 值嵌入更大的字节序列，必须自定界。
    pub const fn nested() -> Self {
        Self {
            whole_stream: false,
        }
    }

    /// 当前值是否独占流的剩余部分。
    pub const fn is_whole_stream(&self) -> bool {
        self.whole_stream
    }
}
