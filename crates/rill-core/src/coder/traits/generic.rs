use std::io::{Read, Write};

use crate::coder::context::CoderContext;
use crate::coder::spec::CoderSpec;
use crate::coder::traits::object::ArcDynCoder;
use crate::{CoreError, sealed::Sealed};

/// `Coder` 统一封装某一值类型的编码与解码逻辑，是泛型层的零成本编解码契约。
///
/// # 设计初衷（Why）
/// - 管道的分组、去重与可重放执行依赖"相等的值编码出字节级相同的输出"，
///   契约因此内建确定性断言，由规划阶段在执行前统一校验；
/// - 通过关联类型绑定业务值类型，保证静态类型安全；
/// - 作为对象层 [`super::object::DynCoder`] 的泛型基线，支撑注册中心与跨进程重建。
///
/// # 行为逻辑（How）
/// 1. `encode` 将值写入输出流，`decode` 从输入流还原值，二者均接收 [`CoderContext`]
///    以区分外层/嵌套位置；
/// 2. `components` 返回嵌套 Coder 序列，供通用工具递归遍历组合结构；
/// 3. `coder_spec` 产出可移植描述记录，远端凭此重建等价实例；
/// 4. `verify_deterministic` 在规划阶段断言字节级确定性。
///
/// # 契约说明（What）
/// - **关联类型**：`Value` 需满足 `Send + Sync + 'static`，以支持跨线程传输；
/// - **前置条件**：实现必须无内部可变状态，同一实例可被任意多线程并发调用；
/// - **后置条件**：组合型 Coder 的失败传播策略为"原样透传内层错误，仅在自有边界
///   包装更具体错误"，不得吞错或重解释。
///
/// # 风险提示（Trade-offs）
/// - 流参数采用 `&mut dyn Write`/`&mut dyn Read` 对象安全形态，牺牲单态化内联机会，
///   换取组合树各层共享同一签名；热路径实现可在内部做缓冲聚合。
pub trait Coder: Send + Sync + 'static + Sealed {
    /// 编解码的业务值类型。
    type Value: Send + Sync + 'static;

    /// 将值编码进输出流。
    fn encode(
        &self,
        value: &Self::Value,
        out: &mut dyn Write,
        ctx: &CoderContext,
    ) -> crate::Result<(), CoreError>;

    /// 从输入流解码一个值。
    fn decode(
        &self,
        input: &mut dyn Read,
        ctx: &CoderContext,
    ) -> crate::Result<Self::Value, CoreError>;

    /// 返回嵌套 Coder 序列；叶子 Coder 保持缺省空集合。
    fn components(&self) -> Vec<ArcDynCoder> {
        Vec::new()
    }

    /// 产出可移植的自描述记录。
    fn coder_spec(&self) -> CoderSpec;

    /// 断言字节级确定性：相等的值必须编码出相同字节。
    ///
    /// # 契约说明（What）
    /// - 满足时返回 `Ok(())`；
    /// - 不满足时返回 `coder.non_deterministic` 错误，消息携带面向人类的解释，
    ///   供规划阶段在执行前拒绝不安全的分组/去重计划。
    fn verify_deterministic(&self) -> crate::Result<(), CoreError>;
}
