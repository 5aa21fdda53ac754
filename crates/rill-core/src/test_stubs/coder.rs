//! 编解码契约的官方测试桩：定宽 Coder、非确定性 Coder 与两种包装器。

use std::io::{Read, Write};

use crate::coder::context::CoderContext;
use crate::coder::spec::CoderSpec;
use crate::coder::traits::generic::Coder;
use crate::error::codes;
use crate::wrapper::Wrapping;
use crate::CoreError;

/// `Fixed32Coder` 以大端序 4 字节编码 `u32`，是最小的确定性叶子 Coder。
///
/// # 教案说明（Why）
/// - 定宽编码与上下文无关，适合在测试中做字节级断言而不引入格式噪音；
/// - 同时充当"实现 [`Coder`] 契约所需最小面积"的参考样例。
#[derive(Clone, Copy, Debug, Default)]
pub struct Fixed32Coder;

impl Fixed32Coder {
    /// 可移植描述中的判别标签。
    pub const TAG: &'static str = "rill:test:fixed32";

    /// 创建新实例。
    pub fn new() -> Self {
        Self
    }
}

impl Coder for Fixed32Coder {
    type Value = u32;

    fn encode(
        &self,
        value: &Self::Value,
        out: &mut dyn Write,
        _ctx: &CoderContext,
    ) -> crate::Result<(), CoreError> {
        out.write_all(&value.to_be_bytes()).map_err(|err| {
            CoreError::new(codes::CODER_IO, "failed to write fixed32 value").with_cause(err)
        })
    }

    fn decode(
        &self,
        input: &mut dyn Read,
        _ctx: &CoderContext,
    ) -> crate::Result<Self::Value, CoreError> {
        let mut bytes = [0u8; 4];
        input.read_exact(&mut bytes).map_err(|err| {
            CoreError::new(codes::CODER_IO, "failed to read fixed32 value").with_cause(err)
        })?;
        Ok(u32::from_be_bytes(bytes))
    }

    fn coder_spec(&self) -> CoderSpec {
        CoderSpec::new(Self::TAG)
    }

    fn verify_deterministic(&self) -> crate::Result<(), CoreError> {
        Ok(())
    }
}

/// `NonDeterministicCoder` 字节行为与 [`Fixed32Coder`] 相同，但自述为非确定性。
///
/// # 教案说明（Why）
/// - 用于验证组合型 Coder 的确定性传播：外层必须原样上抛内层的解释文案，
///   且失败只发生在 `verify_deterministic`，编解码路径不受影响。
#[derive(Clone, Copy, Debug, Default)]
pub struct NonDeterministicCoder;

impl NonDeterministicCoder {
    /// 可移植描述中的判别标签。
    pub const TAG: &'static str = "rill:test:nondet";

    /// `verify_deterministic` 失败时携带的解释文案。
    pub const EXPLANATION: &'static str =
        "stub coder declares its byte output depends on unstable iteration order";

    /// 创建新实例。
    pub fn new() -> Self {
        Self
    }
}

impl Coder for NonDeterministicCoder {
    type Value = u32;

    fn encode(
        &self,
        value: &Self::Value,
        out: &mut dyn Write,
        ctx: &CoderContext,
    ) -> crate::Result<(), CoreError> {
        Fixed32Coder::new().encode(value, out, ctx)
    }

    fn decode(
        &self,
        input: &mut dyn Read,
        ctx: &CoderContext,
    ) -> crate::Result<Self::Value, CoreError> {
        Fixed32Coder::new().decode(input, ctx)
    }

    fn coder_spec(&self) -> CoderSpec {
        CoderSpec::new(Self::TAG)
    }

    fn verify_deterministic(&self) -> crate::Result<(), CoreError> {
        Err(CoreError::new(
            codes::CODER_NON_DETERMINISTIC,
            Self::EXPLANATION,
        ))
    }
}

/// `U32Cell` 是行为良好的最小包装器：持有一个 `u32`，空态为零值。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct U32Cell {
    datum: u32,
}

impl U32Cell {
    /// 以给定数据值直接构造（测试便捷入口）。
    pub fn holding(datum: u32) -> Self {
        Self { datum }
    }
}

impl Wrapping for U32Cell {
    type Datum = u32;

    const TYPE_NAME: &'static str = "rill.test.U32Cell";

    fn try_empty() -> crate::Result<Self, CoreError> {
        Ok(Self::default())
    }

    fn datum(&self) -> &Self::Datum {
        &self.datum
    }

    fn set_datum(&mut self, datum: Self::Datum) {
        self.datum = datum;
    }
}

/// `TextCell` 持有一个 `String`，用于需要变长数据值的测试场景。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextCell {
    datum: String,
}

impl TextCell {
    /// 以给定文本直接构造（测试便捷入口）。
    pub fn holding(datum: impl Into<String>) -> Self {
        Self {
            datum: datum.into(),
        }
    }
}

impl Wrapping for TextCell {
    type Datum = String;

    const TYPE_NAME: &'static str = "rill.test.TextCell";

    fn try_empty() -> crate::Result<Self, CoreError> {
        Ok(Self::default())
    }

    fn datum(&self) -> &Self::Datum {
        &self.datum
    }

    fn set_datum(&mut self, datum: Self::Datum) {
        self.datum = datum;
    }
}

/// `FailingCell` 的无参构造永远失败，用于覆盖"字节无碍、容器无法构建"的解码失败路径。
#[derive(Clone, Debug)]
pub struct FailingCell {
    datum: u32,
}

impl Wrapping for FailingCell {
    type Datum = u32;

    const TYPE_NAME: &'static str = "rill.test.FailingCell";

    fn try_empty() -> crate::Result<Self, CoreError> {
        Err(CoreError::new(
            "test.constructor_refused",
            "FailingCell stub constructor always refuses to build",
        ))
    }

    fn datum(&self) -> &Self::Datum {
        &self.datum
    }

    fn set_datum(&mut self, datum: Self::Datum) {
        self.datum = datum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrapper::Wrapping;

    #[test]
    fn fixed32_roundtrips_big_endian() {
        let coder = Fixed32Coder::new();
        let ctx = CoderContext::nested();
        let mut out = Vec::new();
        coder.encode(&0x0102_0304, &mut out, &ctx).expect("encode");
        assert_eq!(out, [1, 2, 3, 4]);
        let back = coder.decode(&mut out.as_slice(), &ctx).expect("decode");
        assert_eq!(back, 0x0102_0304);
    }

    #[test]
    fn fixed32_short_input_fails_with_io_code() {
        let coder = Fixed32Coder::new();
        let err = coder
            .decode(&mut [1u8, 2].as_slice(), &CoderContext::nested())
            .expect_err("short input must fail");
        assert_eq!(err.code(), codes::CODER_IO);
    }

    #[test]
    fn nondeterministic_stub_reports_explanation() {
        let err = NonDeterministicCoder::new()
            .verify_deterministic()
            .expect_err("stub is non-deterministic");
        assert_eq!(err.code(), codes::CODER_NON_DETERMINISTIC);
        assert_eq!(err.message(), NonDeterministicCoder::EXPLANATION);
    }

    #[test]
    fn failing_cell_refuses_construction() {
        let err = FailingCell::try_empty().expect_err("construction must fail");
        assert_eq!(err.code(), "test.constructor_refused");
    }
}
