use std::io::{Read, Write};

use rill_coders::{Coder, CoderContext, CoderSpec, CoreError, codes};

/// LEB128 变长整数最多占用的字节数（`u64`）。
const MAX_VARUINT_LEN: usize = 10;

/// 以 LEB128 形式将 `u64` 写入输出流。
///
/// # 契约说明（What）
/// - 每字节低 7 位承载数值、最高位为延续标志；小数值占用更少字节；
/// - 同一数值的编码唯一，满足字节级确定性。
pub fn write_varuint(out: &mut dyn Write, mut value: u64) -> Result<(), CoreError> {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.write_all(&[byte]).map_err(|err| {
            CoreError::new(codes::CODER_IO, "failed to write var-int byte").with_cause(err)
        })?;
        if value == 0 {
            return Ok(());
        }
    }
}

/// 从输入流读取一个 LEB128 变长整数。
///
/// # 错误语义（What）
/// - 流提前耗尽返回 `coder.io`；
/// - 超过 10 字节仍未终止、或第 10 字节溢出 `u64` 返回 `coder.decode`。
pub fn read_varuint(input: &mut dyn Read) -> Result<u64, CoreError> {
    let mut value = 0u64;
    for index in 0..MAX_VARUINT_LEN {
        let mut byte = [0u8; 1];
        input.read_exact(&mut byte).map_err(|err| {
            CoreError::new(codes::CODER_IO, "failed to read var-int byte").with_cause(err)
        })?;
        let payload = (byte[0] & 0x7f) as u64;
        let shift = index * 7;
        if shift == 63 && payload > 1 {
            return Err(CoreError::new(
                codes::CODER_DECODE,
                "var-int overflows 64-bit range",
            ));
        }
        value |= payload << shift;
        if byte[0] & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(CoreError::new(
        codes::CODER_DECODE,
        "var-int continues beyond maximum length",
    ))
}

/// `VarUintCoder` 以 LEB128 编码 `u64`，与上下文无关。
///
/// # 教案说明（Why）
/// - 管道中的计数、索引与长度前缀均复用该格式，编码自定界，外层/嵌套行为一致；
/// - 编码唯一性保证确定性，`verify_deterministic` 恒成功。
#[derive(Clone, Copy, Debug, Default)]
pub struct VarUintCoder;

impl VarUintCoder {
    /// 可移植描述中的判别标签。
    pub const TAG: &'static str = "rill:coder:varuint";

    /// 创建新实例。
    pub fn new() -> Self {
        Self
    }
}

impl Coder for VarUintCoder {
    type Value = u64;

    fn encode(
        &self,
        value: &Self::Value,
        out: &mut dyn Write,
        _ctx: &CoderContext,
    ) -> Result<(), CoreError> {
        write_varuint(out, *value)
    }

    fn decode(&self, input: &mut dyn Read, _ctx: &CoderContext) -> Result<Self::Value, CoreError> {
        read_varuint(input)
    }

    fn coder_spec(&self) -> CoderSpec {
        CoderSpec::new(Self::TAG)
    }

    fn verify_deterministic(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
