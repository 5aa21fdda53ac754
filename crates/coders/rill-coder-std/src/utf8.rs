use std::io::{Read, Write};

use rill_coders::{Coder, CoderContext, CoderSpec, CoreError, codes};

use crate::varint::{read_varuint, write_varuint};

/// `Utf8Coder` 编码 UTF-8 文本 `String`。
///
/// # 行为逻辑（How）
/// - 嵌套上下文：变长长度前缀 + UTF-8 字节；外层上下文：直接写字节、解码读至 EOF；
/// - 解码得到的字节必须构成合法 UTF-8，否则返回 `coder.decode`。
///
/// # 契约说明（What）
/// - 同一字符串总是产出相同字节，`verify_deterministic` 恒成功。
#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8Coder;

impl Utf8Coder {
    /// 可移植描述中的判别标签。
    pub const TAG: &'static str = "rill:coder:utf8";

    /// 创建新实例。
    pub fn new() -> Self {
        Self
    }
}

impl Coder for Utf8Coder {
    type Value = String;

    fn encode(
        &self,
        value: &Self::Value,
        out: &mut dyn Write,
        ctx: &CoderContext,
    ) -> Result<(), CoreError> {
        let bytes = value.as_bytes();
        if !ctx.is_whole_stream() {
            write_varuint(out, bytes.len() as u64)?;
        }
        out.write_all(bytes).map_err(|err| {
            CoreError::new(codes::CODER_IO, "failed to write text payload").with_cause(err)
        })
    }

    fn decode(&self, input: &mut dyn Read, ctx: &CoderContext) -> Result<Self::Value, CoreError> {
        let buffer = if ctx.is_whole_stream() {
            let mut buffer = Vec::new();
            input.read_to_end(&mut buffer).map_err(|err| {
                CoreError::new(codes::CODER_IO, "failed to read text payload").with_cause(err)
            })?;
            buffer
        } else {
            let declared = read_varuint(input)?;
            let len = usize::try_from(declared).map_err(|_| {
                CoreError::new(
                    codes::CODER_DECODE,
                    "text payload length exceeds addressable range",
                )
            })?;
            let mut buffer = vec![0u8; len];
            input.read_exact(&mut buffer).map_err(|err| {
                CoreError::new(codes::CODER_IO, "failed to read text payload").with_cause(err)
            })?;
            buffer
        };
        String::from_utf8(buffer).map_err(|err| {
            CoreError::new(codes::CODER_DECODE, "text payload is not valid UTF-8").with_cause(err)
        })
    }

    fn coder_spec(&self) -> CoderSpec {
        CoderSpec::new(Self::TAG)
    }

    fn verify_deterministic(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
