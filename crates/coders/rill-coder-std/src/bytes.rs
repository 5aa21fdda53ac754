use std::io::{Read, Write};

use rill_coders::{Coder, CoderContext, CoderSpec, CoreError, codes};

use crate::varint::{read_varuint, write_varuint};

/// `BytesCoder` 编码原始字节序列 `Vec<u8>`。
///
/// # 行为逻辑（How）
/// - 嵌套上下文：先写变长长度前缀，再写内容，保证自定界；
/// - 外层上下文：直接写内容，解码方读取至 EOF，省去前缀开销。
///
/// # 契约说明（What）
/// - 两种上下文下编码均为值的纯函数，`verify_deterministic` 恒成功；
/// - 嵌套解码时长度前缀声明的字节数必须完整可读，否则返回 `coder.io`。
#[derive(Clone, Copy, Debug, Default)]
pub struct BytesCoder;

impl BytesCoder {
    /// 可移植描述中的判别标签。
    pub const TAG: &'static str = "rill:coder:bytes";

    /// 创建新实例。
    pub fn new() -> Self {
        Self
    }
}

impl Coder for BytesCoder {
    type Value = Vec<u8>;

    fn encode(
        &self,
        value: &Self::Value,
        out: &mut dyn Write,
        ctx: &CoderContext,
    ) -> Result<(), CoreError> {
        if !ctx.is_whole_stream() {
            write_varuint(out, value.len() as u64)?;
        }
        out.write_all(value).map_err(|err| {
            CoreError::new(codes::CODER_IO, "failed to write byte payload").with_cause(err)
        })
    }

    fn decode(&self, input: &mut dyn Read, ctx: &CoderContext) -> Result<Self::Value, CoreError> {
        if ctx.is_whole_stream() {
            let mut buffer = Vec::new();
            input.read_to_end(&mut buffer).map_err(|err| {
                CoreError::new(codes::CODER_IO, "failed to read byte payload").with_cause(err)
            })?;
            return Ok(buffer);
        }
        let declared = read_varuint(input)?;
        let len = usize::try_from(declared).map_err(|_| {
            CoreError::new(
                codes::CODER_DECODE,
                "byte payload length exceeds addressable range",
            )
        })?;
        let mut buffer = vec![0u8; len];
        input.read_exact(&mut buffer).map_err(|err| {
            CoreError::new(codes::CODER_IO, "failed to read byte payload").with_cause(err)
        })?;
        Ok(buffer)
    }

    fn coder_spec(&self) -> CoderSpec {
        CoderSpec::new(Self::TAG)
    }

    fn verify_deterministic(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nested_encoding_is_length_prefixed() {
        let coder = BytesCoder::new();
        let mut out = Vec::new();
        coder
            .encode(&vec![9, 8, 7], &mut out, &CoderContext::nested())
            .expect("encode");
        assert_eq!(out, [3, 9, 8, 7]);
    }

    #[test]
    fn outer_encoding_is_raw() {
        // Why: 外层上下文的值独占流的剩余部分，长度前缀属于冗余字节。
        let coder = BytesCoder::new();
        let mut out = Vec::new();
        coder
            .encode(&vec![9, 8, 7], &mut out, &CoderContext::outer())
            .expect("encode");
        assert_eq!(out, [9, 8, 7]);
    }

    #[test]
    fn nested_decode_honours_declared_length() {
        // Why: 嵌套解码只消费前缀声明的字节数，余量留给更大记录的后续字段。
        let coder = BytesCoder::new();
        let bytes = [2u8, 10, 11, 99];
        let mut input = bytes.as_slice();
        let decoded = coder
            .decode(&mut input, &CoderContext::nested())
            .expect("decode");
        assert_eq!(decoded, [10, 11]);
        assert_eq!(input, [99]);
    }

    #[test]
    fn nested_decode_truncated_payload_fails() {
        let coder = BytesCoder::new();
        let err = coder
            .decode(&mut [5u8, 1, 2].as_slice(), &CoderContext::nested())
            .expect_err("truncated must fail");
        assert_eq!(err.code(), codes::CODER_IO);
    }

    proptest! {
        #[test]
        fn roundtrips_in_both_contexts(payload: Vec<u8>) {
            let coder = BytesCoder::new();
            for ctx in [CoderContext::nested(), CoderContext::outer()] {
                let mut out = Vec::new();
                coder.encode(&payload, &mut out, &ctx).expect("encode");
                let back = coder.decode(&mut out.as_slice(), &ctx).expect("decode");
                prop_assert_eq!(&back, &payload);
            }
        }
    }
}
