//! 跨 crate 集成：包装器 Coder 描述记录经 JSON 线格式运到"远端"，
//! 由标准 Coder 注册表与类型注册中心协同重建，并与原始实例互解。

use std::sync::Arc;

use proptest::prelude::*;
use rill_coder_std::{Utf8Coder, register_standard_coders};
use rill_coder_wrap::{ATTR_WRAPPER_TYPE, WRAPPER_CODER_TAG, WrapperCoder, register_wrapper_coder};
use rill_coders::{
    ArcDynCoder, Coder, CoderContext, CoderRegistry, CoderSpec, DynWrapping, TypeRegistry,
    TypedWrapperFactory, Wrapping,
};
use rill_core::test_stubs::coder::TextCell;

/// 模拟远端工作进程的注册环境：标准 Coder + 包装器适配器 + 可解析的包装器类型。
fn remote_registry() -> CoderRegistry {
    let types = Arc::new(TypeRegistry::new());
    types
        .register(Arc::new(TypedWrapperFactory::<TextCell>::new()))
        .expect("register wrapper type");
    let registry = CoderRegistry::new();
    register_standard_coders(&registry).expect("register standard coders");
    register_wrapper_coder(&registry, types).expect("register wrapper factory");
    registry
}

fn reconstruct_from_json(json: &str) -> ArcDynCoder {
    let spec: CoderSpec = serde_json::from_str(json).expect("parse spec json");
    remote_registry().instantiate(&spec).expect("instantiate")
}

#[test]
fn remote_end_decodes_locally_encoded_wrapper() {
    // Why: 这是适配器的核心使用场景——本端编码、描述随作业计划下发、远端重建后解码。
    let local = WrapperCoder::<TextCell, _>::of(Utf8Coder::new());
    let json = serde_json::to_string(&local.coder_spec()).expect("serialize spec");

    let ctx = CoderContext::nested();
    let mut bytes = Vec::new();
    local
        .encode(&TextCell::holding("你好, rill"), &mut bytes, &ctx)
        .expect("local encode");

    let remote = reconstruct_from_json(&json);
    let boxed = remote
        .decode_dyn(&mut bytes.as_slice(), &ctx)
        .expect("remote decode");
    let wrapper = boxed
        .downcast::<Box<dyn DynWrapping>>()
        .expect("wrapper value convention");
    assert_eq!(
        wrapper.as_any().downcast_ref::<TextCell>(),
        Some(&TextCell::holding("你好, rill")),
    );
}

#[test]
fn local_end_decodes_remotely_encoded_wrapper() {
    let local = WrapperCoder::<TextCell, _>::of(Utf8Coder::new());
    let json = serde_json::to_string(&local.coder_spec()).expect("serialize spec");
    let remote = reconstruct_from_json(&json);

    let ctx = CoderContext::outer();
    let wrapper: Box<dyn DynWrapping> = Box::new(TextCell::holding("roundtrip"));
    let mut bytes = Vec::new();
    remote
        .encode_dyn(&wrapper, &mut bytes, &ctx)
        .expect("remote encode");

    let back = local.decode(&mut bytes.as_slice(), &ctx).expect("local decode");
    assert_eq!(back, TextCell::holding("roundtrip"));
}

#[test]
fn reconstructed_spec_matches_original_spec() {
    // Why: 重建实例的自描述必须与原始描述相等，否则二次下发会发生语义漂移。
    let local = WrapperCoder::<TextCell, _>::of(Utf8Coder::new());
    let spec = local.coder_spec();
    assert_eq!(spec.tag(), WRAPPER_CODER_TAG);
    assert_eq!(spec.str_attribute(ATTR_WRAPPER_TYPE), Some(TextCell::TYPE_NAME));

    let remote = remote_registry().instantiate(&spec).expect("instantiate");
    assert_eq!(remote.coder_spec(), spec);
}

proptest! {
    #[test]
    fn reconstructed_coder_is_byte_equivalent(text: String) {
        // Why: 字节等价性必须对任意数据值成立，抽样覆盖多字节与空串等边角。
        let local = WrapperCoder::<TextCell, _>::of(Utf8Coder::new());
        let remote = remote_registry()
            .instantiate(&local.coder_spec())
            .expect("instantiate");

        let ctx = CoderContext::nested();
        let mut local_bytes = Vec::new();
        local
            .encode(&TextCell::holding(text.clone()), &mut local_bytes, &ctx)
            .expect("local encode");

        let wrapper: Box<dyn DynWrapping> = Box::new(TextCell::holding(text));
        let mut remote_bytes = Vec::new();
        remote
            .encode_dyn(&wrapper, &mut remote_bytes, &ctx)
            .expect("remote encode");
        prop_assert_eq!(remote_bytes, local_bytes);
    }
}
