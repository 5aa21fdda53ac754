//! 错误域契约：稳定错误码、`[code] message` 展示格式与 `source()` 因果链，
//! 验证第三方错误类型可以无缝充当 `CoreError` 的底层原因。

use std::error::Error;

use rill_core::test_stubs::coder::U32Cell;
use rill_core::{CoreError, Wrapping, codes};
use thiserror::Error;

/// 模拟外部子系统的失败：管道实现方常以 `thiserror` 派生自己的错误枚举。
#[derive(Debug, Error)]
enum StoreError {
    #[error("backing store is offline")]
    Offline,
    #[error("schema revision {0} is unknown")]
    UnknownRevision(u32),
}

/// 包装器构造依赖外部子系统，失败时把领域错误挂为底层原因。
#[derive(Debug, Default)]
struct StoreBackedCell {
    datum: u32,
}

impl Wrapping for StoreBackedCell {
    type Datum = u32;

    const TYPE_NAME: &'static str = "rill.test.StoreBackedCell";

    fn try_empty() -> rill_core::Result<Self, CoreError> {
        Err(
            CoreError::new(codes::CODER_DESERIALIZATION, "store-backed cell unavailable")
                .with_cause(StoreError::Offline),
        )
    }

    fn datum(&self) -> &Self::Datum {
        &self.datum
    }

    fn set_datum(&mut self, datum: Self::Datum) {
        self.datum = datum;
    }
}

#[test]
fn third_party_error_survives_as_source() {
    let err = StoreBackedCell::try_empty().expect_err("construction must fail");
    assert_eq!(err.code(), codes::CODER_DESERIALIZATION);
    let source = err.source().expect("cause must be preserved");
    assert_eq!(source.to_string(), "backing store is offline");
}

#[test]
fn set_cause_replaces_existing_cause() {
    let mut err = CoreError::new(codes::CODER_IO, "stream stalled");
    err.set_cause(StoreError::Offline);
    err.set_cause(StoreError::UnknownRevision(3));
    let source = err.source().expect("cause present");
    assert_eq!(source.to_string(), "schema revision 3 is unknown");
}

#[test]
fn display_format_is_stable_for_log_aggregation() {
    let err = CoreError::new(codes::CODER_TYPE_UNRESOLVED, "type `a.B` is not registered");
    assert_eq!(
        err.to_string(),
        "[coder.type_unresolved] type `a.B` is not registered",
    );
}

#[test]
fn well_behaved_stub_constructs_without_cause() {
    let cell = U32Cell::try_empty().expect("stub constructs");
    assert_eq!(*cell.datum(), 0);
}
