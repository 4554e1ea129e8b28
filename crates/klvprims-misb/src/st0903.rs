//! MISB ST 0903 Video Moving Target Indicator (VMTI) Local Set.
//!
//! The field-of-view items switched from unsigned linear mapping to ST 1201
//! IMAPB in ST 0903.4; [`EncodingMode`](klvprims_localset::EncodingMode)
//! selects which one is used.

use std::sync::LazyLock;

use klvprims_codec::TagId;
use klvprims_localset::{FieldKind, ValueRegistry};

pub const CHECKSUM: TagId = 1;
pub const PRECISION_TIME_STAMP: TagId = 2;
pub const SYSTEM_NAME: TagId = 3;
pub const VERSION: TagId = 4;
pub const TOTAL_TARGETS_DETECTED: TagId = 5;
pub const REPORTED_TARGETS: TagId = 6;
pub const FRAME_NUMBER: TagId = 7;
pub const FRAME_WIDTH: TagId = 8;
pub const FRAME_HEIGHT: TagId = 9;
pub const SOURCE_SENSOR: TagId = 10;
pub const HORIZONTAL_FOV: TagId = 11;
pub const VERTICAL_FOV: TagId = 12;

const fn counter(max_len: usize) -> FieldKind {
    FieldKind::Unsigned {
        min_len: 1,
        max_len,
    }
}

const FIELD_OF_VIEW: FieldKind = FieldKind::Real {
    min: 0.0,
    max: 180.0,
    len: 2,
};

static REGISTRY: LazyLock<ValueRegistry> = LazyLock::new(|| {
    let mut registry = ValueRegistry::new("ST 0903 VMTI").with_checksum(CHECKSUM);
    registry
        .register(PRECISION_TIME_STAMP, "Precision Time Stamp", FieldKind::Timestamp)
        .register(SYSTEM_NAME, "VMTI System Name", FieldKind::Text { max_len: 32 })
        .register(VERSION, "Version", counter(2))
        .register(TOTAL_TARGETS_DETECTED, "Total Targets Detected", counter(3))
        .register(REPORTED_TARGETS, "Number of Reported Targets", counter(3))
        .register(FRAME_NUMBER, "Motion Imagery Frame Number", counter(3))
        .register(FRAME_WIDTH, "Frame Width", counter(3))
        .register(FRAME_HEIGHT, "Frame Height", counter(3))
        .register(SOURCE_SENSOR, "VMTI Source Sensor", FieldKind::Text { max_len: 128 })
        .register(HORIZONTAL_FOV, "VMTI Horizontal FOV", FIELD_OF_VIEW)
        .register(VERTICAL_FOV, "VMTI Vertical FOV", FIELD_OF_VIEW);
    registry
});

/// The ST 0903 Local Set registry.
pub fn registry() -> &'static ValueRegistry {
    &REGISTRY
}
