//! MISB ST 0601 UAS Datalink Local Set (subset).
//!
//! The checksum (tag 1) covers the whole packet: the 16-byte key, the BER
//! length and every entry up to the checksum value. Use
//! [`parse_packet`](klvprims_localset::parse_packet) and
//! [`serialize_packet`](klvprims_localset::serialize_packet).

use std::sync::LazyLock;

use klvprims_codec::TagId;
use klvprims_localset::{FieldKind, ValueRegistry};

use crate::{st0102, st0903};

pub const CHECKSUM: TagId = 1;
pub const PRECISION_TIME_STAMP: TagId = 2;
pub const MISSION_ID: TagId = 3;
pub const PLATFORM_TAIL_NUMBER: TagId = 4;
pub const PLATFORM_HEADING_ANGLE: TagId = 5;
pub const PLATFORM_PITCH_ANGLE: TagId = 6;
pub const PLATFORM_ROLL_ANGLE: TagId = 7;
pub const PLATFORM_DESIGNATION: TagId = 10;
pub const IMAGE_SOURCE_SENSOR: TagId = 11;
pub const SENSOR_LATITUDE: TagId = 13;
pub const SENSOR_LONGITUDE: TagId = 14;
pub const SENSOR_TRUE_ALTITUDE: TagId = 15;
pub const SENSOR_HORIZONTAL_FOV: TagId = 16;
pub const SENSOR_VERTICAL_FOV: TagId = 17;
pub const FRAME_CENTER_LATITUDE: TagId = 23;
pub const FRAME_CENTER_LONGITUDE: TagId = 24;
pub const SECURITY_LOCAL_SET: TagId = 48;
pub const VERSION_NUMBER: TagId = 65;
pub const VMTI_LOCAL_SET: TagId = 74;

const TEXT: FieldKind = FieldKind::Text { max_len: 127 };

const LATITUDE: FieldKind = FieldKind::SignedLinear {
    min: -90.0,
    max: 90.0,
    len: 4,
};

const LONGITUDE: FieldKind = FieldKind::SignedLinear {
    min: -180.0,
    max: 180.0,
    len: 4,
};

const FIELD_OF_VIEW: FieldKind = FieldKind::UnsignedLinear {
    min: 0.0,
    max: 180.0,
    len: 2,
};

static REGISTRY: LazyLock<ValueRegistry> = LazyLock::new(|| {
    let mut registry = ValueRegistry::new("ST 0601 UAS Datalink").with_checksum(CHECKSUM);
    registry
        .register(PRECISION_TIME_STAMP, "Precision Time Stamp", FieldKind::Timestamp)
        .register(MISSION_ID, "Mission ID", TEXT)
        .register(PLATFORM_TAIL_NUMBER, "Platform Tail Number", TEXT)
        .register(
            PLATFORM_HEADING_ANGLE,
            "Platform Heading Angle",
            FieldKind::UnsignedLinear {
                min: 0.0,
                max: 360.0,
                len: 2,
            },
        )
        .register(
            PLATFORM_PITCH_ANGLE,
            "Platform Pitch Angle",
            FieldKind::SignedLinear {
                min: -20.0,
                max: 20.0,
                len: 2,
            },
        )
        .register(
            PLATFORM_ROLL_ANGLE,
            "Platform Roll Angle",
            FieldKind::SignedLinear {
                min: -50.0,
                max: 50.0,
                len: 2,
            },
        )
        .register(PLATFORM_DESIGNATION, "Platform Designation", TEXT)
        .register(IMAGE_SOURCE_SENSOR, "Image Source Sensor", TEXT)
        .register(SENSOR_LATITUDE, "Sensor Latitude", LATITUDE)
        .register(SENSOR_LONGITUDE, "Sensor Longitude", LONGITUDE)
        .register(
            SENSOR_TRUE_ALTITUDE,
            "Sensor True Altitude",
            FieldKind::UnsignedLinear {
                min: -900.0,
                max: 19000.0,
                len: 2,
            },
        )
        .register(SENSOR_HORIZONTAL_FOV, "Sensor Horizontal Field of View", FIELD_OF_VIEW)
        .register(SENSOR_VERTICAL_FOV, "Sensor Vertical Field of View", FIELD_OF_VIEW)
        .register(FRAME_CENTER_LATITUDE, "Frame Center Latitude", LATITUDE)
        .register(FRAME_CENTER_LONGITUDE, "Frame Center Longitude", LONGITUDE)
        .register(
            SECURITY_LOCAL_SET,
            "Security Local Set",
            FieldKind::Nested(st0102::registry),
        )
        .register(
            VERSION_NUMBER,
            "UAS Datalink LS Version Number",
            FieldKind::Unsigned {
                min_len: 1,
                max_len: 1,
            },
        )
        .register(VMTI_LOCAL_SET, "VMTI Local Set", FieldKind::Nested(st0903::registry));
    registry
});

/// The ST 0601 Local Set registry.
pub fn registry() -> &'static ValueRegistry {
    &REGISTRY
}
