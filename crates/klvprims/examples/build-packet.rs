//! Build an ST 0601 packet with a nested security set and write it to disk.
//!
//! Run with:
//!   cargo run --example build-packet -- /tmp/flight.klv
//!
//! Then inspect it:
//!   cargo run --features cli -- --format pretty decode /tmp/flight.klv

use std::path::PathBuf;

use chrono::Utc;
use klvprims::codec::UAS_DATALINK_LS;
use klvprims::localset::{serialize_packet, LocalSet, ParseConfig};
use klvprims::misb::{st0102, st0601};
use klvprims::numeric::PrecisionTimestamp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("klvprims-flight.klv"));

    let config = ParseConfig::default();
    let security_reg = st0102::registry();
    let mut security = LocalSet::for_registry(security_reg);
    security.insert(
        st0102::SECURITY_CLASSIFICATION,
        security_reg.make(st0102::SECURITY_CLASSIFICATION, 1u64, &config)?,
    );
    security.insert(
        st0102::CLASSIFYING_COUNTRY_CODING_METHOD,
        security_reg.make(st0102::CLASSIFYING_COUNTRY_CODING_METHOD, 1u64, &config)?,
    );
    security.insert(
        st0102::CLASSIFYING_COUNTRY,
        security_reg.make(st0102::CLASSIFYING_COUNTRY, "//US", &config)?,
    );
    security.insert(
        st0102::VERSION,
        security_reg.make(st0102::VERSION, 12u64, &config)?,
    );

    let reg = st0601::registry();
    let mut set = LocalSet::for_registry(reg);
    set.insert(
        st0601::PRECISION_TIME_STAMP,
        reg.make(
            st0601::PRECISION_TIME_STAMP,
            PrecisionTimestamp::from_datetime(Utc::now())?,
            &config,
        )?,
    );
    set.insert(
        st0601::MISSION_ID,
        reg.make(st0601::MISSION_ID, "EXAMPLE", &config)?,
    );
    set.insert(
        st0601::PLATFORM_HEADING_ANGLE,
        reg.make(st0601::PLATFORM_HEADING_ANGLE, 159.97, &config)?,
    );
    set.insert(
        st0601::SENSOR_LATITUDE,
        reg.make(st0601::SENSOR_LATITUDE, 60.176_822_966_978_3, &config)?,
    );
    set.insert(
        st0601::SENSOR_LONGITUDE,
        reg.make(st0601::SENSOR_LONGITUDE, 128.426_759_042_045, &config)?,
    );
    set.insert(
        st0601::SECURITY_LOCAL_SET,
        reg.make(st0601::SECURITY_LOCAL_SET, security, &config)?,
    );
    set.insert(
        st0601::VERSION_NUMBER,
        reg.make(st0601::VERSION_NUMBER, 13u64, &config)?,
    );

    let packet = serialize_packet(&UAS_DATALINK_LS, &set)?;
    std::fs::write(&path, &packet)?;
    eprintln!("Wrote {} bytes to {}", packet.len(), path.display());
    Ok(())
}
