//! Configuration Unit Tests.
//!
//! Verifies defaults, JSON payload deserialization, every validation error,
//! and internal consistency of the speed-grade and organization presets.

use rstest::rstest;

use ramulite_core::config::{Config, ConfigError, GeometryConfig, Organization};
use ramulite_core::dram::timing::{SpeedGrade, TimingParams};

// ──────────────────────────────────────────────────────────
// Defaults and JSON payloads
// ──────────────────────────────────────────────────────────

#[test]
fn default_config_validates() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.geometry.channels, 1);
    assert_eq!(config.geometry.banks, 16);
    assert_eq!(config.timing.cas_latency, 16);
    assert_eq!(config.queue.ingress_capacity, 512);
}

#[test]
fn empty_payload_is_the_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.geometry.rows, Config::default().geometry.rows);
    assert_eq!(config.timing.cas_latency, Config::default().timing.cas_latency);
}

#[test]
fn payload_overrides_fields() {
    let config = Config::from_json(
        r#"{
            "geometry": { "ranks": 2, "banks": 8, "mapping": "RoBaRaCoCh" },
            "timing": { "cas_latency": 22 },
            "queue": { "ingress_capacity": 16, "scheduler": "FCFS" }
        }"#,
    )
    .unwrap();
    assert_eq!(config.geometry.ranks, 2);
    assert_eq!(config.geometry.banks, 8);
    assert_eq!(config.timing.cas_latency, 22);
    assert_eq!(config.queue.ingress_capacity, 16);
}

#[test]
fn malformed_payload_is_a_json_error() {
    let result = Config::from_json("{ not json");
    assert!(matches!(result, Err(ConfigError::Json(_))));
}

// ──────────────────────────────────────────────────────────
// Validation errors
// ──────────────────────────────────────────────────────────

#[test]
fn multi_channel_is_rejected() {
    let mut config = Config::default();
    config.geometry.channels = 2;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::UnsupportedChannels(2))
    ));
}

#[rstest]
#[case::zero(0)]
#[case::not_power_of_two(3)]
fn bad_bank_count_is_rejected(#[case] banks: u64) {
    let mut config = Config::default();
    config.geometry.banks = banks;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPowerOfTwo { name: "banks", .. })
    ));
}

#[test]
fn zero_timing_is_rejected() {
    let mut config = Config::default();
    config.timing.cas_latency = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroTiming {
            name: "cas_latency"
        })
    ));
}

#[test]
fn ras_shorter_than_rcd_is_rejected() {
    let mut config = Config::default();
    config.timing.activate_to_precharge = config.timing.activate_delay - 1;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InconsistentTiming { .. })
    ));
}

#[test]
fn refresh_window_must_fit_interval() {
    let mut config = Config::default();
    config.timing.refresh_interval = config.timing.refresh_latency;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::RefreshWindow { .. })
    ));
}

#[test]
fn zero_capacity_is_rejected() {
    let mut config = Config::default();
    config.queue.ingress_capacity = 0;
    assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity)));
}

#[test]
fn zero_starvation_limit_is_rejected() {
    let mut config = Config::default();
    config.queue.starvation_limit = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroStarvationLimit)
    ));
}

// ──────────────────────────────────────────────────────────
// Preset consistency
// ──────────────────────────────────────────────────────────

#[rstest]
#[case(SpeedGrade::DDR4_1600K)]
#[case(SpeedGrade::DDR4_1600L)]
#[case(SpeedGrade::DDR4_1866M)]
#[case(SpeedGrade::DDR4_1866N)]
#[case(SpeedGrade::DDR4_2133P)]
#[case(SpeedGrade::DDR4_2133R)]
#[case(SpeedGrade::DDR4_2400R)]
#[case(SpeedGrade::DDR4_2400U)]
#[case(SpeedGrade::DDR4_3200)]
fn speed_grades_are_internally_consistent(#[case] grade: SpeedGrade) {
    let timing = TimingParams::from_grade(grade);
    let config = Config {
        timing,
        ..Config::default()
    };
    assert!(config.validate().is_ok(), "{grade:?} must validate");
    assert!(timing.activate_to_precharge >= timing.activate_delay);
    assert!(timing.cas_write_latency <= timing.cas_latency);
    assert_eq!(
        timing.read_latency(),
        timing.cas_latency + timing.burst_cycles
    );
    assert_eq!(
        timing.write_latency(),
        timing.cas_write_latency + timing.burst_cycles
    );
}

#[test]
fn default_timing_is_ddr4_2400r() {
    let default = TimingParams::default();
    let grade = TimingParams::from_grade(SpeedGrade::DDR4_2400R);
    assert_eq!(default.cas_latency, grade.cas_latency);
    assert_eq!(default.refresh_interval, grade.refresh_interval);
}

#[rstest]
#[case(Organization::DDR4_2Gb_x4, 16, 1 << 15)]
#[case(Organization::DDR4_4Gb_x8, 16, 1 << 15)]
#[case(Organization::DDR4_4Gb_x16, 8, 1 << 15)]
#[case(Organization::DDR4_8Gb_x4, 16, 1 << 17)]
fn organization_presets_fix_geometry(
    #[case] organization: Organization,
    #[case] banks: u64,
    #[case] rows: u64,
) {
    let geometry = GeometryConfig::from_organization(organization, 1);
    assert_eq!(geometry.banks, banks);
    assert_eq!(geometry.rows, rows);
    let config = Config {
        geometry,
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}
