use crate::LogLevel;
use crate::tests::{EnvGuard, setup_config_dir};

use std::str::FromStr;

use log::LevelFilter;
use serial_test::serial;

#[test]
fn given_known_levels_when_parsed_then_mapped_case_insensitively() {
    assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel(LevelFilter::Debug));
    assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel(LevelFilter::Warn));
    assert_eq!(LogLevel::from_str("off").unwrap(), LogLevel(LevelFilter::Off));
}

#[test]
fn given_unknown_level_when_parsed_then_defaults_to_info() {
    assert_eq!(LogLevel::from_str("chatty").unwrap(), LogLevel(LevelFilter::Info));
}

#[test]
#[serial]
fn given_log_level_env_when_load_then_applied() {
    let (_temp, _guard) = setup_config_dir();
    let _level = EnvGuard::set("FA_LOG_LEVEL", "trace");

    let config = crate::Config::load().unwrap();

    assert_eq!(*config.logging.level, LevelFilter::Trace);
}
