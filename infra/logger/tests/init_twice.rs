use beacon_logger::{LogConfig, Logger, LoggerError};

#[test]
fn init_twice_returns_subscriber_error() {
    let logger = Logger::init(&LogConfig::named("integration-init-twice"))
        .expect("first init should succeed");
    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");

    let err = Logger::init(&LogConfig::named("integration-init-twice-second"))
        .expect_err("second init should fail");

    assert!(
        matches!(err, LoggerError::Subscriber { .. }),
        "expected subscriber error for second init"
    );
}
