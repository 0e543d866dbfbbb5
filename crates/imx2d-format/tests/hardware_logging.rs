//! Hardware library logging setup, in a process of its own so the
//! installer is guaranteed to run

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use imx2d_format::{logging_threshold, setup_logging, setup_logging_with, HardwareLogLevel};

#[test]
fn test_installer_logs_through_callback() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut installed = None;

        let level = setup_logging_with(|threshold, log| {
            // The library reports its version as soon as the callback is set
            log(
                HardwareLogLevel::Info,
                "imx2d_backend.c",
                17,
                "imx_2d_backend_init",
                format_args!("imx2d backend {}", "1.0"),
            );
            installed = Some(threshold);
        });

        let again = setup_logging();
        let _ = tx.send((installed, level, again));
    });

    let (installed, level, again) = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("setup did not complete");

    assert_eq!(installed, Some(level));
    assert_eq!(again, level);
    assert_eq!(logging_threshold(), Some(level));
}
