//! Process-global surface: the default logger, the exit hook, and panic
//! entry points. Kept in their own test binary so the process-wide state
//! they mutate is isolated from the other test suites.

use sitelog::prelude::*;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

fn quiet_logger(level: Level) -> (Arc<MemorySink>, Logger) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new(sink.clone(), level);
    logger.set_time_format("");
    logger.set_source_format("");
    (sink, logger)
}

#[test]
fn test_default_instance_replacement_and_passthroughs() {
    let (sink, logger) = quiet_logger(Level::Info);
    logger.set_prefix("svc");
    let installed = logger.make_default();
    assert!(Arc::ptr_eq(&installed, &sitelog::default_logger()));

    // package-level calls observe the replacement
    sitelog::infoln(None, &[&"ab", &"cd"]);
    sitelog::flush().unwrap();
    assert_eq!(sink.contents_string(), "INFO     svc ab cd\n");

    sink.clear();
    sitelog::set_prefix("swapped");
    assert_eq!(sitelog::prefix(), "swapped");
    sitelog::info(None, &[&"ab", &"cd"]);
    sitelog::flush().unwrap();
    assert_eq!(sink.contents_string(), "INFO     swapped abcd\n");

    sink.clear();
    let n = sitelog::default_logger()
        .logln_sync(None, Level::Debug, &[&"below threshold"])
        .unwrap();
    assert_eq!(n, 0);
    assert!(sink.contents().is_empty());

    // a carrier-bound logger wins over the default
    let (other_sink, other) = quiet_logger(Level::Info);
    let ctx = Context::with_logger(Arc::new(other));
    sitelog::infoln(Some(&ctx), &[&"routed"]);
    sitelog::flush().unwrap();
    logger_from(Some(&ctx)).flush().unwrap();
    assert!(sink.contents().is_empty());
    assert_eq!(other_sink.contents_string(), "INFO     routed\n");
}

#[test]
fn test_fatal_writes_synchronously_then_exits() {
    let exit_code = Arc::new(AtomicI32::new(-1));
    let observed = Arc::clone(&exit_code);
    sitelog::set_exit_hook(move |code| {
        observed.store(code, Ordering::SeqCst);
    });

    let (sink, logger) = quiet_logger(Level::Debug);
    logger.set_prefix("unittest");
    logger.fatal(None, &[&"ab", &"cd"]);
    assert_eq!(exit_code.load(Ordering::SeqCst), 1);
    assert_eq!(sink.contents_string(), "CRITICAL unittest abcd\n");

    sink.clear();
    logger.fatalln(None, &[&"ab", &"cd"]);
    assert_eq!(sink.contents_string(), "CRITICAL unittest ab cd\n");

    sink.clear();
    logger.fatalf(None, format_args!("{} / {}", "ab", "cd"));
    assert_eq!(sink.contents_string(), "CRITICAL unittest ab / cd\n");
}

#[test]
fn test_panic_writes_then_panics_with_message() {
    let (sink, logger) = quiet_logger(Level::Debug);

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        logger.panic(None, &[&"ab", &"cd"]);
    }));
    let payload = result.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some("abcd")
    );
    assert_eq!(sink.contents_string(), "CRITICAL abcd\n");

    sink.clear();
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        logger.panicln(None, &[&"ab", &"cd"]);
    }));
    let payload = result.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some("ab cd")
    );
    assert_eq!(sink.contents_string(), "CRITICAL ab cd\n");

    sink.clear();
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        logger.panicf(None, format_args!("{} / {}", "ab", "cd"));
    }));
    let payload = result.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some("ab / cd")
    );
    assert_eq!(sink.contents_string(), "CRITICAL ab / cd\n");
}

#[test]
fn test_panic_below_threshold_still_panics() {
    let (sink, logger) = quiet_logger(Level::Ignored);
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        logger.panic(None, &[&"unlogged"]);
    }));
    assert!(result.is_err());
    assert!(sink.contents().is_empty());
}
