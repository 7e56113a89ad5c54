// Example demonstrating the log-relay fan-out pipeline
//
// Run with: cargo run --example logging_demo

use anyhow::Result;
use log_relay::{log_error, log_info, log_warning, LogListener, Logger, QueueConsumer, QueuedListener, Severity, SharedEntry, StderrSink};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

// Inline listener counting every entry it sees
struct PrintingListener;

impl LogListener for PrintingListener {
    fn on_log_entry(&self, entry: &SharedEntry) {
        print!("[listener] {}", entry.text());
    }
}

fn main() -> Result<()> {
    println!("=== log-relay demo ===\n");

    // An explicitly constructed logger; no system sink so the demo output
    // stays readable
    let logger = Logger::without_sink().with_fallback(512);
    logger.set_min_level(Severity::Debug);

    // 1. Fallback mode: no listener registered yet
    log_info!(logger, "this line lands in the fallback buffer");
    if let Some(buffered) = logger.drain_fallback() {
        println!("drained fallback ({} bytes):\n{}", buffered.len(), buffered);
    }

    // 2. Synchronous listener fan-out
    let printing: Arc<PrintingListener> = Arc::new(PrintingListener);
    logger.add_listener(printing.clone());
    log_info!(logger, "delivered synchronously to {} listener(s)", logger.listener_count());
    log_warning!(logger, "a warning line");
    log_error!(logger, "an error line");

    // 3. Queued listener drained by a dedicated thread
    let queued = QueuedListener::new(64);
    logger.add_listener(queued.clone());

    let consumer = QueueConsumer::new(queued, Box::new(StderrSink));
    let stop = consumer.stop_handle();
    let drain_thread = std::thread::spawn(move || consumer.run());

    for i in 0..5 {
        log_info!(logger, "queued message {}", i);
    }

    std::thread::sleep(Duration::from_millis(20));
    stop.store(false, Ordering::Relaxed);
    drain_thread
        .join()
        .expect("consumer thread panicked");

    println!("\ndone");
    Ok(())
}
