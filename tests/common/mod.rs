//! Shared utilities for integration tests.

use std::sync::Arc;

use chrono::{Local, TimeZone};
use request_logger::observability::clock::FixedClock;
use request_logger::observability::{MemorySink, Stream};
use request_logger::Logger;
use serde_json::Value;

/// Timestamp every captured logger reports.
#[allow(dead_code)]
pub const DATE: &str = "2024-03-05 09:07:02";

/// A logger writing into memory with a frozen clock.
pub fn capture_logger(production: bool) -> (Arc<Logger>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let instant = Local
        .with_ymd_and_hms(2024, 3, 5, 9, 7, 2)
        .single()
        .expect("unambiguous local time");
    let logger = Logger::builder()
        .production(production)
        .sink(sink.clone())
        .clock(Arc::new(FixedClock(instant)))
        .build();
    (Arc::new(logger), sink)
}

/// Parse every captured stdout line as JSON.
#[allow(dead_code)]
pub fn stdout_records(sink: &MemorySink) -> Vec<Value> {
    sink.lines_on(Stream::Stdout)
        .iter()
        .map(|line| serde_json::from_str(line).expect("valid JSON line"))
        .collect()
}
