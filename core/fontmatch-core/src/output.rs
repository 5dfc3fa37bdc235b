//! Streaming output helpers (made by FontLab https://www.fontlab.com/)

use std::io::{self, Write};

use serde::Serialize;

/// Write items as a prettified JSON array.
pub fn write_json_pretty<T: Serialize>(items: &[T], mut w: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut w, items)?;
    w.write_all(b"\n")
}

/// Write items as newline-delimited JSON (NDJSON).
pub fn write_ndjson<T: Serialize>(items: &[T], mut w: impl Write) -> io::Result<()> {
    for item in items {
        serde_json::to_writer(&mut w, item)?;
        w.write_all(b"\n")?;
    }
    Ok(())
}
