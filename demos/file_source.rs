//! Example: monitoring throughput from a JSON file
//!
//! This example demonstrates how to use brokerwatch to follow a snapshot
//! file that some agent rewrites periodically.
//!
//! The file should contain a JSON array of per-component rates.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example file_source -- path/to/throughput.json
//! ```

use std::env;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use brokerwatch::{DataSource, FileSource};

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example file_source -- <path-to-throughput.json>");
        eprintln!();
        eprintln!("The file should contain a JSON snapshot in the format:");
        eprintln!(r#"  [{{"name": "total", "read": 1024.0, "write": 2048.0}}]"#);
        std::process::exit(1);
    });

    println!("Monitoring file: {}", path);
    println!("Press Ctrl+C to stop\n");

    let mut source = FileSource::new(&path);

    loop {
        match source.poll() {
            Some(snapshot) => {
                println!("Snapshot received with {} components:", snapshot.len());
                for entry in &snapshot {
                    println!(
                        "  - {}: read {:.0} B/s, write {:.0} B/s",
                        entry.name, entry.read, entry.write
                    );
                }
                println!();
            }
            None => {
                if let Some(err) = source.error() {
                    eprint!("\rError: {}  ", err);
                } else {
                    print!("\rWaiting for changes...  ");
                }
                io::stdout().flush().unwrap();
            }
        }

        thread::sleep(Duration::from_millis(500));
    }
}
