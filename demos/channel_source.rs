//! Example: feeding throughput via a channel
//!
//! This example demonstrates how to integrate brokerwatch into your own
//! application by pushing snapshots through a channel.
//!
//! This is useful when you want to:
//! - Bridge from a push feed (websocket, message queue consumer)
//! - Generate synthetic data for testing
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_source
//! ```

use std::thread;
use std::time::Duration;

use brokerwatch::{BrokerThroughput, ChannelSource, DataSource};

fn main() {
    println!("Channel source example");
    println!("Generating synthetic throughput data...\n");

    // Create a channel source - this returns both a sender and the source
    let (tx, mut source) = ChannelSource::create("synthetic-data");

    // Spawn a thread that pushes a snapshot every second
    thread::spawn(move || {
        let mut step = 0u64;

        loop {
            step += 1;

            // A slow sawtooth so the rates visibly move
            let phase = (step % 30) as f64 / 30.0;
            let broker_a_write = 512.0 + 4096.0 * phase;
            let broker_b_write = 2048.0 - 1024.0 * phase;
            let broker_a_read = broker_a_write * 0.6;
            let broker_b_read = broker_b_write * 0.9;

            let snapshot = vec![
                BrokerThroughput {
                    name: "total".to_string(),
                    read: broker_a_read + broker_b_read,
                    write: broker_a_write + broker_b_write,
                },
                BrokerThroughput {
                    name: "broker-a".to_string(),
                    read: broker_a_read,
                    write: broker_a_write,
                },
                BrokerThroughput {
                    name: "broker-b".to_string(),
                    read: broker_b_read,
                    write: broker_b_write,
                },
            ];

            if tx.send(snapshot).is_err() {
                break; // Receiver dropped
            }

            thread::sleep(Duration::from_secs(1));
        }
    });

    // Poll the source in the main thread
    println!("Receiving snapshots (press Ctrl+C to stop):\n");

    loop {
        if let Some(snapshot) = source.poll() {
            println!("Received snapshot with {} components:", snapshot.len());
            for entry in &snapshot {
                println!(
                    "  - {}: read {:.0} B/s, write {:.0} B/s",
                    entry.name, entry.read, entry.write
                );
            }
            println!();
        }

        thread::sleep(Duration::from_millis(100));
    }
}
