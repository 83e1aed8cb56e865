// In demos/pipeline.rs
//
// Several producer threads push hashed messages at mixed priorities through one
// queue; a consumer checks every payload against its hash.
use rtmq::QueueBuilder;
use sha2::{Digest, Sha256};
use std::env;
use std::thread;

const PRODUCERS: usize = 4;

fn digest_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let per_producer: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1000);

    let (producer, consumer) = QueueBuilder::new()
        .with_name("pipeline")
        .with_depth(32)
        .with_message_size(128)
        .build_pair()?;

    println!(
        "Pipeline: {} producers x {} messages, queue depth {}",
        PRODUCERS,
        per_producer,
        producer.queue().capacity()
    );

    let start = std::time::Instant::now();

    let reader = {
        let consumer = consumer.clone();
        thread::spawn(move || {
            let mut received = 0usize;
            let mut corrupt = 0usize;
            // Ends with BrokenPipe once the queue is closed and drained.
            while let Ok((meta, data)) = consumer.receive_blocking_with_meta() {
                let message = String::from_utf8_lossy(&data);
                match message.split_once('|') {
                    Some((body, hash)) if digest_hex(body) == hash => {}
                    _ => {
                        corrupt += 1;
                        eprintln!("Corrupt message (priority {}): {}", meta.priority, message);
                    }
                }
                received += 1;
            }
            (received, corrupt)
        })
    };

    let writers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let producer = producer.clone();
            thread::spawn(move || -> std::io::Result<()> {
                for i in 0..per_producer {
                    let body = format!("{}:{}", p, i);
                    let message = format!("{}|{}", body, digest_hex(&body));
                    producer.send_blocking(message, (i % 4) as i32)?;
                }
                Ok(())
            })
        })
        .collect();

    for writer in writers {
        if let Err(e) = writer.join().expect("producer thread panicked") {
            eprintln!("Producer failed: {}", e);
        }
    }

    producer.queue().close()?;
    let (received, corrupt) = reader.join().expect("consumer thread panicked");

    let elapsed = start.elapsed();
    println!("Pipeline: received {} messages in {:.2?}", received, elapsed);
    println!(
        "Pipeline: throughput {:.2} messages/sec, high water mark {}",
        received as f64 / elapsed.as_secs_f64(),
        consumer.queue().high_water_mark()
    );

    if corrupt == 0 && received == PRODUCERS * per_producer {
        println!("All messages received intact");
    }

    Ok(())
}
