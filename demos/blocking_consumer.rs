use rtmq::QueueBuilder;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// A consumer parks on an empty queue while a ticker feeds it. Ctrl+C closes the
// queue, which wakes the consumer and ends the demo.
fn main() -> std::io::Result<()> {
    let (producer, consumer) = QueueBuilder::new()
        .with_name("blocking-demo")
        .with_depth(8)
        .with_message_size(64)
        .build_pair()?;

    let queue = Arc::clone(producer.queue());
    ctrlc::set_handler(move || {
        let _ = queue.close();
    })
    .expect("Error setting Ctrl+C handler");

    thread::spawn(move || {
        let mut tick = 0u64;
        // Stops once the queue is closed.
        while producer
            .send_blocking(format!("tick {}", tick), (tick % 3) as i32)
            .is_ok()
        {
            tick += 1;
            thread::sleep(Duration::from_millis(500));
        }
    });

    println!("Blocking Consumer: Waiting for messages (Ctrl+C to stop)...");

    loop {
        match consumer.receive_blocking_with_meta() {
            Ok((meta, data)) => {
                let msg = String::from_utf8_lossy(&data);
                println!("Received: {} (priority {}, seq {})", msg, meta.priority, meta.sequence);
            }
            Err(e) => {
                eprintln!("Stopped: {}", e);
                break;
            }
        }
    }

    Ok(())
}
