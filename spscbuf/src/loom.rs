#[cfg(all(test, feature = "loom"))]
mod tests {
    use crate::{pair, PublishOutcome, WakeupStrategy};
    use loom::{model::Builder, thread};

    #[test]
    fn test_publish_drain_ordering() {
        let mut builder = Builder::new();
        if builder.preemption_bound.is_none() {
            builder.preemption_bound = Some(3);
        }

        builder.check(|| {
            let (producer, mut consumer) = pair(8, WakeupStrategy::Forced).unwrap();

            let producer_handle = thread::spawn(move || {
                producer.publish(b"abc");
                producer.publish(b"def");
            });

            let mut received = Vec::new();
            let mut buf = [0u8; 8];
            while received.len() < 6 {
                let n = consumer.read(&mut buf);
                if n > 0 {
                    received.extend_from_slice(&buf[..n]);
                } else {
                    consumer.wait().unwrap();
                }
            }

            producer_handle.join().unwrap();
            assert_eq!(received, b"abcdef");
        });
    }

    #[test]
    fn test_overflow_accounting() {
        let mut builder = Builder::new();
        if builder.preemption_bound.is_none() {
            builder.preemption_bound = Some(3);
        }

        builder.check(|| {
            let (producer, mut consumer) = pair(8, WakeupStrategy::NoWakeup).unwrap();

            let producer_handle = thread::spawn(move || {
                let mut stored = 0u64;
                for record in [&b"aaa"[..], &b"bbb"[..], &b"ccc"[..]] {
                    if producer.publish(record) == PublishOutcome::Stored {
                        stored += 1;
                    }
                }
                stored
            });

            let mut received = Vec::new();
            let mut buf = [0u8; 8];
            for _ in 0..16 {
                let n = consumer.read(&mut buf);
                received.extend_from_slice(&buf[..n]);
            }
            let stored = producer_handle.join().unwrap();

            // Drain whatever is still buffered after the producer is done.
            loop {
                let n = consumer.read(&mut buf);
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }

            // Whole records only, in production order, drops accounted.
            assert_eq!(received.len() as u64, stored * 3);
            assert_eq!(stored + consumer.dropped(), 3);
            let expected: Vec<u8> = [b"aaa", b"bbb", b"ccc"]
                .iter()
                .filter(|r| received.windows(3).any(|w| w == &r[..]))
                .flat_map(|r| r.iter().copied())
                .collect();
            assert_eq!(received, expected);
        });
    }
}
