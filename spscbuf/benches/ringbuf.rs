use std::hint::black_box;

use spscbuf::{pair, WakeupStrategy};

fn main() {
    divan::main();
}

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

const CAPACITY: usize = 1 << 20;

#[divan::bench(args = [16, 64, 256])]
fn bench_publish_drain(bencher: divan::Bencher, record_size: usize) {
    let record = vec![0u8; record_size];
    bencher
        .with_inputs(|| pair(CAPACITY, WakeupStrategy::NoWakeup).unwrap())
        .bench_values(|(producer, mut consumer)| {
            let mut sink = vec![0u8; 4096];
            let total_records = 10000;

            for _ in 0..total_records {
                black_box(producer.publish(&record));
            }
            loop {
                let n = consumer.read(&mut sink);
                if n == 0 {
                    break;
                }
                black_box(&sink[..n]);
            }
        });
}

#[divan::bench(min_time = 1, args = [16])]
fn bench_single_publish(bencher: divan::Bencher, record_size: usize) {
    let (producer, mut consumer) = pair(CAPACITY, WakeupStrategy::NoWakeup).unwrap();
    let record = vec![0u8; record_size];
    let mut sink = vec![0u8; CAPACITY];
    bencher.bench_local(move || {
        for _ in 0..1000 {
            black_box(producer.publish(&record));
        }
        while consumer.read(&mut sink) > 0 {}
    });
}
