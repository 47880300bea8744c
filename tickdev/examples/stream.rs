//! Wire a mock register source to a device, fire interrupts from a ticker
//! thread, and stream the records to stdout.

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tickdev::{Device, DeviceConfig, MockRegisters, ReadMode, RECORD_SIZE};
use tracing::info;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let registers = Arc::new(MockRegisters::new());
    let (device, trigger) = Device::activate(registers.clone(), DeviceConfig::default())?;

    let reader = {
        let device = Arc::clone(&device);
        thread::spawn(move || -> Result<usize, tickdev::DevError> {
            let handle = device.open(ReadMode::Blocking);
            let mut buf = [0u8; RECORD_SIZE];
            let mut total = 0;
            loop {
                let n = handle.read(&mut buf[..])?;
                if n == 0 {
                    return Ok(total);
                }
                total += n;
                print!("{}", String::from_utf8_lossy(&buf[..n]));
            }
        })
    };

    for _ in 0..20 {
        registers.raise();
        trigger.raise();
        thread::sleep(Duration::from_millis(10));
    }

    device.deactivate();
    let total = reader.join().expect("reader thread panicked")?;
    info!(
        bytes = total,
        dropped = device.dropped_records(),
        "stream finished"
    );

    Ok(())
}
