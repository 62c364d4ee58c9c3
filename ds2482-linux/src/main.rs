use clap::Parser;
use ds2482::{DeviceConfiguration, Ds2482Builder};
use embedded_hal::delay::DelayNs;
use onewire_bus::OneWire;

/// Enumerate the 1-Wire devices behind a DS2482 bridge
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to I2C bus (e.g., /dev/i2c-1)
    #[arg(short, long)]
    path: String,
    /// State of the AD0..AD2 address pins (0-7)
    #[arg(short = 'a', long, default_value_t = 0)]
    pin_select: u8,
    /// Enable the active pullup
    #[arg(long)]
    active_pullup: bool,
    /// Enable presence pulse masking
    #[arg(long)]
    presence_masking: bool,
    /// Enable the strong pullup
    #[arg(long)]
    strong_pullup: bool,
    /// Maximum status polls per busy-wait
    #[arg(long, default_value_t = 1000)]
    busy_limit: u16,
    /// Settle delay after every busy-wait, in milliseconds
    #[arg(long, default_value_t = 20)]
    settle_ms: u32,
    /// Repeat the enumeration forever with this period, in milliseconds
    #[arg(long)]
    rescan_ms: Option<u32>,
}

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    // Open the I2C bus
    let i2c = linux_embedded_hal::I2cdev::new(&args.path).expect("Failed to open I2C device");
    let delay = linux_embedded_hal::Delay;
    let config = DeviceConfiguration::new()
        .with_active_pullup(args.active_pullup)
        .with_presence_pulse_masking(args.presence_masking)
        .with_strong_pullup(args.strong_pullup);
    // Create a DS2482 instance
    let mut ds2482 = Ds2482Builder::default()
        .with_pin_select(args.pin_select)
        .with_busy_limit(args.busy_limit)
        .with_settle_delay_ms(args.settle_ms)
        .with_config(config)
        .build(i2c, delay)
        .expect("Failed to create DS2482 instance");
    log::info!("DS2482 ready at {:#04x}", ds2482.address());
    let mut delay = linux_embedded_hal::Delay;
    loop {
        let mut count = 0;
        for rom in ds2482.devices() {
            let rom = rom.expect("Failed to search the 1-Wire bus");
            log::info!("ROM: {}, family {:#04x}", rom, rom.family());
            count += 1;
        }
        log::info!("Found {} devices", count);
        if ds2482.timed_out() {
            log::warn!("Bridge timed out during the scan, results may be incomplete");
            ds2482.clear_timed_out();
        }
        match args.rescan_ms {
            Some(ms) => delay.delay_ms(ms),
            None => break,
        }
    }
}
