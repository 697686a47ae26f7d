//! Ocellus demo firmware
//!
//! Talks to the vision sensor over I2C0 (GP4 = SDA, GP5 = SCL), switches it
//! to object tracking and logs every detected block over RTT.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{Config as I2cBusConfig, I2c};
use embassy_time::Timer;
use embedded_alloc::LlffHeap as Heap;
use {defmt_rtt as _, panic_probe as _};

use ocellus_core::{Algorithm, Lens, LensConfig, Record};
use ocellus_hal::{EmbassyClock, I2cConfig, I2cTransport};

// Heap for the result store
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 8KB
const HEAP_SIZE: usize = 8 * 1024;

/// Delay between enumerate cycles
const POLL_INTERVAL_MS: u64 = 200;

/// Delay before knocking again after a failed handshake
const RECONNECT_DELAY_MS: u64 = 1000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Ocellus demo starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());

    let link = I2cConfig::default();
    let mut bus_config = I2cBusConfig::default();
    bus_config.frequency = link.frequency;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, bus_config);

    let transport = I2cTransport::with_config(bus, link);
    let mut lens = Lens::with_config(transport, EmbassyClock, LensConfig::default());

    loop {
        match lens.connect() {
            Ok(()) => break,
            Err(e) => {
                warn!("Sensor not answering: {:?}", e);
                Timer::after_millis(RECONNECT_DELAY_MS).await;
            }
        }
    }
    info!("Sensor connected");

    if let Err(e) = lens.set_algorithm(Algorithm::ObjectTracking) {
        warn!("Could not select object tracking: {:?}", e);
    }

    loop {
        match lens.request() {
            Ok(()) => report(lens.results()),
            Err(e) => warn!("Request failed: {:?}", e),
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}

/// Log one result generation
fn report(results: &ocellus_core::ResultStore) {
    let info = results.metadata();
    debug!(
        "Frame {}: {} records, {} learned IDs",
        info.frame_number,
        results.count(),
        info.knowledge_size
    );

    for record in results.iter() {
        if let Record::Block(block) = record {
            info!(
                "Block id={} at ({}, {}) size {}x{}",
                block.id, block.x_center, block.y_center, block.width, block.height
            );
        }
    }
}

fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
