//! Keylink Host Firmware
//!
//! Firmware for the host half of an RP2040-based split keyboard. The
//! remote half scans the far key matrix and two rotary encoders; this
//! binary polls it over UART once per millisecond and fans the results
//! out to the dispatch tasks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use keylink_core::MatrixDriver;
use keylink_hal::BlockingIo;
use keylink_protocol::LINK_BAUD;

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Keylink firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Link UART to the remote half (GPIO0=TX, GPIO1=RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = LINK_BAUD;

    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);

    info!("Link UART initialized at {} baud", LINK_BAUD);

    let driver = MatrixDriver::new(BlockingIo::new(uart));

    spawner.spawn(tasks::scan::scan_task(driver)).unwrap();
    spawner.spawn(tasks::volume::volume_task()).unwrap();

    info!("All tasks spawned");
}
