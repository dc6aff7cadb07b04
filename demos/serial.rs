use std::env;

use inquire::Select;
use toellner_psu::psu::Psu;
use toellner_psu::transport::available_ports;
use toellner_psu::types::{Measurement, Output};

// Configuration constants - adjust these for your setup
const BAUD_RATE: u32 = 9600;
const OUTPUT_VOLTAGE: f64 = 5.0;
const CURRENT_LIMIT: f64 = 0.1; // 100 mA
const STABILIZATION_DELAY_MS: u64 = 1000;

fn main() {
    env_logger::init();

    // Get serial port from command line arg or interactive selection
    let port_name = env::args().nth(1).unwrap_or_else(|| {
        // List available serial ports
        let ports = available_ports().expect("Failed to enumerate serial ports");

        if ports.is_empty() {
            eprintln!("No serial ports found!");
            std::process::exit(1);
        }

        // Interactive selection
        Select::new("Select a serial port:", ports)
            .prompt()
            .expect("Failed to select port")
    });

    println!("Using port: {}", port_name);
    println!("Known outputs: {:?}", Output::names());

    // Open the session; this also switches the supply to remote mode.
    let mut psu: Psu = Psu::new();
    psu.connect(&port_name, BAUD_RATE)
        .expect("Failed to open serial port");

    // Program the first output
    psu.set_output_levels(Output::Out1, OUTPUT_VOLTAGE, CURRENT_LIMIT, true)
        .expect("Failed to set output levels");
    println!(
        "Set OUT1 to {}V with a {}A current limit, output enabled",
        OUTPUT_VOLTAGE, CURRENT_LIMIT
    );

    // Wait for the output to stabilize
    std::thread::sleep(std::time::Duration::from_millis(STABILIZATION_DELAY_MS));

    // Read back all four measured values
    let voltage = psu.measure(Output::Out1, Measurement::Voltage).unwrap();
    println!("Measured output voltage: {:.3}V", voltage);

    let current = psu.measure(Output::Out1, Measurement::Current).unwrap();
    println!("Measured output current: {:.3}A", current);

    let power = psu.measure(Output::Out1, Measurement::Power).unwrap();
    println!("Measured output power: {:.3}W", power);

    let protection = psu
        .measure(Output::Out1, Measurement::ProtectionStatus)
        .unwrap();
    println!("Protection status: {}", protection);

    // Switch the output back off and hand the panel back to the operator
    psu.set_output_state(false).expect("Failed to disable output");
    psu.close().expect("Failed to close session");
    println!("Session closed, device back in local mode");
}
