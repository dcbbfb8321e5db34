//! Demo driver: logs a series RLC discharge and dumps the run to disk.
//!
//! Produces `rlc_results.csv` (delimited text with titles) and
//! `rlc_results.bin` (binary dump) in the working directory. Set
//! `RUST_LOG=debug` to watch the dump operations.

use tracing::info;
use tracing_subscriber::EnvFilter;

use sample_logger::{Result, SampleLogger, DEFAULT_TEXT_DELIMITER};

// Simulation parameters: a 10 ohm / 1 mH / 1 uF series loop discharging
// from 12 V, integrated with forward Euler.
const DT: f64 = 50.0e-9;
const T_FINAL: f64 = 2.0e-3;
const R: f64 = 10.0;
const L: f64 = 1.0e-3;
const C: f64 = 1.0e-6;
const V0: f64 = 12.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let num_steps = (T_FINAL / DT) as usize;
    let titles = vec![
        "Time (s)".to_owned(),
        "Capacitor voltage (V)".to_owned(),
        "Inductor current (A)".to_owned(),
    ];

    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(num_steps + 1, titles.len())?;

    // Row for t = 0 carries the initial capacitor voltage.
    log.push(0.0)?.push(V0)?.push(0.0)?;

    let mut time = 0.0;
    let mut v_c = V0;
    let mut i_l = 0.0;
    while time < T_FINAL && !log.is_full() {
        time += DT;
        let di = (-R * i_l - v_c) / L;
        let dv = i_l / C;
        i_l += DT * di;
        v_c += DT * dv;

        log.push(time)?.push(v_c)?.push(i_l)?;
    }

    log.dump_to_text_file_with_titles("rlc_results.csv", &titles, DEFAULT_TEXT_DELIMITER)?;
    log.dump_to_bin_file("rlc_results.bin", &titles)?;

    info!(
        steps = num_steps,
        samples = log.len(),
        "simulation logged and dumped to rlc_results.{{csv,bin}}"
    );
    Ok(())
}
