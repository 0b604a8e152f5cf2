//! Emit the twiddle ROM package for the RTL.
//!
//! ```text
//! gen-ntt-rom [OUTPUT]
//! ```
//!
//! Writes `ntt_rom_pkg` to OUTPUT, or to stdout when no path is given.

use std::io::Write;
use std::process::ExitCode;

use kyberlink::algorithms::poly::rom::render_package;
use kyberlink::algorithms::ZETAS;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let rom = match render_package(&ZETAS) {
        Ok(rom) => rom,
        Err(e) => {
            error!(error = %e, "failed to render twiddle ROM");
            return ExitCode::FAILURE;
        }
    };

    let result = match std::env::args_os().nth(1) {
        Some(path) => std::fs::write(&path, rom.as_bytes()).map(|()| {
            info!(path = %path.to_string_lossy(), "wrote twiddle ROM");
        }),
        None => std::io::stdout().lock().write_all(rom.as_bytes()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to write twiddle ROM");
            ExitCode::FAILURE
        }
    }
}
