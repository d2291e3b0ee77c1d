use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;

/// Log targets used across the crate.
pub const IDENTITY: &str = "Identity";
pub const DISCOVERY: &str = "Discovery";
pub const TRANSPORT: &str = "Transport";
pub const CLIENT: &str = "Client";

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRACE",
        Level::Debug => "DEBUG",
        Level::Info => "INFO ",
        Level::Warn => "WARN ",
        Level::Error => "ERROR",
    }
}

/// Install the console logger. `RUST_LOG` overrides `default_filter`.
/// Calling it twice is harmless; the second call is ignored.
pub fn init(default_filter: &str) {
    let _ = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                level_label(record.level()),
                record.target(),
                record.args()
            )
        })
        .try_init();
}

/// Hex rendering used by the `packet-dump` feature.
#[cfg(feature = "packet-dump")]
pub fn hex_dump(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
