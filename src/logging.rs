use tracing_subscriber::EnvFilter;

/// Log level used when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVE: &str = "warn";

/**
  Installs the global `tracing` subscriber. Logs go to stderr, since stdout carries the program's
  `PRN` output.

  Set the environment variable `RUST_LOG` to one of `trace`, `debug`, `info`, `warn`, or `error`.
  `debug` logs every executed instruction and `trace` adds a register dump per cycle.
*/
pub fn init() {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(true)
    .with_level(true)
    // The target is mostly just noise.
    .with_target(false)
    .without_time()
    .init();
}
