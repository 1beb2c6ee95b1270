use bpmnscope_core::cli::{dispatch, Cli};
use bpmnscope_core::exit::BpmnScopeExit;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> BpmnScopeExit {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    BpmnScopeExit::from(dispatch::execute(cli))
}

/// Logs go to stderr so JSON on stdout stays clean. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
