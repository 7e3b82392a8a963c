/// Entry point for netspeed.
///
/// Samples the counters of one (or every) network interface once per second
/// and prints the deltas as JSON until it receives SIGINT, SIGTERM or SIGQUIT.
/// Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).
///
/// # Examples
///
/// ```bash
/// netspeed --interface eth0
/// netspeed --all --outfile /tmp/netspeed.json
/// netspeed stop
/// ```
#[tokio::main]
async fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    std::process::ExitCode::from(netspeed::run().await)
}
