use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `debug` when verbose, else `info`.
/// Output goes to stderr so stdout stays free for protocol traffic.
pub fn init(verbose: bool, format: &str) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = match format {
        "json" => builder.json().with_target(true).try_init(),
        _ => builder.try_init(),
    };
}
