//! Tracing setup for the CLI. Tables go to stdout, so log events go to stderr.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

pub fn init_logging(verbose: bool) {
    let (crate_level, default_directive) = if verbose {
        (LevelFilter::DEBUG, "ec2pricing=debug")
    } else {
        (LevelFilter::WARN, "warn")
    };
    let crate_filter = Targets::new()
        .with_target("ec2pricing", crate_level)
        .with_default(LevelFilter::WARN);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .with(crate_filter)
        .with(env_filter)
        .init();
}
