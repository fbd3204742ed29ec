use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

enum Format {
    Compact,
    Json,
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn init(filter: EnvFilter, format: Format) {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        Format::Compact => registry.with(layer.compact()).init(),
        // CloudWatch stamps each line itself
        Format::Json => registry.with(layer.without_time().json()).init(),
    }
}

/// Human-readable logs for the CLI; `--verbose` turns on crate debug output.
pub fn init_cli_logger(verbose: bool) {
    let default = if verbose { "lead_intake=debug,info" } else { "lead_intake=info" };
    init(env_filter(default), Format::Compact);
}

pub fn init_lambda_logger() {
    init(env_filter("lead_intake=info"), Format::Json);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_falls_back_to_default() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert_eq!(env_filter("lead_intake=info").to_string(), "lead_intake=info");
    }
}
