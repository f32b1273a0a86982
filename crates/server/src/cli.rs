use std::path::PathBuf;

use clap::Parser;
use shared::model::LogFilter;

#[derive(Debug, Clone, Parser)]
#[clap(name = "exercise tracker server")]
pub struct Cli {
    #[clap(long, env, default_value = "assets")]
    pub assets_dir: PathBuf,
    #[clap(long, env, default_value = "exercise.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "3000")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
    /// `*` allows any origin
    #[arg(long, env, default_value = "*")]
    pub cors_origin: String,
    /// Log entries returned when the request doesn't give a usable limit
    #[arg(
        long,
        env,
        default_value_t = LogFilter::DEFAULT_LIMIT,
        value_parser = clap::value_parser!(u64).range(1..=LogFilter::MAX_LIMIT),
    )]
    pub default_log_limit: u64,
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn test_default_log_limit_must_fit_a_query() {
        let cli = Cli::try_parse_from(["server"]).unwrap();
        assert_eq!(cli.default_log_limit, 10);

        for bad in ["0", "9223372036854775808"] {
            let parsed = Cli::try_parse_from(["server", "--default-log-limit", bad]);
            assert!(parsed.is_err(), "{bad}");
        }
    }
}
