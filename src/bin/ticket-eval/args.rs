use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ticket-eval",
    version,
    about = "Score support-ticket replies with an LLM rubric"
)]
pub struct CliArgs {
    /// CSV file with `ticket` and `reply` columns
    #[arg(long, short = 'i', default_value = "tickets.csv")]
    pub input: PathBuf,
    /// Where the scored table is written
    #[arg(long, short = 'o', default_value = "tickets_evaluated.csv")]
    pub output: PathBuf,
    #[arg(long, short = 'm')]
    pub model: Option<String>,
    /// Attempts per ticket before giving up on rate limiting
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_tries: Option<u32>,
    #[arg(long)]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Log level or filter spec; `RUST_LOG` takes precedence
    #[arg(long)]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// The credential, if one was given and is not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
