use anyhow::{ensure, Context};
use clap::Parser;

use ticket_eval::{
    backends::openai::OpenAI,
    batch::{evaluate_tickets_usecase, read_tickets},
    evaluator::{TicketEvaluator, SYSTEM_PROMPT},
    resilient_llm::ResilienceConfig,
};

use crate::args::CliArgs;
use crate::config::{load_config, EvaluatorConfig};
use crate::logging::init_logging;

/// Evaluator settings after layering CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
struct RunSettings {
    model: String,
    max_tries: usize,
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
    temperature: Option<f32>,
    system_prompt: String,
}

impl RunSettings {
    fn resolve(args: &CliArgs, config: &EvaluatorConfig) -> Self {
        Self {
            model: args.model.clone().unwrap_or_else(|| config.model.clone()),
            max_tries: args
                .max_tries
                .map(|n| n as usize)
                .unwrap_or(config.max_tries),
            base_url: args.base_url.clone().or_else(|| config.base_url.clone()),
            timeout_seconds: args.timeout.or(config.timeout_seconds),
            temperature: config.temperature,
            system_prompt: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;

    let mut logging = loaded.config.logging.clone();
    if let Some(level) = &args.log_level {
        logging.level = level.clone();
    }
    let _logger = init_logging(&logging)?;
    if let Some(source) = &loaded.source {
        log::debug!("Loaded config from {}", source.display());
    }

    let settings = RunSettings::resolve(&args, &loaded.config.evaluator);
    ensure!(settings.max_tries >= 1, "max_tries must be at least 1");

    let api_key = args
        .api_key()
        .context("Please provide an OPENAI_API_KEY in the environment or via --api-key")?;
    ensure!(
        args.input.exists(),
        "{} does not exist",
        args.input.display()
    );

    let provider = OpenAI::new(
        api_key,
        settings.base_url.clone(),
        Some(settings.model.clone()),
        settings.temperature,
        settings.timeout_seconds,
    )?;
    let evaluator = TicketEvaluator::new(
        Box::new(provider),
        settings.system_prompt.clone(),
        ResilienceConfig::defaults().with_max_attempts(settings.max_tries),
    );

    let tickets = read_tickets(&args.input)
        .with_context(|| format!("failed to read tickets from {}", args.input.display()))?;
    log::info!(
        "Evaluating {} tickets with {} (max {} tries each)",
        tickets.len(),
        settings.model,
        settings.max_tries
    );

    let summary = evaluate_tickets_usecase(&tickets, &evaluator, &args.output)
        .await
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "Evaluated {}/{} tickets into {}",
        summary.evaluated,
        summary.total,
        args.output.display()
    );
    if !summary.is_complete() {
        let ids: Vec<String> = summary.failed.iter().map(ToString::to_string).collect();
        println!("Skipped tickets: {}", ids.join(", "));
    }
    Ok(())
}
