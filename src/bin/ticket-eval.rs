#[path = "ticket-eval/app.rs"]
mod app;
#[path = "ticket-eval/args.rs"]
mod args;
#[path = "ticket-eval/config/mod.rs"]
mod config;
#[path = "ticket-eval/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
