use {clap::Parser, std::process::ExitCode};

#[tokio::main]
async fn main() -> ExitCode {
    // Variables already set in the environment take precedence over `.env`.
    dotenvy::dotenv().ok();
    let args = deployer::arguments::Arguments::parse();
    observe::tracing::initialize(&args.log_filter, tracing::Level::ERROR);
    tracing::info!("running deployer with arguments:\n{}", args);
    deployer::main(args).await
}
