use clap::Parser;
use tracing_subscriber::EnvFilter;
use vulnprobe::cli;
use vulnprobe::errors::VulnprobeError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        cli::Commands::Run(args) => cli::run::handle_run(args).await,
        cli::Commands::List(args) => cli::list::handle_list(args).await,
        cli::Commands::Validate(args) => cli::validate::handle_validate(args).await,
    };

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                VulnprobeError::Config(_) => 2,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
