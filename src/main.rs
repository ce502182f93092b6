use clap::Parser;
use miette::Result;
use pxedit::cli::{self, Cli, Commands};
use pxedit::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli::log_level(cli.verbose).as_str()));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::New(args) => {
            cli::new::run(args, &printer)?;
        }
        Commands::Import(args) => {
            cli::import::run(args, &printer)?;
        }
        Commands::Export(args) => {
            cli::export::run(args, &printer)?;
        }
        Commands::Info(args) => cli::info::run(args, &printer)?,
        Commands::List(args) => {
            cli::list::run(args, &printer)?;
        }
        Commands::Delete(args) => cli::delete::run(args, &printer)?,
        Commands::Paint(args) => {
            cli::paint::run(args, &printer)?;
        }
        Commands::Layer(args) => {
            cli::layer::run(args, &printer)?;
        }
        Commands::Frame(args) => {
            cli::frame::run(args, &printer)?;
        }
        Commands::Completions(args) => cli::completions::run(args)?,
    }

    Ok(())
}
