use colored::Colorize;
use std::error::Error;
use std::io::IsTerminal;
use std::process::ExitCode;
use xo_inventory::args::{Action, Args};
use xo_inventory::config::{load_config_file, Config};
use xo_inventory::output::{render_host, render_list};
use xo_inventory::xo::{DumpFile, XoRestClient};
use xo_inventory::{inventory_from_source, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Keep main.rs thin, it can't hold tests.
    let args = Args::parse_args();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "xo-inventory:".red());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config_file = load_config_file(args.config.as_deref())?;
    logging::init_logging(config_file.as_deref())?;
    log::info!("#Start main() config_file={config_file:?}");

    let config = Config::from_env()?;
    let inventory = match &args.objects_file {
        Some(path) => inventory_from_source(DumpFile::new(path), &config).await?,
        None => {
            let (host, credentials) = config.connection()?;
            inventory_from_source(XoRestClient::new(host, credentials), &config).await?
        }
    };

    let pretty = std::io::stdout().is_terminal();
    let output = match args.action() {
        Action::List => render_list(&inventory, pretty)?,
        Action::Host(name) => render_host(&inventory, &name, pretty)?,
    };
    println!("{output}");

    Ok(())
}
