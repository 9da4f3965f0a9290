// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use folio_core::persona::Persona;

mod chat;
mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();
    let persona = Persona::load_or_default(args.persona.as_deref())?;

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Persona => {
            println!("{}", persona.name);
            println!();
            println!("{}", persona.greeting);
            println!();
            println!("{}", persona.system_prompt);
        }
        Commands::Chat { endpoint } => {
            let rt = runtime()?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            chat::repl(&rt, &persona.greeting, endpoint, stdin.lock(), &mut stdout)?;
        }
        Commands::Ask { endpoint, message } => {
            let rt = runtime()?;
            chat::ask(&rt, &persona.greeting, endpoint, message)?;
        }
    }

    Ok(())
}
