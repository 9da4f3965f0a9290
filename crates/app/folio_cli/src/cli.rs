use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Chat with a Folio portfolio assistant")]
pub struct Cli {
    /// YAML file overriding the built-in persona.
    #[arg(long, global = true, env = "FOLIO_PERSONA")]
    pub persona: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,

    /// Print the persona greeting and system prompt.
    Persona,

    /// Start an interactive chat. End a line with `\` to continue on the next.
    Chat {
        /// Root URL of a running folio_server.
        #[arg(long, env = "FOLIO_ENDPOINT", default_value = "http://127.0.0.1:3100")]
        endpoint: String,
    },

    /// Send one message and print the reply.
    Ask {
        /// Root URL of a running folio_server.
        #[arg(long, env = "FOLIO_ENDPOINT", default_value = "http://127.0.0.1:3100")]
        endpoint: String,

        /// The message to send.
        message: String,
    },
}
