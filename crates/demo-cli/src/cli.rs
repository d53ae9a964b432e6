use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "demo",
    about = "Demo provider: records on the filesystem or a json-server",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Backend selection. Exactly one of `--workdir`, `--url` or `--config`.
#[derive(Args, Debug, Default)]
pub struct BackendArgs {
    /// Store records as files in this directory
    #[arg(long, global = true)]
    pub workdir: Option<PathBuf>,
    /// Store records in the json-server collection at this URL
    #[arg(long, global = true)]
    pub url: Option<String>,
    /// Per-request timeout for --url, in seconds
    #[arg(long, global = true, requires = "url")]
    pub timeout_secs: Option<u64>,
    /// Read the provider configuration from a TOML file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a record and print its id
    Create(CreateArgs),
    /// Print the payload of a record
    Read(ReadArgs),
    /// Replace the payload of a record
    Update(UpdateArgs),
    /// Delete a record
    Delete(DeleteArgs),
    /// Run an in-memory json-server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// Payload, or `-` to read it from stdin
    pub payload: String,
}

#[derive(Args)]
pub struct ReadArgs {
    pub id: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: String,
    /// Payload, or `-` to read it from stdin
    pub payload: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,
    #[arg(long, default_value = "posts")]
    pub collection: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_backend_after_subcommand() {
        let cli = Cli::parse_from(["demo", "read", "abc", "--workdir", "/tmp/w"]);
        assert_eq!(cli.backend.workdir, Some(PathBuf::from("/tmp/w")));
        assert!(matches!(cli.command, Command::Read(ReadArgs { ref id }) if id == "abc"));
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::parse_from(["demo", "serve"]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
                assert_eq!(args.collection, "posts");
            }
            _ => panic!("expected serve"),
        }
    }
}
