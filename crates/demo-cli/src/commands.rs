use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use demo_client::Client;
use demo_jsonserver::{JsonServer, ServerConfig};
use demo_provider::{FilesystemConfig, JsonServerConfig, Provider, ProviderConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Create(args) => cmd_create(&cli.backend, args),
        Command::Read(args) => cmd_read(&cli.backend, args),
        Command::Update(args) => cmd_update(&cli.backend, args),
        Command::Delete(args) => cmd_delete(&cli.backend, args),
        Command::Serve(args) => cmd_serve(args),
    }
}

impl BackendArgs {
    pub fn to_config(&self) -> anyhow::Result<ProviderConfig> {
        if let Some(path) = &self.config {
            if self.workdir.is_some() || self.url.is_some() {
                anyhow::bail!("--config cannot be combined with --workdir or --url");
            }
            return ProviderConfig::load(path)
                .with_context(|| format!("loading {}", path.display()));
        }
        Ok(ProviderConfig {
            filesystem: self.workdir.as_ref().map(|workdir| FilesystemConfig {
                workdir: workdir.clone(),
            }),
            jsonserver: self.url.as_ref().map(|url| JsonServerConfig {
                url: url.clone(),
                timeout_secs: self.timeout_secs,
            }),
        })
    }
}

fn connect(backend: &BackendArgs) -> anyhow::Result<Provider> {
    let config = backend.to_config()?;
    tracing::debug!(?config, "resolved provider configuration");
    Ok(Provider::configure(&config)?)
}

fn read_payload(arg: &str) -> anyhow::Result<Vec<u8>> {
    if arg == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).context("reading payload from stdin")?;
        Ok(buf)
    } else {
        Ok(arg.as_bytes().to_vec())
    }
}

fn cmd_create(backend: &BackendArgs, args: CreateArgs) -> anyhow::Result<ExitCode> {
    let provider = connect(backend)?;
    let payload = read_payload(&args.payload)?;
    let id = provider.client().create(&payload).context("sending create request")?;
    eprintln!("{} Created record on {}", "✓".green().bold(), provider.backend_kind().to_string().cyan());
    println!("{id}");
    Ok(ExitCode::SUCCESS)
}

fn cmd_read(backend: &BackendArgs, args: ReadArgs) -> anyhow::Result<ExitCode> {
    let provider = connect(backend)?;
    match read_record(provider.client().as_ref(), &args.id)? {
        Some(payload) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&payload)?;
            stdout.write_all(b"\n")?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{} Record {} not found", "✗".red().bold(), args.id.yellow());
            Ok(ExitCode::from(2))
        }
    }
}

/// `None` when the backend reports the record absent.
fn read_record(client: &dyn Client, id: &str) -> anyhow::Result<Option<Vec<u8>>> {
    match client.read(id) {
        Ok(payload) => Ok(Some(payload)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e).context("sending read request"),
    }
}

fn cmd_update(backend: &BackendArgs, args: UpdateArgs) -> anyhow::Result<ExitCode> {
    let provider = connect(backend)?;
    let payload = read_payload(&args.payload)?;
    provider
        .client()
        .update(&args.id, &payload)
        .context("sending update request")?;
    eprintln!("{} Updated record {}", "✓".green().bold(), args.id.yellow());
    Ok(ExitCode::SUCCESS)
}

fn cmd_delete(backend: &BackendArgs, args: DeleteArgs) -> anyhow::Result<ExitCode> {
    let provider = connect(backend)?;
    provider.client().delete(&args.id).context("sending delete request")?;
    eprintln!("{} Deleted record {}", "✓".green().bold(), args.id.yellow());
    Ok(ExitCode::SUCCESS)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<ExitCode> {
    let server = JsonServer::new(ServerConfig {
        bind_addr: args.bind,
        collection: args.collection,
    })?;
    println!(
        "json-server on {} (collection: /{})",
        args.bind.to_string().bold(),
        server.config().collection.trim_matches('/')
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(ExitCode::SUCCESS)
}
