use std::env;

use dcloud_core::config::{resolve_with_base, Config};
use dcloud_loader::{ChunkLoader, ChunkQuery, ReplayClient};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_args() -> (String, String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() { usage(&prog); }
    let cmd = args.remove(0);
    (prog, cmd, args)
}

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {} <sql|load> [args...]", prog);
    eprintln!("  sql                    print the chunk query built from config");
    eprintln!("  load <response.json>   replay a captured query response through the loader");
    std::process::exit(1)
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,dcloud_loader=info"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let (prog, cmd, args) = parse_args();
    init_tracing()?;
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let loader_config = config.chunk_loader()?;
    match cmd.as_str() {
        "sql" => {
            let query = ChunkQuery::from_config(&loader_config)?;
            println!("{}", query.to_sql());
        }
        "load" => {
            let Some(response) = args.first() else { usage(&prog) };
            let path = resolve_with_base(&env::current_dir()?, response);
            let client = ReplayClient::from_path(&path, &loader_config.columns)?;
            let received = client.rows().len();
            let loader = ChunkLoader::new(loader_config, client)?;
            let documents = loader.load()?;
            for doc in &documents {
                println!("{}", serde_json::to_string(doc)?);
            }
            tracing::info!(
                path = %path.display(),
                received,
                loaded = documents.len(),
                "Replay complete"
            );
        }
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}
