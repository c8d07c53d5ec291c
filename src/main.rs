//! lootgen - interactive Shadowrun loot generator

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lootgen::shell::{self, Reply};
use lootgen::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shadowrun loot generator
#[derive(Parser, Debug)]
#[command(name = "lootgen", version, about = "Generate random loot for Shadowrun campaigns")]
struct Args {
    /// Configuration file (default: lootgen.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file with loot tables
    #[arg(short, long)]
    tables: Option<PathBuf>,

    /// Directory to save exports in
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Seed for reproducible rolls
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // Logs go to stderr so they stay out of the rendered session
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lootgen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if args.tables.is_some() {
        config.tables_path = args.tables;
    }
    if let Some(dir) = args.export_dir {
        config.export_dir = dir;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut controller = lootgen::build_controller(&config);

    println!("Shadowrun Loot Generator - type 'help' for commands");
    print!("{}", shell::render_lists(controller.session()));
    print!("{}", shell::render_view(&controller.view()));

    // Re-render whenever the session changes
    controller.subscribe(|view| print!("{}", shell::render_view(view)));

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match shell::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match shell::execute(&mut controller, command) {
            Reply::Output(text) if text.is_empty() => {}
            Reply::Output(text) => println!("{}", text),
            Reply::Quit => break,
        }
    }

    Ok(())
}
