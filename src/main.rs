use pokemon_battle_engine::{run, Command};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: pokemon-battle battle --roster roster.json [--seed SEED] [--config options.json] [--json]\n\
         \x20      pokemon-battle simulate --roster roster.json [--battles N] [--seed SEED] [--config options.json]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<Command> {
    let mut args = env::args().skip(1);
    let subcommand = match args.next() {
        Some(cmd) => cmd,
        None => usage(),
    };

    let mut roster_path = PathBuf::from("roster.json");
    let mut config_path = None;
    let mut seed = 0u64;
    let mut battles = 1000usize;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--roster" => {
                roster_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--roster requires a path (e.g. --roster roster.json)")
                })?;
            }
            "--config" => {
                config_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--config requires a path (e.g. --config options.json)")
                })?);
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--battles" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--battles requires a number"))?;
                battles = val.parse()?;
            }
            "--json" => json = true,
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    match subcommand.as_str() {
        "battle" => Ok(Command::Battle {
            roster_path,
            config_path,
            seed,
            json,
        }),
        "simulate" => Ok(Command::Simulate {
            roster_path,
            config_path,
            battles,
            seed,
        }),
        "--help" | "-h" => usage(),
        other => anyhow::bail!("Unknown command {other} (use battle or simulate)"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = parse_args()?;
    run(opts)
}
