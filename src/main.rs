use clap::Parser;
use gum::{Config, demos};
use log::LevelFilter;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gum", version, about = "Runs lowered programs on the gum dynamic-value runtime")]
struct Cli {
    /// Bundled program to run
    #[arg(default_value = "hello")]
    demo: String,

    /// List bundled programs and exit
    #[arg(short, long)]
    list: bool,

    /// Log filter: off, error, warn, info, debug or trace (RUST_LOG overrides)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Arguments exposed to the program as process.argv
    #[arg(last = true)]
    args: Vec<String>,
}

fn list_demos() -> ExitCode {
    for demo in demos::DEMOS {
        println!("{:<10} {}", demo.name, demo.summary);
    }
    ExitCode::SUCCESS
}

fn run_demo(name: &str, config: Config) -> ExitCode {
    let Some(demo) = demos::find(name) else {
        eprintln!("Unknown program '{name}' (try --list)");
        return ExitCode::from(1);
    };
    match gum::execute(config, &demo.entry()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Runtime error: {e}");
            ExitCode::from(1)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    if cli.list {
        return list_demos();
    }

    let argv = std::iter::once("gum".to_string()).chain(cli.args);
    let config = Config::default().with_argv(argv);
    run_demo(&cli.demo, config)
}
