use clap::Parser;

use line_tally::cli::{Cli, Commands};
use line_tally::commands::{run_file, run_init, run_total, run_watch};

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = match &cli.command {
        Commands::File(args) => run_file(args),
        Commands::Total(args) => run_total(args, &cli),
        Commands::Watch(args) => run_watch(args, &cli),
        Commands::Init(args) => run_init(args),
    };

    std::process::exit(exit_code);
}
