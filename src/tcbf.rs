extern crate clap;
use clap::*;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

mod cmd_tcbf;

fn main() -> anyhow::Result<()> {
    let app = Command::new("tcbf")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`tcbf` - TAD Conserved Boundary Finder")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Report progress on stderr"),
        )
        .subcommand(cmd_tcbf::boundary::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* TAD boundaries:
    * boundary - Boundary hits: expand, classify

Logging goes to stderr; RUST_LOG overrides the level chosen by --verbose.

"###,
        );

    let matches = app.get_matches();
    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("boundary", sub_matches)) => cmd_tcbf::boundary::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
