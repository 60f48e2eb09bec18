pub mod classify;
pub mod expand;

pub fn make_subcommand() -> clap::Command {
    clap::Command::new("boundary")
        .about("TAD boundary hit tools")
        .subcommand_required(true)
        .subcommand(classify::make_subcommand())
        .subcommand(expand::make_subcommand())
}

pub fn execute(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("classify", sub_matches)) => classify::execute(sub_matches),
        Some(("expand", sub_matches)) => expand::execute(sub_matches),
        _ => Ok(()),
    }
}
