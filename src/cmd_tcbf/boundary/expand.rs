use clap::*;
use std::io::Write;
use tcbf::libs::tad::{expand_alignments, genome_of, read_alignments};

pub fn make_subcommand() -> Command {
    Command::new("expand")
        .about("Normalizes labelled boundary alignments into boundary hits")
        .after_help(
            r###"
Input is a tab-separated table of query boundaries and the target boundaries they aligned to:

    query_tad  query_side  target_label

where target_label is `<genome>_<tad_index>_<side>[-<position>]`. A boundary without a
position, or with position `middle`, is shared by TAD <tad_index> and its predecessor, so it
expands into two hits:

    Q1  left  hg38_5_left        ->  Q1 left 5 left
                                     Q1 left 4 right

Output is the hit table consumed by `tcbf boundary classify`:

    query_tad  query_side  target_tad_index  target_side

Notes:
* Identical hits are written once
* A label's own TAD wins over the predecessor pair implied by another interior label
* Two labels placing one TAD on both sides for the same query boundary are an error
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'

Examples:
1. Expand alignments:
   tcbf boundary expand alignments.tsv -o hits.tsv

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input alignment table"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();

    let rows = read_alignments(tcbf::reader(infile)?)?;
    let hits = expand_alignments(&rows)?;
    tracing::info!(
        alignments = rows.len(),
        hits = hits.len(),
        genome = genome_of(&rows).unwrap_or("-"),
        "expanded boundary alignments"
    );

    let mut writer = tcbf::writer(args.get_one::<String>("outfile").unwrap())?;
    for hit in &hits {
        writeln!(writer, "{}", hit)?;
    }
    writer.flush()?;

    Ok(())
}
