use clap::*;
use std::io::Write;
use tcbf::libs::tad::{
    read_hits, to_network_rows, write_network, write_records, Classifier, ClassifyOptions,
};

pub fn make_subcommand() -> Command {
    Command::new("classify")
        .about("Classifies query TADs as conserved or split against the target TADs")
        .after_help(
            r###"
Input is the tab-separated hit table written by `tcbf boundary expand`:

    query_tad  query_side  target_tad_index  target_side

Sides are `left`/`right` (or 0/1). Hits of each query TAD are split by query side, then:

* conserved: a target TAD reached by both boundaries, from opposite sides     (weight 1)
* split:     left boundary on the left side of TAD i, right boundary on the
             right side of TAD i+1, or the mirrored orientation                (weight 0.5)

When no split pair is adjacent, a gap of one TAD is tolerated (see --max-shift).
Query TADs with hits on only one side produce nothing.

Output columns:

    query_tad  kind  target_tad_indices  weight

With --network, one row per target TAD instead:

    query_tad  <genome>_<target_tad_index>  weight

Notes:
* The whole batch fails if a (query_tad, query_side, target_tad_index) key has both target sides
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'

Examples:
1. Classify hits:
   tcbf boundary classify hits.tsv

2. Network rows for the synteny-block builder:
   tcbf boundary classify hits.tsv --network --genome hg38 -o hg38.network.tsv

3. Strict adjacency only:
   tcbf boundary classify hits.tsv --max-shift 1

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input boundary hit table"),
        )
        .arg(
            Arg::new("genome")
                .long("genome")
                .short('g')
                .num_args(1)
                .help("Genome name prefixed to target TAD indices"),
        )
        .arg(
            Arg::new("max_shift")
                .long("max-shift")
                .num_args(1)
                .default_value("2")
                .value_parser(value_parser!(i64).range(1..))
                .help("Largest target TAD offset tried by the split tests"),
        )
        .arg(
            Arg::new("network")
                .long("network")
                .action(ArgAction::SetTrue)
                .requires("genome")
                .help("Write network rows instead of records"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .action(ArgAction::SetTrue)
                .help("Classify query TADs in parallel"),
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
    let opt = ClassifyOptions {
        max_shift: *args.get_one::<i64>("max_shift").unwrap(),
        parallel: args.get_flag("parallel"),
    };
    let is_network = args.get_flag("network");

    let hits = read_hits(tcbf::reader(infile)?)?;
    let (records, summary) = Classifier::new(opt).classify_with_summary(&hits)?;
    tracing::info!(
        hits = hits.len(),
        query_tads = summary.query_tads,
        skipped = summary.skipped,
        unresolved = summary.unresolved,
        conserved = summary.conserved,
        split = summary.split,
        "classified boundary hits"
    );

    let mut writer = tcbf::writer(args.get_one::<String>("outfile").unwrap())?;
    if is_network {
        let genome = args.get_one::<String>("genome").unwrap();
        write_network(&mut writer, &to_network_rows(&records, genome))?;
    } else {
        write_records(&mut writer, &records)?;
    }
    writer.flush()?;

    Ok(())
}
