use std::path::PathBuf;
use std::process::ExitCode;

use asset_cli::{filter_keys, filter_partitions, init_tracing, show, ShowOptions};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

fn query_arg() -> Arg {
    Arg::new("query")
        .long("query")
        .short('q')
        .default_value("")
        .help("Case-insensitive substring to match")
}

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn cli() -> Command {
    Command::new("asset-lens")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect asset definitions and filter asset keys or partitions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("show")
                .about("Render the definition view of a fetched asset bundle")
                .arg(input_arg("Bundle JSON with assetNode, upstream, downstream and liveData"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the view as JSON"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("View configuration (.toml, .yaml or .yml)"),
                )
                .arg(
                    Arg::new("filter-neighbors")
                        .long("filter-neighbors")
                        .help("Only list neighbors matching this query"),
                ),
        )
        .subcommand(
            Command::new("filter-keys")
                .about("Filter a JSON list of asset key paths")
                .arg(input_arg("JSON array of key paths, e.g. [[\"a\",\"b\"]]"))
                .arg(query_arg()),
        )
        .subcommand(
            Command::new("filter-partitions")
                .about("Filter a JSON list of partition names")
                .arg(input_arg("JSON array of partition names"))
                .arg(query_arg()),
        )
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let (name, args) = matches
        .subcommand()
        .ok_or_else(|| anyhow::anyhow!("no subcommand given"))?;
    let input = args
        .get_one::<PathBuf>("input")
        .ok_or_else(|| anyhow::anyhow!("missing input file"))?;

    match name {
        "show" => {
            let options = ShowOptions {
                json: args.get_flag("json"),
                config: args.get_one::<PathBuf>("config").cloned(),
                filter_neighbors: args.get_one::<String>("filter-neighbors").cloned(),
            };
            show(input, &options)
        }
        "filter-keys" | "filter-partitions" => {
            let query = args.get_one::<String>("query").map_or("", String::as_str);
            if name == "filter-keys" {
                filter_keys(input, query)
            } else {
                filter_partitions(input, query)
            }
        }
        other => anyhow::bail!("unknown subcommand {other}"),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match run(&matches) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
