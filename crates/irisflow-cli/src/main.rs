use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use irisflow_classifiers::config::Parameters;
use irisflow_classifiers::nodes::accuracy_message;
use irisflow_cli::run::input::RunConfig;
use irisflow_cli::run::runner;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("IRISFLOW_LOG", "error,irisflow=info"))
        .init();

    let matches = Command::new("irisflow")
        .version(clap::crate_version!())
        .about("Train, evaluate and track a logistic-regression classifier on the iris dataset")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Split the data, train, predict and report accuracy")
                .arg(
                    Arg::new("config")
                        .help("Path to the JSON parameters file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Path to an iris CSV file with a `species` column. \
                             Defaults to the bundled dataset.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("tracking_dir")
                        .short('t')
                        .long("tracking-dir")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Directory the run is recorded into (default: mlruns)")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("diagram")
                        .long("diagram")
                        .help("Render the pipeline with Graphviz `dot` and log it as an artifact")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("template").about("Print a default parameters file"))
        .get_matches();

    match matches.subcommand() {
        Some(("run", sub_m)) => handle_run(sub_m),
        Some(("template", _)) => {
            println!("{}", serde_json::to_string_pretty(&Parameters::template())?);
            Ok(())
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let config_path: &PathBuf = matches
        .get_one("config")
        .ok_or_else(|| anyhow::anyhow!("missing config path"))?;
    log::info!("[irisflow] Running pipeline from config: {:?}", config_path);

    let config = RunConfig::from_arguments(config_path, matches)?;

    match runner::run_pipeline(&config) {
        Ok(summary) => {
            println!(
                "run {}: trained on {} rows, evaluated on {} rows",
                summary.run_id, summary.train_rows, summary.test_rows
            );
            println!("{}", accuracy_message(summary.accuracy));
            Ok(())
        }
        Err(e) => {
            log::error!("Pipeline failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
