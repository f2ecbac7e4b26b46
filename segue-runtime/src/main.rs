use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use segue_algorithms::{algorithm_names, get_algorithm, Params};
use segue_challenges::{Playlist, Story, StoryMetrics};
use segue_utils::{jsonify_pretty, load_json_arg, seed_from_str};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("segue-runtime")
        .about("Orders a playlist into a story of segues, or verifies one")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Builds a story with a named algorithm")
                .arg(
                    arg!(<PLAYLIST> "Playlist json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--algorithm [ALGORITHM] "Registered algorithm name (see `list`)")
                        .default_value("greedy")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--hyperparameters [HYPERPARAMETERS] "Hyperparameters json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the report will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--verbose "Log solver progress to stderr").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a story against a playlist")
                .arg(
                    arg!(<PLAYLIST> "Playlist json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<STORY> "Story or solve report json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(--verbose "Log to stderr").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random playlist")
                .arg(
                    arg!(<SEED> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--items [ITEMS] "Number of songs")
                        .default_value("20")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--density [DENSITY] "Probability that an ordered pair of songs is connected")
                        .default_value("0.3")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the playlist will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(Command::new("list").about("Lists the registered algorithm names"))
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => required(sub_m, "PLAYLIST").and_then(|playlist| {
            solve(
                playlist,
                sub_m.get_one::<String>("algorithm").cloned().unwrap_or_default(),
                sub_m.get_one::<String>("hyperparameters").cloned(),
                sub_m.get_one::<PathBuf>("output").cloned(),
                sub_m.get_flag("verbose"),
            )
        }),
        Some(("verify", sub_m)) => required(sub_m, "PLAYLIST").and_then(|playlist| {
            verify(
                playlist,
                required(sub_m, "STORY")?,
                sub_m.get_flag("verbose"),
            )
        }),
        Some(("generate", sub_m)) => required(sub_m, "SEED").and_then(|seed| {
            generate(
                seed,
                sub_m.get_one::<usize>("items").copied().unwrap_or(20),
                sub_m.get_one::<f64>("density").copied().unwrap_or(0.3),
                sub_m.get_one::<PathBuf>("output").cloned(),
            )
        }),
        Some(("list", _)) => {
            for name in algorithm_names() {
                println!("{}", name);
            }
            Ok(())
        }
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Output of `solve`, also accepted by `verify`.
#[derive(Serialize, Deserialize, Debug)]
struct Report {
    algorithm: String,
    ids: Vec<String>,
    story: Story,
    metrics: StoryMetrics,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoryInput {
    Report { story: Story },
    Bare(Story),
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("Missing argument {}", name))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_output(json: String, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => fs::write(&path, json)
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e)),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

pub fn solve(
    playlist: String,
    algorithm: String,
    hyperparameters: Option<String>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    init_logging(verbose);
    let playlist: Playlist = load_json_arg(&playlist)?;
    playlist.validate()?;
    let hyperparameters = match hyperparameters {
        Some(arg) => Some(load_json_arg::<Map<String, Value>>(&arg)?),
        None => None,
    };
    let (solver, preset) = get_algorithm(&algorithm)?;
    let params = Params::initialize(preset, &hyperparameters)?;
    tracing::info!(
        algorithm = algorithm.as_str(),
        items = playlist.items.len(),
        transitions = playlist.transitions.len(),
        "playlist loaded"
    );

    let story = solver.solve(&playlist, &playlist.items, &playlist.weights, &params)?;
    story.verify(&playlist.items)?;

    let report = Report {
        algorithm,
        ids: story.ids(&playlist.items),
        metrics: StoryMetrics::from_story(&story),
        story,
    };
    write_output(jsonify_pretty(&report)?, output)
}

pub fn verify(playlist: String, story: String, verbose: bool) -> Result<()> {
    init_logging(verbose);
    let playlist: Playlist = load_json_arg(&playlist)?;
    playlist.validate()?;
    let story = match load_json_arg::<StoryInput>(&story)? {
        StoryInput::Report { story } | StoryInput::Bare(story) => story,
    };
    story
        .verify(&playlist.items)
        .map_err(|e| anyhow!("Invalid story: {}", e))?;
    println!("Story is valid. Objective: {}", story.objective());
    Ok(())
}

pub fn generate(seed: String, items: usize, density: f64, output: Option<PathBuf>) -> Result<()> {
    let playlist = Playlist::generate_instance(&seed_from_str(&seed), items, density)?;
    write_output(jsonify_pretty(&playlist)?, output)
}
