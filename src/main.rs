use clap::Parser;

use lanesim::cli::Args;
use lanesim::headless::{run_headless_match, HeadlessMatchConfig};

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match HeadlessMatchConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        },
        None => HeadlessMatchConfig::default(),
    };

    if let Some(output) = args.output {
        config.output_path = Some(output);
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }
    if let Some(speed) = args.speed {
        config.game_speed = speed;
    }

    match run_headless_match(config) {
        Ok(result) => {
            println!(
                "winner: {}  time: {:.1}s  K/D: {}/{}  gold: {}",
                result.winner.as_deref().unwrap_or("draw"),
                result.match_time,
                result.player_kills,
                result.player_deaths,
                result.player_gold,
            );
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
