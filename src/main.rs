//! Fractal Automata CLI - Evolve a rule table toward a target PGM image.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use fractal_automata::{
    compute::evolution::{EvolutionEngine, ProgressArchive},
    pnm::{GrayImage, PnmError, read_pgm},
    schema::EvolutionConfig,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <target.pgm | -> [config.json]", args[0]);
        eprintln!();
        eprintln!("Evolve a fractal rule table that approximates a target image.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  target.pgm   ASCII PGM (P2) target, or - to read stdin");
        eprintln!("  config.json  Optional evolution configuration");
        eprintln!();
        eprintln!("Print the default configuration with --example.");
        eprintln!("Runs until interrupted; progress.pgm, video.ppm and best.txt");
        eprintln!("are rewritten in the output directory on every improvement.");
        std::process::exit(1);
    }

    // Load configuration
    let config: EvolutionConfig = match args.get(2) {
        Some(path) => {
            let config_str = fs::read_to_string(path).unwrap_or_else(|e| {
                fail(format!("Error reading config file: {}", e));
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                fail(format!("Error parsing config: {}", e));
            })
        }
        None => EvolutionConfig::default(),
    };
    if let Err(e) = config.validate() {
        fail(format!("Invalid config: {}", e));
    }

    // Load target
    let target = load_target(&args[1], config.resolution).unwrap_or_else(|e| {
        fail(format!("Invalid input: {}", e));
    });
    let ncolors = target.ncolors();
    let iterations = config.iterations();

    let mut archive = ProgressArchive::create(&config.output, ncolors, iterations)
        .unwrap_or_else(|e| {
            fail(format!(
                "Error creating output in {}: {}",
                config.output.dir.display(),
                e
            ));
        });

    let mut engine = EvolutionEngine::new(config, &target.image, ncolors).unwrap_or_else(|e| {
        fail(format!("Invalid input: {}", e));
    });

    let stdout = io::stdout();
    engine.run_with_callback(|progress| {
        if let Some(improvement) = &progress.improvement
            && let Err(e) = archive.record(improvement)
        {
            log::warn!(
                "Failed to write progress artifacts to {}: {}",
                archive.dir().display(),
                e
            );
        }

        let mut out = stdout.lock();
        let _ = writeln!(
            out,
            "{:12} {:.6} {:.6}",
            progress.generation, progress.best_score, progress.generation_best
        );
    });
}

fn load_target(path: &str, resolution: usize) -> Result<GrayImage, PnmError> {
    let reader: Box<dyn Read> = if path == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(Path::new(path))?))
    };
    read_pgm(reader, resolution)
}

fn fail(message: String) -> ! {
    log::error!("{}", message);
    eprintln!("{}", message);
    std::process::exit(1);
}

fn print_example_config() {
    let config = EvolutionConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("Error serializing config: {}", e)),
    }
}
