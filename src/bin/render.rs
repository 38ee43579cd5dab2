//! Companion renderer - Draw a saved rule table as a scaled PGM on stdout.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use fractal_automata::{compute::render_parallel, pnm::write_pgm, schema::Ruleset};

const DEFAULT_SCALE: usize = 9;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: {} [ruleset.txt | -] [scale]", args[0]);
        eprintln!();
        eprintln!("Render a rule table (as written to best.txt) to an ASCII PGM on stdout.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  ruleset.txt  Rule table file (default: stdin)");
        eprintln!("  scale        Pixel replication factor (default: {DEFAULT_SCALE})");
        return;
    }

    let reader: Box<dyn Read> = match args.get(1).map(String::as_str) {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => fail(format!("Error opening {}: {}", path, e)),
        },
    };

    let scale = match args.get(2) {
        Some(s) => match s.parse::<usize>() {
            Ok(scale) if scale > 0 => scale,
            _ => fail(format!("Invalid scale: {}", s)),
        },
        None => DEFAULT_SCALE,
    };

    let ruleset = Ruleset::from_reader(reader).unwrap_or_else(|e| {
        fail(format!("Invalid ruleset: {}", e));
    });
    let resolution = ruleset.resolution().unwrap_or_else(|e| {
        fail(format!("Invalid ruleset: {}", e));
    });
    log::info!(
        "Rendering {} colors at {}x{}, scale {}",
        ruleset.table.ncolors(),
        resolution,
        resolution,
        scale
    );

    let image = render_parallel(&ruleset.table, resolution);

    let mut out = BufWriter::new(io::stdout().lock());
    let written =
        write_pgm(&image, ruleset.table.ncolors(), scale, &mut out).and_then(|_| out.flush());
    if let Err(e) = written {
        fail(format!("Error writing image: {}", e));
    }
}

fn fail(message: String) -> ! {
    log::error!("{}", message);
    eprintln!("{}", message);
    std::process::exit(1);
}
