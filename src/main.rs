extern crate docopt;
extern crate env_logger;
extern crate failure;
extern crate libc;
extern crate serde_json;
extern crate timeslider;

#[macro_use]
extern crate log;

use docopt::Docopt;
use failure::{err_msg, Error, ResultExt};

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io;
use std::io::{BufReader, Read};
use std::process;

use timeslider::{replay, ContainerGeometry, ExternalInterval, SessionScript, SliderObserver,
                 TimeInterval};

const USAGE: &'static str = "
TimeSlider - replays a recorded time-range slider session and prints the saved intervals.

The input is a header of `key: value` lines, an empty line and a JSON session body:
{\"times\": [{\"from\": \"HH:mm\", \"until\": \"HH:mm\"}, ...], \"events\": [...]}.
The header may be left out entirely.

Usage:
  timeslider [<session_file>]
  timeslider (-h | --help)
  timeslider --version

Options:
  <session_file>    Where to read the session from (stdin by default).
  -h --help         Shows this screen.
  --version         Prints the version of your TimeSlider.
";

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
const DEFAULT_SLIDER_LEFT: f64 = 0.0;
const DEFAULT_SLIDER_WIDTH: f64 = 1440.0;

struct PrintObserver;

impl SliderObserver for PrintObserver {
    fn on_draft_update(&mut self, interval: &TimeInterval, index: usize) {
        println!("draft #{}: {}", index, interval);
    }

    fn on_session_saved(&mut self, intervals: &[ExternalInterval]) {
        match serde_json::to_string(intervals) {
            Ok(json) => println!("saved: {}", json),
            Err(e) => error!("Could not serialize saved intervals: {}", e),
        }
    }

    fn on_change_flagged(&mut self, changed: bool) {
        println!("changed: {}", changed);
    }
}

fn main() {
    env_logger::init();

    let args = Docopt::new(USAGE)
        .and_then(|dopt| dopt.parse())
        .unwrap_or_else(|e| e.exit());

    if args.get_bool("--version") {
        println!("{}", VERSION.unwrap_or("unknown"));
        process::exit(libc::EXIT_SUCCESS);
    }

    if let Err(e) = run(args.get_str("<session_file>")) {
        eprintln!("timeslider: {}", e);
        for cause in e.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(libc::EXIT_FAILURE);
    }
}

fn run(session_file: &str) -> Result<(), Error> {
    let (config, script) = if session_file.is_empty() {
        parse_input(BufReader::new(io::stdin()))?
    } else {
        trace!("Reading session from {:?}", session_file);
        let file = File::open(session_file).context(format!("Could not open {}", session_file))?;
        parse_input(BufReader::new(file))?
    };

    let geometry = geometry_from_config(&config)?;
    debug!("Slider geometry: {:?}", geometry);

    let result = replay(&script, geometry, PrintObserver)?;

    for &(position, ref e) in &result.rejected {
        eprintln!("Warning: event #{} rejected: {}", position, e);
    }
    if result.editor.has_unsaved_changes() {
        eprintln!("Warning: the session ended with unsaved changes");
    }

    let current = result.editor.interval_set().to_external_list();
    println!("intervals: {}", serde_json::to_string(&current)?);

    Ok(())
}

fn geometry_from_config(config: &HashMap<String, String>) -> Result<ContainerGeometry, Error> {
    let left = match config.get("slider.left") {
        Some(value) => value.parse::<f64>().context("slider.left must be a number")?,
        None => DEFAULT_SLIDER_LEFT,
    };

    let width = match env::var("TIMESLIDER_WIDTH").ok().or(config.get("slider.width").cloned()) {
        Some(value) => value.parse::<f64>().context("slider width must be a number")?,
        None => {
            info!(
                "No slider width defined, falling back to {}",
                DEFAULT_SLIDER_WIDTH
            );
            DEFAULT_SLIDER_WIDTH
        }
    };

    Ok(ContainerGeometry::new(left, width))
}

fn parse_input<T: Read>(
    mut input: BufReader<T>,
) -> Result<(HashMap<String, String>, SessionScript), Error> {
    let mut input_buf = String::new();
    input.read_to_string(&mut input_buf)?;

    let trimmed = input_buf.trim_start();
    let (header, body) = if trimmed.starts_with('{') {
        ("", trimmed)
    } else {
        let mut sections = input_buf.splitn(2, "\n\n");
        let header = sections.next().unwrap_or("");
        let body = sections
            .next()
            .ok_or_else(|| err_msg("No session body found after the header"))?;
        (header, body)
    };

    let mut config = HashMap::new();
    // Parse config value section
    for line in header.lines().filter(|line| !line.trim().is_empty()) {
        let entry: Vec<&str> = line.splitn(2, ": ").collect();
        if entry.len() != 2 {
            return Err(err_msg(format!("Malformed header line {:?}", line)));
        }
        trace!("Got key '{}' with value '{}'.", entry[0], entry[1]);

        config.insert(String::from(entry[0].trim()), String::from(entry[1].trim()));
    }

    let script: SessionScript = serde_json::from_str(body).context("Malformed session body")?;

    Ok((config, script))
}
