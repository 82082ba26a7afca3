use crate::input::{parse_target_line, TargetSet};
use crate::model::ScrapeTarget;
use crate::InputError;
use std::io::{self, BufRead, Write};

const INTRO: &str = "enter the website url and its corresponding html selector separated by a comma to scrape content from (one per line)\n\
example: https://www.example.com,div.product-image img\n\
to start scraping type 'start'. to exit type 'exit' or press 'ctrl + c'";

const PROMPT: &str = "website url and html selector: ";

/// How an interactive input session ended
#[derive(Debug, PartialEq, Eq)]
pub enum Session {
    /// The user asked to start scraping these targets
    Start(Vec<ScrapeTarget>),

    /// The user asked to quit without scraping
    Exit,
}

/// Collects targets line by line until `start`, `exit`, or end of input
///
/// Invalid lines are reported and skipped. End of input behaves like `start`.
///
/// # Arguments
///
/// * `reader` - Source of input lines
/// * `out` - Where the intro text and prompts are written
pub fn read_targets<R: BufRead, W: Write>(reader: R, mut out: W) -> io::Result<Session> {
    writeln!(out, "{}", INTRO)?;

    let mut targets = TargetSet::new();
    let mut lines = reader.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        match line.trim() {
            "exit" => {
                tracing::info!("Stopping the scraper...");
                return Ok(Session::Exit);
            }
            "start" => break,
            _ => {}
        }

        match parse_target_line(&line) {
            Ok(target) => {
                if targets.insert(target) {
                    tracing::debug!("Replaced selector for an already entered URL");
                }
            }
            Err(InputError::Empty) => {}
            Err(e) => tracing::warn!("Skipping input line: {}", e),
        }
    }

    tracing::info!("Starting the scraper with {} target(s)...", targets.len());
    Ok(Session::Start(targets.into_targets()))
}
