// 🖨️ Console Front End - line-oriented play without a TUI
//
// Reads one guess per line; ":hint", ":reset" and ":quit" are commands.
// Each board row is printed as fixed-width ANSI-colored cells.

use crate::compare::{Attribute, Verdict};
use crate::error::PokedleError;
use crate::session::{GameSession, GuessRecord};
use std::io::{self, BufRead, Write};

const GREEN_BG: &str = "\x1b[42m";
const YELLOW_BG: &str = "\x1b[43m";
const RED_BG: &str = "\x1b[41m";
const WHITE_TEXT: &str = "\x1b[97m";
const RESET: &str = "\x1b[0m";

const CELL_WIDTH: usize = 15;

fn verdict_background(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Exact => GREEN_BG,
        Verdict::Partial => YELLOW_BG,
        Verdict::NoMatch => RED_BG,
    }
}

/// Text centered in a colored cell
pub fn color_cell(text: &str, verdict: Verdict) -> String {
    format!(
        "{}{}{:^width$}{}",
        verdict_background(verdict),
        WHITE_TEXT,
        text,
        RESET,
        width = CELL_WIDTH
    )
}

pub fn header_line() -> String {
    std::iter::once(format!("{:^width$}", "Name", width = CELL_WIDTH))
        .chain(
            Attribute::ALL
                .iter()
                .map(|a| format!("{:^width$}", a.label(), width = CELL_WIDTH)),
        )
        .collect()
}

pub fn render_row(record: &GuessRecord) -> String {
    let mut line = format!("{:^width$}", record.guess.name, width = CELL_WIDTH);
    for (attribute, verdict) in record.comparison.iter() {
        line.push_str(&color_cell(&attribute.display_value(&record.guess), verdict));
    }
    line
}

/// Play until ":quit" or end of input
pub fn run_console<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "Welcome to Pokedle!")?;
    writeln!(
        output,
        "Guess a Pokémon by name. Green=match, Yellow=partial, Red=no match."
    )?;
    writeln!(output, "Commands: :hint  :reset  :quit")?;
    writeln!(output, "{}", header_line())?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();

        match command {
            "" => continue,
            ":quit" => break,
            ":hint" => {
                if session.hint_exhausted() {
                    writeln!(output, "Full name: {}", session.target().name)?;
                } else {
                    writeln!(output, "Hint: {}", session.hint())?;
                }
            }
            ":reset" => {
                session.reset();
                writeln!(output, "New game started.")?;
                writeln!(output, "{}", header_line())?;
            }
            guess => match session.submit_guess(guess) {
                Ok(outcome) => {
                    writeln!(output, "{}", render_row(&outcome.record))?;
                    if outcome.won {
                        writeln!(
                            output,
                            "Congratulations! You found {} in {} tries.",
                            outcome.record.guess.name, outcome.attempts
                        )?;
                        session.reset();
                        writeln!(output, "New game started.")?;
                        writeln!(output, "{}", header_line())?;
                    }
                }
                Err(e @ PokedleError::NotFound(_)) => writeln!(output, "{}", e)?,
                Err(e) => writeln!(output, "Error: {}", e)?,
            },
        }
    }

    Ok(())
}
