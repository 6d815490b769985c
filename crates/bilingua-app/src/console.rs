use std::io::{self, Stdout, Write};

use bilingua_core::prune::{LineReport, PruneSummary, TokenOutcome};
use crossterm::style::{PrintStyledContent, Stylize};
use crossterm::{cursor, queue, terminal};

/// Operator-facing output of the pruning loop
pub struct Console<W = Stdout> {
    out: W,
    /// Both ends are a terminal: erase typed lines and use colors
    interactive: bool,
}

impl Console<Stdout> {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            interactive: atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout),
        }
    }
}

impl Default for Console<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Console<W> {
    pub fn with_writer(out: W, interactive: bool) -> Self {
        Self { out, interactive }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "Game launched")?;
        writeln!(
            self.out,
            "Enter the words to be removed from the dictionary separated by a space.\n"
        )?;
        self.out.flush()
    }

    /// Replace the typed line with the colored result of each word
    pub fn echo(&mut self, report: &LineReport) -> io::Result<()> {
        let out = &mut self.out;

        if self.interactive {
            queue!(
                out,
                cursor::MoveToPreviousLine(1),
                terminal::Clear(terminal::ClearType::CurrentLine)
            )?;
        }

        for token in &report.tokens {
            let label = token_label(token);
            if !self.interactive {
                write!(out, "{label}")?;
            } else if token.removed {
                queue!(out, PrintStyledContent(label.green()))?;
            } else {
                queue!(out, PrintStyledContent(label.red()))?;
            }
        }

        writeln!(out)?;
        out.flush()
    }

    pub fn summary(&mut self, summary: &PruneSummary) -> io::Result<()> {
        writeln!(self.out, "\nDictionary reduced by {}", summary.deleted)?;
        writeln!(self.out, "Current word count: {}", summary.remaining)?;
        self.out.flush()
    }
}

/// `word[count] `, count being 0 for words that were not found
pub fn token_label(token: &TokenOutcome) -> String {
    format!("{}[{}] ", token.word, token.occurrence_count)
}
