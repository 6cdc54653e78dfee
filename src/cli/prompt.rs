//! Interactive prompts.
//!
//! Generic over the reader and writer so the menu rules can be exercised without a terminal.

use std::io::{self, BufRead, Write};

use crate::config::CodeLabel;

/// A menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    pub item: &'a CodeLabel,
    /// The input was unusable and the first item was taken instead
    pub fell_back: bool,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for one line. End of input counts as an empty answer.
    pub fn line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    /// Numbered menu starting at 0.
    ///
    /// Blank input picks the first item; anything that is not a listed number also picks the
    /// first item, with a warning. `items` must not be empty.
    pub fn select<'a>(&mut self, title: &str, items: &'a [CodeLabel]) -> io::Result<Selection<'a>> {
        writeln!(self.output, "{}", title)?;
        for (i, item) in items.iter().enumerate() {
            if item.desc.is_empty() {
                writeln!(self.output, "{}: {}", i, item.label)?;
            } else {
                writeln!(self.output, "{}: {} [{}]", i, item.label, item.desc)?;
            }
        }

        let answer = self.line("Enter a number (blank for default): ")?;
        if answer.is_empty() {
            return Ok(Selection {
                item: &items[0],
                fell_back: false,
            });
        }

        match answer.parse::<usize>().ok().and_then(|i| items.get(i)) {
            Some(item) => Ok(Selection {
                item,
                fell_back: false,
            }),
            None => {
                writeln!(self.output, "Invalid input, using the default.")?;
                Ok(Selection {
                    item: &items[0],
                    fell_back: true,
                })
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
