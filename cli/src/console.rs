use anyhow::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-oriented prompt/answer terminal
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Prompt and read one trimmed line. `None` on end of input or `q`.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{} ", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims_and_quits() {
        let mut console = Console::new(Cursor::new("  Paris \nQ\nlater\n"), Vec::new());
        assert_eq!(console.ask(">").unwrap().as_deref(), Some("Paris"));
        assert_eq!(console.ask(">").unwrap(), None);

        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out, "> > ");
    }

    #[test]
    fn test_ask_end_of_input() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        assert_eq!(console.ask(">").unwrap(), None);
    }
}
