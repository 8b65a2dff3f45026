use crate::args::FieldArgs;
use std::io::{BufRead, Write};
use std::str::FromStr;
use treasure_manager::error::{Result, TreasureError};
use treasure_manager::model::NewTreasure;

/// Collects treasure fields line by line.
///
/// When attached to a terminal, unparsable numbers and empty usernames are
/// asked for again; otherwise they are usage errors.
pub(super) struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(super) fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
        }
    }

    pub(super) fn collect(&mut self, given: FieldArgs) -> Result<NewTreasure> {
        let username = match given.username {
            Some(username) => username,
            None => self.username()?,
        };
        let latitude = match given.latitude {
            Some(v) => v,
            None => self.number("latitude")?,
        };
        let longitude = match given.longitude {
            Some(v) => v,
            None => self.number("longitude")?,
        };
        let clue = match given.clue {
            Some(clue) => clue,
            None => self.read_line("clue")?,
        };
        let value = match given.value {
            Some(v) => v,
            None => self.number("value")?,
        };
        Ok(NewTreasure::new(username, latitude, longitude, clue, value))
    }

    fn username(&mut self) -> Result<String> {
        loop {
            let line = self.read_line("username")?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
            self.retry_or_fail("username", "a username is required")?;
        }
    }

    fn number<T: FromStr>(&mut self, label: &'static str) -> Result<T> {
        loop {
            let line = self.read_line(label)?;
            match line.trim().parse::<T>() {
                Ok(v) => return Ok(v),
                Err(_) => {
                    self.retry_or_fail(label, &format!("{:?} is not a number", line.trim()))?
                }
            }
        }
    }

    /// Prompts and reads one raw line, newline included.
    fn read_line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "Enter {}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TreasureError::Usage(format!(
                "input ended before {} was entered",
                label
            )));
        }
        Ok(line)
    }

    fn retry_or_fail(&mut self, label: &str, problem: &str) -> Result<()> {
        if !self.interactive {
            return Err(TreasureError::Usage(format!("{}: {}", label, problem)));
        }
        writeln!(self.output, "{}, try again.", problem)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &str, interactive: bool, given: FieldArgs) -> (Result<NewTreasure>, String) {
        let mut out = Vec::new();
        let result = Prompter::new(Cursor::new(input), &mut out, interactive).collect(given);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn reads_all_fields_in_order() {
        let (result, out) = collect(
            "alice\n10.0\n20.0\nfind me\n500\n",
            false,
            FieldArgs::default(),
        );
        let fields = result.unwrap();
        assert_eq!(fields.username, "alice");
        assert_eq!(fields.latitude, 10.0);
        assert_eq!(fields.longitude, 20.0);
        assert_eq!(fields.clue, "find me\n");
        assert_eq!(fields.value, 500);
        assert_eq!(
            out,
            "Enter username: Enter latitude: Enter longitude: Enter clue: Enter value: "
        );
    }

    #[test]
    fn given_fields_are_not_prompted() {
        let given = FieldArgs {
            username: Some("bob".into()),
            latitude: Some(1.0),
            longitude: Some(2.0),
            clue: None,
            value: Some(3),
        };
        let (result, out) = collect("under the rock\n", false, given);
        assert_eq!(result.unwrap().clue, "under the rock\n");
        assert_eq!(out, "Enter clue: ");
    }

    #[test]
    fn bad_number_is_usage_error_when_piped() {
        let (result, _) = collect("alice\nnorth\n", false, FieldArgs::default());
        assert!(matches!(result, Err(TreasureError::Usage(_))));
    }

    #[test]
    fn bad_number_is_asked_again_interactively() {
        let (result, out) = collect(
            "alice\nnorth\n1.5\n2.5\nclue\n7\n",
            true,
            FieldArgs::default(),
        );
        assert_eq!(result.unwrap().latitude, 1.5);
        assert!(out.contains("\"north\" is not a number, try again."));
    }

    #[test]
    fn early_eof_is_usage_error() {
        let (result, _) = collect("alice\n", false, FieldArgs::default());
        assert!(matches!(result, Err(TreasureError::Usage(ref m)) if m.contains("latitude")));
    }
}
