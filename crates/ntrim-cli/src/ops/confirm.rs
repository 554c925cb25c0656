//! Interactive confirmation gate.
//!
//! Modelled as a small state machine so the prompt loop stays trivial and
//! the transitions can be tested without a terminal.

use std::io::{self, BufRead, Write};

/// Where the confirmation dialogue currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    AwaitingInput,
    Confirmed,
    Declined,
}

impl Confirmation {
    /// Feed one line of input (`None` on end of input).
    ///
    /// `y`/`yes` confirms; `n`/`no`, an empty line or end of input declines;
    /// anything else asks again. Final states ignore further input.
    pub fn advance(self, input: Option<&str>) -> Self {
        if self != Confirmation::AwaitingInput {
            return self;
        }
        let Some(line) = input else {
            return Confirmation::Declined;
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Confirmation::Confirmed,
            "" | "n" | "no" => Confirmation::Declined,
            _ => Confirmation::AwaitingInput,
        }
    }

    pub fn is_final(self) -> bool {
        self != Confirmation::AwaitingInput
    }
}

/// Ask `prompt` until the user answers yes or no.
///
/// # Errors
///
/// Propagates I/O errors from reading `input` or writing `out`.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, mut input: R, mut out: W) -> io::Result<bool> {
    let mut state = Confirmation::AwaitingInput;
    while !state.is_final() {
        write!(out, "{prompt} (y/N) ")?;
        out.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        state = state.advance(if read == 0 { None } else { Some(&line) });
        if !state.is_final() {
            writeln!(out, "Please answer 'y' or 'n'.")?;
        }
    }
    Ok(state == Confirmation::Confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let s = Confirmation::AwaitingInput;
        assert_eq!(s.advance(Some("y\n")), Confirmation::Confirmed);
        assert_eq!(s.advance(Some(" YES ")), Confirmation::Confirmed);
        assert_eq!(s.advance(Some("n")), Confirmation::Declined);
        assert_eq!(s.advance(Some("\n")), Confirmation::Declined);
        assert_eq!(s.advance(None), Confirmation::Declined);
        assert_eq!(s.advance(Some("maybe")), Confirmation::AwaitingInput);
    }

    #[test]
    fn test_final_states_absorb_input() {
        assert_eq!(
            Confirmation::Declined.advance(Some("y")),
            Confirmation::Declined
        );
        assert_eq!(
            Confirmation::Confirmed.advance(Some("n")),
            Confirmation::Confirmed
        );
    }

    #[test]
    fn test_confirm_reprompts_until_answer() {
        let mut out = Vec::new();
        let answer = confirm("Delete?", "what\nyes\n".as_bytes(), &mut out).unwrap();
        assert!(answer);

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("Delete? (y/N)").count(), 2);
        assert!(printed.contains("Please answer"));
    }

    #[test]
    fn test_confirm_declines_on_eof() {
        let answer = confirm("Delete?", "".as_bytes(), Vec::new()).unwrap();
        assert!(!answer);
    }
}
