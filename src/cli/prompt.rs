//! Interactive prompts
//!
//! Both prompts read from any `BufRead` so they can be driven from tests.
//! End of input counts as cancellation.

use crate::selection::{find_option, SelectionOption};
use colored::*;
use std::io::{self, BufRead, Write};

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask until the user picks an option or the cancel entry.
///
/// Returns `None` on cancel or end of input.
pub fn choose_option<R: BufRead, W: Write>(
    options: &[SelectionOption],
    cancel: usize,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<SelectionOption>> {
    loop {
        write!(
            out,
            "\n{}",
            format!("Select an option (1-{}): ", cancel).cyan()
        )?;
        out.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(None);
        };

        match answer.parse::<usize>() {
            Ok(choice) if choice == cancel => return Ok(None),
            Ok(choice) => match find_option(options, choice) {
                Some(selected) => {
                    writeln!(
                        out,
                        "{}",
                        format!("✓ Selected: {}", selected.label).green()
                    )?;
                    return Ok(Some(selected.clone()));
                }
                None => writeln!(
                    out,
                    "{}",
                    format!("Invalid option. Please choose between 1 and {}.", cancel).red()
                )?,
            },
            Err(_) => writeln!(out, "{}", "Please enter a valid number.".red())?,
        }
    }
}

/// `(y/n)` question; only "y" and "yes" agree
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "{}", format!("{} (y/n): ", question).yellow())?;
    out.flush()?;

    Ok(read_answer(input)?
        .map(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Format;
    use crate::selection::{build_options, cancel_ordinal, normalize};
    use std::io::Cursor;

    fn options() -> Vec<SelectionOption> {
        build_options(&normalize(vec![
            Format {
                format_id: "22".into(),
                ext: "mp4".into(),
                vcodec: Some("avc1".into()),
                acodec: Some("mp4a".into()),
                height: Some(720),
                ..Default::default()
            },
            Format {
                format_id: "140".into(),
                ext: "m4a".into(),
                vcodec: Some("none".into()),
                acodec: Some("mp4a.40.2".into()),
                abr: Some(128.0),
                ..Default::default()
            },
        ]))
    }

    #[test]
    fn test_reprompts_until_valid_choice() {
        let options = options();
        let cancel = cancel_ordinal(&options);
        let mut input = Cursor::new("abc\n9\n2\n");
        let mut out = Vec::new();

        let selected = choose_option(&options, cancel, &mut input, &mut out)
            .unwrap()
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(selected.ordinal, 2);
        assert!(selected.is_audio());
        assert!(printed.contains("Please enter a valid number."));
        assert!(printed.contains("Invalid option. Please choose between 1 and 3."));
    }

    #[test]
    fn test_cancel_entry_and_eof_cancel() {
        let options = options();
        let cancel = cancel_ordinal(&options);

        let mut out = Vec::new();
        let picked = choose_option(&options, cancel, &mut Cursor::new("3\n"), &mut out).unwrap();
        assert!(picked.is_none());

        let picked = choose_option(&options, cancel, &mut Cursor::new(""), &mut out).unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn test_confirm_answers() {
        let mut out = Vec::new();
        assert!(confirm("Proceed?", &mut Cursor::new("y\n"), &mut out).unwrap());
        assert!(confirm("Proceed?", &mut Cursor::new("YES\n"), &mut out).unwrap());
        assert!(!confirm("Proceed?", &mut Cursor::new("n\n"), &mut out).unwrap());
        assert!(!confirm("Proceed?", &mut Cursor::new("sure\n"), &mut out).unwrap());
        assert!(!confirm("Proceed?", &mut Cursor::new(""), &mut out).unwrap());
    }
}
