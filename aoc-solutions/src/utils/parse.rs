//! Line-oriented parsing with line numbers in error messages.

use aoc_solver::ParseError;

/// Parse every non-blank line with `parse_line`.
///
/// Errors are reported as `(line N) message`, with `N` counted from 1 over
/// all lines of `input`, blank ones included.
pub fn parse_lines<'a, T, F>(input: &'a str, mut parse_line: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            parse_line(line.trim_end())
                .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, bail};

    #[test]
    fn skips_blank_lines() {
        let parsed = parse_lines("1\n\n  \n2\n", |l| Ok(l.parse::<u8>()?)).unwrap();
        assert_eq!(parsed, vec![1, 2]);
    }

    #[test]
    fn parsed_values_borrow_from_input() {
        let input = String::from("a: b c\nd: e\n");
        let parsed = parse_lines(&input, |l| {
            let (name, rest) = l.split_once(':').ok_or_else(|| anyhow!("no colon"))?;
            Ok((name, rest.split_whitespace().collect::<Vec<&str>>()))
        })
        .unwrap();
        assert_eq!(parsed, vec![("a", vec!["b", "c"]), ("d", vec!["e"])]);
    }

    #[test]
    fn reports_physical_line_number() {
        let err = parse_lines("1\n\nx", |l| l.parse::<u8>().map_err(|_| anyhow!("bad number {l:?}")))
            .unwrap_err();
        assert_eq!(err, ParseError::InvalidFormat("(line 3) bad number \"x\"".into()));
    }

    #[test]
    fn stops_at_first_error() {
        let mut seen = 0;
        let result = parse_lines("a\nb\nc", |_| -> anyhow::Result<()> {
            seen += 1;
            bail!("nope")
        });
        assert!(result.is_err());
        assert_eq!(seen, 1);
    }
}
