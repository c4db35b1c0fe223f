//! The `NUMBER - NAME - FILE` word-list line format read by the game runtime.

/// Field delimiter between number, display name and asset filename.
pub const DELIMITER: &str = " - ";

/// One parsed word-list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLine {
    pub number: u32,
    pub name: String,
    pub asset: String,
}

/// Errors from parsing a word-list file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordListError {
    #[error("line {line}: expected 'NUMBER - NAME - FILE', got '{text}'")]
    Malformed { line: usize, text: String },

    #[error("line {line}: invalid entry number '{text}'")]
    BadNumber { line: usize, text: String },

    #[error("line {line}: empty {field}")]
    EmptyField { line: usize, field: &'static str },
}

impl WordLine {
    pub fn new(number: u32, name: impl Into<String>, asset: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            asset: asset.into(),
        }
    }

    /// Render the line including its trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{}{DELIMITER}{}{DELIMITER}{}\n",
            self.number, self.name, self.asset
        )
    }
}

/// Make a value safe to embed as a word-list field.
///
/// Line breaks and tabs become spaces and whitespace runs collapse to one
/// space. The ` - ` delimiter, and a ` -` or `- ` at either end, is
/// tightened to `-`.
pub fn scrub_field(value: &str) -> String {
    let mut out: String = value
        .chars()
        .map(|c| if c == '\r' || c == '\n' || c == '\t' { ' ' } else { c })
        .collect();
    out = out.split_whitespace().collect::<Vec<_>>().join(" ");
    // A `-` at either end would join the neighbouring delimiter, so it is
    // tightened too. Every change shortens the value, so this terminates.
    loop {
        let before = out.len();
        out = out.replace(DELIMITER, "-");
        if let Some(head) = out.strip_suffix(" -") {
            out = format!("{head}-");
        }
        if let Some(tail) = out.strip_prefix("- ") {
            out = format!("-{tail}");
        }
        if out.len() == before {
            return out;
        }
    }
}

/// Parse a single line (1-based `line_no` is only used for error messages).
pub fn parse_line(text: &str, line_no: usize) -> Result<WordLine, WordListError> {
    let trimmed = text.trim_end_matches(['\n', '\r']);
    let parts: Vec<&str> = trimmed.split(DELIMITER).collect();
    if parts.len() != 3 {
        return Err(WordListError::Malformed {
            line: line_no,
            text: trimmed.to_string(),
        });
    }

    let number_text = parts[0].trim();
    let number: u32 = number_text.parse().map_err(|_| WordListError::BadNumber {
        line: line_no,
        text: number_text.to_string(),
    })?;
    if number == 0 {
        return Err(WordListError::BadNumber {
            line: line_no,
            text: number_text.to_string(),
        });
    }

    let name = parts[1].trim();
    if name.is_empty() {
        return Err(WordListError::EmptyField {
            line: line_no,
            field: "name",
        });
    }
    let asset = parts[2].trim();
    if asset.is_empty() {
        return Err(WordListError::EmptyField {
            line: line_no,
            field: "asset filename",
        });
    }

    Ok(WordLine::new(number, name, asset))
}

/// Parse a whole word-list file, skipping blank lines.
pub fn parse_word_list(contents: &str) -> Result<Vec<WordLine>, WordListError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_line(line, i + 1))
        .collect()
}

/// Check that entry numbers form the contiguous run `1..=N` in order.
///
/// Returns `(expected, found)` for the first number that breaks the run.
pub fn check_dense(numbers: impl IntoIterator<Item = u32>) -> Result<(), (u32, u32)> {
    for (expected, found) in (1u32..).zip(numbers) {
        if found != expected {
            return Err((expected, found));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/wordlist_tests.rs"]
mod tests;
