use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use thiserror::Error;

use crate::shared::constants::{DEFAULT_MECAB_COMMAND, MECAB_MAX_LINE_BYTES};
use crate::tagging::domain::tagged_token::TaggedToken;
use crate::tagging::domain::tagger::Tagger;

use super::mecab_output;

#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("failed to start analyzer `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("analyzer I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("analyzer `{command}` exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("analyzer output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Tagger backed by an external `mecab` executable (mecab-ko-dic).
///
/// Text is piped to the process's stdin, broken into lines that fit the
/// analyzer's input buffer, and its default-format output is parsed. One
/// process is spawned per call.
#[derive(Debug, Clone)]
pub struct MecabCommandTagger {
    command: String,
    args: Vec<String>,
}

impl MecabCommandTagger {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments, e.g. `-d /usr/local/lib/mecab/dic/mecab-ko-dic`.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn run(&self, text: &str) -> Result<String, TaggerError> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TaggerError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        // Feed stdin from a separate thread so a full stdout pipe cannot
        // block the writer.
        let mut stdin = child.stdin.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "analyzer stdin unavailable")
        })?;
        let mut input = input_lines(text, MECAB_MAX_LINE_BYTES).join("\n");
        input.push('\n');
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        writer
            .join()
            .map_err(|_| std::io::Error::other("analyzer stdin writer panicked"))??;

        if !output.status.success() {
            return Err(TaggerError::Exit {
                command: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Splits `text` into lines of at most `max_bytes` bytes.
///
/// Long lines break at spaces; a single word longer than the limit breaks
/// at a char boundary. Blank lines are dropped.
fn input_lines(text: &str, max_bytes: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.len() <= max_bytes {
            lines.push(line.to_string());
            continue;
        }
        let mut current = String::new();
        for word in line.split(' ').filter(|w| !w.is_empty()) {
            if !current.is_empty() && current.len() + 1 + word.len() > max_bytes {
                lines.push(std::mem::take(&mut current));
            }
            if word.len() > max_bytes {
                lines.extend(split_at_char_boundaries(word, max_bytes));
                continue;
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn split_at_char_boundaries(word: &str, max_bytes: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        if !piece.is_empty() && piece.len() + c.len_utf8() > max_bytes {
            pieces.push(std::mem::take(&mut piece));
        }
        piece.push(c);
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

impl Default for MecabCommandTagger {
    fn default() -> Self {
        Self::new(DEFAULT_MECAB_COMMAND)
    }
}

impl Tagger for MecabCommandTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, Box<dyn std::error::Error>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let raw = self.run(text)?;
        let tokens = mecab_output::parse(&raw);
        log::debug!("{} produced {} tokens", self.command, tokens.len());
        Ok(tokens)
    }
}
