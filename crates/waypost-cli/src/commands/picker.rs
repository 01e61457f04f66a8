//! Interactive profile picker.
//!
//! The prompt runs on a blocking task and hands its answer back through a
//! oneshot channel. A sender dropped without an answer resolves to
//! [`Choice::Cancelled`]. Input that ends before the first answer (stdin is
//! `/dev/null` when the desktop starts Waypost) is an error, not a cancel.

use anyhow::{Result, anyhow};
use console::style;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tokio::sync::oneshot;
use url::Url;
use waypost_core::{BrowserProfile, Choice};

/// What the user typed at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Pick { index: usize, remember: bool },
    Cancel,
    Invalid,
}

/// Interpret one line of picker input against `count` candidates
///
/// `2` picks the second candidate, `2+` also remembers it; an empty line or
/// `q` cancels.
pub fn parse_selection(input: &str, count: usize) -> Selection {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        return Selection::Cancel;
    }

    let (number, remember) = match input.strip_suffix('+') {
        Some(number) => (number.trim(), true),
        None => (input, false),
    };

    match number.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Selection::Pick {
            index: n - 1,
            remember,
        },
        _ => Selection::Invalid,
    }
}

/// Ask the user to choose among `candidates`, reading from `input`
///
/// Invalid answers re-prompt. End of input cancels once something was typed;
/// before that it fails with [`io::ErrorKind::UnexpectedEof`].
pub fn prompt<R: BufRead, W: Write>(
    url: &str,
    candidates: &[BrowserProfile],
    mut input: R,
    mut output: W,
) -> io::Result<Choice> {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));

    writeln!(output, "{} {}", style("Open").bold(), style(url).cyan())?;
    for (idx, profile) in candidates.iter().enumerate() {
        writeln!(output, "  {}) {}", style(idx + 1).bold(), profile.name)?;
    }

    let mut answered = false;
    loop {
        match &host {
            Some(host) => write!(
                output,
                "Choose [1-{}] (add + to remember it for {}, Enter to cancel): ",
                candidates.len(),
                host
            )?,
            None => write!(
                output,
                "Choose [1-{}] (Enter to cancel): ",
                candidates.len()
            )?,
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            if !answered {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "no answer on standard input",
                ));
            }
            return Ok(Choice::Cancelled);
        }
        answered = true;

        match parse_selection(&line, candidates.len()) {
            Selection::Pick { index, remember } => {
                return Ok(Choice::Chosen {
                    profile: candidates[index].clone(),
                    remember: remember && host.is_some(),
                });
            }
            Selection::Cancel => return Ok(Choice::Cancelled),
            Selection::Invalid => {
                writeln!(output, "{} '{}'", style("Invalid choice").yellow(), line.trim())?;
            }
        }
    }
}

/// Run the picker on the terminal and wait for its single answer
pub fn pick(url: &str, candidates: Vec<BrowserProfile>) -> Result<Choice> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let (choice_tx, choice_rx) = oneshot::channel::<io::Result<Choice>>();
    let url = url.to_string();

    let answer = runtime.block_on(async move {
        tokio::task::spawn_blocking(move || {
            let stdin = io::stdin();
            let _ = choice_tx.send(prompt(&url, &candidates, stdin.lock(), io::stderr()));
        });

        choice_rx.await.unwrap_or(Ok(Choice::Cancelled))
    });

    runtime.shutdown_timeout(Duration::from_millis(100));

    answer.map_err(|e| {
        anyhow!(
            "Cannot ask which profile to use: {}.\n\
             Run waypost from a terminal, or add a rule with 'waypost rule add'.",
            e
        )
    })
}
