//! Line-based clause segmentation.
//!
//! A line opens a new clause when, after trimming, it starts with a number
//! (`1.`, `2)`, `3 `). Every other non-blank line continues the open clause.
//! Text before the first numbered line becomes an unlabeled clause.

use crate::domain::model::Clause;
use regex::Regex;
use std::sync::LazyLock;

static CLAUSE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*[.)]?\s*(.*)$").expect("clause start pattern"));

enum State {
    Idle,
    Open { label: Option<String>, buffer: String },
}

struct Segmenter {
    state: State,
    clauses: Vec<Clause>,
}

impl Segmenter {
    fn new() -> Self {
        Self {
            state: State::Idle,
            clauses: Vec::new(),
        }
    }

    fn start(&mut self, label: &str, line: &str) {
        self.close();
        self.state = State::Open {
            label: Some(label.to_string()),
            buffer: line.to_string(),
        };
    }

    fn continue_with(&mut self, line: &str) {
        match &mut self.state {
            State::Open { buffer, .. } => {
                buffer.push(' ');
                buffer.push_str(line);
            }
            State::Idle => {
                self.state = State::Open {
                    label: None,
                    buffer: line.to_string(),
                };
            }
        }
    }

    fn close(&mut self) {
        if let State::Open { label, buffer } = std::mem::replace(&mut self.state, State::Idle) {
            self.clauses.push(Clause {
                ordinal: self.clauses.len(),
                label,
                text: collapse_whitespace(&buffer),
            });
        }
    }

    fn finish(mut self) -> Vec<Clause> {
        self.close();
        self.clauses
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized contract text into clauses in document order.
pub fn segment_clauses(text: &str) -> Vec<Clause> {
    let mut segmenter = Segmenter::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match CLAUSE_START.captures(line) {
            Some(caps) => segmenter.start(&caps[1], line),
            None => segmenter.continue_with(line),
        }
    }

    let clauses = segmenter.finish();
    tracing::debug!("Segmented {} clauses", clauses.len());
    clauses
}
