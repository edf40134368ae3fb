//! Sentence and token layers derived from paragraph text.
//!
//! Both are punctuation/whitespace heuristics, not NLP models. Geometry is
//! inherited verbatim from the parent paragraph: the design makes no claim
//! of sub-paragraph positional accuracy.

use regex::Regex;

use crate::model::{Document, Entity};

use super::{structural, EntitySource, Sourced};

/// Compiled segmentation patterns.
pub(crate) struct Segmenter {
    sentence_break: Regex,
    token: Regex,
}

impl Segmenter {
    pub(crate) fn new() -> Self {
        Self {
            // A sentence ends where [.!?] is immediately followed by
            // whitespace. The regex crate has no lookbehind, so the break
            // is placed after the punctuation character of each match.
            sentence_break: Regex::new(r"[.!?]\s+").unwrap(),
            token: Regex::new(r"\S+").unwrap(),
        }
    }

    /// Byte ranges of the trimmed, non-empty sentence segments of `text`.
    pub(crate) fn sentences(&self, text: &str) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut start = 0;
        for found in self.sentence_break.find_iter(text) {
            // The punctuation class is ASCII, so +1 lands after it.
            push_trimmed(text, start, found.start() + 1, &mut ranges);
            start = found.end();
        }
        push_trimmed(text, start, text.len(), &mut ranges);
        ranges
    }

    /// Byte ranges of the whitespace-separated tokens of `text`.
    pub(crate) fn tokens(&self, text: &str) -> Vec<(usize, usize)> {
        self.token
            .find_iter(text)
            .map(|found| (found.start(), found.end()))
            .collect()
    }
}

fn push_trimmed(text: &str, start: usize, end: usize, ranges: &mut Vec<(usize, usize)>) {
    let segment = &text[start..end];
    let lead = segment.len() - segment.trim_start().len();
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        ranges.push((start + lead, start + lead + trimmed.len()));
    }
}

/// Sentences: sub-segmented paragraph text with inherited paragraph boxes.
pub(crate) fn sentences(doc: &Document) -> Vec<Sourced> {
    let segmenter = Segmenter::new();
    let mut out = Vec::new();
    for paragraph in structural::paragraphs(doc) {
        let EntitySource::Node(node) = paragraph.source else {
            continue;
        };
        let Some(text) = paragraph.entity.text.as_deref() else {
            continue;
        };
        for (start, end) in segmenter.sentences(text) {
            out.push(Sourced::new(
                Entity::with_text(&text[start..end], paragraph.entity.boxes.clone()),
                EntitySource::Segment { node, start, end },
            ));
        }
    }
    out
}

/// Tokens: whitespace-split sentences with inherited sentence boxes.
pub(crate) fn tokens(doc: &Document) -> Vec<Sourced> {
    let segmenter = Segmenter::new();
    let mut out = Vec::new();
    for sentence in sentences(doc) {
        let EntitySource::Segment { node, start, .. } = sentence.source else {
            continue;
        };
        let Some(text) = sentence.entity.text.as_deref() else {
            continue;
        };
        for (token_start, token_end) in segmenter.tokens(text) {
            out.push(Sourced::new(
                Entity::with_text(&text[token_start..token_end], sentence.entity.boxes.clone()),
                EntitySource::Segment {
                    node,
                    start: start + token_start,
                    end: start + token_end,
                },
            ));
        }
    }
    out
}
