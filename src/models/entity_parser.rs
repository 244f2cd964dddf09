use crate::constants::{PROMPT_ECHO_MARKERS, RESPONSE_LABEL};
use crate::models::ExtractedEntity;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static TICKER_ONLY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9.]+$").unwrap());

static DUAL_EXCHANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s*\[\s*([^\[\]/,|]+?)\s*[/,|]\s*([^\[\]/,|]+?)\s*\]$").unwrap()
});

static SINGLE_EXCHANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\[\s*([^\[\]/,|]+?)\s*\]$").unwrap());

static LIST_MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*\u{2022}]+|\d+[.)])\s+").unwrap());

const QUOTE_CHARS: &[char] = &['"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Converts the extraction oracle's raw text into structured entity mentions.
///
/// The expected format is a list of mentions where `;` (or a line break) separates
/// mentions of the same company on different exchanges and `,` separates mentions. Each
/// mention is a bare ticker (`AAPL`), a name (`Tencent`), or a name with one or two
/// bracketed exchange hints (`Alibaba [HKEX/NYSE]`).
pub struct EntityParser {
    prompt_echo_markers: &'static [&'static str],
}

impl Default for EntityParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityParser {
    pub fn new() -> Self {
        Self {
            prompt_echo_markers: PROMPT_ECHO_MARKERS,
        }
    }

    /// Parses an oracle response into entities, preserving the order they appear in.
    ///
    /// # Arguments
    /// * `raw_response` - The oracle's output.
    /// * `original_query` - The user's query; only used to drop an echoed copy of it.
    pub fn parse(&self, raw_response: &str, original_query: &str) -> Vec<ExtractedEntity> {
        let cleaned_response = self.clean_response(raw_response, original_query);

        let mut entities: Vec<ExtractedEntity> = Vec::new();

        for group in cleaned_response.split([';', '\n']) {
            for token in split_outside_brackets(group, ',') {
                if let Some(token) = clean_token(token) {
                    entities.extend(self.classify_token(&token));
                }
            }
        }

        entities.retain(|entity| !entity.name.trim().is_empty());

        debug!(
            "Parsed {} entities from oracle response {:?}",
            entities.len(),
            raw_response
        );

        entities
    }

    /// Classifies a single token: ticker-only, dual-exchange bracket, single-exchange
    /// bracket, or plain name (the fallback for anything malformed).
    pub fn classify_token(&self, token: &str) -> Vec<ExtractedEntity> {
        if TICKER_ONLY_PATTERN.is_match(token) {
            return vec![ExtractedEntity::new(token)
                .with_symbol(token)
                .with_original_text(token)];
        }

        if let Some(captures) = DUAL_EXCHANGE_PATTERN.captures(token) {
            let name = captures[1].trim();

            return [&captures[2], &captures[3]]
                .iter()
                .map(|exchange| {
                    ExtractedEntity::new(name)
                        .with_exchange(&exchange.trim().to_uppercase())
                        .with_original_text(token)
                })
                .collect();
        }

        if let Some(captures) = SINGLE_EXCHANGE_PATTERN.captures(token) {
            return vec![ExtractedEntity::new(captures[1].trim())
                .with_exchange(&captures[2].trim().to_uppercase())
                .with_original_text(token)];
        }

        vec![ExtractedEntity::new(token).with_original_text(token)]
    }

    /// Normalizes full-width punctuation and removes response labels, prompt echo lines
    /// and a leading echo of the original query.
    fn clean_response(&self, raw_response: &str, original_query: &str) -> String {
        let normalized_response = normalize_full_width_punctuation(raw_response);
        let original_query = original_query.trim();

        let lines: Vec<&str> = normalized_response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut kept_lines: Vec<&str> = Vec::with_capacity(lines.len());

        for (line_index, line) in lines.iter().enumerate() {
            if line_index == 0
                && lines.len() > 1
                && !original_query.is_empty()
                && line.eq_ignore_ascii_case(original_query)
            {
                continue;
            }

            let lowercased_line = line.to_lowercase();
            if self
                .prompt_echo_markers
                .iter()
                .any(|marker| lowercased_line.contains(marker))
            {
                continue;
            }

            let line = strip_response_label(line);
            if !line.is_empty() {
                kept_lines.push(line);
            }
        }

        kept_lines.join("\n")
    }
}

fn normalize_full_width_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{FF1B}' => ';',
            '\u{FF0C}' | '\u{3001}' => ',',
            '\u{3010}' | '\u{FF3B}' => '[',
            '\u{3011}' | '\u{FF3D}' => ']',
            '\u{FF0F}' => '/',
            '\u{FF1A}' => ':',
            other => other,
        })
        .collect()
}

fn strip_response_label(line: &str) -> &str {
    match line.get(..RESPONSE_LABEL.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(RESPONSE_LABEL) => {
            line[RESPONSE_LABEL.len()..].trim()
        }
        _ => line,
    }
}

/// Splits on `delimiter` except inside square brackets, so `Alibaba [HKEX, NYSE]` stays
/// one token. An unclosed bracket keeps the remainder together.
fn split_outside_brackets(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (index, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            c if c == delimiter && depth == 0 => {
                parts.push(&text[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }

    parts.push(&text[start..]);
    parts
}

/// Trims whitespace, list bullets and surrounding quotes. Tokens without any
/// alphanumeric character are discarded.
fn clean_token(token: &str) -> Option<String> {
    let token = token.trim();
    let token = LIST_MARKER_PATTERN.replace(token, "");
    let token = token.trim().trim_matches(QUOTE_CHARS).trim();

    if token.chars().any(|c| c.is_alphanumeric()) {
        Some(token.to_string())
    } else {
        None
    }
}
