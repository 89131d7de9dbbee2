use chatlens_types::InsightData;
use tracing::debug;

/// Locate and parse an embedded insight payload in a block of chat text.
///
/// Fenced code blocks are tried first in textual order, then inline
/// brace-balanced objects. First qualifying candidate wins; at most one
/// insight is extracted per text. Malformed JSON and unrecognized `type`
/// values are discarded without surfacing an error to the caller.
pub fn parse_insight(text: &str) -> Option<InsightData> {
    for candidate in fenced_blocks(text) {
        if let Some(data) = try_parse(candidate) {
            return Some(data);
        }
    }

    for candidate in InlineObjects::new(text) {
        if let Some(data) = try_parse(candidate) {
            return Some(data);
        }
    }

    None
}

fn try_parse(candidate: &str) -> Option<InsightData> {
    let trimmed = candidate.trim();
    if !trimmed.starts_with('{') {
        return None;
    }

    match serde_json::from_str::<InsightData>(trimmed) {
        Ok(data) => Some(data),
        Err(err) => {
            debug!("discarded insight candidate: {}", err);
            None
        }
    }
}

/// Contents of ``` fences in textual order, language tag stripped
fn fenced_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("```") {
        let after_open = &rest[open + 3..];

        // Opening fence may carry a language tag ("json") up to end of line
        let body_start = after_open.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after_open[body_start..];

        let Some(close) = body.find("```") else {
            break;
        };

        blocks.push(&body[..close]);
        rest = &body[close + 3..];
    }

    blocks
}

/// Iterator over brace-balanced `{...}` spans, string-literal aware
struct InlineObjects<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> InlineObjects<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for InlineObjects<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() {
            let Some(open) = self.text[self.pos..].find('{') else {
                self.pos = bytes.len();
                return None;
            };
            let start = self.pos + open;

            if let Some(end) = balanced_end(&self.text[start..]) {
                // Resume after the opening brace so overlapping candidates
                // (e.g. a malformed outer object wrapping a valid one) are
                // still visited
                self.pos = start + 1;
                return Some(&self.text[start..start + end]);
            }

            self.pos = start + 1;
        }

        None
    }
}

/// Byte offset one past the matching close brace, or None if unbalanced
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
