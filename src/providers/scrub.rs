use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Markers whose following token is a credential. Prefix markers (`sk-`,
/// `AIza`) are redacted together with the marker itself.
const SECRET_MARKERS: [(&str, bool); 10] = [
    ("sk-", true),
    ("AIza", true),
    ("ya29.", true),
    ("Bearer ", false),
    ("bearer ", false),
    ("key=", false),
    ("api_key=", false),
    ("access_token=", false),
    ("\"api_key\":\"", false),
    ("\"access_token\":\"", false),
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn redact_marker(text: &mut String, marker: &str, include_marker: bool) {
    let mut from = 0;
    while let Some(rel) = text[from..].find(marker) {
        let marker_start = from + rel;
        let token_start = marker_start + marker.len();
        let token_len: usize = text[token_start..]
            .chars()
            .take_while(|c| is_secret_char(*c))
            .map(char::len_utf8)
            .sum();

        if token_len == 0 {
            from = token_start;
            continue;
        }

        let replace_from = if include_marker {
            marker_start
        } else {
            token_start
        };
        text.replace_range(replace_from..token_start + token_len, REDACTED);
        from = replace_from + REDACTED.len();
    }
}

/// Redact credential-looking tokens (API keys, bearer tokens, `key=` query
/// parameters) from text that may reach logs or the error banner.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_MARKERS
        .iter()
        .any(|(marker, _)| input.contains(marker))
    {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for (marker, include_marker) in SECRET_MARKERS {
        redact_marker(&mut scrubbed, marker, include_marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and cap the length of an upstream error body.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input.trim());
    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }
    let truncated: String = scrubbed.chars().take(MAX_API_ERROR_CHARS).collect();
    format!("{truncated}...")
}

/// Build a sanitized message from a failed HTTP response.
pub async fn api_error_message(service: &str, response: reqwest::Response) -> String {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    format!("{service} API error ({status}): {}", sanitize_api_error(&body))
}
