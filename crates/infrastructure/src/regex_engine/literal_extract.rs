/// Extract the longest run of literal (non-metacharacter) bytes from a
/// regex source, for use as an Aho-Corasick pre-filter key.
///
/// This is a heuristic, not a parser: it scans for the longest maximal run
/// of bytes that cannot begin a regex metacharacter sequence. A pattern
/// like `evil-[0-9]+\.example\.com` yields `.example.com` (the longest
/// literal run, after the backslash-escaped dots are treated as literal
/// dots). Patterns shorter than `MIN_LITERAL_LEN` in their longest run are
/// not worth bucketing and fall back to the residual set.
const MIN_LITERAL_LEN: usize = 3;
const METACHARACTERS: &[u8] = b"\\^$.|?*+()[]{}";

pub fn extract_literal(pattern: &str) -> Option<String> {
    let bytes = pattern.as_bytes();
    let mut best_start = 0;
    let mut best_len = 0;
    let mut cur_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' && i + 1 < bytes.len() {
            // An escaped metacharacter (`\.`, `\-`) is a literal byte; an
            // escaped class (`\d`, `\w`, `\s`) is not.
            let next = bytes[i + 1];
            if matches!(next, b'd' | b'D' | b'w' | b'W' | b's' | b'S' | b'b' | b'B') {
                if i - cur_start > best_len {
                    best_start = cur_start;
                    best_len = i - cur_start;
                }
                i += 2;
                cur_start = i;
                continue;
            }
            i += 2;
            continue;
        }
        if METACHARACTERS.contains(&b) {
            if i - cur_start > best_len {
                best_start = cur_start;
                best_len = i - cur_start;
            }
            i += 1;
            cur_start = i;
            continue;
        }
        i += 1;
    }
    if bytes.len() - cur_start > best_len {
        best_start = cur_start;
        best_len = bytes.len() - cur_start;
    }

    if best_len < MIN_LITERAL_LEN {
        return None;
    }

    let raw = &pattern[best_start..best_start + best_len];
    Some(raw.replace("\\.", ".").replace("\\-", "-"))
}
