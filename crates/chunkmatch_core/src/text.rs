/// Normalize a raw document for matching: ASCII-lowercase every byte,
/// collapse each run of ASCII whitespace to a single space, and drop leading
/// and trailing whitespace. One pass; non-ASCII bytes pass through untouched.
pub fn normalize(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut pending_space = false;
    for &b in input {
        if b.is_ascii_whitespace() {
            // leading runs stay pending forever, trailing runs never flush
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(b' ');
                pending_space = false;
            }
            out.push(b.to_ascii_lowercase());
        }
    }
    out
}
