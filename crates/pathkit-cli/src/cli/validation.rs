/// Parse a `KEY=VALUE` pair.
///
/// The split happens at the first `=`, so values may contain `=`. The key
/// must not be empty; the value may be.
///
/// # Errors
///
/// Returns an error message if there is no `=` or the key is empty.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got '{}'", s));
    };
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parse a `NAME=MAIN` library declaration. Both sides are required.
///
/// # Errors
///
/// Returns an error message if the pair is malformed or the entry file is
/// empty.
pub fn parse_lib(s: &str) -> Result<(String, String), String> {
    let (name, main) = parse_key_val(s)?;
    if main.is_empty() {
        return Err(format!("library '{}' needs an entry file", name));
    }
    Ok((name, main))
}
