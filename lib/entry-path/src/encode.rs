use crate::Namespace;

/// Whether `key` can be written without brackets and quotes.
///
/// These characters must match the ones accepted by the bareword states of
/// the parser.
pub fn is_bareword(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_bareword_char)
}

pub(crate) const fn is_bareword_char(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-' | '@')
}

/// Renders a namespace and its keys in canonical path text.
///
/// Keys that are valid barewords are written as `.key`, every other key as
/// `["key"]` with `"` and `\` escaped.
pub fn encode<S: AsRef<str>>(namespace: Namespace, keys: &[S]) -> String {
    let prefix = namespace.as_str();
    let capacity = prefix.len()
        + keys
            .iter()
            .map(|key| key.as_ref().len() + 4)
            .sum::<usize>();

    let mut output = String::with_capacity(capacity);
    output.push_str(prefix);
    for key in keys {
        push_key(&mut output, key.as_ref());
    }
    output
}

fn push_key(output: &mut String, key: &str) {
    if is_bareword(key) {
        output.push('.');
        output.push_str(key);
        return;
    }

    output.push_str("[\"");
    for c in key.chars() {
        if matches!(c, '"' | '\\') {
            output.push('\\');
        }
        output.push(c);
    }
    output.push_str("\"]");
}
