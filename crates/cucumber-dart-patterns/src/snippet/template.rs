//! Positional template filling for snippet templates.

/// Number of slots every snippet template exposes.
pub(crate) const SLOT_COUNT: usize = 6;

/// Fill `{0}`..`{5}` in `template` with `values`.
///
/// `{{` and `}}` produce literal braces. Any other brace sequence is copied
/// through unchanged so a malformed template never fails.
pub(crate) fn fill(template: &str, values: [&str; SLOT_COUNT]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|v| v.len()).sum::<usize>());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let slot = chars
                    .peek()
                    .and_then(|d| d.to_digit(10))
                    .and_then(|d| usize::try_from(d).ok())
                    .and_then(|index| values.get(index).copied());
                let mut lookahead = chars.clone();
                lookahead.next();
                match slot {
                    Some(value) if lookahead.peek() == Some(&'}') => {
                        chars.next();
                        chars.next();
                        out.push_str(value);
                    }
                    _ => out.push('{'),
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [&str; SLOT_COUNT] = ["a", "b", "c", "d", "e", "f"];

    #[test]
    fn fills_slots_in_any_template_order() {
        assert_eq!(fill("{5}{0}-{3}", VALUES), "fa-d");
    }

    #[test]
    fn doubled_braces_become_literals() {
        assert_eq!(fill("fn() {{ {2} }}", VALUES), "fn() { c }");
    }

    #[test]
    fn leaves_unknown_slots_untouched() {
        assert_eq!(fill("{7} {x} {", VALUES), "{7} {x} {");
    }

    #[test]
    fn repeated_slots_repeat_values() {
        assert_eq!(fill("{1}{1}", VALUES), "bb");
    }
}
