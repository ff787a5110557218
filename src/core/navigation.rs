/// Key that activates a focused booking control.
pub const ACTIVATION_KEY: &str = "Enter";

/// Id referenced by a same-page anchor `href`, if any.
///
/// Only hrefs starting with `#` are same-page anchors; a bare `#` names nothing.
pub fn fragment_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

pub fn is_activation_key(key: &str) -> bool {
    key == ACTIVATION_KEY
}
