//! StatefulSet name parsing
//!
//! A pod created by a StatefulSet is named `<parent>-<ordinal>`. Names that
//! do not follow this shape have an empty parent and ordinal `-1`.

use std::sync::OnceLock;

use regex::Regex;

/// Ordinal reported for names without a numeric suffix
pub const NO_ORDINAL: i32 = -1;

// Unanchored at the start: `.` stops at a newline, so only the last line
// of a name can carry the ordinal.
const STATEFUL_POD_PATTERN: &str = r"(.*)-([0-9]+)$";

static STATEFUL_POD_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn stateful_pod_regex() -> Option<&'static Regex> {
    STATEFUL_POD_REGEX
        .get_or_init(|| Regex::new(STATEFUL_POD_PATTERN).ok())
        .as_ref()
}

/// Split a pod name (or hostname) into its parent StatefulSet name and ordinal.
///
/// The parent binds greedily, so only the last `-<digits>` group is the
/// ordinal: `a-b-07` yields `("a-b", 7)`. A suffix that does not fit in an
/// `i32` leaves the parent in place but reports [`NO_ORDINAL`].
pub fn parent_name_and_ordinal(name: &str) -> (String, i32) {
    let Some(caps) = stateful_pod_regex().and_then(|re| re.captures(name)) else {
        return (String::new(), NO_ORDINAL);
    };
    let parent = caps[1].to_string();
    let ordinal = caps[2].parse::<i32>().unwrap_or(NO_ORDINAL);
    (parent, ordinal)
}
