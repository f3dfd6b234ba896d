use std::collections::HashSet;

/// Return the first of `candidates` present in `available`.
///
/// Candidate order decides priority; the order of `available` never matters.
/// `None` is not an error here, callers decide whether absence is fatal.
pub fn resolve<'a, S: AsRef<str>>(
    available: &HashSet<&str>,
    candidates: &'a [S],
) -> Option<&'a str> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|c| available.contains(c))
}
