//! Naming convention of the verbatim built-in family.
//!
//! `verbatim_<n>i_<m>o` embeds raw target code taking `n` stack arguments and
//! leaving `m` results.

/// Prefix shared by every member of the verbatim family.
pub const VERBATIM_PREFIX: &str = "verbatim";

/// Label of the verbatim built-in taking `parameters` arguments and
/// producing `returns` results.
pub fn verbatim_label(parameters: usize, returns: usize) -> String {
    format!("{VERBATIM_PREFIX}_{parameters}i_{returns}o")
}

/// Parse a verbatim label back into `(parameters, returns)`.
///
/// Returns `None` for anything not produced by [`verbatim_label`], including
/// counts with leading zeros.
pub fn parse_verbatim_label(label: &str) -> Option<(usize, usize)> {
    let rest = label.strip_prefix(VERBATIM_PREFIX)?.strip_prefix('_')?;
    let (parameters, rest) = rest.split_once("i_")?;
    let returns = rest.strip_suffix('o')?;
    Some((parse_count(parameters)?, parse_count(returns)?))
}

fn parse_count(digits: &str) -> Option<usize> {
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if canonical {
        digits.parse().ok()
    } else {
        None
    }
}
