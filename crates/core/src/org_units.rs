//! Customer org-unit helpers.

/// Normalize the worker names submitted for one unit.
///
/// Entries may themselves be comma-separated ("Ali, , Reza" arrives as one
/// string from the unit form). Each fragment is trimmed; blanks are dropped.
/// Order is preserved.
pub fn clean_worker_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
