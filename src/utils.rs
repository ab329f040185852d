/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of fetch tasks a run will dispatch
pub fn task_count(domains: &[String], sources: &[String]) -> usize {
    domains.len() * sources.len()
}
