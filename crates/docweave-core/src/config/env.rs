#[must_use]
pub(super) fn read_non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[must_use]
pub(super) fn read_env_f64(name: &str) -> Option<f64> {
    read_non_empty_env(name).and_then(|raw| raw.parse::<f64>().ok())
}

#[must_use]
pub(super) fn read_env_usize(name: &str, min_value: usize) -> Option<usize> {
    read_non_empty_env(name)
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|value| *value >= min_value)
}
