/// Get a timestamp in seconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn timestamp_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// No wall clock without a browser binding; documents saved on wasm carry 0
#[cfg(target_arch = "wasm32")]
pub fn timestamp_secs() -> u64 {
    0
}
