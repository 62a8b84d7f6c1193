use chrono::{Local, TimeZone};

/// Get the current time in seconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Get the current time in seconds since the UNIX epoch
#[cfg(target_arch = "wasm32")]
pub fn current_time_secs() -> f64 {
    js_sys_now_secs().unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
fn js_sys_now_secs() -> Option<f64> {
    // performance.timeOrigin + now() gives wall-clock milliseconds
    let performance = web_sys::window()?.performance()?;
    Some((performance.time_origin() + performance.now()) / 1000.0)
}

/// Get a timestamp in seconds since the UNIX epoch
pub fn timestamp_secs() -> u64 {
    current_time_secs() as u64
}

/// Format a UNIX timestamp as local `HH:MM:SS`
pub fn format_clock(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| Local.timestamp_opt(secs, 0).earliest())
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_owned())
}
