//! Host environment detection

pub use xth_traits::EnvironmentVariant;

/// User agent markers of the legacy engine family
const LEGACY_MARKERS: [&str; 2] = ["MSIE ", "Trident/"];

/// Decide which API variant a host identifying itself as `user_agent` exposes.
///
/// A marker only counts past the first character; real user agents always
/// lead with a product token.
pub fn detect(user_agent: &str) -> EnvironmentVariant {
    let legacy = LEGACY_MARKERS
        .iter()
        .any(|marker| matches!(user_agent.find(marker), Some(at) if at > 0));
    if legacy {
        EnvironmentVariant::Legacy
    } else {
        EnvironmentVariant::Standard
    }
}
