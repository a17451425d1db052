/// Placeholder used when the event has no location
pub const NO_LOCATION: &str = "No location";

/// Format the share message for a newly created event. Fixed block: title,
/// time range, location (placeholder when absent), and a link line only when
/// a link is present. The title and location are propagated as typed.
pub fn compose(
    title: &str,
    start_label: &str,
    end_label: &str,
    location: Option<&str>,
    link: Option<&str>,
) -> String {
    let location = match location {
        Some(l) if !l.trim().is_empty() => l,
        _ => NO_LOCATION,
    };

    let mut message = format!(
        "📅 {}\n🕒 {} - {}\n📍 {}",
        title, start_label, end_label, location
    );
    if let Some(link) = link {
        message.push_str(&format!("\n🔗 {}", link));
    }
    message
}
