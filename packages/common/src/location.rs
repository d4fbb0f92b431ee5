/// Path of the feed, keeping the workshop filter when one is active.
pub fn feed_location(workshop: Option<&str>) -> String {
    match workshop.filter(|w| !w.is_empty()) {
        Some(w) => match serde_urlencoded::to_string([("w", w)]) {
            Ok(query) => format!("/?{query}"),
            Err(_) => "/".to_string(),
        },
        None => "/".to_string(),
    }
}
