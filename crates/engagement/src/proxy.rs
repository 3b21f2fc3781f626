//! Translation of calls the desktop site makes to its own analytics so they
//! can be mirrored onto our tracker.

use hora_core_types::{AnalyticsEvent, Hit, HitArg};

const FORWARDED_COMMANDS: [&str; 5] = ["require", "provide", "send", "ec:setAction", "ec:addProduct"];

/// Maps a classic `_gaq.push([cmd, category, action, label])` call onto a
/// non-interaction event. Pushes without a category and action are ignored.
pub fn classic_event(push: &[&str]) -> Option<AnalyticsEvent> {
    let category = push.get(1)?;
    let action = push.get(2)?;
    let mut event = AnalyticsEvent::new(format!("Desktop Event: {category}"), *action).non_interaction();
    if let Some(label) = push.get(3) {
        event = event.label(*label);
    }
    Some(event)
}

/// Re-targets a universal `ga(command, ...)` call at `tracker_name`.
///
/// Only commands in the allow-list are forwarded. `send pageview` and
/// `send event` hits in the `mobify` category are dropped.
pub fn universal_forward(tracker_name: &str, args: &[HitArg]) -> Option<Hit> {
    let command = args.first()?.as_str()?;
    if !FORWARDED_COMMANDS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(command))
    {
        return None;
    }

    if command == "send" {
        let hit_type = args.get(1).and_then(HitArg::as_str);
        let category = args.get(2).and_then(HitArg::as_str);
        match (hit_type, category) {
            (Some("pageview"), _) | (Some("event"), Some("mobify")) => return None,
            _ => {}
        }
    }

    let mut hit = Hit::new(format!("{tracker_name}.{command}"));
    for arg in &args[1..] {
        hit.push(arg.clone());
    }
    Some(hit)
}
