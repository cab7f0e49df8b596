//! Game-event detection over accepted console lines.
//!
//! The server mod tags structured events with a `[CANALHAS-EVENT]` prefix;
//! crash markers come straight from the engine output.

use once_cell::sync::Lazy;
use regex::Regex;

static KNIFE_KILL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[CANALHAS-EVENT\]\s+knife_kill\s*\|(.+)$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The engine reported a crash-grade failure.
    Crash,
    KnifeKill {
        killer_id: String,
        killer_name: String,
        victim_id: String,
        victim_name: String,
    },
}

/// Scan one output line for a game event.
pub fn scan_line(line: &str) -> Option<GameEvent> {
    let lower = line.to_lowercase();
    if lower.contains("segmentation fault") || lower.contains("couldn't open") {
        return Some(GameEvent::Crash);
    }

    if let Some(captures) = KNIFE_KILL_RE.captures(line) {
        let data = captures.get(1).map(|m| m.as_str())?;
        let parts: Vec<&str> = data.split('|').map(str::trim).collect();
        if parts.len() == 4 {
            return Some(GameEvent::KnifeKill {
                killer_id: parts[0].to_string(),
                killer_name: parts[1].to_string(),
                victim_id: parts[2].to_string(),
                victim_name: parts[3].to_string(),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crash_markers_detected() {
        assert_eq!(scan_line("Segmentation fault (core dumped)"), Some(GameEvent::Crash));
        assert_eq!(
            scan_line("Host_Error: couldn't open de_dust3.bsp"),
            Some(GameEvent::Crash)
        );
    }

    #[test]
    fn test_knife_kill_parsed() {
        let line = "[CANALHAS-EVENT] knife_kill | STEAM_0:1:111 | Alice | STEAM_0:1:222 | Bob";
        assert_eq!(
            scan_line(line),
            Some(GameEvent::KnifeKill {
                killer_id: "STEAM_0:1:111".to_string(),
                killer_name: "Alice".to_string(),
                victim_id: "STEAM_0:1:222".to_string(),
                victim_name: "Bob".to_string(),
            })
        );
    }

    #[test]
    fn test_malformed_knife_kill_ignored() {
        assert_eq!(scan_line("[CANALHAS-EVENT] knife_kill | only | three | parts"), None);
    }

    #[test]
    fn test_ordinary_lines_yield_nothing() {
        assert_eq!(scan_line("Player Alice joined the game"), None);
    }
}
