//! Knife-kill scoreboards.
//!
//! Two head-to-head tallies: a daily board reset at midnight and a monthly
//! board reset on the last day of the month. Each registered kill persists
//! both boards and reports the head-to-head totals for the webhook embed.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PlayerScore {
    pub name: String,
    /// Victim id -> knife kills against that victim.
    pub kills: HashMap<String, u32>,
}

type Scores = HashMap<String, PlayerScore>;

pub struct KnifeScoreboard {
    daily_path: PathBuf,
    monthly_path: PathBuf,
    daily: Scores,
    monthly: Scores,
}

impl KnifeScoreboard {
    /// Load both boards from `dir`; missing files start empty.
    pub fn load(dir: &Path) -> Self {
        let daily_path = dir.join("knife_daily.json");
        let monthly_path = dir.join("knife_monthly.json");
        KnifeScoreboard {
            daily: read_scores(&daily_path),
            monthly: read_scores(&monthly_path),
            daily_path,
            monthly_path,
        }
    }

    /// Record one kill on both boards. Returns the killer's and the
    /// victim's head-to-head totals from the daily board.
    pub fn register_kill(
        &mut self,
        killer_id: &str,
        killer_name: &str,
        victim_id: &str,
        victim_name: &str,
    ) -> (u32, u32) {
        let totals = bump(
            &mut self.daily,
            killer_id,
            killer_name,
            victim_id,
            victim_name,
        );
        let _ = write_scores(&self.daily_path, &self.daily);

        bump(
            &mut self.monthly,
            killer_id,
            killer_name,
            victim_id,
            victim_name,
        );
        let _ = write_scores(&self.monthly_path, &self.monthly);

        totals
    }

    pub fn daily(&self) -> &Scores {
        &self.daily
    }

    pub fn reset_daily(&mut self) -> Result<(), RecordError> {
        self.daily.clear();
        write_scores(&self.daily_path, &self.daily)
    }

    pub fn reset_monthly(&mut self) -> Result<(), RecordError> {
        self.monthly.clear();
        write_scores(&self.monthly_path, &self.monthly)
    }
}

fn bump(
    scores: &mut Scores,
    killer_id: &str,
    killer_name: &str,
    victim_id: &str,
    victim_name: &str,
) -> (u32, u32) {
    scores
        .entry(victim_id.to_string())
        .or_insert_with(|| PlayerScore {
            name: victim_name.to_string(),
            kills: HashMap::new(),
        });
    let killer = scores
        .entry(killer_id.to_string())
        .or_insert_with(|| PlayerScore {
            name: killer_name.to_string(),
            kills: HashMap::new(),
        });
    *killer.kills.entry(victim_id.to_string()).or_insert(0) += 1;

    let killer_score = scores
        .get(killer_id)
        .and_then(|p| p.kills.get(victim_id))
        .copied()
        .unwrap_or(0);
    let victim_score = scores
        .get(victim_id)
        .and_then(|p| p.kills.get(killer_id))
        .copied()
        .unwrap_or(0);
    (killer_score, victim_score)
}

fn read_scores(path: &Path) -> Scores {
    fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}

fn write_scores(path: &Path, scores: &Scores) -> Result<(), RecordError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(RecordError::IoError)?;
    }
    let json = serde_json::to_string_pretty(scores).map_err(RecordError::InvalidJson)?;
    fs::write(path, json).map_err(RecordError::IoError)?;
    Ok(())
}

/// Spawn the reset scheduler: daily board at midnight, monthly board at
/// midnight on the last day of the month. Runs for the app's lifetime.
pub fn spawn_reset_scheduler(scoreboard: Arc<Mutex<KnifeScoreboard>>) {
    tokio::spawn(async move {
        loop {
            let now = Local::now();
            if now.hour() == 0 && now.minute() == 0 {
                {
                    let mut board = scoreboard.lock().expect("scoreboard lock");
                    if let Err(e) = board.reset_daily() {
                        log::error!("Daily knife scoreboard reset failed: {}", e);
                    } else {
                        log::info!("Daily knife scoreboard reset");
                    }

                    if now.day() == last_day_of_month(now.year(), now.month()) {
                        if let Err(e) = board.reset_monthly() {
                            log::error!("Monthly knife scoreboard reset failed: {}", e);
                        } else {
                            log::info!("Monthly knife scoreboard reset");
                        }
                    }
                }
                // Skip past the minute so the reset fires once.
                tokio::time::sleep(Duration::from_secs(61)).await;
            }
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
    });
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_to_head_totals() {
        let dir = std::env::temp_dir().join("knife_scores_test");
        let _ = fs::remove_dir_all(&dir);
        let mut board = KnifeScoreboard::load(&dir);

        let (killer, victim) = board.register_kill("1", "Alice", "2", "Bob");
        assert_eq!((killer, victim), (1, 0));
        let (killer, victim) = board.register_kill("2", "Bob", "1", "Alice");
        assert_eq!((killer, victim), (1, 1));
        let (killer, victim) = board.register_kill("1", "Alice", "2", "Bob");
        assert_eq!((killer, victim), (2, 1));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2026, 1), 31);
        assert_eq!(last_day_of_month(2026, 2), 28);
        assert_eq!(last_day_of_month(2028, 2), 29);
        assert_eq!(last_day_of_month(2026, 12), 31);
    }
}
