use colored::Colorize;

use crate::domain::{RankedTeam, RankingSnapshot};
use crate::teams::Tier;

/// Console table of the published ranking. `detail` adds each team's win
/// counters, quality wins and schedule under its row.
pub fn render_table(snapshot: &RankingSnapshot, detail: bool) -> String {
    let mut out = String::new();

    let updated = snapshot
        .last_updated
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    out.push_str(&format!("{} (updated {})\n", "Rankings".bold(), updated));

    if snapshot.teams.is_empty() {
        out.push_str("No ranked teams yet\n");
        return out;
    }

    out.push_str(&format!(
        "{:>4}  {:<24} {:<18} {:>6} {:>6} {:>6}\n",
        "#", "Team", "Conference", "W-L", "Pts", "PPG"
    ));
    for team in &snapshot.teams {
        out.push_str(&render_row(team));
        out.push('\n');
        if detail {
            out.push_str(&render_detail(team));
        }
    }
    out
}

fn render_detail(team: &RankedTeam) -> String {
    let record = &team.record;
    let mut out = String::new();

    for (label, count) in [
        ("Away wins", record.away_wins),
        ("50+ point wins", record.blowout_wins),
        ("Shutouts", record.shutout_wins),
    ] {
        if count > 0 {
            out.push_str(&format!("      {}: {}\n", label, count));
        }
    }

    if !record.quality_wins.is_empty() {
        out.push_str("      Quality wins:\n");
        for win in &record.quality_wins {
            out.push_str(&format!(
                "        - #{} {} {} ({} pts)\n",
                win.rank, win.opponent, win.score, win.points
            ));
        }
    }

    out.push_str("      Schedule:\n");
    for game in &record.schedule {
        let at = if game.is_away { "@ " } else { "" };
        let points = match game.points {
            0 => String::new(),
            points => format!(" ({} pts)", points),
        };
        out.push_str(&format!("        - {}{} {}{}\n", at, game.opponent, game.score, points));
    }
    out
}

fn render_row(team: &RankedTeam) -> String {
    let record = &team.record;
    let conference = format!("{:<18}", record.conference);
    let conference = match record.tier {
        Tier::Top => conference.green(),
        Tier::Mid => conference.yellow(),
        Tier::Lower | Tier::Unknown => conference.dimmed(),
    };
    format!(
        "{:>4}  {:<24} {} {:>6} {:>6} {:>6.2}",
        team.rank,
        record.name.bold(),
        conference,
        record.record(),
        record.points,
        team.points_per_game
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameResult, QualityWin, ScheduleEntry, TeamSeasonRecord};

    #[test]
    fn test_render_lists_every_team() {
        colored::control::set_override(false);

        let mut record = TeamSeasonRecord::new("Indiana", "Big Ten", Tier::Top);
        record.wins = 2;
        record.points = 25;
        let snapshot = RankingSnapshot {
            teams: vec![RankedTeam {
                rank: 1,
                points_per_game: record.points_per_game(),
                record,
            }],
            last_updated: None,
        };

        let table = render_table(&snapshot, false);
        assert!(table.contains("updated never"));
        let row = table.lines().last().unwrap();
        assert!(row.contains("Indiana"));
        assert!(row.contains("Big Ten"));
        assert!(row.contains("2-0"));
        assert!(row.contains("12.50"));
    }

    #[test]
    fn test_render_empty_snapshot() {
        colored::control::set_override(false);
        assert!(render_table(&RankingSnapshot::empty(), true).contains("No ranked teams yet"));
    }

    #[test]
    fn test_detail_lists_quality_wins_and_schedule() {
        colored::control::set_override(false);

        let mut record = TeamSeasonRecord::new("Army", "American", Tier::Mid);
        record.wins = 1;
        record.losses = 1;
        record.points = 8;
        record.away_wins = 1;
        record.schedule = vec![
            ScheduleEntry {
                week: 1,
                opponent: "Navy".to_string(),
                is_away: true,
                result: GameResult::Win,
                score: "W 21-17".to_string(),
                score_diff: 4,
                points: 8,
            },
            ScheduleEntry {
                week: 2,
                opponent: "Air Force".to_string(),
                is_away: false,
                result: GameResult::Loss,
                score: "L 10-20".to_string(),
                score_diff: -10,
                points: 0,
            },
        ];
        record.quality_wins = vec![QualityWin {
            week: 1,
            opponent: "Navy".to_string(),
            rank: 22,
            score: "21-17".to_string(),
            points: 8,
        }];
        let snapshot = RankingSnapshot {
            teams: vec![RankedTeam {
                rank: 1,
                points_per_game: record.points_per_game(),
                record,
            }],
            last_updated: None,
        };

        let table = render_table(&snapshot, true);

        assert!(table.contains("      Away wins: 1\n"));
        assert!(!table.contains("Shutouts"));
        assert!(table.contains("        - #22 Navy 21-17 (8 pts)\n"));
        assert!(table.contains("        - @ Navy W 21-17 (8 pts)\n"));
        assert!(table.contains("        - Air Force L 10-20\n"));
        assert!(!render_table(&snapshot, false).contains("Schedule:"));
    }
}
