use log::{debug, info};
use std::collections::{BTreeMap, HashMap};

use super::points::{points_for_win, WinContext};
use crate::config::settings::ScoringSettings;
use crate::domain::{GameOutcome, GameResult, QualityWin, RawGameRecord, ScheduleEntry, TeamSeasonRecord};
use crate::teams::{fold_key, TeamClassifier};

/// Season records keyed by canonical team name
pub type SeasonRecords = BTreeMap<String, TeamSeasonRecord>;

/// Fold a batch of games into the season records.
///
/// Every team that appears in a game gets a record, even if none of its games
/// have been played yet. Only decided games change counters or points, and
/// only ever upwards.
pub fn fold_games(
    mut records: SeasonRecords,
    games: &[RawGameRecord],
    classifier: &TeamClassifier,
    settings: &ScoringSettings,
) -> SeasonRecords {
    let mut names = NameCache::default();
    let mut decided = 0;

    for game in games {
        let away = names.resolve(&mut records, classifier, &game.away_team);
        let home = names.resolve(&mut records, classifier, &game.home_team);

        if away == home {
            debug!("Skipping game with the same team on both sides: {}", away);
            continue;
        }

        let Some(outcome) = game.outcome() else {
            if game.is_played() {
                debug!("Skipping level game {} @ {}", game.away_team, game.home_team);
            }
            continue;
        };

        let (winner, loser) = if outcome.winner_was_away {
            (away, home)
        } else {
            (home, away)
        };
        apply_result(&mut records, game.week, &winner, &loser, &outcome, settings);
        decided += 1;
    }

    info!(
        "Folded {} games ({} decided) into {} team records, {} unknown",
        games.len(),
        decided,
        records.len(),
        names.unknown.len()
    );
    records
}

/// Last pass once every week is folded: optional opponent-wins bonus and
/// schedules in week order.
pub fn finalize_season(mut records: SeasonRecords, settings: &ScoringSettings) -> SeasonRecords {
    if settings.opponent_wins_bonus {
        records = apply_opponent_wins_bonus(records);
    }
    for record in records.values_mut() {
        record.schedule.sort_by_key(|entry| entry.week);
        record.quality_wins.sort_by_key(|win| win.week);
    }
    records
}

/// Credit every win with the beaten team's final season win count
pub fn apply_opponent_wins_bonus(mut records: SeasonRecords) -> SeasonRecords {
    let season_wins: HashMap<String, u32> = records
        .iter()
        .map(|(name, record)| (name.clone(), record.wins))
        .collect();

    for record in records.values_mut() {
        for entry in record.schedule.iter_mut().filter(|e| e.result == GameResult::Win) {
            let bonus = season_wins.get(&entry.opponent).copied().unwrap_or(0);
            entry.points += bonus;
            record.points += bonus;

            if let Some(win) = record
                .quality_wins
                .iter_mut()
                .find(|w| w.week == entry.week && w.opponent == entry.opponent)
            {
                win.points += bonus;
            }
        }
    }

    records
}

fn apply_result(
    records: &mut SeasonRecords,
    week: u32,
    winner: &str,
    loser: &str,
    outcome: &GameOutcome,
    settings: &ScoringSettings,
) {
    let Some(loser_tier) = records.get(loser).map(|r| r.tier) else {
        return;
    };

    let score_diff = outcome.score_diff();
    let context = WinContext {
        loser_tier,
        winner_was_away: outcome.winner_was_away,
        score_diff,
        loser_score: outcome.loser_score,
        loser_rank: outcome.loser_rank,
    };
    let points = points_for_win(&context, settings).total();

    if let Some(record) = records.get_mut(winner) {
        credit_win(record, week, loser, outcome, points, settings);
    }
    if let Some(record) = records.get_mut(loser) {
        charge_loss(record, week, winner, outcome);
    }

    debug!(
        "Week {}: {} beat {} {}-{} (+{} pts)",
        week, winner, loser, outcome.winner_score, outcome.loser_score, points
    );
}

fn credit_win(
    record: &mut TeamSeasonRecord,
    week: u32,
    opponent: &str,
    outcome: &GameOutcome,
    points: u32,
    settings: &ScoringSettings,
) {
    record.wins += 1;
    record.points += points;

    if outcome.winner_was_away {
        record.away_wins += 1;
    }
    if outcome.score_diff() >= settings.points.blowout_margin {
        record.blowout_wins += 1;
    }
    if outcome.loser_score == 0 {
        record.shutout_wins += 1;
    }

    record.schedule.push(ScheduleEntry {
        week,
        opponent: opponent.to_string(),
        is_away: outcome.winner_was_away,
        result: GameResult::Win,
        score: format!("W {}-{}", outcome.winner_score, outcome.loser_score),
        score_diff: i64::from(outcome.score_diff()),
        points,
    });

    if let Some(rank) = outcome.loser_rank {
        record.quality_wins.push(QualityWin {
            week,
            opponent: opponent.to_string(),
            rank,
            score: format!("{}-{}", outcome.winner_score, outcome.loser_score),
            points,
        });
    }
}

fn charge_loss(record: &mut TeamSeasonRecord, week: u32, opponent: &str, outcome: &GameOutcome) {
    record.losses += 1;
    record.schedule.push(ScheduleEntry {
        week,
        opponent: opponent.to_string(),
        is_away: !outcome.winner_was_away,
        result: GameResult::Loss,
        score: format!("L {}-{}", outcome.loser_score, outcome.winner_score),
        score_diff: -i64::from(outcome.score_diff()),
        points: 0,
    });
}

/// Scraped name → record key, so each distinct spelling is classified once per fold
#[derive(Default)]
struct NameCache {
    keys: HashMap<String, String>,
    unknown: HashMap<String, String>,
}

impl NameCache {
    fn resolve(&mut self, records: &mut SeasonRecords, classifier: &TeamClassifier, raw: &str) -> String {
        if let Some(key) = self.keys.get(raw) {
            return key.clone();
        }

        let class = classifier.classify(raw);
        let key = if class.is_known() {
            class.name.clone()
        } else {
            // First spelling seen, in this fold or an earlier one, stands for
            // every casing of an unknown name
            let folded = fold_key(&class.name);
            let earlier = records.keys().find(|key| fold_key(key) == folded).cloned();
            self.unknown
                .entry(folded)
                .or_insert_with(|| earlier.unwrap_or_else(|| class.name.clone()))
                .clone()
        };

        records
            .entry(key.clone())
            .or_insert_with(|| TeamSeasonRecord::new(&key, &class.conference, class.tier));
        self.keys.insert(raw.to_string(), key.clone());
        key
    }
}
