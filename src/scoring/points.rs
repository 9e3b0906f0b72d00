use crate::config::settings::{PointTable, ScoringSettings};
use crate::teams::Tier;

/// Facts about a single win that decide its point value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinContext {
    pub loser_tier: Tier,
    pub winner_was_away: bool,
    pub score_diff: u32,
    pub loser_score: u32,
    pub loser_rank: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointBreakdown {
    pub base: u32,
    pub away: u32,
    pub blowout: u32,
    pub shutout: u32,
    pub ranked: u32,
}

impl PointBreakdown {
    pub fn total(&self) -> u32 {
        self.base + self.away + self.blowout + self.shutout + self.ranked
    }
}

pub fn points_for_win(win: &WinContext, settings: &ScoringSettings) -> PointBreakdown {
    let table = &settings.points;

    PointBreakdown {
        base: base_points(win.loser_tier, settings),
        away: bonus(win.winner_was_away, table.away_win),
        blowout: bonus(win.score_diff >= table.blowout_margin, table.blowout_win),
        shutout: bonus(win.loser_score == 0, table.shutout_win),
        ranked: bonus(win.loser_rank.is_some(), table.ranked_win),
    }
}

pub fn base_points(loser_tier: Tier, settings: &ScoringSettings) -> u32 {
    let tier = match loser_tier {
        Tier::Unknown => settings.unknown_tier,
        tier => tier,
    };
    tier_points(tier, &settings.points)
}

fn tier_points(tier: Tier, table: &PointTable) -> u32 {
    match tier {
        Tier::Top => table.top_tier_win,
        Tier::Mid => table.mid_tier_win,
        Tier::Lower | Tier::Unknown => table.lower_tier_win,
    }
}

fn bonus(applies: bool, points: u32) -> u32 {
    if applies { points } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(loser_tier: Tier) -> WinContext {
        WinContext {
            loser_tier,
            winner_was_away: false,
            score_diff: 3,
            loser_score: 21,
            loser_rank: None,
        }
    }

    #[test]
    fn test_home_shutout_blowout_over_top_tier() {
        let context = WinContext {
            score_diff: 70,
            loser_score: 0,
            ..win(Tier::Top)
        };

        let points = points_for_win(&context, &ScoringSettings::default());
        assert_eq!(points.base, 12);
        assert_eq!(points.away, 0);
        assert_eq!(points.total(), 14);
    }

    #[test]
    fn test_close_away_win_over_mid_tier() {
        let context = WinContext {
            winner_was_away: true,
            ..win(Tier::Mid)
        };

        assert_eq!(points_for_win(&context, &ScoringSettings::default()).total(), 7);
    }

    #[test]
    fn test_tier_base_points_are_strictly_ordered() {
        let settings = ScoringSettings::default();
        let top = points_for_win(&win(Tier::Top), &settings).total();
        let mid = points_for_win(&win(Tier::Mid), &settings).total();
        let lower = points_for_win(&win(Tier::Lower), &settings).total();
        let unknown = points_for_win(&win(Tier::Unknown), &settings).total();

        assert!(top > mid && mid > lower);
        assert_eq!(lower, unknown);
    }

    #[test]
    fn test_unknown_tier_follows_setting() {
        let settings = ScoringSettings {
            unknown_tier: Tier::Mid,
            ..ScoringSettings::default()
        };
        assert_eq!(base_points(Tier::Unknown, &settings), 6);
    }

    #[test]
    fn test_each_bonus_adds_exactly_its_own_point() {
        let settings = ScoringSettings::default();
        let plain = points_for_win(&win(Tier::Mid), &settings).total();

        let toggles: [fn(&mut WinContext); 4] = [
            |c| c.winner_was_away = true,
            |c| c.score_diff = 50,
            |c| c.loser_score = 0,
            |c| c.loser_rank = Some(17),
        ];

        // Every subset of bonuses is worth base + subset size
        for mask in 0u8..16 {
            let mut context = win(Tier::Mid);
            for (bit, toggle) in toggles.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    toggle(&mut context);
                }
            }
            let expected = plain + mask.count_ones();
            assert_eq!(points_for_win(&context, &settings).total(), expected);
        }
    }

    #[test]
    fn test_blowout_threshold_is_inclusive() {
        let settings = ScoringSettings::default();
        let just_under = WinContext { score_diff: 49, ..win(Tier::Lower) };
        let at_margin = WinContext { score_diff: 50, ..win(Tier::Lower) };

        assert_eq!(points_for_win(&just_under, &settings).blowout, 0);
        assert_eq!(points_for_win(&at_margin, &settings).blowout, 1);
    }
}
