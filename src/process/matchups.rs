use crate::tables::{GameRow, TeamWeekMatchup};

/// Turn each completed game into a home-side and an away-side record.
///
/// Games missing either score are not completed and yield nothing. For each
/// game the home record comes immediately before the away record.
pub fn expand(games: &[GameRow]) -> Vec<TeamWeekMatchup> {
    let mut out = Vec::with_capacity(games.len() * 2);
    for game in games {
        let (Some(home_score), Some(away_score)) = (game.home_score, game.away_score) else {
            continue;
        };
        let home = game.home_team.to_uppercase();
        let away = game.away_team.to_uppercase();

        out.push(TeamWeekMatchup {
            season: game.season,
            week: game.week,
            team: home.clone(),
            opponent: away.clone(),
            team_score: home_score,
            opp_score: away_score,
            is_home: true,
            game_id: game.game_id.clone(),
        });
        out.push(TeamWeekMatchup {
            season: game.season,
            week: game.week,
            team: away,
            opponent: home,
            team_score: away_score,
            opp_score: home_score,
            is_home: false,
            game_id: game.game_id.clone(),
        });
    }
    out
}
