//! The four loaders: fetch, normalize, (expand), upsert.

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::fetch::{StatType, StatsSource};
use crate::load::{upsert_all, UpsertClient};
use crate::process::{expand, normalize_as, RosterTeams};
use crate::tables::{
    GameRow, KickerWeekStats, PlayerWeekStats, TeamWeekStats, KICKER_SPEC, PLAYER_SPEC,
    PLAYER_WEEK_STATS, SCHEDULE_SPEC, TEAM_SPEC, TEAM_WEEK_MATCHUPS, TEAM_WEEK_STATS,
};

/// Collaborators shared by every loader in one run.
pub struct Pipeline<'a> {
    pub source: &'a dyn StatsSource,
    pub client: &'a dyn UpsertClient,
    pub batch_size: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(source: &'a dyn StatsSource, client: &'a dyn UpsertClient, batch_size: usize) -> Self {
        Self {
            source,
            client,
            batch_size,
        }
    }

    /// Team defense/special teams → `team_week_stats`.
    #[instrument(level = "info", skip(self))]
    pub async fn load_team_defense(&self, seasons: &[u16]) -> Result<usize> {
        let raw = self.source.team_stats(seasons).await?;
        let rows: Vec<TeamWeekStats> = normalize_as(&raw, &TEAM_SPEC)?;

        let sent = upsert_all(self.client, &rows, &TEAM_WEEK_STATS, self.batch_size).await?;
        info!("Done DST: {}", describe(seasons));
        Ok(sent)
    }

    /// Schedules → one row per team per completed game → `team_week_matchups`.
    #[instrument(level = "info", skip(self))]
    pub async fn load_matchups(&self, seasons: &[u16]) -> Result<usize> {
        let raw = self.source.schedules(seasons).await?;
        let games: Vec<GameRow> = normalize_as(&raw, &SCHEDULE_SPEC)?;
        let rows = expand(&games);
        info!("Team-week matchup rows: {} from {} games", rows.len(), games.len());

        let sent = upsert_all(self.client, &rows, &TEAM_WEEK_MATCHUPS, self.batch_size).await?;
        info!("Done matchups: {}", describe(seasons));
        Ok(sent)
    }

    /// Skill-position and kicker lines, with each player's historical team
    /// taken from rosters → `player_week_stats`.
    #[instrument(level = "info", skip(self))]
    pub async fn load_players(&self, seasons: &[u16]) -> Result<usize> {
        let raw = self.source.player_stats(seasons, StatType::Offense).await?;
        let mut rows: Vec<PlayerWeekStats> = normalize_as(&raw, &PLAYER_SPEC)?;

        let rosters = self
            .source
            .rosters(seasons)
            .await
            .context("loading rosters for historical teams")?;
        if let Some(teams) = RosterTeams::from_table(&rosters)? {
            teams.apply(&mut rows);
        }

        let sent = upsert_all(self.client, &rows, &PLAYER_WEEK_STATS, self.batch_size).await?;
        info!("Done players: {}", describe(seasons));
        Ok(sent)
    }

    /// Kicker lines only; offensive columns of existing rows are left alone.
    #[instrument(level = "info", skip(self))]
    pub async fn load_kickers(&self, seasons: &[u16]) -> Result<usize> {
        let raw = self.source.player_stats(seasons, StatType::Kicking).await?;
        let rows: Vec<KickerWeekStats> = normalize_as(&raw, &KICKER_SPEC)?;

        let sent = upsert_all(self.client, &rows, &PLAYER_WEEK_STATS, self.batch_size).await?;
        info!("Done kickers: {}", describe(seasons));
        Ok(sent)
    }
}

fn describe(seasons: &[u16]) -> String {
    match (seasons.first(), seasons.last()) {
        (Some(first), Some(last)) if first != last => format!("{} {}", first, last),
        (Some(first), _) => first.to_string(),
        _ => "no seasons".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{tests::MemorySource, Dataset};
    use crate::load::tests::{KeyedStore, RecordingClient};
    use crate::logging::init_test_logging;
    use crate::process::NormalizeError;

    const TEAM_2023: &str = "season,week,team,def_sacks,def_interceptions\n\
        2023,1,KC,2,1\n\
        2023,1,DET,3,0\n\
        2023,2,KC,NA,2\n";

    const GAMES: &str = "game_id,season,week,away_team,away_score,home_team,home_score\n\
        2022_01_BUF_LA,2022,1,BUF,31,LA,10\n\
        2023_01_DET_KC,2023,1,DET,21,KC,20\n\
        2023_02_KC_JAX,2023,2,KC,17,JAX,9\n\
        2023_22_SF_KC,2023,22,SF,NA,KC,NA\n";

    // Weekly player file: every position, offense and kicking side by side.
    const WEEKLY_2023: &str = "player_id,player_name,player_display_name,position,position_group,recent_team,season,week,season_type,passing_yards,rushing_yards,receiving_yards,fg_made,fg_att,pat_made,pat_att,fg_made_40_49\n\
        00-1,A.Runner,Al Runner,RB,RB,NYJ,2023,1,REG,0,88,12,,,,,\n\
        00-2,B.Kicker,Bo Kicker,PK,SPEC,KC,2023,1,REG,,,,3,4,2,2,1\n\
        00-3,C.Guard,Cy Guard,OL,OL,KC,2023,1,REG,,,,,,,,\n\
        00-4,D.Leg,Dee Leg,K,SPEC,BUF,2023,1,REG,,,,1,2,3,3,0\n\
        00-5,E.Passer,Ed Passer,QB,QB,BUF,2023,1,REG,250,4,,,,,,\n";

    const ROSTER_2023: &str = "season,team,gsis_id\n2023,MIN,00-1\n";

    fn source() -> MemorySource {
        MemorySource::default()
            .with(Dataset::TeamStats, 2023, TEAM_2023)
            .with(Dataset::Schedules, 0, GAMES)
            .with(Dataset::PlayerStats(StatType::Offense), 2023, WEEKLY_2023)
            .with(Dataset::Rosters, 2023, ROSTER_2023)
    }

    #[tokio::test]
    async fn team_defense_is_idempotent() -> Result<()> {
        init_test_logging();
        let source = source();
        let store = KeyedStore::default();
        let pipeline = Pipeline::new(&source, &store, 2);

        assert_eq!(pipeline.load_team_defense(&[2023]).await?, 3);
        let once = store.tables.lock().unwrap().clone();
        pipeline.load_team_defense(&[2023]).await?;

        let after = store.tables.lock().unwrap().clone();
        assert_eq!(after, once);
        let table = &after["team_week_stats"];
        assert_eq!(table.len(), 3);
        let kc_week2 = table.values().find(|r| r["team"] == "KC" && r["week"] == 2).unwrap();
        assert_eq!(kc_week2["sacks"], 0);
        assert_eq!(kc_week2["interceptions"], 2);
        assert_eq!(kc_week2["points_allowed"], 0);
        Ok(())
    }

    #[tokio::test]
    async fn matchups_cover_completed_games_of_requested_seasons() -> Result<()> {
        init_test_logging();
        let source = source();
        let client = RecordingClient::default();
        let pipeline = Pipeline::new(&source, &client, 500);

        assert_eq!(pipeline.load_matchups(&[2023]).await?, 4);

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "team_week_matchups");
        let sides: Vec<(String, bool)> = calls[0]
            .1
            .iter()
            .map(|r| (r["team"].as_str().unwrap().to_string(), r["is_home"].as_bool().unwrap()))
            .collect();
        assert_eq!(
            sides,
            vec![
                ("KC".to_string(), true),
                ("DET".to_string(), false),
                ("JAX".to_string(), true),
                ("KC".to_string(), false),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn players_take_roster_team() -> Result<()> {
        init_test_logging();
        let source = source();
        let client = RecordingClient::default();
        let pipeline = Pipeline::new(&source, &client, 500);

        assert_eq!(pipeline.load_players(&[2023]).await?, 4);

        let calls = client.calls.lock().unwrap();
        let rows = &calls[0].1;
        assert_eq!(rows[0]["player_id"], "00-1");
        assert_eq!(rows[0]["team"], "MIN");
        assert_eq!(rows[0]["rushing_yards"], 88);
        assert_eq!(rows[1]["position"], "K");
        assert_eq!(rows[1]["team"], "KC");
        assert_eq!(rows[1]["fgm"], 3);
        assert_eq!(rows[3]["passing_yards"], 250);
        Ok(())
    }

    #[tokio::test]
    async fn kickers_send_kicking_columns_only() -> Result<()> {
        init_test_logging();
        let source = source();
        let client = RecordingClient::default();
        let pipeline = Pipeline::new(&source, &client, 500);

        assert_eq!(pipeline.load_kickers(&[2023]).await?, 2);

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls[0].0, "player_week_stats");
        let rows: Vec<_> = calls[0].1.iter().map(|r| r.as_object().unwrap()).collect();
        let kickers: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r["player_id"].as_str().unwrap(), r["position"].as_str().unwrap()))
            .collect();
        assert_eq!(kickers, vec![("00-2", "K"), ("00-4", "K")]);

        let row = rows[0];
        assert_eq!(row["player_name"], "B.Kicker");
        assert_eq!((row["fgm"].as_i64(), row["fga"].as_i64()), (Some(3), Some(4)));
        assert_eq!((row["xpm"].as_i64(), row["xpa"].as_i64()), (Some(2), Some(2)));
        assert_eq!(row["fgm_40_49"], 1);
        for r in &rows {
            for offensive in ["passing_yards", "rushing_yards", "receiving_yards", "receptions"] {
                assert!(!r.contains_key(offensive), "{offensive} sent for a kicker");
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn player_without_id_writes_nothing() {
        init_test_logging();
        let source = MemorySource::default()
            .with(
                Dataset::PlayerStats(StatType::Offense),
                2023,
                "player_id,player_name,position,season,week\n\
                 00-1,A.Runner,RB,2023,1\n\
                 ,B.Runner,RB,2023,1\n\
                 ,C.Runner,WR,2023,1\n",
            )
            .with(Dataset::Rosters, 2023, ROSTER_2023);
        let store = KeyedStore::default();
        let pipeline = Pipeline::new(&source, &store, 500);

        let err = pipeline.load_players(&[2023]).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<NormalizeError>(),
            Some(NormalizeError::MissingKey { row: 1, field: "player_id", .. })
        ));
        assert!(store.tables.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_key_column_writes_nothing() {
        init_test_logging();
        let source = MemorySource::default().with(
            Dataset::TeamStats,
            2023,
            "season,week,club,def_sacks\n2023,1,KC,2\n",
        );
        let client = RecordingClient::default();
        let pipeline = Pipeline::new(&source, &client, 500);

        let err = pipeline.load_team_defense(&[2023]).await.unwrap_err();

        match err.downcast_ref::<NormalizeError>() {
            Some(NormalizeError::MissingColumns { fields, .. }) => assert_eq!(fields, &vec!["team"]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn describes_season_ranges() {
        assert_eq!(describe(&[2010, 2011, 2012]), "2010 2012");
        assert_eq!(describe(&[2023]), "2023");
    }
}
