//! Upcoming games for one team from the static league-schedule JSON.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Result;
use crate::record::{Record, Value};

pub const SCHEDULE_URL: &str =
    "https://cdn.nba.com/static/json/staticData/scheduleLeagueV2.json";

pub const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    league_schedule: LeagueSchedule,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeagueSchedule {
    game_dates: Vec<GameDate>,
}

#[derive(Debug, Deserialize)]
struct GameDate {
    games: Vec<Game>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Game {
    game_id: String,
    #[serde(rename = "gameDateTimeUTC")]
    game_date_time_utc: DateTime<Utc>,
    home_team: Team,
    away_team: Team,
    #[serde(default)]
    arena_name: String,
    #[serde(default)]
    arena_city: String,
    #[serde(default)]
    broadcasters: Broadcasters,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Team {
    team_name: String,
    team_city: String,
    team_tricode: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Broadcasters {
    #[serde(default)]
    national_broadcasters: Vec<Broadcaster>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Broadcaster {
    broadcaster_display: String,
}

pub fn parse_payload(body: &str) -> Result<SchedulePayload> {
    Ok(serde_json::from_str(body)?)
}

/// The next `limit` games involving `team` (home or away, case-insensitive
/// name match) after `now`, ordered by tip-off. The clock is an argument so
/// callers own "now" and extraction stays a pure function of its inputs.
pub fn upcoming(
    payload: &SchedulePayload,
    team: &str,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<Record> {
    let wanted = team.to_lowercase();

    let mut games: Vec<&Game> = payload
        .league_schedule
        .game_dates
        .iter()
        .flat_map(|d| d.games.iter())
        .filter(|g| {
            g.home_team.team_name.to_lowercase() == wanted
                || g.away_team.team_name.to_lowercase() == wanted
        })
        .filter(|g| g.game_date_time_utc > now)
        .collect();

    games.sort_by_key(|g| g.game_date_time_utc);
    games.into_iter().take(limit).map(game_record).collect()
}

fn game_record(game: &Game) -> Record {
    let mut r = Record::with_capacity(8);
    r.push("game_id", Value::Text(game.game_id.clone()));
    r.push(
        "date",
        Value::Text(game.game_date_time_utc.format("%Y-%m-%d").to_string()),
    );
    r.push(
        "time",
        Value::Text(game.game_date_time_utc.format("%H:%M UTC").to_string()),
    );
    r.push("home_team", Value::Text(team_label(&game.home_team)));
    r.push("away_team", Value::Text(team_label(&game.away_team)));
    r.push("arena", Value::Text(game.arena_name.clone()));
    r.push("city", Value::Text(game.arena_city.clone()));
    let broadcasters = game
        .broadcasters
        .national_broadcasters
        .iter()
        .map(|b| b.broadcaster_display.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    r.push("broadcasters", Value::Text(broadcasters));
    r
}

fn team_label(team: &Team) -> String {
    format!("{} {} ({})", team.team_city, team.team_name, team.team_tricode)
}
