//! Non-game subcommands: stats, settings, countries and country info

use anyhow::Result;
use country_data::{export::to_geojson, ContinentFilter, Country};
use game_settings::{GameStats, KeyValueStore, Preferences, ScoreRow, Theme};
use quiz_engine::GameKind;
use std::io::Write;

pub fn print_stats<W: Write>(stats: &GameStats, out: &mut W) -> Result<()> {
    if stats.is_empty() {
        writeln!(out, "No games played yet.")?;
        return Ok(());
    }
    for kind in GameKind::ALL {
        let Some(entry) = stats.get(kind) else {
            continue;
        };
        let last = entry
            .last_played
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "{:<22} {:>5}/{:<5} {:>5.1}%  {}",
            kind.label(),
            entry.total_correct,
            entry.total_rounds,
            entry.accuracy() * 100.0,
            last
        )?;
    }
    Ok(())
}

pub fn print_leaderboard<W: Write>(rows: &[ScoreRow], out: &mut W) -> Result<()> {
    writeln!(out, "Leaderboard:")?;
    for (i, row) in rows.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<20} {:>7}",
            i + 1,
            row.player_name.as_deref().unwrap_or("Anonymous"),
            row.score
        )?;
    }
    Ok(())
}

/// Requested preference changes; `None` leaves a value alone
#[derive(Debug, Default, Clone)]
pub struct SettingsChange {
    pub theme: Option<Theme>,
    pub continent: Option<ContinentFilter>,
    pub player: Option<String>,
    pub reduce_motion: Option<bool>,
}

pub fn apply_settings<S, W>(
    prefs: &mut Preferences<S>,
    change: SettingsChange,
    out: &mut W,
) -> Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    if let Some(theme) = change.theme {
        prefs.set_theme(theme);
    }
    if let Some(continent) = change.continent {
        prefs.set_continent(continent);
    }
    if let Some(player) = change.player {
        prefs.set_player_name(&player);
    }
    if let Some(on) = change.reduce_motion {
        prefs.set_reduce_motion(on);
    }

    writeln!(out, "Theme:         {} ({})", prefs.theme(), prefs.theme().id())?;
    writeln!(out, "Continent:     {}", prefs.continent())?;
    writeln!(out, "Player:        {}", prefs.display_name().unwrap_or("(anonymous)"))?;
    writeln!(out, "Reduce motion: {}", prefs.reduce_motion())?;
    Ok(())
}

pub fn print_countries<W: Write>(countries: &[&Country], geojson: bool, out: &mut W) -> Result<()> {
    if geojson {
        let collection = to_geojson(countries.iter().copied());
        writeln!(out, "{}", serde_json::to_string_pretty(&collection)?)?;
        return Ok(());
    }
    for c in countries {
        writeln!(out, "{}  {:<26} {:<20} {}", c.code, c.name, c.capital, c.continent)?;
    }
    writeln!(out, "{} countries", countries.len())?;
    Ok(())
}

/// Country info card
pub fn print_country_detail<W: Write>(country: &Country, out: &mut W) -> Result<()> {
    writeln!(out, "{} ({})", country.name, country.code)?;
    writeln!(out, "Flag:        {}", country.flag_url())?;
    writeln!(out, "Capital:     {}", country.capital)?;
    if country.native_name_alt.is_empty() {
        writeln!(out, "Native name: {}", country.native_name)?;
    } else {
        writeln!(
            out,
            "Native name: {} (also {})",
            country.native_name,
            country.native_name_alt.join(", ")
        )?;
    }
    writeln!(out, "Continent:   {}", country.continent)?;
    if let Some(millions) = country.population {
        writeln!(out, "Population:  {:.0} million", millions)?;
    }
    if let Some(km2) = country.area {
        writeln!(out, "Area:        {:.0} km²", km2)?;
    }
    writeln!(out, "Read more:   {}", country.wikipedia_url())?;
    Ok(())
}
