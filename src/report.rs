use colored::{ColoredString, Colorize};
use std::fmt::Write;

use crate::rating::WeightEntry;
use crate::services::{MatchRating, SeasonRating};

fn rating_band(value: f64) -> ColoredString {
    let text = format!("{:.2}", value);
    if value >= 7.0 {
        text.green().bold()
    } else if value >= 4.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

pub fn match_report(rating: &MatchRating) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} player {} / match {}: {}",
        "MPR".bold(),
        rating.player_id,
        rating.match_id,
        rating_band(rating.mpr)
    );

    if rating.breakdown.by_kind.is_empty() {
        let _ = writeln!(out, "  no actions logged, neutral rating");
        return out;
    }

    for entry in &rating.breakdown.by_kind {
        let _ = writeln!(
            out,
            "  {:<16} x{:<3} weight {:>5.1}  total {:>6.2}",
            entry.kind.as_str(),
            entry.count,
            entry.weight,
            entry.total
        );
    }
    let _ = writeln!(
        out,
        "  {} actions, mean contribution {:.3}",
        rating.breakdown.action_count, rating.breakdown.mean_contribution
    );
    out
}

pub fn season_report(rating: &SeasonRating) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} player {} / season {}: {}",
        "CSR".bold(),
        rating.player_id,
        rating.season,
        rating_band(rating.csr)
    );

    for m in &rating.matches {
        let _ = writeln!(
            out,
            "  {}  vs {:<20} {:>3} actions  MPR {}",
            m.date,
            m.opponent,
            m.actions,
            rating_band(m.mpr)
        );
    }

    match &rating.profile {
        Some(profile) => {
            let _ = writeln!(
                out,
                "  peak {:.2}  low {:.2}  peak avg {:.2}  repeatability {:.0}%",
                profile.peak,
                profile.low,
                profile.peak_average,
                profile.repeatability * 100.0
            );
            let _ = writeln!(
                out,
                "  composite {} (role transfer {:.1})",
                rating_band(profile.composite),
                profile.role_transfer
            );
        }
        None => {
            let _ = writeln!(out, "  no rated matches this season, default rating");
        }
    }
    out
}

pub fn weights_report(table: &[WeightEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Action weights".bold());
    for entry in table {
        let weight = format!("{:>5.1}", entry.weight);
        let weight = if entry.weight < 0.0 { weight.red() } else { weight.normal() };
        let _ = writeln!(out, "  {:<16} {}", entry.kind.as_str(), weight);
    }
    out
}
