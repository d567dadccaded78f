//! Subcommand logic
//!
//! Each subcommand turns the input text into its rendered output.
//! Nothing is printed here.

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use avtext::{
    analyze_route, best_runway, decode_atis, decode_notams, detect_region, filing_variants,
    likely_runways, normalize_route_text, parse_metar, runway_heading, suggest_better_route,
    tokenize_route, wind_components, IcaoCode, MetarReport, RegionPreference, WindDirection,
};

use crate::cli::{Args, Command};

/// Run the application
///
/// Decodes `text` with the subcommand in `args` and returns the
/// text to print.
pub fn run(args: &Args, text: &str) -> Result<String, anyhow::Error> {
    match &args.command {
        Command::Metar { .. } => metar(text),
        Command::Atis { icao, .. } => Ok(atis(text, icao.as_ref())),
        Command::Notam { icao, current, .. } => {
            let now = if *current { Some(Utc::now()) } else { None };
            Ok(notam(text, icao.as_ref(), now.as_ref()))
        }
        Command::Route {
            dep,
            arr,
            region,
            cleanup,
            ..
        } => route(text, dep.as_ref(), arr.as_ref(), *region, *cleanup),
        Command::Runway { runways, .. } => runway(text, runways),
    }
}

/// Decode one METAR per non-empty line
fn metar(text: &str) -> Result<String, anyhow::Error> {
    let reports = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| parse_metar(line).with_context(|| format!("Unable to decode \"{}\"", line)))
        .collect::<Result<Vec<MetarReport>, _>>()?;

    if reports.is_empty() {
        return Err(anyhow!("no METAR given"));
    }

    info!("decoded {} METAR(s)", reports.len());
    Ok(reports
        .iter()
        .map(MetarReport::to_string)
        .collect::<Vec<_>>()
        .join("\n\n"))
}

fn atis(text: &str, icao: Option<&IcaoCode>) -> String {
    let report = decode_atis(text, icao.map_or("", IcaoCode::as_str));
    if report.is_empty() {
        warn!("no ATIS fields recognized");
    }
    report.to_string()
}

fn notam(text: &str, icao: Option<&IcaoCode>, now: Option<&DateTime<Utc>>) -> String {
    let batch = decode_notams(text, icao.map_or("", IcaoCode::as_str));
    if batch.is_empty() {
        warn!("no NOTAMs found");
        return String::new();
    }

    let mut blocks = vec![batch.summary().to_string()];

    let closed = batch.closed_runways();
    if !closed.is_empty() {
        blocks.push(format!("Closed runways: {}", closed.join(", ")));
    }

    let mut hidden = 0;
    for item in batch.items() {
        match now {
            Some(now) if item.is_expired_at(now) => {
                debug!("hiding expired NOTAM {}", item.id());
                hidden += 1;
            }
            _ => blocks.push(item.to_string()),
        }
    }
    if hidden > 0 {
        info!("hid {} expired NOTAM(s)", hidden);
    }

    blocks.join("\n\n")
}

fn route(
    text: &str,
    dep: Option<&IcaoCode>,
    arr: Option<&IcaoCode>,
    region: RegionPreference,
    cleanup: bool,
) -> Result<String, anyhow::Error> {
    let tokens = tokenize_route(&normalize_route_text(text));
    if tokens.is_empty() {
        return Err(anyhow!("no route given"));
    }

    let dep = dep.map(IcaoCode::as_str);
    let arr = arr.map(IcaoCode::as_str);
    let analysis = analyze_route(&tokens, dep, arr, region);
    let mut blocks = vec![analysis.to_string()];

    if cleanup {
        let region = detect_region(dep, arr, region);
        blocks.push(suggest_better_route(&tokens, dep, arr, &region).to_string());
        blocks.push(filing_variants(&tokens, dep, arr, &region).to_string());
    }

    Ok(blocks.join("\n\n"))
}

fn runway(text: &str, runways: &[String]) -> Result<String, anyhow::Error> {
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| anyhow!("no METAR given"))?;
    let report = parse_metar(line).with_context(|| format!("Unable to decode \"{}\"", line))?;
    let wind = report
        .wind()
        .ok_or_else(|| anyhow!("METAR has no wind group: \"{}\"", line))?;

    let mut lines = vec![wind.to_string()];
    let likely = likely_runways(runways, wind.direction());
    lines.push(format!("Likely in use: {}", likely.join(", ")));

    let direction = match wind.direction() {
        WindDirection::Degrees(dir) if !wind.is_calm() => dir,
        _ => {
            lines.push("No preferred runway: wind is calm or variable".to_owned());
            return Ok(lines.join("\n"));
        }
    };

    let speed = wind.unit().to_knots(f64::from(wind.speed()));
    let best = best_runway(runways, direction, speed.round() as u16)
        .ok_or_else(|| anyhow!("no valid runway in --runways"))?;
    lines.push(format!("Best runway: {}", best));

    for ident in runways {
        if let Some(heading) = runway_heading(ident) {
            let components = wind_components(f64::from(direction), speed, f64::from(heading));
            lines.push(format!(
                "  {}: {}",
                ident,
                components.to_string().replace('\n', ", ")
            ));
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;

    fn run_args(argv: &[&str], text: &str) -> Result<String, anyhow::Error> {
        let args = Args::try_parse_from(argv.iter().copied()).unwrap();
        run(&args, text)
    }

    #[test]
    fn test_metar() {
        let out = run_args(
            &["avtextdec", "metar"],
            "KJFK 121851Z 18010KT 10SM FEW250 28/18 A3000\n\nEGLL 121850Z CAVOK 18/09 Q1016\n",
        )
        .unwrap();
        assert!(out.contains("KJFK"));
        assert!(out.contains("EGLL"));
        assert!(out.contains("\n\n"));

        assert!(run_args(&["avtextdec", "metar"], "  \n").is_err());
    }

    #[test]
    fn test_notam() {
        let text = "!JFK 03/123 JFK RWY 04L/22R CLSD 2403011200-2403012000\n\
                    !JFK 03/124 JFK TWY B CLSD 2403011200-PERM";
        let out = run_args(&["avtextdec", "notam"], text).unwrap();
        assert!(out.contains("Closed runways: 04L, 22R"));
        assert!(out.contains("03/123"));

        // the first one is long gone
        let out = run_args(&["avtextdec", "notam", "--current"], text).unwrap();
        assert!(!out.contains("JFK 03/123"));
        assert!(out.contains("JFK 03/124"));

        assert_eq!(run_args(&["avtextdec", "notam"], "").unwrap(), "");
    }

    #[test]
    fn test_route() {
        let out = run_args(
            &["avtextdec", "route", "--dep", "EGLL", "--arr", "EHAM", "--cleanup"],
            "EGLL DCT DCT DVR UL9 KONAN UL607 REDFA EHAM",
        )
        .unwrap();
        assert!(out.starts_with("Status: "));
        assert!(out.contains("Suggested route: DVR UL9 KONAN UL607 REDFA"));
        assert!(out.contains("FMC paste (as entered): EGLL DCT DCT DVR"));

        assert!(run_args(&["avtextdec", "route"], "ROUTE:").is_err());
    }

    #[test]
    fn test_runway() {
        let out = run_args(
            &["avtextdec", "runway", "--runways", "09L,27R"],
            "EGLL 121850Z 25012KT 9999 FEW030 18/09 Q1016",
        )
        .unwrap();
        assert!(out.contains("Likely in use: 27R"));
        assert!(out.contains("Best runway: 27R"));
        assert!(out.contains("  27R: Headwind 11 kt, Crosswind 4 kt (from left)"));

        let out = run_args(
            &["avtextdec", "runway", "--runways", "09L,27R"],
            "EGLL 121850Z VRB03KT 9999 FEW030 18/09 Q1016",
        )
        .unwrap();
        assert!(out.contains("No preferred runway"));

        assert!(run_args(
            &["avtextdec", "runway", "--runways", "09L"],
            "EGLL 121850Z 9999 FEW030 18/09 Q1016"
        )
        .is_err());
    }
}
