use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use olympic_dash::{Country, Participation};

const GAMES: &[(i32, &str)] = &[
    (2000, "Sydney"),
    (2004, "Athènes"),
    (2008, "Pékin"),
    (2012, "Londres"),
    (2016, "Rio de Janeiro"),
    (2020, "Tokyo"),
];

const COUNTRIES: &[(&str, u32)] = &[
    ("Italy", 360),
    ("Spain", 310),
    ("United States", 560),
    ("Germany", 420),
    ("France", 390),
    ("Japan", 400),
    ("Kenya", 80),
    ("Brazil", 300),
];

/// One synthetic country: attends most Games, medals scale with team size.
fn generate_country(name: &str, base_team: u32, rng: &mut StdRng) -> Country {
    let mut participations = Vec::new();
    for &(year, city) in GAMES {
        if !rng.random_bool(0.85) {
            continue;
        }
        let athlete_count = base_team + rng.random_range(0..=base_team / 5);
        let medals_count = rng.random_range(athlete_count / 40..=athlete_count / 8);
        participations.push(Participation {
            year,
            city: city.to_string(),
            medals_count,
            athlete_count,
        });
    }

    Country {
        country: name.to_string(),
        participations,
    }
}

fn write_json(path: &Path, countries: &[Country]) -> Result<()> {
    let file = std::fs::File::create(path).context("creating output file")?;
    serde_json::to_writer_pretty(file, countries).context("writing JSON")?;
    Ok(())
}

fn write_csv(path: &Path, countries: &[Country]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    writer.write_record(["country", "year", "city", "medalsCount", "athleteCount"])?;
    for c in countries {
        for p in &c.participations {
            writer.write_record([
                c.country.clone(),
                p.year.to_string(),
                p.city.clone(),
                p.medals_count.to_string(),
                p.athlete_count.to_string(),
            ])?;
        }
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_olympic.json"));

    let mut rng = StdRng::seed_from_u64(2024);
    let countries: Vec<Country> = COUNTRIES
        .iter()
        .map(|&(name, team)| generate_country(name, team, &mut rng))
        .collect();

    let is_csv = out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        write_csv(&out, &countries)?;
    } else {
        write_json(&out, &countries)?;
    }

    log::info!("Wrote {} countries to {}", countries.len(), out.display());
    println!("Wrote {} countries to {}", countries.len(), out.display());
    Ok(())
}
