//! Result rendering for the terminal and for files.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

use neo_core::{NearEarthObject, OrbitPath};
use neo_query::SearchResults;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned table.
    #[default]
    Table,
    /// One line per result.
    Text,
    Json,
    Csv,
}

#[derive(Tabled, Serialize)]
struct NeoRow<'a> {
    id: &'a str,
    name: &'a str,
    diameter_min_km: f64,
    hazardous: bool,
    approaches: usize,
}

impl<'a> From<&'a NearEarthObject> for NeoRow<'a> {
    fn from(neo: &'a NearEarthObject) -> Self {
        Self {
            id: &neo.id,
            name: &neo.name,
            diameter_min_km: neo.diameter_min_km,
            hazardous: neo.is_potentially_hazardous,
            approaches: neo.orbits.len(),
        }
    }
}

#[derive(Tabled, Serialize)]
struct PathRow<'a> {
    neo_name: &'a str,
    close_approach_date: String,
    miss_distance_km: f64,
}

impl<'a> From<&'a OrbitPath> for PathRow<'a> {
    fn from(path: &'a OrbitPath) -> Self {
        Self {
            neo_name: &path.neo_name,
            close_approach_date: path.close_approach_date.to_string(),
            miss_distance_km: path.miss_distance_km,
        }
    }
}

pub fn render(
    results: &SearchResults<'_>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => {
            let table = match results {
                SearchResults::Neos(v) => Table::new(v.iter().map(|n| NeoRow::from(*n))),
                SearchResults::Paths(v) => Table::new(v.iter().map(|p| PathRow::from(*p))),
            };
            writeln!(out, "{}", table)
        }
        OutputFormat::Text => {
            match results {
                SearchResults::Neos(v) => v.iter().try_for_each(|n| writeln!(out, "{}", n)),
                SearchResults::Paths(v) => v.iter().try_for_each(|p| writeln!(out, "{}", p)),
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, results)?;
            writeln!(out)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            match results {
                SearchResults::Neos(v) => {
                    for n in v {
                        writer.serialize(NeoRow::from(*n))?;
                    }
                }
                SearchResults::Paths(v) => {
                    for p in v {
                        writer.serialize(PathRow::from(*p))?;
                    }
                }
            }
            writer.flush()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::parse_date;

    fn sample() -> NearEarthObject {
        let mut neo = NearEarthObject::new("7", "A1", 0.5, true);
        neo.update_orbits(OrbitPath::new("A1", parse_date("2020-01-02").unwrap(), 50000.0));
        neo
    }

    fn rendered(results: &SearchResults<'_>, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        render(results, format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_csv_paths() {
        let neo = sample();
        let results = SearchResults::Paths(neo.orbits.iter().collect());
        assert_eq!(
            rendered(&results, OutputFormat::Csv),
            "neo_name,close_approach_date,miss_distance_km\nA1,2020-01-02,50000.0\n"
        );
    }

    #[test]
    fn test_text_uses_display() {
        let neo = sample();
        let results = SearchResults::Neos(vec![&neo]);
        assert_eq!(
            rendered(&results, OutputFormat::Text),
            "name:A1 orbit_dates:[2020-01-02] hazardous:true\n"
        );
    }

    #[test]
    fn test_table_has_header_and_row() {
        let neo = sample();
        let out = rendered(&SearchResults::Neos(vec![&neo]), OutputFormat::Table);
        assert!(out.contains("diameter_min_km"));
        assert!(out.contains("A1"));
    }

    #[test]
    fn test_json_is_tagged_by_kind() {
        let neo = sample();
        let out = rendered(&SearchResults::Neos(vec![&neo]), OutputFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["neos"][0]["id"], "7");
    }
}
