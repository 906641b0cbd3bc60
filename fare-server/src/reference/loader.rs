//! CSV loader for [`MemoryReference`].
//!
//! A data directory holds one file per table:
//!
//! | file               | columns                                             |
//! |--------------------|-----------------------------------------------------|
//! | `companies.csv`    | `name,tariff`                                       |
//! | `kilo.csv`         | `line,class,company,station,km,nominal_km,zone`     |
//! | `fares.csv`        | `table,company,max_km,fare`                         |
//! | `fare_country.csv` | `table,company,km,nominal_km,fare` (optional)       |
//! | `fare_special.csv` | `line,begin,end,fare,attribution` (optional)        |
//!
//! `kilo.csv` lists each line's stops in order. `company` and `zone` on a
//! row describe the section from that stop to the next; an empty
//! `nominal_km` means the nominal post equals `km`.

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::domain::{
    CompanyTariff, CountryTable, FareAttribution, FareTable, Kilo, LineClass, MetroZone,
    SpecialFare, Yen,
};

use super::error::ReferenceError;
use super::memory::{MemoryReference, ReferenceBuilder};

const COMPANIES: &str = "companies.csv";
const KILO: &str = "kilo.csv";
const FARES: &str = "fares.csv";
const FARE_COUNTRY: &str = "fare_country.csv";
const FARE_SPECIAL: &str = "fare_special.csv";

#[derive(Debug, Deserialize)]
struct CompanyRow {
    name: String,
    tariff: String,
}

#[derive(Debug, Deserialize)]
struct KiloRow {
    line: String,
    class: String,
    company: String,
    station: String,
    km: String,
    #[serde(default)]
    nominal_km: String,
    #[serde(default)]
    zone: String,
}

#[derive(Debug, Deserialize)]
struct FareRow {
    table: String,
    company: String,
    max_km: u32,
    fare: u32,
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    table: String,
    company: String,
    km: u32,
    nominal_km: u32,
    fare: u32,
}

#[derive(Debug, Deserialize)]
struct SpecialRow {
    line: String,
    begin: String,
    end: String,
    fare: u32,
    attribution: String,
}

/// Reads every row of a CSV file, paired with its line number.
fn read_rows<T: DeserializeOwned>(
    dir: &Path,
    file: &'static str,
    required: bool,
) -> Result<Vec<(u64, T)>, ReferenceError> {
    let path = dir.join(file);
    if !required && !path.exists() {
        debug!(file, "Optional table absent, treating as empty");
        return Ok(Vec::new());
    }
    let handle = File::open(&path).map_err(|source| ReferenceError::Io {
        path: path.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(handle);
    let mut rows = Vec::new();
    for (i, row) in reader.deserialize::<T>().enumerate() {
        // Line 1 is the header.
        let row = row.map_err(|source| ReferenceError::Csv { file, source })?;
        rows.push((i as u64 + 2, row));
    }
    debug!(file, rows = rows.len(), "Table read");
    Ok(rows)
}

fn parse<T>(file: &'static str, line: u64, value: &str) -> Result<T, ReferenceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ReferenceError::InvalidRow {
        file,
        line,
        message: e.to_string(),
    })
}

fn company(
    builder: &ReferenceBuilder,
    file: &'static str,
    line: u64,
    name: &str,
) -> Result<crate::domain::CompanyId, ReferenceError> {
    builder
        .company_id(name)
        .ok_or_else(|| ReferenceError::InvalidRow {
            file,
            line,
            message: format!("unknown company {name:?}"),
        })
}

impl MemoryReference {
    /// Loads reference data from the CSV files in `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let dir = dir.as_ref();
        let mut builder = MemoryReference::builder();

        for (line, row) in read_rows::<CompanyRow>(dir, COMPANIES, true)? {
            let tariff: CompanyTariff = parse(COMPANIES, line, &row.tariff)?;
            builder.company(&row.name, tariff)?;
        }

        load_lines(&mut builder, read_rows::<KiloRow>(dir, KILO, true)?)?;

        for (line, row) in read_rows::<FareRow>(dir, FARES, true)? {
            let table: FareTable = parse(FARES, line, &row.table)?;
            let owner = company(&builder, FARES, line, &row.company)?;
            builder.fare(table, owner, row.max_km, Yen(row.fare));
        }

        for (line, row) in read_rows::<CountryRow>(dir, FARE_COUNTRY, false)? {
            let table: CountryTable = parse(FARE_COUNTRY, line, &row.table)?;
            let owner = company(&builder, FARE_COUNTRY, line, &row.company)?;
            builder.country_fare(table, owner, row.km, row.nominal_km, Yen(row.fare));
        }

        for (line, row) in read_rows::<SpecialRow>(dir, FARE_SPECIAL, false)? {
            let attribution: FareAttribution = parse(FARE_SPECIAL, line, &row.attribution)?;
            builder.special(
                &row.line,
                &row.begin,
                &row.end,
                SpecialFare {
                    amount: Yen(row.fare),
                    attribution,
                },
            );
        }

        let reference = builder.build()?;
        info!(
            dir = %dir.display(),
            stations = reference.station_count(),
            lines = reference.line_count(),
            "Reference data loaded"
        );
        Ok(reference)
    }
}

/// Groups consecutive `kilo.csv` rows by line and registers each line.
fn load_lines(
    builder: &mut ReferenceBuilder,
    rows: Vec<(u64, KiloRow)>,
) -> Result<(), ReferenceError> {
    let mut groups: Vec<Vec<(u64, KiloRow)>> = Vec::new();
    for (line, row) in rows {
        match groups.last_mut() {
            Some(group) if group[0].1.line == row.line => group.push((line, row)),
            _ => groups.push(vec![(line, row)]),
        }
    }

    for group in groups {
        let (first_line, first) = &group[0];
        let class: LineClass = parse(KILO, *first_line, &first.class)?;
        let owner = company(builder, KILO, *first_line, &first.company)?;
        let name = first.line.clone();

        let mut stops = Vec::with_capacity(group.len());
        for (line, row) in &group {
            let post: Kilo = parse(KILO, *line, &row.km)?;
            let nominal: Kilo = if row.nominal_km.is_empty() {
                post
            } else {
                parse(KILO, *line, &row.nominal_km)?
            };
            let zone: Option<MetroZone> = if row.zone.is_empty() {
                None
            } else {
                Some(parse(KILO, *line, &row.zone)?)
            };
            let section_owner = company(builder, KILO, *line, &row.company)?;
            stops.push((row.station.as_str(), post, nominal, section_owner, zone));
        }

        let mut line = builder.line(&name, class, owner);
        for (station, post, nominal, section_owner, zone) in stops {
            line = line
                .operated_by(section_owner)
                .zone(zone)
                .stop_nominal(station, post, nominal);
        }
        line.finish()?;
    }
    Ok(())
}
