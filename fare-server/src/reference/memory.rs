//! In-memory reference data store.
//!
//! Lines are stored as ordered stops with a real and a nominal kilometre
//! post. The stretch from one stop to the next is a section; each section
//! belongs to one company and may lie in a metropolitan zone.

use std::collections::HashMap;

use crate::domain::{
    CompanyId, CompanyTariff, CountryTable, FareTable, Kilo, LineClass, LineId, MetroZone,
    Segment, SpecialFare, StationId, Yen,
};

use super::error::ReferenceError;
use super::provider::{Decomposition, MileageShare, ReferenceData, TravelRange};

/// A stop on a line. `company` and `zone` describe the section that
/// starts here; they are ignored on a line's last stop.
#[derive(Debug, Clone)]
struct Stop {
    station: StationId,
    post: Kilo,
    nominal: Kilo,
    company: CompanyId,
    zone: Option<MetroZone>,
}

#[derive(Debug, Clone)]
struct LineRecord {
    name: String,
    class: LineClass,
    stops: Vec<Stop>,
    positions: HashMap<StationId, usize>,
}

impl LineRecord {
    /// Stop indices of both ends, if both are on this line.
    fn span(&self, segment: &Segment) -> Option<(usize, usize)> {
        let begin = *self.positions.get(&segment.begin)?;
        let end = *self.positions.get(&segment.end)?;
        Some((begin, end))
    }
}

#[derive(Debug, Clone)]
struct CompanyRecord {
    name: String,
    tariff: CompanyTariff,
}

/// Immutable reference data held in memory.
///
/// Built with [`MemoryReference::builder`] or loaded from CSV files with
/// [`MemoryReference::load_dir`](MemoryReference::load_dir).
#[derive(Debug, Clone)]
pub struct MemoryReference {
    dominant: CompanyId,
    companies: Vec<CompanyRecord>,
    company_lookup: HashMap<String, CompanyId>,
    stations: Vec<String>,
    station_lookup: HashMap<String, StationId>,
    lines: Vec<LineRecord>,
    line_lookup: HashMap<String, LineId>,
    /// Step rows sorted by ascending `max_km`.
    fares: HashMap<(FareTable, CompanyId), Vec<(u32, Yen)>>,
    country_fares: HashMap<(CountryTable, CompanyId, u32, u32), Yen>,
    /// Keyed with the lower station id first.
    specials: HashMap<(LineId, StationId, StationId), SpecialFare>,
}

impl MemoryReference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Finds stations whose name contains `query`, case-insensitively.
    ///
    /// Prefix matches come first; ties are ordered by name.
    pub fn search_stations(&self, query: &str, limit: usize) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(bool, &str)> = self
            .stations
            .iter()
            .filter_map(|name| {
                let lower = name.to_lowercase();
                lower
                    .contains(&query)
                    .then(|| (!lower.starts_with(&query), name.as_str()))
            })
            .collect();
        matches.sort_unstable();
        matches.into_iter().take(limit).map(|(_, name)| name).collect()
    }

    /// Names of the lines serving a station, in line order.
    pub fn lines_at(&self, station: StationId) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.positions.contains_key(&station))
            .map(|line| line.name.as_str())
            .collect()
    }

    fn line(&self, line: LineId) -> Option<&LineRecord> {
        self.lines.get(line.index() as usize)
    }

    fn special_key(segment: &Segment) -> (LineId, StationId, StationId) {
        let (a, b) = if segment.begin <= segment.end {
            (segment.begin, segment.end)
        } else {
            (segment.end, segment.begin)
        };
        (segment.line, a, b)
    }
}

impl ReferenceData for MemoryReference {
    fn station_name(&self, station: StationId) -> Option<&str> {
        self.stations.get(station.index() as usize).map(String::as_str)
    }

    fn station_id(&self, name: &str) -> Option<StationId> {
        self.station_lookup.get(name.trim()).copied()
    }

    fn line_name(&self, line: LineId) -> Option<&str> {
        self.line(line).map(|l| l.name.as_str())
    }

    fn line_id(&self, name: &str) -> Option<LineId> {
        self.line_lookup.get(name.trim()).copied()
    }

    fn company_name(&self, company: CompanyId) -> Option<&str> {
        self.companies
            .get(company.index() as usize)
            .map(|c| c.name.as_str())
    }

    fn company_id(&self, name: &str) -> Option<CompanyId> {
        self.company_lookup.get(name.trim()).copied()
    }

    fn dominant_company(&self) -> CompanyId {
        self.dominant
    }

    fn company_tariff(&self, company: CompanyId) -> Option<CompanyTariff> {
        self.companies
            .get(company.index() as usize)
            .map(|c| c.tariff)
    }

    fn line_class(&self, line: LineId) -> Option<LineClass> {
        self.line(line).map(|l| l.class)
    }

    fn contains(&self, segment: &Segment, station: StationId) -> bool {
        let Some(line) = self.line(segment.line) else {
            return false;
        };
        let (Some((begin, end)), Some(&at)) = (line.span(segment), line.positions.get(&station))
        else {
            return false;
        };
        begin.min(end) <= at && at <= begin.max(end)
    }

    fn stations_on(&self, segment: &Segment) -> Option<Vec<StationId>> {
        let line = self.line(segment.line)?;
        let (begin, end) = line.span(segment)?;
        let stations = if begin <= end {
            line.stops[begin..=end].iter().map(|s| s.station).collect()
        } else {
            line.stops[end..=begin].iter().rev().map(|s| s.station).collect()
        };
        Some(stations)
    }

    fn travel_range(&self, segment: &Segment) -> Option<TravelRange> {
        let line = self.line(segment.line)?;
        let (begin, end) = line.span(segment)?;
        Some(TravelRange {
            from: line.stops[begin].post,
            to: line.stops[end].post,
        })
    }

    fn decompose(&self, segment: &Segment) -> Option<Decomposition> {
        let line = self.line(segment.line)?;
        let (begin, end) = line.span(segment)?;
        let (low, high) = (begin.min(end), begin.max(end));

        let mut shares: Vec<MileageShare> = Vec::new();
        let mut metro: Option<Option<MetroZone>> = None;
        for pair in line.stops[low..=high].windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let real = Kilo::between(from.post, to.post);
            let nominal = match line.class {
                LineClass::Main => real,
                LineClass::Local => Kilo::between(from.nominal, to.nominal),
            };

            match shares.iter_mut().find(|s| s.company == from.company) {
                Some(share) => {
                    share.real += real;
                    share.nominal += nominal;
                }
                None => shares.push(MileageShare {
                    company: from.company,
                    class: line.class,
                    real,
                    nominal,
                }),
            }

            metro = Some(match metro {
                None => from.zone,
                Some(current) => current.zip(from.zone).and_then(|(a, b)| a.widen(b)),
            });
        }

        Some(Decomposition {
            shares,
            metro: metro.flatten(),
        })
    }

    fn special_fare(&self, segment: &Segment) -> Option<SpecialFare> {
        self.specials.get(&Self::special_key(segment)).copied()
    }

    fn fare_table(&self, table: FareTable, company: CompanyId, km: u32) -> Option<Yen> {
        self.fares
            .get(&(table, company))?
            .iter()
            .find(|(max_km, _)| *max_km >= km)
            .map(|(_, fare)| *fare)
    }

    fn fare_country_table(
        &self,
        table: CountryTable,
        company: CompanyId,
        km: u32,
        nominal_km: u32,
    ) -> Option<Yen> {
        self.country_fares
            .get(&(table, company, km, nominal_km))
            .copied()
    }
}

/// A special fare waiting for its names to be resolved.
#[derive(Debug, Clone)]
struct PendingSpecial {
    line: String,
    begin: String,
    end: String,
    fare: SpecialFare,
}

/// Builder for [`MemoryReference`].
///
/// Names are checked as they are added; cross references (special fares)
/// are resolved in [`ReferenceBuilder::build`].
#[derive(Debug, Default)]
pub struct ReferenceBuilder {
    companies: Vec<CompanyRecord>,
    company_lookup: HashMap<String, CompanyId>,
    stations: Vec<String>,
    station_lookup: HashMap<String, StationId>,
    lines: Vec<LineRecord>,
    line_lookup: HashMap<String, LineId>,
    fares: HashMap<(FareTable, CompanyId), Vec<(u32, Yen)>>,
    country_fares: HashMap<(CountryTable, CompanyId, u32, u32), Yen>,
    specials: Vec<PendingSpecial>,
}

impl ReferenceBuilder {
    /// Registers a company.
    pub fn company(&mut self, name: &str, tariff: CompanyTariff) -> Result<CompanyId, ReferenceError> {
        let name = name.trim();
        if self.company_lookup.contains_key(name) {
            return Err(ReferenceError::Duplicate {
                kind: "company",
                name: name.to_string(),
            });
        }
        let id = CompanyId::new(self.companies.len() as u32);
        self.companies.push(CompanyRecord {
            name: name.to_string(),
            tariff,
        });
        self.company_lookup.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn company_id(&self, name: &str) -> Option<CompanyId> {
        self.company_lookup.get(name.trim()).copied()
    }

    /// Starts a line whose sections belong to `company` until changed.
    pub fn line(&mut self, name: &str, class: LineClass, company: CompanyId) -> LineBuilder<'_> {
        LineBuilder {
            owner: self,
            name: name.trim().to_string(),
            class,
            company,
            zone: None,
            stops: Vec::new(),
        }
    }

    /// Adds a step row: `fare` applies up to and including `max_km`.
    pub fn fare(&mut self, table: FareTable, company: CompanyId, max_km: u32, fare: Yen) -> &mut Self {
        self.fares
            .entry((table, company))
            .or_default()
            .push((max_km, fare));
        self
    }

    /// Adds an exact (real, nominal) pair row.
    pub fn country_fare(
        &mut self,
        table: CountryTable,
        company: CompanyId,
        km: u32,
        nominal_km: u32,
        fare: Yen,
    ) -> &mut Self {
        self.country_fares
            .insert((table, company, km, nominal_km), fare);
        self
    }

    /// Marks the stretch of `line` between two stations, in either
    /// direction, as carrying a flat fare instead of mileage.
    pub fn special(&mut self, line: &str, begin: &str, end: &str, fare: SpecialFare) -> &mut Self {
        self.specials.push(PendingSpecial {
            line: line.trim().to_string(),
            begin: begin.trim().to_string(),
            end: end.trim().to_string(),
            fare,
        });
        self
    }

    fn intern_station(&mut self, name: &str) -> StationId {
        if let Some(id) = self.station_lookup.get(name) {
            return *id;
        }
        let id = StationId::new(self.stations.len() as u32);
        self.stations.push(name.to_string());
        self.station_lookup.insert(name.to_string(), id);
        id
    }

    /// Validates and freezes the data.
    pub fn build(self) -> Result<MemoryReference, ReferenceError> {
        let dominants: Vec<CompanyId> = self
            .companies
            .iter()
            .enumerate()
            .filter(|(_, c)| c.tariff == CompanyTariff::Dominant)
            .map(|(i, _)| CompanyId::new(i as u32))
            .collect();
        let [dominant] = dominants[..] else {
            return Err(ReferenceError::DominantCompany(dominants.len()));
        };

        let mut specials = HashMap::with_capacity(self.specials.len());
        for pending in &self.specials {
            let line = *self.line_lookup.get(&pending.line).ok_or_else(|| {
                ReferenceError::Unknown {
                    kind: "line",
                    name: pending.line.clone(),
                }
            })?;
            let record = &self.lines[line.index() as usize];
            let resolve = |name: &String| {
                self.station_lookup
                    .get(name)
                    .copied()
                    .filter(|station| record.positions.contains_key(station))
                    .ok_or_else(|| ReferenceError::Unknown {
                        kind: "station on line",
                        name: format!("{}/{}", pending.line, name),
                    })
            };
            let segment = Segment::new(resolve(&pending.begin)?, line, resolve(&pending.end)?);
            specials.insert(MemoryReference::special_key(&segment), pending.fare);
        }

        let mut fares = self.fares;
        for rows in fares.values_mut() {
            rows.sort_by_key(|(max_km, _)| *max_km);
        }

        Ok(MemoryReference {
            dominant,
            companies: self.companies,
            company_lookup: self.company_lookup,
            stations: self.stations,
            station_lookup: self.station_lookup,
            lines: self.lines,
            line_lookup: self.line_lookup,
            fares,
            country_fares: self.country_fares,
            specials,
        })
    }
}

/// Builder for one line, returned by [`ReferenceBuilder::line`].
pub struct LineBuilder<'a> {
    owner: &'a mut ReferenceBuilder,
    name: String,
    class: LineClass,
    company: CompanyId,
    zone: Option<MetroZone>,
    stops: Vec<(String, Kilo, Kilo, CompanyId, Option<MetroZone>)>,
}

impl LineBuilder<'_> {
    /// Sections from the next stop onwards belong to `company`.
    pub fn operated_by(mut self, company: CompanyId) -> Self {
        self.company = company;
        self
    }

    /// Sections from the next stop onwards lie in `zone`.
    pub fn zone(mut self, zone: Option<MetroZone>) -> Self {
        self.zone = zone;
        self
    }

    /// Adds a stop whose nominal post equals its real post.
    pub fn stop(self, station: &str, post: Kilo) -> Self {
        self.stop_nominal(station, post, post)
    }

    /// Adds a stop with a separate nominal post.
    pub fn stop_nominal(mut self, station: &str, post: Kilo, nominal: Kilo) -> Self {
        self.stops.push((
            station.trim().to_string(),
            post,
            nominal,
            self.company,
            self.zone,
        ));
        self
    }

    /// Validates the stops and registers the line.
    pub fn finish(self) -> Result<LineId, ReferenceError> {
        let LineBuilder {
            owner,
            name,
            class,
            stops,
            ..
        } = self;

        if owner.line_lookup.contains_key(&name) {
            return Err(ReferenceError::Duplicate { kind: "line", name });
        }
        if stops.len() < 2 {
            return Err(ReferenceError::ShortLine(name));
        }
        for pair in stops.windows(2) {
            if pair[1].1 <= pair[0].1 || pair[1].2 < pair[0].2 {
                return Err(ReferenceError::NonIncreasingPost {
                    line: name,
                    station: pair[1].0.clone(),
                });
            }
        }
        for (_, _, _, company, _) in &stops {
            if company.index() as usize >= owner.companies.len() {
                return Err(ReferenceError::Unknown {
                    kind: "company",
                    name: company.to_string(),
                });
            }
        }

        let mut record = LineRecord {
            name: name.clone(),
            class,
            stops: Vec::with_capacity(stops.len()),
            positions: HashMap::with_capacity(stops.len()),
        };
        for (i, (station, post, nominal, company, zone)) in stops.into_iter().enumerate() {
            let id = owner.intern_station(&station);
            if record.positions.insert(id, i).is_some() {
                return Err(ReferenceError::Duplicate {
                    kind: "station on line",
                    name: format!("{name}/{station}"),
                });
            }
            record.stops.push(Stop {
                station: id,
                post,
                nominal,
                company,
                zone,
            });
        }

        let id = LineId::new(owner.lines.len() as u32);
        owner.lines.push(record);
        owner.line_lookup.insert(name, id);
        Ok(id)
    }
}
