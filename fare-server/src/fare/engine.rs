//! Tariff selection and pricing.
//!
//! Pricing runs validate, canonicalize, accumulate, then one branch chosen
//! from the companies whose mileage the route collected:
//!
//! * no mileage at all: only flat charges are due;
//! * only the dominant company: its mileage is pooled on the standard
//!   tables;
//! * one dedicated peripheral company alone: that company's own tables;
//! * pooled peripheral companies alone: everything is pooled as if it
//!   were dominant-company travel;
//! * anything else: the dominant company's pool plus one settlement fare per
//!   other company.

use tracing::{debug, error};

use crate::domain::{CompanyId, CompanyTariff, CountryTable, FareTable, Kilo, MetroZone, Yen};
use crate::reference::ReferenceData;
use crate::route::Route;

use super::accumulator::FareAccumulator;
use super::config::TariffConfig;
use super::error::FareError;
use super::formula::main_line_fare;
use super::mileage::{CompanyMileage, MileageAccumulator};

/// How a route's mileage is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TariffBranch {
    FlatOnly,
    PrimaryOnly,
    SinglePeripheral(CompanyId),
    PooledPeripheral,
    DominantOrMixed,
}

impl TariffBranch {
    pub fn name(&self) -> &'static str {
        match self {
            TariffBranch::FlatOnly => "flat_only",
            TariffBranch::PrimaryOnly => "primary_only",
            TariffBranch::SinglePeripheral(_) => "single_peripheral",
            TariffBranch::PooledPeripheral => "pooled_peripheral",
            TariffBranch::DominantOrMixed => "dominant_or_mixed",
        }
    }
}

/// Which family of tables a mileage pool is priced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolTables {
    /// Dominant-company tables: metro tables, the main-line formula and the
    /// local table.
    Standard,
    /// Inter-company settlement tables of the given company.
    Settlement(CompanyId),
}

/// The priced result of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareQuote {
    pub total: Yen,
    /// Mileage-based part of the group fare.
    pub distance_fare: Yen,
    /// Flat charges of the primary group.
    pub group_fare: Yen,
    /// Flat charges of companies outside the group.
    pub other_fare: Yen,
    pub branch: TariffBranch,
    pub mileage_total: Kilo,
}

/// Prices routes against shared reference data.
///
/// The engine holds no state between calls; any number of engines may
/// share one reference.
pub struct TariffEngine<'a, R: ReferenceData + ?Sized> {
    reference: &'a R,
    config: &'a TariffConfig,
}

impl<'a, R: ReferenceData + ?Sized> TariffEngine<'a, R> {
    pub fn new(reference: &'a R, config: &'a TariffConfig) -> Self {
        Self { reference, config }
    }

    /// Validates, canonicalizes and prices a route.
    ///
    /// The route is left canonicalized. An invalid route is reported as
    /// [`FareError::InvalidRoute`] and is not modified.
    pub fn calculate_fare(&self, route: &mut Route) -> Result<FareQuote, FareError> {
        if !route.is_valid(self.reference) {
            return Err(FareError::InvalidRoute);
        }
        route.canonicalize(self.reference);

        let fare = route.accumulate_fare(self.reference)?;
        let quote = self.quote(&fare)?;
        debug!(
            segments = route.segments().len(),
            kilo = %quote.mileage_total,
            branch = quote.branch.name(),
            total = quote.total.amount(),
            "Fare calculated"
        );
        Ok(quote)
    }

    /// Prices an accumulated fare.
    pub fn quote(&self, fare: &FareAccumulator) -> Result<FareQuote, FareError> {
        let branch = self.classify(&fare.mileage)?;
        let distance_fare = self.distance_fare(branch, &fare.mileage)?;
        Ok(FareQuote {
            total: distance_fare + fare.flat_total(),
            distance_fare,
            group_fare: fare.group_fare,
            other_fare: fare.other_fare,
            branch,
            mileage_total: fare.mileage.total(),
        })
    }

    /// Chooses the pricing branch from the companies with mileage.
    pub fn classify(&self, mileage: &MileageAccumulator) -> Result<TariffBranch, FareError> {
        let companies = mileage.companies();
        let dominant = self.reference.dominant_company();

        if companies.is_empty() {
            return Ok(TariffBranch::FlatOnly);
        }
        if companies.iter().all(|c| *c == dominant) {
            return Ok(TariffBranch::PrimaryOnly);
        }

        let tariffs = companies
            .iter()
            .map(|c| self.tariff(*c).map(|t| (*c, t)))
            .collect::<Result<Vec<_>, _>>()?;

        let branch = match tariffs[..] {
            [(company, CompanyTariff::Dedicated)] => TariffBranch::SinglePeripheral(company),
            _ if tariffs.iter().all(|(_, t)| *t == CompanyTariff::Pooled) => {
                TariffBranch::PooledPeripheral
            }
            _ => TariffBranch::DominantOrMixed,
        };
        Ok(branch)
    }

    fn tariff(&self, company: CompanyId) -> Result<CompanyTariff, FareError> {
        match self.reference.company_tariff(company) {
            Some(CompanyTariff::Other) | None => {
                error!(company = %company, "Mileage on a company outside the primary group");
                Err(FareError::integrity(format!(
                    "{company} has no group tariff"
                )))
            }
            Some(tariff) => Ok(tariff),
        }
    }

    fn distance_fare(
        &self,
        branch: TariffBranch,
        mileage: &MileageAccumulator,
    ) -> Result<Yen, FareError> {
        let dominant = self.reference.dominant_company();
        let metro = mileage.metro_zone();

        match branch {
            TariffBranch::FlatOnly => Ok(Yen::ZERO),
            TariffBranch::PrimaryOnly => {
                self.pool(mileage.company(dominant), metro, PoolTables::Standard)
            }
            TariffBranch::SinglePeripheral(company) => {
                self.dedicated(company, mileage.company(company))
            }
            TariffBranch::PooledPeripheral => {
                let pooled = mileage
                    .companies()
                    .into_iter()
                    .map(|c| mileage.company(c))
                    .fold(CompanyMileage::default(), |acc, m| acc + m);
                self.pool(pooled, metro, PoolTables::Standard)
            }
            TariffBranch::DominantOrMixed => {
                let own = mileage.company(dominant);
                let mut total = if own.is_zero() {
                    Yen::ZERO
                } else {
                    self.pool(own, metro, PoolTables::Standard)?
                };
                for company in mileage.companies() {
                    if company == dominant {
                        continue;
                    }
                    let settlement = self.pool(
                        mileage.company(company),
                        None,
                        PoolTables::Settlement(company),
                    )?;
                    debug!(company = %company, fare = settlement.amount(), "Settlement added");
                    total += settlement;
                }
                Ok(total)
            }
        }
    }

    /// Prices one pool of main and local mileage.
    ///
    /// Pure main-line travel uses a metro table when every section lay in a
    /// zone, otherwise the main-line formula. Local travel, alone or short
    /// enough in combination, uses the local table on real distance. Longer
    /// mixed travel uses the main-line formula on nominal distance.
    pub fn pool(
        &self,
        mileage: CompanyMileage,
        metro: Option<MetroZone>,
        tables: PoolTables,
    ) -> Result<Yen, FareError> {
        let dominant = self.reference.dominant_company();
        let real_km = mileage.real_total().whole_km();

        if mileage.local.is_zero() {
            let km = mileage.main.whole_km();
            return match (tables, metro) {
                (PoolTables::Standard, Some(zone)) => self.table(FareTable::Metro(zone), dominant, km),
                (PoolTables::Standard, None) => Ok(main_line_fare(km, self.config)),
                (PoolTables::Settlement(company), _) => {
                    self.table(FareTable::SettlementMain, company, km)
                }
            };
        }

        if mileage.main.is_zero() || real_km <= self.config.local_threshold_km {
            return match tables {
                PoolTables::Standard => self.table(FareTable::Local, dominant, real_km),
                PoolTables::Settlement(company) => {
                    self.table(FareTable::SettlementLocal, company, real_km)
                }
            };
        }

        let nominal_km = mileage.nominal_total().whole_km();
        match tables {
            PoolTables::Standard => Ok(main_line_fare(nominal_km, self.config)),
            PoolTables::Settlement(company) => {
                self.table(FareTable::SettlementMain, company, nominal_km)
            }
        }
    }

    /// Prices a dedicated company's own mileage on its tables.
    fn dedicated(&self, company: CompanyId, mileage: CompanyMileage) -> Result<Yen, FareError> {
        if mileage.local.is_zero() {
            return self.table(FareTable::PeripheralMain, company, mileage.main.whole_km());
        }
        if mileage.main.is_zero() {
            return self.table(FareTable::PeripheralLocal, company, mileage.local.whole_km());
        }

        let real_km = mileage.real_total().whole_km();
        let nominal_km = mileage.nominal_total().whole_km();
        match self.reference.fare_country_table(
            CountryTable::PeripheralCombination,
            company,
            real_km,
            nominal_km,
        ) {
            Some(fare) => Ok(fare),
            None => {
                debug!(company = %company, real_km, nominal_km, "No combination fare, using main table");
                self.table(FareTable::PeripheralMain, company, nominal_km)
            }
        }
    }

    fn table(&self, table: FareTable, company: CompanyId, km: u32) -> Result<Yen, FareError> {
        self.reference.fare_table(table, company, km).ok_or_else(|| {
            error!(%table, company = %company, km, "Fare table row missing");
            FareError::integrity(format!("no {table} row for {company} at {km} km"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::MemoryReference;
    use crate::reference::fixtures::network;

    fn quote(reference: &MemoryReference, text: &str) -> Result<FareQuote, FareError> {
        let config = TariffConfig::default();
        let engine = TariffEngine::new(reference, &config);
        let mut route = Route::parse(text, reference).unwrap();
        engine.calculate_fare(&mut route)
    }

    fn total(reference: &MemoryReference, text: &str) -> u32 {
        quote(reference, text).unwrap().total.amount()
    }

    #[test]
    fn invalid_route_is_reported() {
        let reference = network();
        assert_eq!(
            quote(&reference, "Tokyo,Tokaido,Kawasaki,Tokaido,Shinagawa,Yamanote,Shibuya"),
            Err(FareError::InvalidRoute)
        );
    }

    #[test]
    fn invalid_route_is_not_modified() {
        let reference = network();
        let config = TariffConfig::default();
        let engine = TariffEngine::new(&reference, &config);
        let mut route = Route::parse("Tokyo,Tokaido,Kawasaki,Tokaido,Shinagawa", &reference).unwrap();
        let before = route.clone();
        assert!(engine.calculate_fare(&mut route).is_err());
        assert_eq!(route, before);
    }

    #[test]
    fn route_is_left_canonical() {
        let reference = network();
        let config = TariffConfig::default();
        let engine = TariffEngine::new(&reference, &config);
        let mut route =
            Route::parse("Tokyo,Tokaido,Shinagawa,Tokaido,Yokohama,Tokaido,Nagoya", &reference)
                .unwrap();
        let quote = engine.calculate_fare(&mut route).unwrap();
        assert_eq!(route.segments().len(), 1);
        assert_eq!(quote.total, Yen(6090));
    }

    #[test]
    fn single_station_costs_nothing() {
        let reference = network();
        let quote = quote(&reference, "Tokyo").unwrap();
        assert_eq!(quote.total, Yen::ZERO);
        assert_eq!(quote.branch, TariffBranch::FlatOnly);
    }

    #[test]
    fn main_line_formula() {
        let reference = network();
        let q = quote(&reference, "Tokyo,Tokaido,Nagoya").unwrap();
        assert_eq!(q.branch, TariffBranch::PrimaryOnly);
        assert_eq!(q.mileage_total, Kilo::from_tenths(3660));
        assert_eq!(q.total, Yen(6090));

        // Starts in the capital zone but leaves it.
        assert_eq!(total(&reference, "Tokyo,Tokaido,Osaka"), 8510);
    }

    #[test]
    fn metro_tables() {
        let reference = network();
        // 28.8 km within the capital zone.
        assert_eq!(total(&reference, "Tokyo,Tokaido,Yokohama"), 450);
        // 17.4 km on the loop.
        assert_eq!(total(&reference, "Tokyo,Tokaido,Shinagawa,Yamanote,Shinjuku"), 260);
    }

    #[test]
    fn local_line_alone_uses_local_table() {
        let reference = network();
        assert_eq!(total(&reference, "Chigasaki,Sagami,Samukawa"), 180);
        assert_eq!(total(&reference, "Chigasaki,Sagami,Atsugi"), 240);
        // Exactly the threshold distance.
        assert_eq!(total(&reference, "Chigasaki,Sagami,Kurami"), 200);
    }

    #[test]
    fn short_mixed_travel_uses_local_table() {
        let reference = network();
        // 5.2 + 3.3 = 8.5 km real.
        assert_eq!(total(&reference, "Hiratsuka,Tokaido,Chigasaki,Sagami,Samukawa"), 200);
    }

    #[test]
    fn longer_mixed_travel_uses_nominal_distance() {
        let reference = network();
        // 10.8 km real is over the threshold; 7.5 + 3.6 = 11.1 km nominal.
        assert_eq!(total(&reference, "Fujisawa,Tokaido,Chigasaki,Sagami,Samukawa"), 230);
    }

    #[test]
    fn dedicated_company_tables() {
        let reference = network();
        let kyushu = reference.company_id("JR Kyushu").unwrap();

        let q = quote(&reference, "Kokura,Kagoshima,Hakata").unwrap();
        assert_eq!(q.branch, TariffBranch::SinglePeripheral(kyushu));
        assert_eq!(q.total, Yen(1260));

        assert_eq!(total(&reference, "Kashii,Kashii,Umi"), 270);
        assert_eq!(total(&reference, "Sapporo,Hakodate,Asahikawa"), 2520);
    }

    #[test]
    fn dedicated_combination_table() {
        let reference = network();
        // Real 22.3 km, nominal 23.7 km: an exact combination row.
        assert_eq!(total(&reference, "Hakata,Kagoshima,Kashii,Kashii,Umi"), 460);
    }

    #[test]
    fn dedicated_combination_falls_back_to_main_table() {
        let reference = network();
        // Real 70.3 km, nominal 71.4 km: no combination row, main table at 72 km.
        assert_eq!(total(&reference, "Kokura,Kagoshima,Kashii,Kashii,Saitozaki"), 1450);
    }

    #[test]
    fn pooled_company_uses_standard_formula() {
        let reference = network();
        let q = quote(&reference, "Takamatsu,Yosan,Matsuyama").unwrap();
        assert_eq!(q.branch, TariffBranch::PooledPeripheral);
        assert_eq!(q.total, Yen(3260));
    }

    #[test]
    fn mixed_companies_add_settlement() {
        let reference = network();
        let q = quote(&reference, "Okayama,Seto-Ohashi,Utazu").unwrap();
        assert_eq!(q.branch, TariffBranch::DominantOrMixed);
        assert_eq!(q.total, Yen(480 + 70));

        assert_eq!(
            total(&reference, "Okayama,Seto-Ohashi,Utazu,Yosan,Takamatsu"),
            480 + 160
        );
        assert_eq!(
            total(&reference, "Hiroshima,Sanyo,Moji,Kagoshima,Kokura"),
            3890 + 60
        );
    }

    #[test]
    fn special_fares_are_added() {
        let reference = network();
        let q = quote(&reference, "Hakata,Hakata-Minami,Hakata-Minami").unwrap();
        assert_eq!(q.branch, TariffBranch::FlatOnly);
        assert_eq!(q.group_fare, Yen(290));
        assert_eq!(q.total, Yen(290));

        let q = quote(&reference, "Kamigori,Chizu,Chizu").unwrap();
        assert_eq!(q.other_fare, Yen(1300));
        assert_eq!(q.distance_fare, Yen::ZERO);
        assert_eq!(q.total, Yen(1300));

        let q = quote(&reference, "Kokura,Kagoshima,Hakata,Hakata-Minami,Hakata-Minami").unwrap();
        assert_eq!(q.distance_fare, Yen(1260));
        assert_eq!(q.total, Yen(1260 + 290));
    }

    #[test]
    fn missing_table_row_is_integrity_fault() {
        let reference = network();
        // 423.1 km is beyond the last Hokkaido row.
        assert!(matches!(
            quote(&reference, "Hakodate,Hakodate,Asahikawa"),
            Err(FareError::ReferenceIntegrity(_))
        ));
    }

    #[test]
    fn classify_branches() {
        let reference = network();
        let config = TariffConfig::default();
        let engine = TariffEngine::new(&reference, &config);
        let branch = |text: &str| {
            let route = Route::parse(text, &reference).unwrap();
            let fare = route.accumulate_fare(&reference).unwrap();
            engine.classify(&fare.mileage).unwrap()
        };

        assert_eq!(branch("Tokyo"), TariffBranch::FlatOnly);
        assert_eq!(branch("Tokyo,Tokaido,Yokohama"), TariffBranch::PrimaryOnly);
        assert_eq!(branch("Takamatsu,Yosan,Utazu"), TariffBranch::PooledPeripheral);
        assert_eq!(branch("Okayama,Seto-Ohashi,Utazu"), TariffBranch::DominantOrMixed);
        assert!(matches!(
            branch("Moji,Kagoshima,Hakata"),
            TariffBranch::SinglePeripheral(_)
        ));
    }

    #[test]
    fn pool_thresholds() {
        let reference = network();
        let config = TariffConfig::default();
        let engine = TariffEngine::new(&reference, &config);
        let pool = |main: u32, local: u32, nominal: u32| {
            engine
                .pool(
                    CompanyMileage {
                        main: Kilo::from_tenths(main),
                        local: Kilo::from_tenths(local),
                        local_nominal: Kilo::from_tenths(nominal),
                    },
                    None,
                    PoolTables::Standard,
                )
                .unwrap()
        };

        // Combined 10.0 km real stays on the local table.
        assert_eq!(pool(50, 50, 60), Yen(200));
        // 10.1 km real moves to the formula on 11.1 km nominal.
        assert_eq!(pool(50, 51, 61), Yen(230));
        // Local only is billed on real distance.
        assert_eq!(pool(0, 333, 366), Yen(570));
    }

    #[test]
    fn settlement_pool_uses_company_tables() {
        let reference = network();
        let config = TariffConfig::default();
        let engine = TariffEngine::new(&reference, &config);
        let kyushu = reference.company_id("JR Kyushu").unwrap();
        let pool = |main: u32, local: u32, nominal: u32| {
            engine.pool(
                CompanyMileage {
                    main: Kilo::from_tenths(main),
                    local: Kilo::from_tenths(local),
                    local_nominal: Kilo::from_tenths(nominal),
                },
                Some(MetroZone::CapitalZone),
                PoolTables::Settlement(kyushu),
            )
        };

        // Metro zones never apply to settlement.
        assert_eq!(pool(118, 0, 0), Ok(Yen(60)));
        assert_eq!(pool(0, 144, 158), Ok(Yen(70)));
        assert_eq!(pool(200, 144, 158), Ok(Yen(140)));
    }
}
