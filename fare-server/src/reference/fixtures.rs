//! A small hand-built network shared by unit tests.
//!
//! Distances follow the published kilometre posts of the real lines closely
//! enough that main-line fares match the printed tariff.

use crate::domain::{
    CompanyTariff, CountryTable, FareAttribution, FareTable, Kilo, LineClass, MetroZone, Segment,
    SpecialFare, Yen,
};

use super::{MemoryReference, ReferenceData};

fn k(tenths: u32) -> Kilo {
    Kilo::from_tenths(tenths)
}

/// Builds a segment from names, panicking on unknown names.
pub(crate) fn seg(reference: &MemoryReference, begin: &str, line: &str, end: &str) -> Segment {
    Segment::new(
        reference.station_id(begin).expect(begin),
        reference.line_id(line).expect(line),
        reference.station_id(end).expect(end),
    )
}

pub(crate) fn network() -> MemoryReference {
    let mut b = MemoryReference::builder();
    let honshu = b.company("JR Honshu", CompanyTariff::Dominant).unwrap();
    let hokkaido = b.company("JR Hokkaido", CompanyTariff::Dedicated).unwrap();
    let kyushu = b.company("JR Kyushu", CompanyTariff::Dedicated).unwrap();
    let shikoku = b.company("JR Shikoku", CompanyTariff::Pooled).unwrap();
    let chizu = b.company("Chizu Express", CompanyTariff::Other).unwrap();

    b.line("Tokaido", LineClass::Main, honshu)
        .zone(Some(MetroZone::CapitalLoop))
        .stop("Tokyo", k(0))
        .stop("Shimbashi", k(19))
        .zone(Some(MetroZone::CapitalZone))
        .stop("Shinagawa", k(68))
        .stop("Kawasaki", k(182))
        .zone(None)
        .stop("Yokohama", k(288))
        .stop("Fujisawa", k(511))
        .stop("Chigasaki", k(586))
        .stop("Hiratsuka", k(638))
        .stop("Odawara", k(839))
        .stop("Atami", k(1046))
        .stop("Shizuoka", k(1802))
        .stop("Nagoya", k(3660))
        .zone(Some(MetroZone::KansaiZone))
        .stop("Kyoto", k(5136))
        .stop("Osaka", k(5564))
        .stop("Kobe", k(5895))
        .finish()
        .unwrap();

    b.line("Yamanote", LineClass::Main, honshu)
        .zone(Some(MetroZone::CapitalLoop))
        .stop("Shinagawa", k(0))
        .stop("Osaki", k(20))
        .stop("Shibuya", k(72))
        .stop("Shinjuku", k(106))
        .stop("Ikebukuro", k(154))
        .stop("Tabata", k(206))
        .finish()
        .unwrap();

    b.line("Tohoku", LineClass::Main, honshu)
        .zone(Some(MetroZone::CapitalLoop))
        .stop("Tokyo", k(0))
        .stop("Kanda", k(13))
        .stop("Ueno", k(36))
        .stop("Nippori", k(58))
        .zone(Some(MetroZone::CapitalZone))
        .stop("Tabata", k(71))
        .stop("Akabane", k(132))
        .zone(None)
        .stop("Omiya", k(303))
        .stop("Utsunomiya", k(1095))
        .stop("Sendai", k(3518))
        .stop("Morioka", k(5353))
        .finish()
        .unwrap();

    b.line("Sagami", LineClass::Local, honshu)
        .stop_nominal("Chigasaki", k(0), k(0))
        .stop_nominal("Samukawa", k(33), k(36))
        .stop_nominal("Kurami", k(100), k(110))
        .stop_nominal("Atsugi", k(142), k(156))
        .stop_nominal("Hashimoto", k(333), k(366))
        .finish()
        .unwrap();

    b.line("Sanyo", LineClass::Main, honshu)
        .zone(Some(MetroZone::KansaiZone))
        .stop("Kobe", k(0))
        .zone(None)
        .stop("Nishi-Akashi", k(228))
        .stop("Himeji", k(548))
        .stop("Kamigori", k(896))
        .stop("Okayama", k(1434))
        .stop("Hiroshima", k(3043))
        .operated_by(kyushu)
        .stop("Shimonoseki", k(5281))
        .stop("Moji", k(5344))
        .finish()
        .unwrap();

    b.line("Seto-Ohashi", LineClass::Main, honshu)
        .stop("Okayama", k(0))
        .operated_by(shikoku)
        .stop("Kojima", k(278))
        .stop("Utazu", k(460))
        .finish()
        .unwrap();

    b.line("Yosan", LineClass::Main, shikoku)
        .stop("Takamatsu", k(0))
        .stop("Utazu", k(213))
        .stop("Tadotsu", k(327))
        .stop("Imabari", k(1314))
        .stop("Matsuyama", k(1944))
        .finish()
        .unwrap();

    b.line("Kagoshima", LineClass::Main, kyushu)
        .stop("Moji", k(0))
        .stop("Kokura", k(55))
        .stop("Kashii", k(648))
        .stop("Hakata", k(727))
        .stop("Kumamoto", k(1912))
        .finish()
        .unwrap();

    b.line("Kashii", LineClass::Local, kyushu)
        .stop_nominal("Saitozaki", k(0), k(0))
        .stop_nominal("Kashii", k(110), k(121))
        .stop_nominal("Umi", k(254), k(279))
        .finish()
        .unwrap();

    b.line("Hakata-Minami", LineClass::Main, honshu)
        .stop("Hakata", k(0))
        .stop("Hakata-Minami", k(85))
        .finish()
        .unwrap();

    b.line("Chizu", LineClass::Main, chizu)
        .stop("Kamigori", k(0))
        .stop("Chizu", k(561))
        .finish()
        .unwrap();

    b.line("Hakodate", LineClass::Main, hokkaido)
        .stop("Hakodate", k(0))
        .stop("Oshamambe", k(1123))
        .stop("Otaru", k(2525))
        .stop("Sapporo", k(2863))
        .stop("Asahikawa", k(4231))
        .finish()
        .unwrap();

    b.special(
        "Hakata-Minami",
        "Hakata",
        "Hakata-Minami",
        SpecialFare {
            amount: Yen(290),
            attribution: FareAttribution::Group,
        },
    );
    b.special(
        "Chizu",
        "Kamigori",
        "Chizu",
        SpecialFare {
            amount: Yen(1300),
            attribution: FareAttribution::Other,
        },
    );

    let steps: &[(FareTable, _, &[(u32, u32)])] = &[
        (
            FareTable::Local,
            honshu,
            &[
                (3, 140),
                (6, 180),
                (10, 200),
                (15, 240),
                (20, 320),
                (25, 400),
                (30, 480),
                (35, 570),
                (40, 650),
                (45, 740),
                (50, 820),
                (60, 950),
                (70, 1110),
                (80, 1280),
                (90, 1450),
                (100, 1620),
            ],
        ),
        (
            FareTable::Metro(MetroZone::CapitalZone),
            honshu,
            &[
                (3, 130),
                (6, 150),
                (10, 160),
                (15, 210),
                (20, 290),
                (25, 380),
                (30, 450),
                (35, 540),
                (40, 620),
                (45, 710),
                (50, 800),
            ],
        ),
        (
            FareTable::Metro(MetroZone::CapitalLoop),
            honshu,
            &[
                (3, 130),
                (6, 150),
                (10, 160),
                (15, 190),
                (20, 260),
                (25, 320),
                (30, 390),
                (35, 450),
            ],
        ),
        (
            FareTable::Metro(MetroZone::KansaiZone),
            honshu,
            &[
                (3, 120),
                (6, 160),
                (10, 170),
                (15, 210),
                (20, 290),
                (25, 380),
                (30, 450),
                (35, 540),
                (40, 620),
                (45, 710),
                (50, 800),
                (60, 950),
                (70, 1110),
            ],
        ),
        (
            FareTable::Metro(MetroZone::KansaiLoop),
            honshu,
            &[(3, 120), (6, 160), (10, 170), (15, 200), (20, 260)],
        ),
        (
            FareTable::PeripheralMain,
            kyushu,
            &[
                (3, 160),
                (6, 200),
                (10, 210),
                (15, 270),
                (20, 360),
                (25, 460),
                (30, 550),
                (35, 650),
                (40, 740),
                (45, 830),
                (50, 930),
                (60, 1080),
                (70, 1260),
                (80, 1450),
                (90, 1640),
                (100, 1820),
                (120, 2100),
                (140, 2420),
                (160, 2730),
                (180, 3040),
                (200, 3360),
            ],
        ),
        (
            FareTable::PeripheralLocal,
            kyushu,
            &[
                (3, 160),
                (6, 200),
                (10, 230),
                (15, 270),
                (20, 360),
                (25, 460),
                (30, 550),
            ],
        ),
        (
            FareTable::PeripheralMain,
            hokkaido,
            &[
                (3, 170),
                (6, 210),
                (10, 220),
                (15, 290),
                (20, 380),
                (25, 480),
                (30, 570),
                (40, 760),
                (50, 960),
                (60, 1130),
                (80, 1500),
                (100, 1890),
                (120, 2210),
                (140, 2520),
                (160, 2940),
                (180, 3260),
                (200, 3570),
                (220, 3890),
                (240, 4310),
                (260, 4620),
                (280, 4940),
                (300, 5250),
            ],
        ),
        (
            FareTable::SettlementMain,
            shikoku,
            &[
                (3, 20),
                (6, 30),
                (10, 40),
                (20, 70),
                (30, 100),
                (50, 160),
                (100, 300),
                (200, 500),
                (600, 700),
            ],
        ),
        (
            FareTable::SettlementMain,
            kyushu,
            &[
                (3, 20),
                (6, 30),
                (10, 40),
                (20, 60),
                (30, 90),
                (50, 140),
                (100, 280),
                (200, 460),
                (600, 650),
            ],
        ),
        (
            FareTable::SettlementLocal,
            kyushu,
            &[(3, 20), (6, 30), (10, 40), (20, 70), (30, 100)],
        ),
        (
            FareTable::SettlementMain,
            hokkaido,
            &[
                (3, 30),
                (6, 40),
                (10, 50),
                (20, 80),
                (50, 170),
                (100, 320),
                (200, 540),
                (600, 760),
            ],
        ),
    ];
    for (table, company, rows) in steps {
        for &(max_km, fare) in *rows {
            b.fare(*table, *company, max_km, Yen(fare));
        }
    }

    b.country_fare(CountryTable::PeripheralCombination, kyushu, 23, 24, Yen(460));
    b.country_fare(CountryTable::PeripheralCombination, kyushu, 12, 13, Yen(270));

    b.build().unwrap()
}
