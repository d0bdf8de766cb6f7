use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use cuesheet::{
    cue,
    sheet::{Config, CueSheet, Field, NormalizedRow},
    source::{self, SheetReader},
};
use rust_decimal::Decimal;
use std::{fs::File, str::FromStr};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn km(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn config() -> Config {
    Config::new(at(2024, 1, 1, 0, 0))
}

fn load_fixture() -> CueSheet {
    let path = format!("{}/tests/fixtures/brm200.csv", env!("CARGO_MANIFEST_DIR"));
    let file = File::open(path).unwrap();
    CueSheet::read(&SheetReader::default(), file, &config()).unwrap()
}

#[test]
fn load_from_csv_test() {
    let sheet = load_fixture();
    assert_eq!(sheet.title(), Some("AJたまがわ 2024BRM518 多摩川200km"));
    assert_eq!(sheet.len(), 7);
    let numbers: Vec<u32> = sheet.cues().map(|cue| cue.no().unwrap()).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    for (i, cue) in sheet.cues().enumerate() {
        assert_eq!(cue.index(), i);
        assert_eq!(cue.is_start(), i == 0);
    }
}

#[test]
fn cells_are_normalized() {
    let sheet = load_fixture();
    let pc = sheet.cue(3).unwrap();
    assert_eq!(pc.point_src(), Some("PC1 セブンイレブン"));
    assert!(pc.is_checkpoint());
    assert_eq!(
        sheet.cue(0).unwrap().other(),
        Some("受付 2024/5/18 05:30 スタート 06:00")
    );
}

#[test]
fn goal_distance_is_last_total() {
    let sheet = load_fixture();
    let last = sheet.cue(sheet.len() - 1).unwrap();
    assert_eq!(sheet.goal_distance().unwrap(), last.total_distance_to_here().unwrap());
    assert_eq!(sheet.goal_distance().unwrap(), km("200.0"));
}

#[test]
fn distances_are_exact() {
    let sheet = load_fixture();
    let sum: Decimal = sheet
        .cues()
        .take(4)
        .map(|cue| cue.block_distance_to_here().unwrap())
        .sum();
    assert_eq!(sum, km("50.00"));
    assert_eq!(sheet.cue(2).unwrap().total_distance_to_here().unwrap(), km("8.25"));
}

#[test]
fn blank_distances_carry_forward() {
    let sheet = load_fixture();
    let prev = sheet.cue(3).unwrap();
    let cue = sheet.cue(4).unwrap();
    assert_eq!(cue.block_distance_to_here_src(), None);
    assert_eq!(cue.block_distance_to_here(), prev.block_distance_to_here());
    assert_eq!(cue.total_distance_to_here(), prev.total_distance_to_here());
}

#[test]
fn total_distance_never_goes_back() {
    let sheet = load_fixture();
    let totals: Vec<Decimal> = sheet
        .cues()
        .map(|cue| cue.total_distance_to_here().unwrap())
        .collect();
    assert!(totals.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn first_cue_without_distance_is_zero() {
    let rows = vec![NormalizedRow::default().with(Field::No, "1")];
    let sheet = CueSheet::new(rows, None, &config());
    let start = sheet.cue(0).unwrap();
    assert_eq!(start.block_distance_to_here().unwrap(), Decimal::ZERO);
    assert_eq!(start.total_distance_to_here().unwrap(), Decimal::ZERO);
}

#[test]
fn malformed_distance_fails_on_access() {
    let rows = vec![
        NormalizedRow::default()
            .with(Field::No, "1")
            .with(Field::TotalDistance, "0"),
        NormalizedRow::default()
            .with(Field::No, "2")
            .with(Field::TotalDistance, "12,5km"),
        NormalizedRow::default().with(Field::No, "3"),
        NormalizedRow::default()
            .with(Field::No, "x")
            .with(Field::TotalDistance, "30"),
    ];
    let sheet = CueSheet::new(rows, None, &config());
    assert!(sheet.cue(0).unwrap().total_distance_to_here().is_ok());
    assert_eq!(
        sheet.cue(1).unwrap().total_distance_to_here(),
        Err(cue::Error::MalformedNumber {
            field: Field::TotalDistance,
            value: "12,5km".into()
        })
    );
    assert!(sheet.cue(2).unwrap().total_distance_to_here().is_err());
    assert_eq!(sheet.goal_distance().unwrap(), km("30"));
    assert!(matches!(
        sheet.cue(3).unwrap().no(),
        Err(cue::Error::MalformedNumber {
            field: Field::No,
            ..
        })
    ));
}

#[test]
fn derived_instructions() {
    let sheet = load_fixture();
    let start = sheet.cue(0).unwrap();
    assert_eq!(start.route().unwrap(), None);
    assert_eq!(start.maneuver(), "スタート  R20に");

    let second = sheet.cue(1).unwrap();
    assert_eq!(second.direction(), "↰");
    assert_eq!(second.maneuver(), "🚥[高幡橋] ↰ K41に");
    assert_eq!(second.route().unwrap().as_deref(), Some("3.2km先(R20〜) :1.6%"));

    let third = sheet.cue(2).unwrap();
    assert_eq!(third.direction(), "↱");
    assert_eq!(
        third.route().unwrap().as_deref(),
        Some("5.05km先(K41〜K20〜) :4.1%")
    );

    let straight = sheet.cue(4).unwrap();
    assert_eq!(straight.direction(), "直進");
    assert_eq!(straight.maneuver(), "コンビニ前 直進");
    assert_eq!(straight.route().unwrap(), None);

    let after = sheet.cue(5).unwrap();
    assert_eq!(after.route().unwrap().as_deref(), Some("30.0km先() :40.0%"));
}

#[test]
fn neighbours_by_position() {
    let sheet = load_fixture();
    let start = sheet.cue(0).unwrap();
    assert!(start.prev().is_none());
    assert_eq!(start.next().unwrap().index(), 1);
    let goal = sheet.cue(6).unwrap();
    assert!(goal.next().is_none());
    assert_eq!(goal.prev().unwrap().no().unwrap(), 6);
}

#[test]
fn sheet_times() {
    let sheet = load_fixture();
    assert_eq!(sheet.start_time().unwrap(), at(2024, 5, 18, 5, 30));
    assert_eq!(sheet.end_time().unwrap(), at(2024, 5, 18, 19, 30));
    assert_eq!(sheet.time_duration().unwrap(), TimeDelta::hours(14));
    assert_eq!(
        sheet.cue(3).unwrap().times().unwrap(),
        &[at(2024, 5, 18, 7, 20), at(2024, 5, 18, 9, 20)]
    );
}

#[test]
fn progress_and_estimate() {
    let sheet = load_fixture();
    let pc = sheet.cue(3).unwrap();
    assert_eq!(pc.progress_exact().unwrap(), km("0.25"));
    assert_eq!(pc.progress().unwrap(), 0.25);
    assert_eq!(pc.percent().unwrap(), "25.0%");
    assert_eq!(pc.estimate_time().unwrap(), at(2024, 5, 18, 9, 0));

    let start = sheet.cue(0).unwrap();
    assert_eq!(start.estimate_time().unwrap(), sheet.start_time().unwrap());
    let goal = sheet.cue(6).unwrap();
    assert_eq!(goal.percent().unwrap(), "100.0%");
    assert_eq!(goal.estimate_time().unwrap(), sheet.end_time().unwrap());
}

#[test]
fn zero_goal_has_no_progress() {
    let rows = vec![
        NormalizedRow::default().with(Field::No, "1"),
        NormalizedRow::default().with(Field::No, "2"),
    ];
    let sheet = CueSheet::new(rows, None, &config());
    assert_eq!(
        sheet.cue(1).unwrap().progress(),
        Err(cue::Error::UndefinedProgress)
    );
}

#[test]
fn no_times_anywhere_has_no_duration() {
    let rows = vec![
        NormalizedRow::default()
            .with(Field::No, "1")
            .with(Field::TotalDistance, "0"),
        NormalizedRow::default()
            .with(Field::No, "2")
            .with(Field::TotalDistance, "10"),
    ];
    let sheet = CueSheet::new(rows, None, &config());
    assert_eq!(sheet.time_duration(), Err(cue::Error::UndefinedDuration));
    assert_eq!(
        sheet.cue(1).unwrap().estimate_time(),
        Err(cue::Error::UndefinedDuration)
    );
}

#[test]
fn empty_sheet() {
    let sheet = CueSheet::new(Vec::new(), None, &config());
    assert!(sheet.is_empty());
    assert_eq!(sheet.goal_distance().unwrap(), Decimal::ZERO);
    assert_eq!(sheet.start_time(), Err(cue::Error::UndefinedDuration));
    assert_eq!(sheet.to_string(), "");
}

#[test]
fn renders_as_text() {
    let sheet = load_fixture();
    let text = sheet.to_string();
    assert!(text.starts_with("AJたまがわ 2024BRM518 多摩川200km\n\n1: スタート  R20に\n(受付"));
    assert!(text.contains("\n\n3.2km先(R20〜) :1.6%\n2: 🚥[高幡橋] ↰ K41に\n"));
    assert!(text.ends_with("7: ゴール \n(2024/5/18 19:00 CLOSE 5/18 19:30)\n"));
}

#[test]
fn reads_tab_separated_sheets() {
    let tsv = "No\t通過点\t進路\tルート\t区間\t積算\t情報\n1\tスタート\t\tR1\t0\t0\t6:00\n2\tゴール\t\t\t5.5\t5.5\t6:20\n";
    let reader = SheetReader::new(source::Config::tsv());
    let sheet = CueSheet::read(&reader, tsv.as_bytes(), &config()).unwrap();
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.goal_distance().unwrap(), km("5.5"));
    assert_eq!(sheet.time_duration().unwrap(), TimeDelta::minutes(20));
}

fn timed_row(no: &str, total: &str, other: &str) -> NormalizedRow {
    NormalizedRow::default()
        .with(Field::No, no)
        .with(Field::TotalDistance, total)
        .with(Field::Other, other)
}

#[test]
fn estimate_past_the_calendar_is_undefined() {
    let rows = vec![
        timed_row("1", "0", "5/18 06:00"),
        timed_row("2", "2000000000000", ""),
        timed_row("3", "200", "5/18 20:00"),
    ];
    let sheet = CueSheet::new(rows, None, &config());
    assert_eq!(
        sheet.cue(1).unwrap().estimate_time(),
        Err(cue::Error::UndefinedDuration)
    );
    assert_eq!(
        sheet.cue(2).unwrap().estimate_time().unwrap(),
        at(2024, 5, 18, 20, 0)
    );
}

#[test]
fn percent_too_large_for_a_decimal_is_undefined() {
    let rows = vec![
        timed_row("1", "0", "5/18 06:00"),
        timed_row("2", "1000000000000000000000000000", ""),
        timed_row("3", "1", "5/18 20:00"),
    ];
    let sheet = CueSheet::new(rows, None, &config());
    assert_eq!(
        sheet.cue(1).unwrap().percent(),
        Err(cue::Error::UndefinedProgress)
    );
    assert!(sheet.cue(1).unwrap().estimate_time().is_err());
    assert_eq!(sheet.cue(2).unwrap().percent().unwrap(), "100.0%");
}

#[test]
fn renders_parsed_sequence_numbers() {
    let rows = vec![
        NormalizedRow::default()
            .with(Field::No, "01")
            .with(Field::Point, "スタート"),
        NormalizedRow::default()
            .with(Field::No, "2a")
            .with(Field::Point, "ゴール"),
    ];
    let sheet = CueSheet::new(rows, None, &config());
    assert_eq!(sheet.cue(0).unwrap().no_text(), "1");
    assert_eq!(sheet.cue(1).unwrap().no_text(), "2a");
    assert_eq!(sheet.to_string(), "1: スタート \n\n2a: ゴール \n");
}
