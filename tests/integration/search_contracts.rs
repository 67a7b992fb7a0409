use pathindex::{CaseMode, IndexOptions, NO_MATCHES};

use crate::integration::support::fixture_index;

fn sensitive() -> pathindex::PathIndex {
    fixture_index(IndexOptions::default())
}

fn insensitive() -> pathindex::PathIndex {
    fixture_index(IndexOptions::default().with_case_mode(CaseMode::AsciiInsensitive))
}

#[test]
fn absent_or_blank_fragment_returns_sentinel() {
    let index = sensitive();
    assert_eq!(index.query(None).unwrap(), vec![NO_MATCHES]);
    assert_eq!(index.query(Some("")).unwrap(), vec![NO_MATCHES]);
    assert_eq!(index.query(Some("   ")).unwrap(), vec![NO_MATCHES]);
}

#[test]
fn unknown_fragment_returns_sentinel() {
    let index = sensitive();
    assert_eq!(index.find("YouTube").unwrap(), vec![NO_MATCHES]);
}

#[test]
fn images_directory_reported_after_its_files() {
    let expected = vec![
        "C:\\Documents\\Images\\Image1.jpg",
        "C:\\Documents\\Images\\Image2.jpg",
        "C:\\Documents\\Images\\Image3.png",
        "C:\\Documents\\Images",
    ];
    assert_eq!(sensitive().find("Image").unwrap(), expected);
    assert_eq!(insensitive().find("image").unwrap(), expected);
}

#[test]
fn default_matching_is_case_sensitive() {
    let index = sensitive();
    assert_eq!(index.find("IMAGE").unwrap(), vec![NO_MATCHES]);
    assert_eq!(index.find("image").unwrap(), vec![NO_MATCHES]);
}

#[test]
fn embedded_tab_is_part_of_the_name() {
    assert_eq!(
        insensitive().find("skype").unwrap(),
        vec![
            "C:\\Program\tFiles\\Skype\\Skype.exe",
            "C:\\Program\tFiles\\Skype",
        ]
    );
    assert_eq!(
        sensitive().find("Program\tF").unwrap(),
        vec!["C:\\Program\tFiles"]
    );
    assert_eq!(sensitive().find("Program F").unwrap(), vec![NO_MATCHES]);
}

#[test]
fn interior_match_without_matched_descendants_is_reported_alone() {
    assert_eq!(
        sensitive().find("Works").unwrap(),
        vec!["C:\\Documents\\Works"]
    );
}

#[test]
fn nested_interior_match_is_reported_once() {
    assert_eq!(
        sensitive().find("A").unwrap(),
        vec![
            "C:\\Documents\\Works\\Accountant\\Accounting.xls",
            "C:\\Documents\\Works\\Accountant\\AnnualReport.xls",
            "C:\\Documents\\Works\\Accountant",
        ]
    );
}

#[test]
fn root_and_top_level_matches() {
    let index = sensitive();
    assert_eq!(index.find("C:").unwrap(), vec!["C:"]);
    assert_eq!(index.find("Temp").unwrap(), vec!["C:\\Temp"]);
}

#[test]
fn matches_across_branches_keep_listing_order() {
    assert_eq!(
        insensitive().find("m").unwrap(),
        vec![
            "C:\\Documents\\Mysql-backup.sql",
            "C:\\Program\tFiles\\Mysql\\Mysql.exe",
            "C:\\Program\tFiles\\Mysql\\Mysql.com",
            "C:\\Program\tFiles\\Mysql",
        ]
    );
}
