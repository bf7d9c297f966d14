//! Files written in each supported encoding decode back to the same text.

use assert_fs::prelude::*;
use sector_sort::SectorEncoding;
use sector_sort::encoding::{DEFAULT_CANDIDATES, read_text, write_text};

#[test]
fn each_encoding_round_trips_through_detection() {
    // Samples chosen so that the listed encoding is the one detection settles on.
    let cases: &[(SectorEncoding, &str)] = &[
        (SectorEncoding::Gbk, "[INFO]\n华北 ZBPE\n[AIRPORT]\n"),
        (SectorEncoding::Gb18030, "[INFO]\nsector \u{1F6EB}\n[AIRPORT]\n"),
        (SectorEncoding::Utf8, "[INFO]\n中\n[AIRPORT]\n"),
        (SectorEncoding::Latin1, "[INFO]\nZ\u{00FC}rich \u{00E9}\n[AIRPORT]\n"),
    ];

    let dir = assert_fs::TempDir::new().unwrap();
    for (i, (enc, text)) in cases.iter().enumerate() {
        let f = dir.child(format!("case{i}.sct"));
        write_text(f.path(), text, *enc).unwrap();
        let read = read_text(f.path(), &DEFAULT_CANDIDATES).unwrap();
        assert_eq!(read.text, *text, "text mismatch for {enc}");
        assert_eq!(read.encoding, *enc, "detected encoding for {enc}");
    }
}

#[test]
fn write_back_preserves_untouched_bytes() {
    let dir = assert_fs::TempDir::new().unwrap();
    let f = dir.child("ZGZU.sct");
    let bytes = SectorEncoding::Gbk.encode("; 广州\n[INFO]\nx\n[AIRPORT]\n").unwrap();
    f.write_binary(&bytes).unwrap();

    let read = read_text(f.path(), &DEFAULT_CANDIDATES).unwrap();
    write_text(f.path(), &read.text, read.encoding).unwrap();
    assert_eq!(std::fs::read(f.path()).unwrap(), bytes);
}

#[test]
fn unencodable_text_leaves_file_alone() {
    let dir = assert_fs::TempDir::new().unwrap();
    let f = dir.child("ZWUQ.sct");
    f.write_str("original").unwrap();
    assert!(write_text(f.path(), "乌鲁木齐", SectorEncoding::Latin1).is_err());
    f.assert("original");
}
