use std::collections::HashSet;
use std::fs::File;
use std::sync::Mutex;

use chrono::{NaiveDate, TimeDelta};
use csvhandler::{Error, Formatter, Reader, Value, WriteRecord, Writer};
use csvhandler_row::{row_from_strs, CsvOptions, CsvRowReader, CsvRowWriter, MemoryRows};

fn holly() -> WriteRecord {
    let mut record = WriteRecord::new();
    record.set("first_name", "Holly").set("age", 27);
    record
}

#[test]
fn test_round_trip_through_csv() {
    let options = CsvOptions::default();
    let rows = CsvRowWriter::new(Vec::new(), &options).unwrap();
    let writer = Writer::new(rows, ["first_name", "age"]).unwrap();
    writer.write(&holly()).unwrap();

    let bytes = writer.into_inner().unwrap().into_inner().unwrap();
    assert_eq!(String::from_utf8(bytes.clone()).unwrap(), "Holly,27\n");

    let rows = CsvRowReader::new(bytes.as_slice(), &options).unwrap();
    let reader = Reader::with_header(rows, ["first_name", "age"]).unwrap();
    let record = reader.read().unwrap().unwrap();
    assert_eq!(record.get("first_name").unwrap(), "Holly");
    assert_eq!(record.get_int("age").unwrap(), 27);
    assert!(reader.read().unwrap().is_none());
}

#[test]
fn test_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.csv");
    let options = CsvOptions::default().with_delimiter(';');

    let registered = NaiveDate::from_ymd_opt(2018, 11, 5)
        .unwrap()
        .and_hms_opt(12, 55, 10)
        .unwrap();
    let rows = CsvRowWriter::new(File::create(&path).unwrap(), &options).unwrap();
    let writer = Writer::new(rows, ["name", "registered", "mean_connection"]).unwrap();
    writer.write_header().unwrap();
    let mut record = WriteRecord::new();
    record
        .set("name", "Smith; Jr.")
        .set_formatted(
            "registered",
            registered,
            vec![Formatter::time("%Y-%m-%d %H:%M:%S")],
        )
        .set("mean_connection", TimeDelta::minutes(12) + TimeDelta::seconds(10));
    writer.write(&record).unwrap();
    drop(writer);

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "name;registered;mean_connection\n\"Smith; Jr.\";2018-11-05 12:55:10;12m10s\n"
    );

    let rows = CsvRowReader::new(File::open(&path).unwrap(), &options).unwrap();
    let reader = Reader::new(rows).unwrap();
    let records = reader.read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("name").unwrap(), "Smith; Jr.");
    assert_eq!(
        records[0]
            .get_time("%Y-%m-%d %H:%M:%S", "registered")
            .unwrap(),
        registered.and_utc()
    );
    assert_eq!(
        records[0].get_duration("mean_connection").unwrap(),
        TimeDelta::seconds(730)
    );
}

#[test]
fn test_default_precedence() {
    let mut writer = Writer::new(MemoryRows::new(), ["first_name", "age"]).unwrap();
    writer.set_default("age", 18);

    let mut without_age = WriteRecord::new();
    without_age.set("first_name", "John");
    let mut with_age = WriteRecord::new();
    with_age.set("first_name", "John").set("age", 30);
    writer.write_all([&without_age, &with_age]).unwrap();

    let written = writer.into_inner().unwrap().into_written();
    assert_eq!(
        written,
        vec![row_from_strs(&["John", "18"]), row_from_strs(&["John", "30"])]
    );
}

#[test]
fn test_empty_stream() {
    let rows = CsvRowReader::new("".as_bytes(), &CsvOptions::default()).unwrap();
    let reader = Reader::with_header(rows, ["first_name"]).unwrap();
    assert!(reader.read_all().unwrap().is_empty());

    let rows = CsvRowReader::new("".as_bytes(), &CsvOptions::default()).unwrap();
    assert!(matches!(Reader::new(rows), Err(Error::MissingHeader)));
}

#[test]
fn test_concurrent_reads_hand_out_each_row_once() {
    let mut rows = vec![row_from_strs(&["id"])];
    rows.extend((0..200).map(|i| vec![i.to_string()]));
    let reader = Reader::new(MemoryRows::from_rows(rows)).unwrap();
    let seen = Mutex::new(Vec::new());

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                while let Some(record) = reader.read().unwrap() {
                    let id = record.get_i64("id").unwrap();
                    seen.lock().unwrap().push(id);
                }
            });
        }
    });

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 200);
    let unique: HashSet<i64> = seen.into_iter().collect();
    assert_eq!(unique.len(), 200);
}

#[test]
fn test_concurrent_writes_keep_rows_whole() {
    let writer = Writer::new(MemoryRows::new(), ["thread", "seq"]).unwrap();

    std::thread::scope(|s| {
        for t in 0..4 {
            let writer = &writer;
            s.spawn(move || {
                for seq in 0..50 {
                    let mut record = WriteRecord::new();
                    record
                        .set("thread", Value::from(t))
                        .set("seq", Value::from(seq));
                    writer.write(&record).unwrap();
                }
            });
        }
    });

    let rows = writer.into_inner().unwrap();
    assert_eq!(rows.written().len(), 200);
    assert_eq!(rows.flush_count(), 200);
    for t in 0..4 {
        let seqs: Vec<String> = rows
            .written()
            .iter()
            .filter(|row| row[0] == t.to_string())
            .map(|row| row[1].clone())
            .collect();
        // Rows from one thread keep their relative order.
        let expected: Vec<String> = (0..50).map(|i: i32| i.to_string()).collect();
        assert_eq!(seqs, expected);
    }
}
