use flate2::write::GzEncoder;
use flate2::Compression;
use pretty_assertions::assert_eq;
use std::io::{self, Cursor, Read, Write};
use swf_workload::reader::{Codec, TraceRecord, TraceStreamReader};
use swf_workload::utils::WorkloadError;
use zip::write::FileOptions;

const TRACE: &str = "; Version: 2.2\n\
                     1 0 0 10 2 -1 -1 2 -1 -1 1 1 1 -1 1 -1 -1 -1\n\
                     \n\
                     2 5 0 20 4 -1 -1 4 -1 -1 1 1 1 -1 1 -1 -1 -1\n";

fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

fn zip_single(name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file(name, FileOptions::default()).unwrap();
    writer.write_all(bytes).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Delivers a single byte per read call
struct OneByteReader(Cursor<Vec<u8>>);

impl Read for OneByteReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(1);
        self.0.read(&mut buf[..len])
    }
}

fn read_all(bytes: Vec<u8>, name: &str) -> Vec<TraceRecord> {
    TraceStreamReader::open(Cursor::new(bytes), name)
        .unwrap()
        .map(Result::unwrap)
        .collect()
}

#[test]
fn test_raw_gzip_and_zip_yield_same_records() {
    let raw = read_all(TRACE.as_bytes().to_vec(), "trace.swf");
    let gz = read_all(gzip(TRACE.as_bytes()), "trace.swf.gz");
    let zipped = read_all(zip_single("trace.swf", TRACE.as_bytes()), "trace.zip");

    assert_eq!(raw.len(), 2);
    assert_eq!(raw, gz);
    assert_eq!(raw, zipped);
}

#[test]
fn test_unhinted_names_are_sniffed() {
    let reader = TraceStreamReader::open(Cursor::new(gzip(TRACE.as_bytes())), "trace.swf").unwrap();
    assert_eq!(reader.codec(), Codec::Gzip);
    assert_eq!(reader.count(), 2);

    let reader = TraceStreamReader::open(
        Cursor::new(zip_single("inner.swf", TRACE.as_bytes())),
        "download",
    )
    .unwrap();
    assert_eq!(reader.codec(), Codec::Zip);
    assert_eq!(reader.count(), 2);
}

#[test]
fn test_one_byte_reads_still_detect_containers() {
    let expected = read_all(TRACE.as_bytes().to_vec(), "trace.swf");

    let cases = [
        (gzip(TRACE.as_bytes()), "trace.swf.gz", Codec::Gzip),
        (gzip(TRACE.as_bytes()), "trace.swf", Codec::Gzip),
        (zip_single("trace.swf", TRACE.as_bytes()), "trace.zip", Codec::Zip),
        (zip_single("trace.swf", TRACE.as_bytes()), "trace.swf", Codec::Zip),
        (TRACE.as_bytes().to_vec(), "trace.swf", Codec::Raw),
    ];

    for (bytes, name, codec) in cases {
        let reader = TraceStreamReader::open(OneByteReader(Cursor::new(bytes)), name).unwrap();
        assert_eq!(reader.codec(), codec);

        let records: Vec<TraceRecord> = reader.map(Result::unwrap).collect();
        assert_eq!(records, expected);
    }
}

#[test]
fn test_gzip_hint_on_plain_text_is_malformed() {
    let result = TraceStreamReader::open(Cursor::new(TRACE.as_bytes().to_vec()), "trace.swf.gz");
    assert!(matches!(result, Err(WorkloadError::MalformedArchive { .. })));
}

#[test]
fn test_corrupt_gzip_header_fails_while_reading() {
    let mut bytes = gzip(TRACE.as_bytes());
    bytes[2] = 0x00; // compression method must be deflate (8)

    let mut reader = TraceStreamReader::open(Cursor::new(bytes), "trace.gz").unwrap();
    let first = reader.next().unwrap();

    assert!(matches!(first, Err(WorkloadError::MalformedArchive { .. })));
    assert!(reader.next().is_none());
}

#[test]
fn test_empty_zip_is_malformed() {
    let bytes = zip::ZipWriter::new(Cursor::new(Vec::new()))
        .finish()
        .unwrap()
        .into_inner();

    let result = TraceStreamReader::open(Cursor::new(bytes), "trace.zip");
    assert!(matches!(result, Err(WorkloadError::MalformedArchive { .. })));
}

#[test]
fn test_zip_with_only_directories_is_malformed() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.add_directory("traces/", FileOptions::default()).unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let result = TraceStreamReader::open(Cursor::new(bytes), "trace.zip");
    assert!(matches!(result, Err(WorkloadError::MalformedArchive { .. })));
}

#[test]
fn test_zip_reads_first_file_entry() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.add_directory("traces/", FileOptions::default()).unwrap();
    writer.start_file("traces/a.swf", FileOptions::default()).unwrap();
    writer.write_all(b"1 2 3\n").unwrap();
    writer.start_file("traces/b.swf", FileOptions::default()).unwrap();
    writer.write_all(b"4 5 6\n").unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let records = read_all(bytes, "bundle.zip");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields(), &["1", "2", "3"]);
}

#[test]
fn test_open_path_reads_fixture() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/sample.swf");
    let mut reader = TraceStreamReader::open_path(path).unwrap();

    let records: Vec<TraceRecord> = reader.by_ref().map(Result::unwrap).collect();

    assert_eq!(records.len(), 7);
    assert_eq!(records[0].line_number(), 11);
    assert_eq!(records[0].len(), 18);
    assert_eq!(records[6].len(), 4);
    assert_eq!(reader.lines_read(), 17);
}
