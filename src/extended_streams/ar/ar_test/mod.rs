use alloc::{string::String, vec::Vec};

use crate::{
  extended_streams::ar::{
    ArHeader, ArReader, ArReaderError, ArReaderOptions, ArViolationHandler, ArWriter,
    AuditArViolationHandler, CorruptFieldContext, StrictArViolationHandler, TimeStamp,
  },
  ArHeaderDecodeError, Copy as _, Read,
};

struct SimpleMember {
  name: &'static str,
  data: &'static [u8],
}

impl SimpleMember {
  fn assert_exists_and_data_matches(&self, members: &[(ArHeader, Vec<u8>)]) {
    let member = members.iter().find(|(header, _)| header.name == self.name);
    assert!(member.is_some(), "Member {} not found in archive", self.name);
    let (header, data) = member.unwrap();
    assert_eq!(
      header.size,
      self.data.len() as u64,
      "Size of member {} does not match",
      self.name
    );
    assert_eq!(
      data, self.data,
      "Data for member {} does not match expected data",
      self.name
    );
  }
}

macro_rules! create_simple_member {
  ($name:expr) => {
    SimpleMember {
      name: $name,
      data: include_bytes!(concat!("test-archive/", $name)),
    }
  };
}

const SIMPLE_MEMBERS: &[SimpleMember] = &[
  create_simple_member!("hello.txt"),
  create_simple_member!("odd.txt"),
  create_simple_member!("dir.o"),
  create_simple_member!("stray.txt"),
];

const TEST_ARCHIVE: &[u8] = include_bytes!("test-archive.a");

fn read_members<R: Read, VH: ArViolationHandler>(
  reader: &mut ArReader<R, VH>,
) -> Result<Vec<(ArHeader, Vec<u8>)>, ArReaderError<R::ReadError>> {
  let mut members = Vec::new();
  let mut transfer_buffer = [0u8; 7];
  while let Some(header) = reader.next_member()? {
    let mut data: Vec<u8> = Vec::new();
    reader
      .copy(&mut data, &mut transfer_buffer, false)
      .map_err(|e| match e {
        crate::CopyError::IoRead(e) => e,
        crate::CopyError::IoWrite(e) => panic!("Vec write failed: {e:?}"),
      })?;
    members.push((header, data));
  }
  Ok(members)
}

fn assert_simple_members(members: &[(ArHeader, Vec<u8>)]) {
  let names: Vec<&str> = members.iter().map(|(header, _)| header.name.as_str()).collect();
  assert_eq!(names, ["hello.txt", "odd.txt", "dir.o", "stray.txt"]);
  for member in SIMPLE_MEMBERS {
    member.assert_exists_and_data_matches(members);
  }
}

#[test]
fn test_parse_archive() {
  let mut reader = ArReader::new(TEST_ARCHIVE).unwrap();
  let members = read_members(&mut reader).unwrap();
  assert_simple_members(&members);

  let (hello, _) = &members[0];
  assert_eq!(hello.mtime, TimeStamp::from_seconds(1_700_000_000));
  assert_eq!(hello.uid, 1000);
  assert_eq!(hello.gid, 0);
  assert_eq!(hello.mode, 0o100_644);
  assert!(hello.permissions().owner.write);
  assert!(!hello.permissions().other.write);

  let (dir, _) = &members[2];
  assert_eq!(dir.mode, 0o755);
  assert_eq!(dir.mtime.seconds_since_epoch, 0);

  let (stray, _) = &members[3];
  assert_eq!(stray.uid, 0);
  assert_eq!(stray.mode, 0o600);

  assert!(reader.into_inner().is_empty());
}

#[test]
fn test_parse_archive_skipping_content() {
  let mut reader = ArReader::new(TEST_ARCHIVE).unwrap();
  let mut names = Vec::new();
  while let Some(header) = reader.next_member().unwrap() {
    names.push(header.name);
  }
  assert_eq!(names, ["hello.txt", "odd.txt", "dir.o", "stray.txt"]);
}

#[test]
fn test_audit_archive() {
  let options = ArReaderOptions {
    verify_header_terminator: true,
    ..ArReaderOptions::default()
  };
  let mut reader =
    ArReader::try_new(TEST_ARCHIVE, options, AuditArViolationHandler::new()).unwrap();
  let members = read_members(&mut reader).unwrap();
  assert_simple_members(&members);

  // Every group id read here spills into the mode field.
  let fields: Vec<CorruptFieldContext> = reader
    .violation_handler()
    .violations
    .iter()
    .map(|violation| match violation {
      ArHeaderDecodeError::MalformedHeader { field, .. } => *field,
      ArHeaderDecodeError::BadFileMagic { .. } => panic!("Unexpected terminator violation"),
    })
    .collect();
  assert_eq!(
    fields,
    [
      CorruptFieldContext::HeaderGid,
      CorruptFieldContext::HeaderGid,
      CorruptFieldContext::HeaderGid,
      CorruptFieldContext::HeaderUid,
      CorruptFieldContext::HeaderGid,
    ]
  );
}

#[test]
fn test_strict_archive_stops_at_stray_uid() {
  let mut reader = ArReader::try_new(
    TEST_ARCHIVE,
    ArReaderOptions::default(),
    StrictArViolationHandler,
  )
  .unwrap();

  let mut names = Vec::new();
  let error = loop {
    match reader.next_member() {
      Ok(Some(header)) => names.push(header.name),
      Ok(None) => panic!("Strict reader accepted the stray uid"),
      Err(error) => break error,
    }
  };
  assert_eq!(names, ["hello.txt", "odd.txt", "dir.o"]);
  assert!(matches!(
    error,
    ArReaderError::Header(ArHeaderDecodeError::MalformedHeader {
      field: CorruptFieldContext::HeaderUid,
      ..
    })
  ));
}

#[test]
fn test_rewrite_archive() {
  let mut reader = ArReader::new(TEST_ARCHIVE).unwrap();
  let mut writer = ArWriter::new(Vec::new()).unwrap();
  let mut transfer_buffer = [0u8; 5];
  while let Some(header) = reader.next_member().unwrap() {
    writer.begin_member(&header).unwrap();
    let copied = reader.copy(&mut writer, &mut transfer_buffer, false).unwrap();
    assert_eq!(copied as u64, header.size);
  }
  let rewritten = writer.finish().unwrap();
  assert_eq!(rewritten.len(), TEST_ARCHIVE.len());

  let mut reader = ArReader::new(rewritten.as_slice()).unwrap();
  let members = read_members(&mut reader).unwrap();
  assert_simple_members(&members);

  let mut original_reader = ArReader::new(TEST_ARCHIVE).unwrap();
  let original = read_members(&mut original_reader).unwrap();
  let headers: Vec<&ArHeader> = members.iter().map(|(header, _)| header).collect();
  let original_headers: Vec<&ArHeader> = original.iter().map(|(header, _)| header).collect();
  assert_eq!(headers, original_headers);
}

#[test]
fn test_truncated_archive() {
  // Cut inside the content of "odd.txt".
  let truncated = &TEST_ARCHIVE[..0x94];
  let mut reader = ArReader::new(truncated).unwrap();
  assert!(reader.next_member().unwrap().is_some());
  let odd = reader.next_member().unwrap().unwrap();
  assert_eq!(odd.name, String::from("odd.txt"));

  let mut data: Vec<u8> = Vec::new();
  let result = reader.copy(&mut data, &mut [0u8; 16], false);
  assert!(matches!(
    result,
    Err(crate::CopyError::IoRead(ArReaderError::TruncatedMember { remaining: 5 }))
  ));
  assert_eq!(data, b"odd ");
}
