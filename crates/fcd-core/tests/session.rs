//! Tests for sessions and the std::io adapters

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use fcd_core::prelude::*;

#[test]
fn test_session_round_trip()
{
    let buffer = BoundedBuffer::new(32).unwrap();
    let mut session = buffer.open_session();

    assert_eq!(session.write_from(b"hello").unwrap(), 5);
    assert_eq!(session.seek_to(0, SeekMode::FromStart).unwrap(), 0);

    let mut out = Vec::new();
    assert_eq!(session.read_into(5, &mut out).unwrap(), 5);
    assert_eq!(out, b"hello");
    assert_eq!(session.position(), 5);
    session.close();
}

#[test]
fn test_io_traits()
{
    let buffer = BoundedBuffer::new(16).unwrap();
    let mut session = buffer.open_session();

    session.write_all(b"abcdef").unwrap();
    assert_eq!(session.seek(SeekFrom::Start(2)).unwrap(), 2);

    let mut out = [0u8; 3];
    session.read_exact(&mut out).unwrap();
    assert_eq!(&out, b"cde");

    assert_eq!(session.seek(SeekFrom::End(-1)).unwrap(), 15);
    assert_eq!(session.seek(SeekFrom::Current(-15)).unwrap(), 0);
}

#[test]
fn test_io_read_to_end_stops_at_capacity()
{
    let buffer = BoundedBuffer::new(8).unwrap();
    let mut session = buffer.open_session();
    session.write_all(b"12345678").unwrap();
    session.rewind().unwrap();

    let mut out = Vec::new();
    assert_eq!(session.read_to_end(&mut out).unwrap(), 8);
    assert_eq!(out, b"12345678");
}

#[test]
fn test_io_write_when_full()
{
    let buffer = BoundedBuffer::new(4).unwrap();
    let mut session = buffer.open_session();

    assert_eq!(session.write(b"abcdef").unwrap(), 4);
    let err = session.write(b"g").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WriteZero);
}

#[test]
fn test_io_seek_out_of_range()
{
    let buffer = BoundedBuffer::new(4).unwrap();
    let mut session = buffer.open_session();

    let err = session.seek(SeekFrom::Start(5)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    let err = session.seek(SeekFrom::Start(u64::MAX)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(session.position(), 0);
}
