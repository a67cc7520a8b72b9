//! Tests for seek legality

use fcd_core::{BoundedBuffer, FcdError, SeekMode};

#[test]
fn test_every_legal_start_target()
{
    let buffer = BoundedBuffer::new(64).unwrap();
    let mut cursor = buffer.open();

    for target in 0..=64i64 {
        let position = buffer.seek(&mut cursor, target, SeekMode::FromStart).unwrap();
        assert_eq!(i64::try_from(position).unwrap(), target);
        assert_eq!(i64::try_from(cursor.position()).unwrap(), target);
    }
}

#[test]
fn test_illegal_targets_leave_position()
{
    let buffer = BoundedBuffer::new(64).unwrap();
    let mut cursor = buffer.open();
    buffer.seek(&mut cursor, 17, SeekMode::FromStart).unwrap();

    for target in [-1, -64, 65, 1000, i64::MIN, i64::MAX] {
        let err = buffer.seek(&mut cursor, target, SeekMode::FromStart).unwrap_err();
        assert!(matches!(err, FcdError::InvalidOffset { .. }), "target {target}");
        assert_eq!(cursor.position(), 17);
    }
}

#[test]
fn test_seek_from_end()
{
    let buffer = BoundedBuffer::new(512).unwrap();
    let mut cursor = buffer.open();

    assert_eq!(buffer.seek(&mut cursor, -10, SeekMode::FromEnd).unwrap(), 502);
    assert_eq!(
        buffer.seek(&mut cursor, 20, SeekMode::FromEnd),
        Err(FcdError::InvalidOffset {
            target: Some(532),
            capacity: 512
        })
    );
    assert_eq!(cursor.position(), 502);

    assert_eq!(buffer.seek(&mut cursor, 0, SeekMode::FromEnd).unwrap(), 512);
    assert_eq!(buffer.seek(&mut cursor, -512, SeekMode::FromEnd).unwrap(), 0);
    assert!(buffer.seek(&mut cursor, -513, SeekMode::FromEnd).is_err());
}

#[test]
fn test_seek_from_current()
{
    let buffer = BoundedBuffer::new(100).unwrap();
    let mut cursor = buffer.open();

    assert_eq!(buffer.seek(&mut cursor, 30, SeekMode::FromCurrent).unwrap(), 30);
    assert_eq!(buffer.seek(&mut cursor, 30, SeekMode::FromCurrent).unwrap(), 60);
    assert_eq!(buffer.seek(&mut cursor, -60, SeekMode::FromCurrent).unwrap(), 0);
    assert!(buffer.seek(&mut cursor, -1, SeekMode::FromCurrent).is_err());
    assert!(buffer.seek(&mut cursor, 101, SeekMode::FromCurrent).is_err());
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_seek_overflow_is_invalid_offset()
{
    let buffer = BoundedBuffer::new(100).unwrap();
    let mut cursor = buffer.open();
    buffer.seek(&mut cursor, 50, SeekMode::FromStart).unwrap();

    assert_eq!(
        buffer.seek(&mut cursor, i64::MAX, SeekMode::FromCurrent),
        Err(FcdError::InvalidOffset {
            target: None,
            capacity: 100
        })
    );
    assert_eq!(cursor.position(), 50);
}

#[test]
fn test_unknown_whence_is_invalid_argument()
{
    let err = SeekMode::try_from(7).unwrap_err();
    assert!(matches!(err, FcdError::InvalidArgument(_)));
    assert_eq!(err.errno(), libc::EINVAL);
}
