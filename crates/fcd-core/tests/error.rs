//! Tests for error handling

use std::io;

use fcd_core::error::{FcdError, FcdResult};

#[test]
fn test_invalid_offset_display()
{
    let error = FcdError::InvalidOffset {
        target: Some(532),
        capacity: 512,
    };
    let message = format!("{}", error);
    assert!(message.contains("532"));
    assert!(message.contains("512"));
}

#[test]
fn test_out_of_space_display()
{
    let error = FcdError::OutOfSpace { capacity: 512 };
    let message = format!("{}", error);
    assert!(message.contains("Out of space"));
}

#[test]
fn test_errno_mapping()
{
    assert_eq!(FcdError::InvalidArgument("x".into()).errno(), libc::EINVAL);
    assert_eq!(
        FcdError::InvalidOffset {
            target: None,
            capacity: 1
        }
        .errno(),
        libc::EINVAL
    );
    assert_eq!(FcdError::OutOfSpace { capacity: 1 }.errno(), libc::ENOMEM);
    assert_eq!(FcdError::TransferFault("x".into()).errno(), libc::EFAULT);
}

#[test]
fn test_into_io_error()
{
    let err: io::Error = FcdError::TransferFault("bad pointer".into()).into();
    assert_eq!(err.kind(), io::ErrorKind::Other);
    assert!(err.to_string().contains("bad pointer"));
}

#[test]
fn test_result_type()
{
    // Test that Result type is properly aliased
    let _result: FcdResult<()> = Ok(());
    let _error_result: FcdResult<()> = Err(FcdError::OutOfSpace { capacity: 512 });
}
