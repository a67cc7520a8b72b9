//! Tests for the character-device binding

use fcd_core::binding::{CharDevice, DeviceNumber, Errno, MAX_MAJOR, MAX_MINOR};
use fcd_core::FcdError;

fn device() -> CharDevice
{
    CharDevice::new("fcd", DeviceNumber::new(240, 0).unwrap(), 512).unwrap()
}

#[test]
fn test_device_metadata()
{
    let dev = device();
    assert_eq!(dev.name(), "fcd");
    assert_eq!(dev.number().to_string(), "240:0");
    assert_eq!(dev.buffer().capacity(), 512);
}

#[test]
fn test_empty_name_rejected()
{
    assert!(CharDevice::new("", DeviceNumber::new(1, 0).unwrap(), 16).is_err());
}

#[test]
fn test_device_number_packing()
{
    let number = DeviceNumber::new(511, 3).unwrap();
    assert_eq!(DeviceNumber::from_raw(number.raw()), number);
    assert_eq!(DeviceNumber::from_raw((240 << 20) | 7), DeviceNumber::new(240, 7).unwrap());
}

#[test]
fn test_device_number_round_trip_at_limits()
{
    for (major, minor) in [(0, 0), (MAX_MAJOR, 0), (0, MAX_MINOR), (MAX_MAJOR, MAX_MINOR)] {
        let number = DeviceNumber::new(major, minor).unwrap();
        let back = DeviceNumber::from_raw(number.raw());
        assert_eq!(back, number);
        assert_eq!(back.major(), major);
        assert_eq!(back.minor(), minor);
    }
}

#[test]
fn test_device_number_out_of_range_rejected()
{
    assert_eq!(MAX_MAJOR, 0xFFF);
    assert!(matches!(DeviceNumber::new(MAX_MAJOR + 1, 0), Err(FcdError::InvalidArgument(_))));
    assert!(matches!(DeviceNumber::new(5000, 0), Err(FcdError::InvalidArgument(_))));
    assert!(matches!(DeviceNumber::new(0, MAX_MINOR + 1), Err(FcdError::InvalidArgument(_))));
}

#[test]
fn test_llseek_whence_values()
{
    let dev = device();
    let mut file = dev.open();

    assert_eq!(dev.llseek(&mut file, 100, libc::SEEK_SET), Ok(100));
    assert_eq!(dev.llseek(&mut file, 10, libc::SEEK_CUR), Ok(110));
    assert_eq!(dev.llseek(&mut file, -10, libc::SEEK_END), Ok(502));
    assert_eq!(dev.llseek(&mut file, 20, libc::SEEK_END), Err(Errno::EINVAL));
    assert_eq!(dev.llseek(&mut file, 0, 99), Err(Errno::EINVAL));
    assert_eq!(file.position(), 502);
    dev.release(file);
}

#[test]
fn test_write_full_device_is_enomem()
{
    let dev = device();
    let mut file = dev.open();
    let data = vec![0x55u8; 600];

    assert_eq!(dev.write(&mut file, &data, 600), Ok(512));
    assert_eq!(dev.write(&mut file, &data, 1), Err(Errno::ENOMEM));
}

#[test]
fn test_write_count_beyond_source_is_efault()
{
    let dev = device();
    let mut file = dev.open();

    assert_eq!(dev.write(&mut file, b"abc", 10), Err(Errno::EFAULT));
    assert_eq!(file.position(), 0);
    assert_eq!(dev.buffer().snapshot(), vec![0u8; 512]);
}

#[test]
fn test_write_count_shorter_than_source()
{
    let dev = device();
    let mut file = dev.open();

    assert_eq!(dev.write(&mut file, b"abcdef", 2), Ok(2));
    assert_eq!(&dev.buffer().snapshot()[..3], b"ab\0");
}

#[test]
fn test_read_into_short_destination_is_efault()
{
    let dev = device();
    let mut file = dev.open();
    let mut out = [0u8; 4];

    assert_eq!(dev.read(&mut file, &mut out, 8), Err(Errno::EFAULT));
    assert_eq!(file.position(), 0);
}

#[test]
fn test_read_at_end_returns_zero()
{
    let dev = device();
    let mut file = dev.open();
    dev.llseek(&mut file, 0, libc::SEEK_END).unwrap();

    let mut out = Vec::new();
    assert_eq!(dev.read(&mut file, &mut out, 16), Ok(0));
}

#[test]
fn test_errno_display()
{
    assert_eq!(Errno::ENOMEM.name(), Some("ENOMEM"));
    assert!(Errno::EFAULT.to_string().contains("EFAULT"));
    assert_eq!(Errno(9999).name(), None);
}
