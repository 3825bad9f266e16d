//! Serial port discovery.

use anyhow::{Context, Result};
use tokio_serial::{SerialPortInfo, SerialPortType};
use tracing::debug;

/// A serial port as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct PortInfo {
    pub path: String,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
    pub serial_number: Option<String>,
    pub product: Option<String>,
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        match info.port_type {
            SerialPortType::UsbPort(usb) => Self {
                path: info.port_name,
                vid: Some(usb.vid),
                pid: Some(usb.pid),
                serial_number: usb.serial_number,
                product: usb.product,
            },
            _ => Self {
                path: info.port_name,
                vid: None,
                pid: None,
                serial_number: None,
                product: None,
            },
        }
    }
}

/// Lists all serial ports.
pub fn list_ports() -> Result<Vec<PortInfo>> {
    let ports = tokio_serial::available_ports().context("Failed to enumerate serial ports")?;
    Ok(ports.into_iter().map(PortInfo::from).collect())
}

/// Picks the first USB port reporting `serial_number`.
pub fn find_by_serial<'a>(ports: &'a [PortInfo], serial_number: &str) -> Option<&'a PortInfo> {
    ports.iter().find(|p| {
        debug!("Candidate port {} (serial {:?})", p.path, p.serial_number);
        p.serial_number.as_deref() == Some(serial_number)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(path: &str, serial: Option<&str>) -> PortInfo {
        PortInfo {
            path: path.to_string(),
            vid: serial.map(|_| 0x1A86),
            pid: serial.map(|_| 0x5722),
            serial_number: serial.map(str::to_string),
            product: None,
        }
    }

    #[test]
    fn test_find_by_serial() {
        let ports = vec![
            port("/dev/ttyS0", None),
            port("/dev/ttyACM0", Some("OTHER")),
            port("/dev/ttyACM1", Some("USB35INCHIPSV2")),
        ];
        let found = find_by_serial(&ports, "USB35INCHIPSV2").unwrap();
        assert_eq!(found.path, "/dev/ttyACM1");
        assert!(find_by_serial(&ports, "MISSING").is_none());
    }

    #[test]
    fn test_non_usb_port_has_no_ids() {
        let info = SerialPortInfo {
            port_name: "/dev/ttyS0".to_string(),
            port_type: SerialPortType::PciPort,
        };
        let port = PortInfo::from(info);
        assert_eq!(port.path, "/dev/ttyS0");
        assert!(port.vid.is_none());
        assert!(port.serial_number.is_none());
    }
}
