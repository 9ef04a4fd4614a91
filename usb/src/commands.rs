// The Sixaxis keeps the address of its Bluetooth master in HID feature report 0xf5. It's
// reachable over the USB control endpoint with plain class GET_REPORT / SET_REPORT requests,
// so nothing here knows (or cares) how the transfer actually reaches the device.
use crate::error::CommandError;
use log::debug;
use sixpair_types::{BdAddr, BD_ADDR_LENGTH};

pub const HID_GET_REPORT: u8 = 0x01;
pub const HID_SET_REPORT: u8 = 0x09;

/// Feature report (type 3), report id 0xf5.
pub const MASTER_REPORT: u16 = 0x03f5;
pub const MASTER_REPORT_LENGTH: usize = 8;

// Bytes 0 and 1 of the report are framing, the address follows.
const MASTER_ADDRESS_OFFSET: usize = 2;

/// A claimed interface which can carry class specific control requests.
pub trait ControlTransport {
    fn interface_number(&self) -> u8;

    fn read_class_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        length: usize,
    ) -> Result<Vec<u8>, rusb::Error>;

    fn write_class_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<(), rusb::Error>;
}

// Commands which can be executed on anything that provides a transport..
pub trait PairingCommands: ControlTransport {
    fn get_master(&mut self) -> Result<BdAddr, CommandError> {
        let index = self.interface_number() as u16;
        let response =
            self.read_class_control(HID_GET_REPORT, MASTER_REPORT, index, MASTER_REPORT_LENGTH)?;
        debug!("Master report: {:02x?}", response);

        if response.len() != MASTER_REPORT_LENGTH {
            return Err(CommandError::MalformedResponse {
                expected: MASTER_REPORT_LENGTH,
                received: response.len(),
            });
        }

        // The length check above guarantees six address bytes.
        let address = BdAddr::from_slice(&response[MASTER_ADDRESS_OFFSET..]).ok_or(
            CommandError::MalformedResponse {
                expected: MASTER_REPORT_LENGTH,
                received: response.len(),
            },
        )?;
        Ok(address)
    }

    fn set_master(&mut self, address: BdAddr) -> Result<(), CommandError> {
        let index = self.interface_number() as u16;
        let report = master_report(address);
        debug!("Sending master report: {:02x?}", report);

        self.write_class_control(HID_SET_REPORT, MASTER_REPORT, index, &report)?;
        Ok(())
    }
}

pub fn master_report(address: BdAddr) -> [u8; MASTER_REPORT_LENGTH] {
    let mut report = [0; MASTER_REPORT_LENGTH];
    report[0] = 0x01;
    report[1] = 0x00;
    report[MASTER_ADDRESS_OFFSET..MASTER_ADDRESS_OFFSET + BD_ADDR_LENGTH]
        .copy_from_slice(&address.octets());
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Transfer {
        Read { request: u8, value: u16, index: u16, length: usize },
        Write { request: u8, value: u16, index: u16, data: Vec<u8> },
    }

    struct FakeTransport {
        interface: u8,
        response: Result<Vec<u8>, rusb::Error>,
        write_result: Result<(), rusb::Error>,
        transfers: Vec<Transfer>,
    }

    impl FakeTransport {
        fn new(interface: u8, response: Result<Vec<u8>, rusb::Error>) -> Self {
            Self {
                interface,
                response,
                write_result: Ok(()),
                transfers: vec![],
            }
        }
    }

    impl ControlTransport for FakeTransport {
        fn interface_number(&self) -> u8 {
            self.interface
        }

        fn read_class_control(
            &mut self,
            request: u8,
            value: u16,
            index: u16,
            length: usize,
        ) -> Result<Vec<u8>, rusb::Error> {
            self.transfers.push(Transfer::Read { request, value, index, length });
            self.response.clone()
        }

        fn write_class_control(
            &mut self,
            request: u8,
            value: u16,
            index: u16,
            data: &[u8],
        ) -> Result<(), rusb::Error> {
            self.transfers.push(Transfer::Write {
                request,
                value,
                index,
                data: data.to_vec(),
            });
            self.write_result
        }
    }

    impl PairingCommands for FakeTransport {}

    #[test]
    fn master_report_layout() {
        let report = master_report(BdAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]));
        assert_eq!(report, [0x01, 0x00, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    }

    #[test]
    fn get_master_skips_framing_bytes() {
        let mut transport = FakeTransport::new(
            0,
            Ok(vec![0x01, 0x00, 0x00, 0x1a, 0x7d, 0xda, 0x71, 0x13]),
        );

        let master = transport.get_master().unwrap();
        assert_eq!(master, BdAddr([0x00, 0x1a, 0x7d, 0xda, 0x71, 0x13]));
        assert_eq!(
            transport.transfers,
            vec![Transfer::Read {
                request: 0x01,
                value: 0x03f5,
                index: 0,
                length: 8,
            }]
        );
    }

    #[test]
    fn get_master_uses_the_interface_as_index() {
        let mut transport = FakeTransport::new(2, Ok(vec![0; 8]));
        transport.get_master().unwrap();
        assert!(matches!(
            transport.transfers[0],
            Transfer::Read { index: 2, .. }
        ));
    }

    #[test]
    fn short_master_response_is_malformed() {
        let mut transport = FakeTransport::new(0, Ok(vec![0x01, 0x00, 0x11]));
        let error = transport.get_master().unwrap_err();
        assert!(matches!(
            error,
            CommandError::MalformedResponse {
                expected: 8,
                received: 3
            }
        ));
    }

    #[test]
    fn usb_failures_are_passed_back() {
        let mut transport = FakeTransport::new(0, Err(rusb::Error::Timeout));
        let error = transport.get_master().unwrap_err();
        assert!(matches!(error, CommandError::UsbError(rusb::Error::Timeout)));
    }

    #[test]
    fn set_master_writes_the_report() {
        let mut transport = FakeTransport::new(1, Ok(vec![]));
        transport
            .set_master(BdAddr([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]))
            .unwrap();

        assert_eq!(
            transport.transfers,
            vec![Transfer::Write {
                request: 0x09,
                value: 0x03f5,
                index: 1,
                data: vec![0x01, 0x00, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff],
            }]
        );
    }

    #[test]
    fn set_master_failure_is_reported() {
        let mut transport = FakeTransport::new(0, Ok(vec![]));
        transport.write_result = Err(rusb::Error::Pipe);

        let result = transport.set_master(BdAddr::default());
        assert!(matches!(result, Err(CommandError::UsbError(rusb::Error::Pipe))));
    }
}
