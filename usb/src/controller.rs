use crate::commands::{ControlTransport, PairingCommands};
use crate::devices::ControllerMatch;
use crate::error::ConnectError;
use log::{debug, info};
use rusb::{Context, DeviceHandle, Direction, Recipient, RequestType};
use std::time::Duration;

pub const TRANSFER_TIMEOUT: Duration = Duration::from_secs(5);

/// An open controller with its HID interface claimed. Dropping it releases the interface and
/// closes the handle.
#[derive(Debug)]
pub struct Sixaxis {
    handle: DeviceHandle<Context>,
    interface: u8,
    timeout: Duration,
}

impl Sixaxis {
    pub fn open(controller: &ControllerMatch) -> Result<Self, ConnectError> {
        let handle = controller.device.open().map_err(ConnectError::OpenFailed)?;
        let interface = controller.interface;
        info!(
            "Opened controller on bus {:03} device {:03}, interface {}",
            controller.bus_number(),
            controller.address(),
            interface
        );

        // Usually usbhid owns the interface, but there may be nothing attached at all.
        if let Err(error) = handle.detach_kernel_driver(interface) {
            debug!("No kernel driver detached from interface {}: {}", interface, error);
        }

        handle
            .claim_interface(interface)
            .map_err(|error| ConnectError::ClaimFailed { interface, error })?;

        Ok(Self {
            handle,
            interface,
            timeout: TRANSFER_TIMEOUT,
        })
    }
}

impl ControlTransport for Sixaxis {
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
        let mut buf = vec![0; length];
        let response_length = self.handle.read_control(
            rusb::request_type(Direction::In, RequestType::Class, Recipient::Interface),
            request,
            value,
            index,
            &mut buf,
            self.timeout,
        )?;
        buf.truncate(response_length);
        Ok(buf)
    }

    fn write_class_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<(), rusb::Error> {
        self.handle.write_control(
            rusb::request_type(Direction::Out, RequestType::Class, Recipient::Interface),
            request,
            value,
            index,
            data,
            self.timeout,
        )?;

        Ok(())
    }
}

impl PairingCommands for Sixaxis {}

impl Drop for Sixaxis {
    fn drop(&mut self) {
        if let Err(error) = self.handle.release_interface(self.interface) {
            debug!("Unable to release interface {}: {}", self.interface, error);
        }
    }
}
