// Walks the USB device tree looking for Sixaxis controllers. Nothing here touches device state,
// descriptors are read, inspected and dropped as the walk goes.
use crate::error::ConnectError;
use crate::{PID_SIXAXIS, USB_CLASS_HID, VID_SONY};
use log::{debug, warn};
use rusb::{ConfigDescriptor, Context, Device, DeviceDescriptor, UsbContext};

/// A matching controller, and the HID interface the pairing requests should be sent to.
#[derive(Clone, Debug)]
pub struct ControllerMatch {
    pub device: Device<Context>,
    pub interface: u8,
}

impl ControllerMatch {
    pub fn bus_number(&self) -> u8 {
        self.device.bus_number()
    }

    pub fn address(&self) -> u8 {
        self.device.address()
    }
}

pub fn is_controller(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VID_SONY && product_id == PID_SIXAXIS
}

/// An interface counts as HID if any of its alternate settings does.
pub fn has_hid_setting<I: IntoIterator<Item = u8>>(class_codes: I) -> bool {
    class_codes.into_iter().any(|class| class == USB_CLASS_HID)
}

/// Lazily yields every controller HID interface, in the order libusb lists the devices.
pub fn find_controllers() -> Result<impl Iterator<Item = ControllerMatch>, ConnectError> {
    let devices = list_devices(Context::new)?;
    debug!("Found {} USB devices", devices.len());

    Ok(devices
        .into_iter()
        .filter_map(controller_descriptor)
        .flat_map(|(device, descriptor)| {
            let interfaces = hid_interfaces(&device, &descriptor);
            interfaces.into_iter().map(move |interface| ControllerMatch {
                device: device.clone(),
                interface,
            })
        }))
}

// Each device keeps its own reference to the context, so it outlives both the context value
// and the list.
fn list_devices<T, F>(init: F) -> Result<Vec<Device<T>>, ConnectError>
where
    T: UsbContext,
    F: FnOnce() -> rusb::Result<T>,
{
    let context = init().map_err(ConnectError::UsbUnavailable)?;
    let devices = context
        .devices()
        .map_err(ConnectError::UsbUnavailable)?
        .iter()
        .collect();
    Ok(devices)
}

fn controller_descriptor(
    device: Device<Context>,
) -> Option<(Device<Context>, DeviceDescriptor)> {
    match device.device_descriptor() {
        Ok(descriptor) => {
            if is_controller(descriptor.vendor_id(), descriptor.product_id()) {
                debug!("Found controller at {:?}", device);
                Some((device, descriptor))
            } else {
                None
            }
        }
        Err(error) => {
            debug!("Unable to read device descriptor for {:?}: {}", device, error);
            None
        }
    }
}

fn hid_interfaces(device: &Device<Context>, descriptor: &DeviceDescriptor) -> Vec<u8> {
    let mut interfaces = vec![];
    for index in 0..descriptor.num_configurations() {
        match device.config_descriptor(index) {
            Ok(config) => interfaces.extend(hid_interface_numbers(&config)),
            Err(error) => warn!(
                "Unable to read configuration {} of {:?}: {}",
                index, device, error
            ),
        }
    }
    interfaces
}

fn hid_interface_numbers(config: &ConfigDescriptor) -> Vec<u8> {
    config
        .interfaces()
        .filter(|interface| {
            has_hid_setting(interface.descriptors().map(|setting| setting.class_code()))
        })
        .map(|interface| interface.number())
        .collect()
}
