use crate::bluetooth::LocalAddressProvider;
use anyhow::{Context, Result};
use log::{info, warn};
use sixpair_types::BdAddr;
use sixpair_usb::commands::PairingCommands;
use std::io::Write;

/// Points each controller it's given at the target address. The target comes from the command
/// line, or failing that is looked up once from the provider and reused for later controllers.
pub struct Pairer<P, W> {
    target: Option<BdAddr>,
    provider: P,
    out: W,
}

impl<P: LocalAddressProvider, W: Write> Pairer<P, W> {
    pub fn new(target: Option<BdAddr>, provider: P, out: W) -> Self {
        Self {
            target,
            provider,
            out,
        }
    }

    pub fn pair<C: PairingCommands>(&mut self, controller: &mut C) -> Result<()> {
        // Purely informational, a failure here doesn't stop the write.
        match controller.get_master() {
            Ok(master) => writeln!(self.out, "Current Bluetooth master: {}", master)?,
            Err(error) => {
                writeln!(self.out, "Current Bluetooth master: unavailable")?;
                warn!("Unable to read the current Bluetooth master: {}", error);
            }
        }

        let target = self.target_address()?;
        writeln!(self.out, "Setting master bd_addr to {}", target)?;
        controller
            .set_master(target)
            .context("Unable to set the Bluetooth master")?;

        Ok(())
    }

    fn target_address(&mut self) -> Result<BdAddr> {
        if let Some(target) = self.target {
            return Ok(target);
        }

        match self.provider.local_address() {
            Ok(address) => {
                info!("Local Bluetooth address is {}", address);
                self.target.replace(address);
                Ok(address)
            }
            Err(error) => {
                writeln!(self.out, "Unable to retrieve local bd_addr from `hcitool dev`.")?;
                writeln!(self.out, "Please enable Bluetooth or specify an address manually.")?;
                Err(error).context("Unable to determine the local Bluetooth address")
            }
        }
    }
}
