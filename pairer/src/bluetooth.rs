use log::debug;
use sixpair_types::BdAddr;
use std::process::Command;
use which::which;

const HCITOOL: &str = "hcitool";

#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error("Unable to locate hcitool: {0}")]
    ToolNotFound(#[from] which::Error),

    #[error("Unable to run hcitool: {0}")]
    LaunchFailed(#[from] std::io::Error),

    #[error("No Bluetooth adapter address in the hcitool output")]
    NoAdapter,
}

/// Somewhere the address of this machine's Bluetooth adapter can be found.
pub trait LocalAddressProvider {
    fn local_address(&mut self) -> Result<BdAddr, LookupError>;
}

/// Asks BlueZ via `hcitool dev`.
#[derive(Debug, Default)]
pub struct HciTool;

impl LocalAddressProvider for HciTool {
    fn local_address(&mut self) -> Result<BdAddr, LookupError> {
        let binary = which(HCITOOL)?;
        debug!("Running {:?} dev", binary);

        let output = Command::new(binary).arg("dev").output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("{} output: {:?}", HCITOOL, stdout);

        parse_hcitool_output(&stdout).ok_or(LookupError::NoAdapter)
    }
}

// The output looks like:
//   Devices:
//   	hci0	00:1A:7D:DA:71:13
// Only the first adapter is used.
pub fn parse_hcitool_output(output: &str) -> Option<BdAddr> {
    output
        .lines()
        .nth(1)?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}
