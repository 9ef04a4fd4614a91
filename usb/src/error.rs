#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error("Unable to access the USB subsystem: {0}")]
    UsbUnavailable(rusb::Error),

    #[error("Unable to open the controller: {0}")]
    OpenFailed(rusb::Error),

    #[error("Unable to claim interface {interface}: {error}")]
    ClaimFailed { interface: u8, error: rusb::Error },
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),

    #[error("Malformed response from controller, expected {expected} bytes, received {received}")]
    MalformedResponse { expected: usize, received: usize },
}
