//! ESP-NOW broadcast as the game's [`Transport`].

use alloc::string::String;

use esp_radio::esp_now::{
    BROADCAST_ADDRESS,
    EspNow,
    EspNowError,
};

use crate::link::{
    self,
    FrameError,
    Transport,
};

/// ESP-NOW channel both badges listen on.
pub const CHANNEL: u8 = 11;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("ESP-NOW failed: {0:?}")]
    Radio(EspNowError),
}

impl defmt::Format for LinkError {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            Self::Frame(e) => defmt::write!(f, "frame: {}", e),
            Self::Radio(e) => defmt::write!(f, "radio: {}", e),
        }
    }
}

/// Broadcast link that only hears its own group.
pub struct EspNowLink<'d> {
    esp_now: EspNow<'d>,
    group: u8,
}

impl<'d> EspNowLink<'d> {
    /// Tune `esp_now` to [`CHANNEL`] and filter on `group`.
    pub fn new(esp_now: EspNow<'d>, group: u8) -> Result<Self, LinkError> {
        esp_now.set_channel(CHANNEL).map_err(LinkError::Radio)?;
        info!("ESP-NOW link up on channel {}, group {}", CHANNEL, group);
        Ok(Self { esp_now, group })
    }
}

impl Transport for EspNowLink<'_> {
    type Error = LinkError;

    async fn send(&mut self, message: &str) -> Result<(), LinkError> {
        let frame = link::encode_frame(self.group, message)?;
        self.esp_now
            .send_async(&BROADCAST_ADDRESS, &frame)
            .await
            .map_err(LinkError::Radio)
    }

    fn try_receive(&mut self) -> Result<Option<String>, LinkError> {
        while let Some(received) = self.esp_now.receive() {
            match link::decode_frame(self.group, received.data()) {
                Ok(Some(message)) => return Ok(Some(String::from(message))),
                Ok(None) => {}
                Err(e) => warn!("discarding frame: {}", e),
            }
        }
        Ok(None)
    }
}
