//! Radio link abstraction and group framing.
//!
//! The game only needs two primitives from the radio: send one string, and
//! check for one inbound string without blocking. Blocking receive is built on
//! top as a poll loop with a fixed inter-poll delay and an optional timeout.
//!
//! On air every frame starts with the sender's group id. Receivers drop frames
//! from other groups, so several console/gamepad pairs can share a channel.

use alloc::{
    string::String,
    vec::Vec,
};

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

/// Largest frame the radio carries (ESP-NOW payload limit).
pub const MAX_FRAME: usize = 250;
/// Largest message once the group byte is accounted for.
pub const MAX_PAYLOAD: usize = MAX_FRAME - 1;

/// One message in, one message out.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Transmit one message to the peer.
    async fn send(&mut self, message: &str) -> Result<(), Self::Error>;

    /// Take the next pending message, if any, without waiting.
    fn try_receive(&mut self) -> Result<Option<String>, Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    #[error("empty frame")]
    Empty,
    #[error("frame payload is not valid UTF-8")]
    NotUtf8,
    #[error("{0} byte message does not fit in a frame")]
    TooLong(usize),
}

/// Prefix `message` with `group`.
pub fn encode_frame(group: u8, message: &str) -> Result<Vec<u8>, FrameError> {
    if message.len() > MAX_PAYLOAD {
        return Err(FrameError::TooLong(message.len()));
    }
    let mut frame = Vec::with_capacity(message.len() + 1);
    frame.push(group);
    frame.extend_from_slice(message.as_bytes());
    Ok(frame)
}

/// Payload of `frame` if it was sent to `group`; `Ok(None)` for other groups.
pub fn decode_frame(group: u8, frame: &[u8]) -> Result<Option<&str>, FrameError> {
    let Some((&sender_group, payload)) = frame.split_first() else {
        return Err(FrameError::Empty);
    };
    if sender_group != group {
        trace!("dropping frame for group {}", sender_group);
        return Ok(None);
    }
    core::str::from_utf8(payload)
        .map(Some)
        .map_err(|_| FrameError::NotUtf8)
}

/// Wait for the next message.
///
/// Sleeps `poll_interval`, then polls, until something arrives. With a
/// `timeout`, gives up with `Ok(None)` once the accumulated sleep reaches it;
/// without one, it never gives up. A zero interval counts as one tick, so a
/// timeout always runs out.
pub async fn receive_blocking<T, D>(
    transport: &mut T,
    delay: &mut D,
    poll_interval: Duration,
    timeout: Option<Duration>,
) -> Result<Option<String>, T::Error>
where
    T: Transport,
    D: DelayNs,
{
    let step = poll_interval.max(Duration::from_ticks(1));
    let step_us = u32::try_from(step.as_micros()).unwrap_or(u32::MAX);
    let mut waited = Duration::from_ticks(0);
    loop {
        delay.delay_us(step_us).await;
        waited += step;

        if let Some(message) = transport.try_receive()? {
            return Ok(Some(message));
        }

        if let Some(limit) = timeout
            && waited >= limit
        {
            return Ok(None);
        }
    }
}
