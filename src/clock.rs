//! Playback time to frame conversion and the transport contract.

/// Frame clock with an explicit start/stop polling loop.
pub mod frame_clock;
/// External playback transport and an in-memory simulation of it.
pub mod transport;
