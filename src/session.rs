/// Overlay session owning catalog, resolution state and clock.
pub mod overlay_session;
