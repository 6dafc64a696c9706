//! # Swing overlay guide
//!
//! A walkthrough of how a report turns into per-frame draw instructions.
//!
//! ## Core concepts
//!
//! - [`Report`](crate::Report): steps (motion phases anchored to frames), problems, and
//!   per-category guideline records keyed by step
//! - [`Category`](crate::Category): the fixed set of guideline tags; unknown names in a
//!   report are skipped
//! - [`GuidelineCatalog`](crate::GuidelineCatalog): records per category with their step
//!   resolved to a frame
//! - [`GuidelineResolver`](crate::GuidelineResolver): decides what is visible at a frame
//! - [`DrawDescriptor`](crate::DrawDescriptor): what the renderer draws, in container pixels
//! - [`OverlaySession`](crate::OverlaySession): owns all of the above for one report and
//!   one selected problem
//!
//! ## Gating
//!
//! Only categories listed by the selected problem are considered.
//!
//! Sticky categories (`HeadPosition`, `Spine`, `RotateHip`, `SpineDegree`,
//! `RotateShoulder`, `Stance`) reveal the first record whose frame has been reached and
//! keep showing that record for the rest of the session. Seeking backward does not hide
//! it again.
//!
//! Always-on categories (`VZone`, `AddressBodyShape`, `HipVertical`) show every record
//! whose step resolved, independent of the playback position.
//!
//! ## Idle overlays
//!
//! Before anything is revealed the session shows an idle set: a dashed head circle and
//! zero-valued shoulder, spine and hip angle readouts. Revealed records replace their idle
//! entry and stay locked in.
//!
//! Angle readouts show `0°` until their category is reached and disappear one second
//! (`fps` frames) after the category's last recorded step.
//!
//! ## Minimal usage
//!
//! ```no_run
//! use swing_overlay::{FrameIndex, OverlayOpts, OverlaySession, Report, Size};
//!
//! let report = Report::from_path("report.json")?;
//! let mut session = OverlaySession::new(report, None, OverlayOpts::default())?;
//! let viewport = session.viewport(Size::new(1080.0, 1920.0), 400.0)?;
//! let out = session.on_frame(FrameIndex(42), &viewport);
//! println!("{} descriptors", out.descriptors.len());
//! # Ok::<(), swing_overlay::OverlayError>(())
//! ```
