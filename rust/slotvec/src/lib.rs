//! # slotvec: type-erased growable vectors
//!
//! slotvec provides growable, contiguous containers whose element type is
//! described at runtime by a fixed byte size rather than through generics.
//! A single engine serves arbitrary element types; thin layers on top add
//! bounds checking, cleanup callbacks and typed access.
//!
//! ## Module Organization
//!
//! * [`vector`] - [`SlotVec`], the bounds-checked container with an optional
//!   per-element finalizer
//! * [`pod`] - [`PodSlotVec`], a typed facade over the erased engine for
//!   `bytemuck::Pod` element types
//! * [`buffer`] - re-export of the `slotvec-buffer` engine crate
//! * [`common`] - re-export of the `slotvec-common` error and result types
//!
//! ## Picking a container
//!
//! Use [`PodSlotVec`] when the element type is known at compile time and is
//! plain data; use [`SlotVec`] when the element size is only known at
//! runtime, or when elements need cleanup before they are overwritten,
//! removed or dropped; use [`RawBuffer`] directly when building another
//! abstraction on top of the engine.

pub use slotvec_buffer as buffer;
pub use slotvec_common as common;

pub mod pod;
pub mod vector;

pub use buffer::RawBuffer;
pub use common::{
    Result,
    error::{Error, ErrorKind},
};
pub use pod::PodSlotVec;
pub use vector::SlotVec;
