//! The type-erased growable buffer engine.
//!
//! This crate provides [`RawBuffer`], a contiguous, reallocatable store of
//! fixed-size element slots where the element size is supplied at runtime
//! rather than through the type system. It is the foundation for the checked
//! containers in the `slotvec` crate.
//!
//! # Core Concepts
//!
//! A buffer is described by three header fields: the number of live elements
//! (`len`), the number of allocated slots (`capacity`), and the fixed byte
//! size of one element (`element_size`). Slot `i` occupies the byte range
//! `i * element_size .. (i + 1) * element_size` within the slot storage.
//!
//! The engine never interprets element contents. Elements enter and leave as
//! opaque `&[u8]` blocks whose length must equal the buffer's element size.
//!
//! # Growth
//!
//! Appending to a full buffer doubles its capacity (starting from 1), which
//! amortizes reallocation cost to O(1) per append. Capacity is tracked by the
//! engine itself, so [`RawBuffer::reserve`] and the doubling policy behave
//! exactly as requested regardless of allocator rounding.
//!
//! # Alignment
//!
//! Slot 0 is aligned to a 128-byte boundary. Since the byte size of any Rust
//! type is a multiple of its alignment, every slot of a buffer whose element
//! size matches such a type is suitably aligned for typed views over the
//! storage.

pub mod buffer;
pub mod layout;

pub use buffer::RawBuffer;
