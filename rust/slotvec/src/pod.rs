//! A typed facade over the erased buffer engine for plain-data elements.

use std::marker::PhantomData;

use slotvec_buffer::RawBuffer;
use slotvec_common::{Result, error::Error};

/// A growable vector of `T` values stored in a type-erased [`RawBuffer`]
/// whose element size is `size_of::<T>()`.
///
/// `T` must implement `bytemuck::Pod`, which guarantees that every bit
/// pattern is a valid value, that values can be transmuted to and from
/// bytes, and that `T` is `Copy` with no drop glue. The last point makes the
/// engine's finalizer contract vacuous, so `PodSlotVec` registers none.
///
/// This is the safe rendition of the engine's raw element transfer
/// convention: values are reduced to fixed-size byte blocks on the way in
/// and reconstructed from slot bytes on the way out, with `bytemuck`
/// checking sizes and the buffer's slot alignment making `&[T]` views
/// sound.
pub struct PodSlotVec<T> {
    buffer: RawBuffer,
    _p: PhantomData<T>,
}

impl<T> PodSlotVec<T> {
    /// Creates a new, empty `PodSlotVec<T>`.
    ///
    /// Fails with `InvalidArgument` for zero-sized `T`, which the erased
    /// engine cannot represent.
    pub fn new() -> Result<PodSlotVec<T>> {
        Self::with_capacity(0)
    }

    /// Creates a new `PodSlotVec<T>` with exactly `capacity` slots
    /// pre-allocated.
    pub fn with_capacity(capacity: usize) -> Result<PodSlotVec<T>> {
        Ok(PodSlotVec {
            buffer: RawBuffer::with_capacity(std::mem::size_of::<T>(), capacity)?,
            _p: PhantomData,
        })
    }

    /// Wraps an existing buffer whose element size must equal
    /// `size_of::<T>()`.
    pub fn from_raw(buffer: RawBuffer) -> Result<PodSlotVec<T>> {
        if buffer.element_size() != std::mem::size_of::<T>() {
            return Err(Error::element_size_mismatch(
                std::mem::size_of::<T>(),
                buffer.element_size(),
            ));
        }
        Ok(PodSlotVec {
            buffer,
            _p: PhantomData,
        })
    }

    /// Consumes the vector and returns the underlying erased buffer.
    pub fn into_raw(self) -> RawBuffer {
        self.buffer
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the number of elements the vector can hold without
    /// reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Keeps the first `len` elements and discards the rest.
    pub fn truncate(&mut self, len: usize) {
        self.buffer.truncate(len);
    }

    /// Removes all elements. Capacity is untouched.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Grows capacity to exactly `min_capacity` slots if currently smaller.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<()> {
        self.buffer.reserve(min_capacity)
    }

    /// Reallocates so that capacity equals the current length.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.buffer.shrink_to_fit()
    }
}

impl<T> PodSlotVec<T>
where
    T: bytemuck::Pod,
{
    /// Creates a vector containing a copy of the given values.
    pub fn from_slice(values: &[T]) -> Result<PodSlotVec<T>> {
        let mut vec = Self::with_capacity(values.len())?;
        vec.buffer.extend_from_slice(bytemuck::cast_slice(values))?;
        Ok(vec)
    }

    /// Appends a value to the back of the vector.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<()> {
        self.buffer.push(bytemuck::bytes_of(&value))
    }

    /// Inserts a value at `index`, shifting later elements one slot to the
    /// right. `index` may equal `len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.buffer.insert(index, bytemuck::bytes_of(&value))
    }

    /// Removes the element at `index`, shifting later elements one slot to
    /// the left.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.buffer.remove(index)
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        self.buffer.pop().map(|slot| *bytemuck::from_bytes(slot))
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).copied()
    }

    /// Overwrites the element at `index`.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.buffer.set(index, bytemuck::bytes_of(&value))
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<T> {
        self.as_slice().first().copied()
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<T> {
        self.as_slice().last().copied()
    }

    /// Appends copies of the given values.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()> {
        self.buffer.extend_from_slice(bytemuck::cast_slice(values))
    }

    /// Resizes to `new_len` elements, filling new slots with `fill`.
    pub fn resize(&mut self, new_len: usize, fill: T) -> Result<()> {
        self.buffer.resize(new_len, bytemuck::bytes_of(&fill))
    }

    /// Returns the elements as a typed slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        if self.buffer.is_empty() {
            return &[];
        }
        bytemuck::cast_slice(self.buffer.as_bytes())
    }

    /// Returns the elements as a mutable typed slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.buffer.is_empty() {
            return &mut [];
        }
        bytemuck::cast_slice_mut(self.buffer.as_mut_bytes())
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T> Clone for PodSlotVec<T> {
    fn clone(&self) -> PodSlotVec<T> {
        PodSlotVec {
            buffer: self.buffer.clone(),
            _p: PhantomData,
        }
    }
}

impl<T: bytemuck::Pod + std::fmt::Debug> std::fmt::Debug for PodSlotVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PodSlotVec").field(&self.as_slice()).finish()
    }
}

impl<T: bytemuck::Pod + PartialEq> PartialEq for PodSlotVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, T: bytemuck::Pod> IntoIterator for &'a PodSlotVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
