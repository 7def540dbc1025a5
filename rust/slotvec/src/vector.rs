//! A bounds-checked slot vector with an optional per-element finalizer.

use std::ops::Range;
use std::sync::Arc;

use slotvec_buffer::RawBuffer;
use slotvec_common::{Result, error::Error};

/// Cleanup callback invoked with one element slot at a time.
pub type Finalizer = Arc<dyn Fn(&mut [u8])>;

/// A growable vector of fixed-size, type-erased elements with checked
/// indexing and an optional cleanup callback.
///
/// `SlotVec` owns a [`RawBuffer`] and validates every caller-supplied index
/// before delegating, so no out-of-range input reaches the engine. A
/// finalizer registered at creation is invoked once for every live element
/// about to be overwritten, removed or discarded, in ascending index order,
/// strictly before the operation that invalidates the slot:
///
/// * [`set`](SlotVec::set) - the overwritten slot
/// * [`remove`](SlotVec::remove) / [`pop`](SlotVec::pop) - the removed slot
/// * [`clear`](SlotVec::clear) - every live slot
/// * [`truncate`](SlotVec::truncate) and a shrinking
///   [`resize`](SlotVec::resize) - the discarded tail
/// * dropping the vector - every live slot
///
/// No finalizer runs for `clone`, `swap`, `reserve`, `shrink_to_fit`,
/// `push`, `insert` or a growing `resize`, since none of these destroy an
/// element.
#[derive(Clone)]
pub struct SlotVec {
    buffer: RawBuffer,
    finalizer: Option<Finalizer>,
}

impl SlotVec {
    /// Creates an empty vector for elements of `element_size` bytes, with no
    /// finalizer.
    pub fn new(element_size: usize) -> Result<SlotVec> {
        Ok(SlotVec {
            buffer: RawBuffer::new(element_size)?,
            finalizer: None,
        })
    }

    /// Creates an empty vector with exactly `capacity` slots pre-allocated.
    pub fn with_capacity(element_size: usize, capacity: usize) -> Result<SlotVec> {
        Ok(SlotVec {
            buffer: RawBuffer::with_capacity(element_size, capacity)?,
            finalizer: None,
        })
    }

    /// Creates an empty vector whose elements are passed to `finalizer`
    /// before they are overwritten, removed or discarded.
    pub fn with_finalizer(
        element_size: usize,
        capacity: usize,
        finalizer: impl Fn(&mut [u8]) + 'static,
    ) -> Result<SlotVec> {
        Ok(SlotVec {
            buffer: RawBuffer::with_capacity(element_size, capacity)?,
            finalizer: Some(Arc::new(finalizer)),
        })
    }

    /// Returns the fixed byte size of one element.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.buffer.element_size()
    }

    /// Returns the number of slots the vector can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the bytes of the element at `index`, or `None` if out of
    /// bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.buffer.get(index)
    }

    /// Returns the mutable bytes of the element at `index`, or `None` if out
    /// of bounds.
    ///
    /// Writes through the returned slot are in-place edits of the element,
    /// not replacements: the finalizer is not invoked. Use
    /// [`set`](SlotVec::set) to replace an element with cleanup.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        self.buffer.get_mut(index)
    }

    /// Returns the bytes of the first element, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<&[u8]> {
        self.buffer.first()
    }

    /// Returns the bytes of the last element, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<&[u8]> {
        self.buffer.last()
    }

    /// Returns an iterator over the live elements as byte slices.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, u8> {
        self.buffer.iter()
    }

    /// Returns the live region as packed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Appends an element to the back of the vector.
    pub fn push(&mut self, element: &[u8]) -> Result<()> {
        self.buffer.push(element)
    }

    /// Inserts an element at `index`, shifting later elements one slot to
    /// the right. `index` may equal `len`.
    pub fn insert(&mut self, index: usize, element: &[u8]) -> Result<()> {
        if index > self.buffer.len() {
            return Err(Error::index_out_of_bounds(index, self.buffer.len()));
        }
        self.buffer.insert(index, element)
    }

    /// Replaces the element at `index`, finalizing the previous value first.
    ///
    /// The index and the replacement bytes are validated before the
    /// finalizer runs, so a rejected call leaves the old element intact and
    /// unfinalized.
    pub fn set(&mut self, index: usize, element: &[u8]) -> Result<()> {
        if index >= self.buffer.len() {
            return Err(Error::index_out_of_bounds(index, self.buffer.len()));
        }
        if element.len() != self.buffer.element_size() {
            return Err(Error::element_size_mismatch(
                self.buffer.element_size(),
                element.len(),
            ));
        }
        self.finalize_range(index..index + 1);
        self.buffer.set(index, element)
    }

    /// Removes the element at `index` after finalizing it, shifting later
    /// elements one slot to the left.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        if index >= self.buffer.len() {
            return Err(Error::index_out_of_bounds(index, self.buffer.len()));
        }
        self.finalize_range(index..index + 1);
        self.buffer.remove(index)
    }

    /// Removes the last element after finalizing it. Returns `false` if the
    /// vector was already empty.
    pub fn pop(&mut self) -> bool {
        let len = self.buffer.len();
        if len == 0 {
            return false;
        }
        self.finalize_range(len - 1..len);
        self.buffer.pop().is_some()
    }

    /// Discards all elements after finalizing each in ascending order.
    /// Capacity is untouched.
    pub fn clear(&mut self) {
        self.finalize_range(0..self.buffer.len());
        self.buffer.clear();
    }

    /// Keeps the first `len` elements, finalizing the discarded tail in
    /// ascending order.
    pub fn truncate(&mut self, len: usize) {
        self.finalize_range(len..self.buffer.len());
        self.buffer.truncate(len);
    }

    /// Grows capacity to exactly `min_capacity` slots if currently smaller.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<()> {
        self.buffer.reserve(min_capacity)
    }

    /// Reallocates so that capacity equals the current length.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.buffer.shrink_to_fit()
    }

    /// Resizes to `new_len` elements. Growth fills new slots with copies of
    /// `fill`; shrinking finalizes the discarded tail.
    pub fn resize(&mut self, new_len: usize, fill: &[u8]) -> Result<()> {
        if new_len < self.buffer.len() {
            self.truncate(new_len);
            Ok(())
        } else {
            self.buffer.resize(new_len, fill)
        }
    }

    /// Exchanges the contents of the two vectors in O(1). Each vector's
    /// finalizer travels with its elements; none is invoked.
    pub fn swap(&mut self, other: &mut SlotVec) {
        std::mem::swap(self, other);
    }

    /// Runs the finalizer over the live slots in `range`, ascending.
    fn finalize_range(&mut self, range: Range<usize>) {
        let Some(finalizer) = self.finalizer.clone() else {
            return;
        };
        for index in range {
            if let Some(slot) = self.buffer.get_mut(index) {
                finalizer(slot);
            }
        }
    }
}

impl Drop for SlotVec {
    fn drop(&mut self) {
        self.finalize_range(0..self.buffer.len());
    }
}

impl std::fmt::Debug for SlotVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotVec")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .field("element_size", &self.buffer.element_size())
            .field("has_finalizer", &self.finalizer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotvec_common::error::ErrorKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn value(v: u32) -> [u8; 4] {
        v.to_ne_bytes()
    }

    fn read(slot: &[u8]) -> u32 {
        u32::from_ne_bytes(slot.try_into().unwrap())
    }

    /// A vector of u32 elements whose finalizer records each finalized
    /// value in `log`.
    fn logged(values: &[u32]) -> (SlotVec, Rc<RefCell<Vec<u32>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let mut vec = SlotVec::with_finalizer(4, 0, move |slot: &mut [u8]| {
            sink.borrow_mut().push(read(slot));
        })
        .unwrap();
        for &v in values {
            vec.push(&value(v)).unwrap();
        }
        (vec, log)
    }

    #[test]
    fn basic_usage() {
        let mut vec = SlotVec::new(4).unwrap();
        vec.push(&value(1)).unwrap();
        vec.push(&value(2)).unwrap();
        vec.insert(1, &value(5)).unwrap();
        assert_eq!(vec.len(), 3);
        assert_eq!(read(vec.get(1).unwrap()), 5);
        assert_eq!(read(vec.first().unwrap()), 1);
        assert_eq!(read(vec.last().unwrap()), 2);
        assert_eq!(vec.iter().map(read).collect::<Vec<_>>(), [1, 5, 2]);
    }

    #[test]
    fn checked_indexing() {
        let mut vec = SlotVec::new(4).unwrap();
        vec.push(&value(1)).unwrap();

        assert!(vec.get(1).is_none());
        let err = vec.insert(2, &value(9)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::IndexOutOfBounds { .. }));
        let err = vec.set(1, &value(9)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::IndexOutOfBounds { .. }));
        let err = vec.remove(1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::IndexOutOfBounds { .. }));
    }

    #[test]
    fn pop_on_empty_is_harmless() {
        let (mut vec, log) = logged(&[]);
        assert!(!vec.pop());
        assert_eq!(vec.len(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn set_finalizes_previous_value() {
        let (mut vec, log) = logged(&[1, 2, 3]);
        vec.set(1, &value(20)).unwrap();
        assert_eq!(*log.borrow(), [2]);
        assert_eq!(read(vec.get(1).unwrap()), 20);
    }

    #[test]
    fn rejected_set_finalizes_nothing() {
        let (mut vec, log) = logged(&[1, 2]);
        assert!(vec.set(0, &[0u8; 3]).is_err());
        assert!(vec.set(5, &value(9)).is_err());
        assert!(log.borrow().is_empty());
        assert_eq!(read(vec.get(0).unwrap()), 1);
    }

    #[test]
    fn remove_and_pop_finalize_one_element() {
        let (mut vec, log) = logged(&[1, 2, 3]);
        vec.remove(0).unwrap();
        assert_eq!(*log.borrow(), [1]);

        assert!(vec.pop());
        assert_eq!(*log.borrow(), [1, 3]);
        assert_eq!(vec.len(), 1);
    }

    #[test]
    fn clear_finalizes_ascending() {
        let (mut vec, log) = logged(&[4, 5, 6]);
        vec.clear();
        assert_eq!(*log.borrow(), [4, 5, 6]);
        assert!(vec.is_empty());
    }

    #[test]
    fn truncate_finalizes_tail() {
        let (mut vec, log) = logged(&[1, 2, 3, 4]);
        vec.truncate(2);
        assert_eq!(*log.borrow(), [3, 4]);
        assert_eq!(vec.len(), 2);

        vec.truncate(5);
        assert_eq!(*log.borrow(), [3, 4]);
    }

    #[test]
    fn resize_finalizes_only_when_shrinking() {
        let (mut vec, log) = logged(&[1, 2, 3]);
        vec.resize(5, &value(0)).unwrap();
        assert!(log.borrow().is_empty());

        vec.resize(1, &value(0)).unwrap();
        assert_eq!(*log.borrow(), [2, 3, 0, 0]);
        assert_eq!(vec.len(), 1);
    }

    #[test]
    fn drop_finalizes_all_live_elements() {
        let (vec, log) = logged(&[7, 8, 9]);
        drop(vec);
        assert_eq!(*log.borrow(), [7, 8, 9]);
    }

    #[test]
    fn non_destructive_ops_do_not_finalize() {
        let (mut vec, log) = logged(&[1, 2]);
        vec.push(&value(3)).unwrap();
        vec.insert(0, &value(0)).unwrap();
        vec.reserve(32).unwrap();
        vec.shrink_to_fit().unwrap();
        let copy = vec.clone();
        std::mem::forget(copy);
        assert!(log.borrow().is_empty());
        drop(vec);
        assert_eq!(*log.borrow(), [0, 1, 2, 3]);
    }

    #[test]
    fn swap_exchanges_contents_without_finalizing() {
        let (mut a, log_a) = logged(&[1, 2]);
        let (mut b, log_b) = logged(&[8, 9]);

        a.swap(&mut b);
        assert!(log_a.borrow().is_empty());
        assert!(log_b.borrow().is_empty());
        assert_eq!(a.iter().map(read).collect::<Vec<_>>(), [8, 9]);
        assert_eq!(b.iter().map(read).collect::<Vec<_>>(), [1, 2]);

        a.swap(&mut b);
        assert_eq!(a.iter().map(read).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(b.iter().map(read).collect::<Vec<_>>(), [8, 9]);
    }

    #[test]
    fn clone_shares_the_finalizer() {
        let (vec, log) = logged(&[1, 2]);
        let copy = vec.clone();
        assert!(log.borrow().is_empty());

        drop(copy);
        assert_eq!(*log.borrow(), [1, 2]);
        drop(vec);
        assert_eq!(*log.borrow(), [1, 2, 1, 2]);
    }
}
