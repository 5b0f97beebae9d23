use std::ptr::{self, NonNull};
use std::{fmt, slice};

use pcsc_ffi_types::functions::SCardFreeMemoryFn;
use pcsc_ffi_types::status::SCARD_S_SUCCESS;
use pcsc_ffi_types::{Dword, LpCVoid, ScardContext};

use crate::ScardResult;

enum Storage<T> {
    Layer(Vec<T>),
    Service {
        data: NonNull<T>,
        len: usize,
        context: ScardContext,
        free: SCardFreeMemoryFn,
    },
}

/// Owned, length-tagged native storage.
///
/// The memory is either allocated by this crate or by the smart card service (`SCARD_AUTOALLOCATE`). Service memory
/// is released with `SCardFreeMemory` on drop. An empty buffer is always passed to the native side as a null pointer.
pub struct NativeBuffer<T: Copy> {
    storage: Storage<T>,
}

// SAFETY: the buffer exclusively owns its memory. `SCardFreeMemory` may be called from any thread.
unsafe impl<T: Copy + Send> Send for NativeBuffer<T> {}

impl<T: Copy + Default> NativeBuffer<T> {
    /// Creates an empty layer-allocated buffer.
    pub fn new() -> Self {
        Self {
            storage: Storage::Layer(Vec::new()),
        }
    }

    /// Allocates a zeroed buffer of `capacity` elements to be filled by the native side.
    pub fn with_capacity(capacity: usize) -> ScardResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        data.resize(capacity, T::default());

        Ok(Self::from_vec(data))
    }

    /// Copies the `items` into a fresh layer-allocated buffer.
    pub fn try_from_slice(items: &[T]) -> ScardResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(items.len())?;
        data.extend_from_slice(items);

        Ok(Self::from_vec(data))
    }

    /// Takes ownership of a layer-allocated vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            storage: Storage::Layer(data),
        }
    }

    /// Takes ownership of memory allocated by the smart card service.
    ///
    /// # Safety
    ///
    /// - `data` is either null or points to `len` initialized elements returned by the service through
    ///   `SCARD_AUTOALLOCATE` for the `context`.
    /// - The memory is not released elsewhere.
    pub unsafe fn from_service(data: *mut T, len: usize, context: ScardContext, free: SCardFreeMemoryFn) -> Self {
        match NonNull::new(data) {
            Some(data) => Self {
                storage: Storage::Service {
                    data,
                    len,
                    context,
                    free,
                },
            },
            None => Self::new(),
        }
    }
}

impl<T: Copy + Default> Default for NativeBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> NativeBuffer<T> {
    /// Number of valid elements.
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Layer(data) => data.len(),
            Storage::Service { len, .. } => *len,
        }
    }

    /// Reports whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of valid elements as the native length type.
    pub fn native_len(&self) -> ScardResult<Dword> {
        Ok(Dword::try_from(self.len())?)
    }

    /// Reports whether this crate allocated the memory.
    pub fn is_layer_allocated(&self) -> bool {
        matches!(self.storage, Storage::Layer(_))
    }

    /// Valid elements.
    pub fn as_slice(&self) -> &[T] {
        match &self.storage {
            Storage::Layer(data) => data,
            // SAFETY: `from_service` requires `len` initialized elements behind `data`.
            Storage::Service { data, len, .. } => unsafe { slice::from_raw_parts(data.as_ptr(), *len) },
        }
    }

    /// Pointer for input parameters. Null when the buffer is empty.
    pub fn as_ptr(&self) -> *const T {
        if self.is_empty() {
            ptr::null()
        } else {
            self.as_slice().as_ptr()
        }
    }

    /// Pointer for output parameters. Null when the buffer is empty.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match &mut self.storage {
            Storage::Layer(data) if data.is_empty() => ptr::null_mut(),
            Storage::Layer(data) => data.as_mut_ptr(),
            Storage::Service { data, .. } => data.as_ptr(),
        }
    }

    /// Records how many elements the native side returned. It never grows the buffer.
    pub fn set_len(&mut self, returned: usize) {
        match &mut self.storage {
            Storage::Layer(data) => data.truncate(returned),
            Storage::Service { len, .. } => *len = returned.min(*len),
        }
    }
}

impl<T: Copy> Drop for NativeBuffer<T> {
    fn drop(&mut self) {
        if let Storage::Service {
            data, context, free, ..
        } = self.storage
        {
            // SAFETY: the memory was returned by the service for the `context` and is released only here.
            let status = unsafe { free(context, data.as_ptr() as LpCVoid) };
            if status != SCARD_S_SUCCESS {
                warn!(status, "SCardFreeMemory failed");
            }
        }
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for NativeBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBuffer")
            .field("layer_allocated", &self.is_layer_allocated())
            .field("data", &self.as_slice())
            .finish()
    }
}
