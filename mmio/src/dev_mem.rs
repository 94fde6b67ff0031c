use std::{
    fs::{File, OpenOptions},
    io,
    marker::PhantomData,
    os::unix::{fs::OpenOptionsExt, io::AsRawFd},
    path::{Path, PathBuf},
    ptr,
};

use libc::{c_void, munmap, MAP_FAILED, MAP_SHARED, O_SYNC, PROT_READ, PROT_WRITE};
// 64-bit file offsets, so pages above 2 GiB map on 32-bit glibc targets too
#[cfg(all(target_os = "linux", target_env = "gnu"))]
use libc::{mmap64 as mmap, off64_t as map_offset};
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
use libc::{mmap, off_t as map_offset};
use regmem_core::{check_offset, MemoryWindow, PageMapper, RegMemError, RegMemResult, PAGE_SIZE};

/// Physical memory device opened read-write for register access.
///
/// The device handle is closed when the value is dropped. Windows borrow the device, so they
/// are always unmapped before it is closed.
pub struct DevMem {
    file: File,
    path: PathBuf,
}

impl DevMem {
    /// Opens the device read-write with synchronous writes
    pub fn open(path: impl AsRef<Path>) -> RegMemResult<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(O_SYNC)
            .open(&path)
            .map_err(|source| RegMemError::DeviceOpenFailure { path: path.clone(), source })?;

        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if page_size != PAGE_SIZE as libc::c_long {
            tracing::warn!("System page size is {page_size}, windows are {PAGE_SIZE} bytes");
        }

        tracing::trace!("Opened '{}'", path.display());
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maps one page of the device, starting at `page_base`, shared and read-write
    pub fn map(&self, page_base: u32) -> RegMemResult<DevMemWindow<'_>> {
        let map_error = |source: io::Error| RegMemError::MapFailure {
            path: self.path.clone(),
            page_base,
            source,
        };

        let offset = map_offset::try_from(page_base)
            .map_err(|_| map_error(io::Error::from(io::ErrorKind::InvalidInput)))?;

        let mapped = unsafe {
            mmap(
                ptr::null_mut(),
                PAGE_SIZE,
                PROT_READ | PROT_WRITE,
                MAP_SHARED,
                self.file.as_raw_fd(),
                offset,
            )
        };
        if mapped == MAP_FAILED {
            return Err(map_error(io::Error::last_os_error()));
        }

        tracing::trace!("Mapped page {page_base:#010x} of '{}'", self.path.display());
        Ok(DevMemWindow { ptr: mapped.cast(), page_base, _device: PhantomData })
    }
}

impl PageMapper for DevMem {
    type Window<'a> = DevMemWindow<'a>;

    fn map_page(&self, page_base: u32) -> RegMemResult<DevMemWindow<'_>> {
        self.map(page_base)
    }

    fn unmap_page(&self, window: DevMemWindow<'_>) -> RegMemResult<()> {
        window.release()
    }
}

/// One mapped page of a [`DevMem`].
///
/// Accesses are volatile 32-bit loads and stores, so every store reaches the device right away
/// and no access is merged, split or elided.
pub struct DevMemWindow<'a> {
    ptr: *mut u8,
    page_base: u32,
    _device: PhantomData<&'a DevMem>,
}

impl DevMemWindow<'_> {
    /// Unmaps the page, reporting a failed `munmap`.
    ///
    /// Dropping the window also unmaps it, but can only log a failure.
    pub fn release(mut self) -> RegMemResult<()> {
        self.unmap()
    }

    fn unmap(&mut self) -> RegMemResult<()> {
        if self.ptr.is_null() {
            return Ok(());
        }

        let ptr = std::mem::replace(&mut self.ptr, ptr::null_mut());
        if unsafe { munmap(ptr as *mut c_void, PAGE_SIZE) } != 0 {
            return Err(RegMemError::UnmapFailure {
                page_base: self.page_base,
                source: io::Error::last_os_error(),
            });
        }

        tracing::trace!("Unmapped page {:#010x}", self.page_base);
        Ok(())
    }
}

impl MemoryWindow for DevMemWindow<'_> {
    fn page_base(&self) -> u32 {
        self.page_base
    }

    fn load32(&self, offset: usize) -> RegMemResult<u32> {
        check_offset(offset)?;
        // SAFETY: the page is mapped until `unmap()`, which needs `&mut self`, and a checked
        // offset keeps the aligned 4-byte access inside it
        Ok(unsafe { ptr::read_volatile(self.ptr.add(offset).cast::<u32>()) })
    }

    fn store32(&mut self, offset: usize, value: u32) -> RegMemResult<()> {
        check_offset(offset)?;
        // SAFETY: see load32()
        unsafe { ptr::write_volatile(self.ptr.add(offset).cast::<u32>(), value) };
        Ok(())
    }
}

impl Drop for DevMemWindow<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.unmap() {
            tracing::error!("{err}");
        }
    }
}
