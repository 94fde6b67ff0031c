use std::{cell::RefCell, collections::HashMap, io, rc::Rc};

use regmem_core::{
    MemoryWindow, PageBuffer, PageMapper, RegMemError, RegMemResult, PAGE_MASK, PAGE_SIZE,
};

#[derive(Default)]
pub struct FakeState {
    pub pages: HashMap<u32, PageBuffer>,
    pub opens: usize,
    pub maps: usize,
    pub unmaps: usize,
    pub fail_unmap: bool,
}

/// In-memory stand-in for the physical memory device.
///
/// Pages start zeroed; a page written through a window is kept once the window is released.
#[derive(Clone, Default)]
pub struct FakeMem(pub Rc<RefCell<FakeState>>);

impl FakeMem {
    pub fn poke(&self, address: u32, value: u32) {
        let page_base = address & !PAGE_MASK;
        let mut state = self.0.borrow_mut();
        let page = state.pages.entry(page_base).or_insert_with(|| PageBuffer::new(page_base));
        page.store32((address & PAGE_MASK) as usize, value).unwrap();
    }

    pub fn peek(&self, address: u32) -> u32 {
        let page_base = address & !PAGE_MASK;
        self.0
            .borrow()
            .pages
            .get(&page_base)
            .map_or(0, |page| page.load32((address & PAGE_MASK) as usize).unwrap())
    }

    /// Hands out this device to a runner, counting the opens
    pub fn open(&self) -> RegMemResult<FakeMem> {
        self.0.borrow_mut().opens += 1;
        Ok(self.clone())
    }

    pub fn state(&self) -> std::cell::Ref<'_, FakeState> {
        self.0.borrow()
    }
}

impl PageMapper for FakeMem {
    type Window<'a> = PageBuffer;

    fn map_page(&self, page_base: u32) -> RegMemResult<PageBuffer> {
        let mut state = self.0.borrow_mut();
        state.maps += 1;
        Ok(state.pages.get(&page_base).cloned().unwrap_or_else(|| PageBuffer::new(page_base)))
    }

    fn unmap_page(&self, window: PageBuffer) -> RegMemResult<()> {
        let mut state = self.0.borrow_mut();
        state.unmaps += 1;
        let page_base = window.page_base();
        assert_eq!(window.as_bytes().len(), PAGE_SIZE);
        state.pages.insert(page_base, window);

        if state.fail_unmap {
            return Err(RegMemError::UnmapFailure {
                page_base,
                source: io::Error::from(io::ErrorKind::InvalidInput),
            });
        }
        Ok(())
    }
}
