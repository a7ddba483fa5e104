//! The UI thread's message loop and its input interception point.
//!
//! Filters see every queued message before `TranslateMessage` and
//! `DispatchMessageW`. A filter that returns `true` swallows the message.
//! Filters are thread-local and live for as long as their [`FilterHandle`].

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, TranslateMessage, WM_HOTKEY,
};

type Filter = Rc<RefCell<dyn FnMut(&MSG) -> bool>>;

thread_local! {
    static FILTERS: RefCell<Vec<(u64, Filter)>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<u64> = const { Cell::new(1) };
}

/// Registration token for a message filter. Dropping it removes the
/// filter. Tied to the thread that installed it.
#[must_use = "the filter is removed as soon as the handle is dropped"]
pub struct FilterHandle {
    id: u64,
    _not_send: PhantomData<*const ()>,
}

impl Drop for FilterHandle {
    fn drop(&mut self) {
        FILTERS.with(|f| f.borrow_mut().retain(|(id, _)| *id != self.id));
    }
}

/// Installs `filter` ahead of normal dispatch on the current thread.
pub fn install_filter(filter: impl FnMut(&MSG) -> bool + 'static) -> FilterHandle {
    let id = NEXT_ID.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    });
    let filter: Filter = Rc::new(RefCell::new(filter));
    FILTERS.with(|f| f.borrow_mut().push((id, filter)));
    FilterHandle {
        id,
        _not_send: PhantomData,
    }
}

/// Offers `msg` to each filter in installation order.
///
/// The list is snapshotted first so a filter may install or drop filters
/// while it runs. A filter that is already running further up the stack
/// (a nested modal loop) is skipped.
fn intercepted(msg: &MSG) -> bool {
    let snapshot: Vec<Filter> = FILTERS.with(|f| f.borrow().iter().map(|(_, h)| h.clone()).collect());
    snapshot.iter().any(|filter| match filter.try_borrow_mut() {
        Ok(mut filter) => filter(msg),
        Err(_) => false,
    })
}

/// Runs until `WM_QUIT`.
///
/// `WM_HOTKEY` goes to `on_hotkey` with the hotkey id before any filter
/// sees it; everything else is offered to the filters and then dispatched.
pub fn run(mut on_hotkey: impl FnMut(i32)) {
    let mut msg = MSG::default();

    // GetMessageW returns -1 on error and 0 on WM_QUIT.
    while unsafe { GetMessageW(&mut msg, None, 0, 0) }.0 > 0 {
        if msg.message == WM_HOTKEY {
            on_hotkey(msg.wParam.0 as i32);
            continue;
        }
        if intercepted(&msg) {
            continue;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_handle_removes_filter() {
        // Arrange
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let handle = install_filter(move |_| {
            seen.set(seen.get() + 1);
            true
        });
        let msg = MSG::default();

        // Act
        let while_installed = intercepted(&msg);
        drop(handle);
        let after_drop = intercepted(&msg);

        // Assert
        assert!(while_installed);
        assert!(!after_drop);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn first_swallowing_filter_wins() {
        let second_ran = Rc::new(Cell::new(false));
        let flag = second_ran.clone();
        let _a = install_filter(|_| true);
        let _b = install_filter(move |_| {
            flag.set(true);
            true
        });

        assert!(intercepted(&MSG::default()));
        assert!(!second_ran.get());
    }
}
