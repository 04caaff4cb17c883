//! Conversion of panics into structured [`Fault`]s.
//!
//! This is a boundary utility: it never retries and holds no pipeline
//! logic. The panic location is captured by a panic hook chained in front
//! of the previously installed one.

use std::{
    any::Any,
    cell::RefCell,
    panic::{self, AssertUnwindSafe},
    sync::Once,
};
use tracing::error;
use turnstile_core::{Fault, Severity};

thread_local! {
    static LAST_LOCATION: RefCell<Option<(String, u32)>> = const { RefCell::new(None) };
}

static INSTALL: Once = Once::new();

/// Install the location-recording panic hook. Idempotent.
pub fn install_fault_hook() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if let Some(location) = info.location() {
                let recorded = (location.file().to_string(), location.line());
                LAST_LOCATION.with(|slot| *slot.borrow_mut() = Some(recorded));
            }
            previous(info);
        }));
    });
}

/// Run `f`, converting a panic into a [`Fault`] of severity
/// [`Severity::Error`] carrying the panic message and location.
pub fn catch_fault<T>(f: impl FnOnce() -> T) -> Result<T, Fault> {
    install_fault_hook();
    LAST_LOCATION.with(|slot| slot.borrow_mut().take());

    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        let (file, line) = LAST_LOCATION
            .with(|slot| slot.borrow_mut().take())
            .unwrap_or_else(|| ("<unknown>".to_string(), 0));

        error!(%message, file = %file, line, "Fault caught");
        Fault::new(Severity::Error, message, file, line)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
