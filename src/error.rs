use std::io;
use std::ptr::NonNull;
use winapi::um::errhandlingapi::SetLastError;

fn failure(function: &'static str) -> io::Error {
    let error = io::Error::last_os_error();
    let error = if error.raw_os_error() == Some(0) {
        io::Error::new(io::ErrorKind::Other, format!("{} failed", function))
    } else {
        error
    };
    log::debug!("{}: {}", function, error);
    error
}

pub(crate) fn non_null<T>(function: &'static str, call: impl FnOnce() -> *mut T) -> io::Result<NonNull<T>> {
    unsafe { SetLastError(0) };
    NonNull::new(call()).ok_or_else(|| failure(function))
}

pub(crate) fn non_zero<T: Copy + Default + PartialEq>(function: &'static str, call: impl FnOnce() -> T) -> io::Result<T> {
    unsafe { SetLastError(0) };
    let res = call();
    if res != T::default() { Ok(res) } else { Err(failure(function)) }
}

pub(crate) fn log_drop_failure(res: io::Result<()>, what: &'static str) {
    if let Err(e) = res {
        log::error!("failed to release {}: {}", what, e);
    }
}
