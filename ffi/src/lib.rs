//! C-ABI wrapper around `product-core`.
//!
//! # Overview
//! Lets a native UI own the screen while the Rust session owns the state:
//! the product list, the draft, and the create/edit mode. The host executes
//! every HTTP request itself and feeds the response back.
//!
//! A typical host loop:
//! 1. `product_session_refresh` / `_submit` / `_delete` return a pending
//!    operation holding an `FfiHttpRequest`.
//! 2. The host executes the request and calls `product_session_apply` with
//!    the pending operation and the response.
//! 3. If the result has `needs_refresh`, the host runs step 1 with
//!    `product_session_refresh`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The C caller owns all returned pointers and must call the matching
//!   `product_free_*` function to release them.
//! - Handles are not thread-safe; use each session from one thread at a time.

pub mod types;

use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use product_core::{ClientConfig, HttpResponse, NetworkError, ProductClient, ProductId, Session};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `ProductClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `product_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn product_client_new(base_url: *const c_char) -> *mut FfiProductClient {
    catch_unwind(|| match unsafe { from_c_str(base_url) } {
        Some(url) => Box::into_raw(Box::new(FfiProductClient {
            inner: ProductClient::new(&url),
        })),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a `ProductClient` from `PRODUCTS_API_URL`, falling back to the
/// default local address.
#[unsafe(no_mangle)]
pub extern "C" fn product_client_from_env() -> *mut FfiProductClient {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiProductClient {
            inner: ClientConfig::from_env().client(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `product_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn product_client_free(client: *mut FfiProductClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Session lifecycle and form state
// ---------------------------------------------------------------------------

/// Create an empty session in create mode. The list is empty until the
/// first refresh is applied.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_new() -> *mut FfiSession {
    catch_unwind(|| Box::into_raw(Box::new(FfiSession { inner: Session::new() })))
        .unwrap_or(std::ptr::null_mut())
}

/// Free a session. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_free(session: *mut FfiSession) {
    if !session.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(session) });
        });
    }
}

/// Clear the draft and leave edit mode. Returns false if `session` is null.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_begin_create(session: *mut FfiSession) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return false;
        }
        let session = unsafe { &mut *session };
        session.inner.begin_create();
        true
    }))
    .unwrap_or(false)
}

/// Load the listed product with `id` into the draft and select it.
///
/// Returns false, leaving the form alone, if an argument is null or the
/// current list has no such product.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_begin_edit(session: *mut FfiSession, id: *const c_char) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return false;
        }
        let Some(id) = (unsafe { from_c_str(id) }) else {
            return false;
        };
        let session = unsafe { &mut *session };
        session.inner.begin_edit_by_id(&ProductId::new(id))
    }))
    .unwrap_or(false)
}

/// Write one draft field: 0 = name, 1 = price, 2 = description.
///
/// Returns false if an argument is null or `field` is out of range.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_set_field(
    session: *mut FfiSession,
    field: u32,
    value: *const c_char,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return false;
        }
        let (Some(field), Some(value)) = (field_from_raw(field), unsafe { from_c_str(value) }) else {
            return false;
        };
        let session = unsafe { &mut *session };
        session.inner.set_field(field, value);
        true
    }))
    .unwrap_or(false)
}

/// Read one draft field (same numbering as `product_session_set_field`).
///
/// Returns null on a null session or an out-of-range field. The caller
/// frees the string with `product_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_draft_field(session: *const FfiSession, field: u32) -> *mut c_char {
    catch_unwind(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let Some(field) = field_from_raw(field) else {
            return std::ptr::null_mut();
        };
        let session = unsafe { &*session };
        to_c_string(session.inner.form().get(field).to_string())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Id of the product being edited, or null in create mode.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_selected_id(session: *const FfiSession) -> *mut c_char {
    catch_unwind(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let session = unsafe { &*session };
        session
            .inner
            .selected_id()
            .map_or(std::ptr::null_mut(), |id| to_c_string(id.to_string()))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// True when the next submit updates the selected product.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_is_editing(session: *const FfiSession) -> bool {
    catch_unwind(|| !session.is_null() && unsafe { &*session }.inner.form().is_editing())
        .unwrap_or(false)
}

/// Snapshot of the current product list. Free with `product_free_list`.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_products(session: *const FfiSession) -> *mut FfiProductList {
    catch_unwind(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        FfiProductList::from_core(unsafe { &*session }.inner.products())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Pending operations
// ---------------------------------------------------------------------------

/// Build the list request.
///
/// Returns null if an argument is null. Free with `product_free_pending`.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_refresh(
    session: *const FfiSession,
    client: *const FfiProductClient,
) -> *mut FfiPendingOperation {
    catch_unwind(|| {
        if session.is_null() || client.is_null() {
            return std::ptr::null_mut();
        }
        let (session, client) = unsafe { (&*session, &*client) };
        FfiPendingOperation::from_core(session.inner.refresh_request(&client.inner))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the create or update the form currently calls for.
///
/// Returns null when no request could be built. If `error` is non-null it
/// receives the reason: `Ok` on success, `NullArg` for a null handle,
/// `Encode` when the draft cannot be serialized, `Panic` otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_submit(
    session: *const FfiSession,
    client: *const FfiProductClient,
    error: *mut FfiErrorCode,
) -> *mut FfiPendingOperation {
    let (pending, code) = catch_unwind(|| {
        if session.is_null() || client.is_null() {
            return (std::ptr::null_mut(), FfiErrorCode::NullArg);
        }
        let (session, client) = unsafe { (&*session, &*client) };
        match session.inner.submit_request(&client.inner) {
            Ok(pending) => (FfiPendingOperation::from_core(pending), FfiErrorCode::Ok),
            Err(err) => (std::ptr::null_mut(), FfiErrorCode::from(&err)),
        }
    })
    .unwrap_or((std::ptr::null_mut(), FfiErrorCode::Panic));
    if !error.is_null() {
        unsafe { *error = code };
    }
    pending
}

/// Build the delete request for `id`. The id need not be in the list.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_delete(
    session: *const FfiSession,
    client: *const FfiProductClient,
    id: *const c_char,
) -> *mut FfiPendingOperation {
    catch_unwind(|| {
        if session.is_null() || client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(id) = (unsafe { from_c_str(id) }) else {
            return std::ptr::null_mut();
        };
        let (session, client) = unsafe { (&*session, &*client) };
        FfiPendingOperation::from_core(session.inner.delete_request(&client.inner, &ProductId::new(id)))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Convert an `FfiHttpResponse` to the outcome of a round-trip.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, NetworkError> {
    let body = unsafe { from_c_str(resp.body) }.unwrap_or_default();
    if resp.status == 0 {
        let reason = if body.is_empty() {
            "host reported no response".to_string()
        } else {
            body
        };
        return Err(NetworkError::Transport(reason));
    }
    Ok(HttpResponse::new(resp.status, body))
}

/// Apply the response to a pending operation.
///
/// The pending operation is not consumed; free it afterwards with
/// `product_free_pending`. Always returns a result to free with
/// `product_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn product_session_apply(
    session: *mut FfiSession,
    client: *const FfiProductClient,
    pending: *const FfiPendingOperation,
    response: *const FfiHttpResponse,
) -> *mut FfiApplyResult {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return FfiApplyResult::null_arg("session");
        }
        if client.is_null() {
            return FfiApplyResult::null_arg("client");
        }
        if pending.is_null() || unsafe { &*pending }.operation.is_null() {
            return FfiApplyResult::null_arg("pending");
        }
        if response.is_null() {
            return FfiApplyResult::null_arg("response");
        }
        let session = unsafe { &mut *session };
        let client = unsafe { &*client };
        let operation = unsafe { &*(*pending).operation };
        let outcome = ffi_response_to_core(unsafe { &*response });
        match session.inner.apply(&client.inner, &operation.inner, outcome) {
            Ok(applied) => FfiApplyResult::from_core(applied),
            Err(e) => FfiApplyResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiApplyResult::panic("panic in product_session_apply"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a pending operation and the request it holds. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn product_free_pending(pending: *mut FfiPendingOperation) {
    if pending.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let pending = unsafe { Box::from_raw(pending) };
        FfiHttpRequest::free(pending.request);
        if !pending.operation.is_null() {
            drop(unsafe { Box::from_raw(pending.operation) });
        }
    });
}

/// Free a result returned by `product_session_apply`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn product_free_result(result: *mut FfiApplyResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
    });
}

/// Free a list returned by `product_session_products`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn product_free_list(list: *mut FfiProductList) {
    let _ = catch_unwind(|| FfiProductList::free(list));
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn product_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
