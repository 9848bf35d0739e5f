//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use product_core::{
    Applied, Field, HttpMethod, HttpRequest, NetworkError, Operation, Product, ProductClient,
    Session,
};

/// Opaque handle to a `ProductClient`.
pub struct FfiProductClient {
    pub(crate) inner: ProductClient,
}

/// Opaque handle to a `Session`: the product list plus the form.
pub struct FfiSession {
    pub(crate) inner: Session,
}

/// Opaque operation remembered by a pending request.
pub struct FfiOperation {
    pub(crate) inner: Operation,
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Move a Rust string onto the C heap. Interior NUL bytes are dropped
/// rather than failing the whole call.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    let c = CString::new(s).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|b| *b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    c.into_raw()
}

/// Copy a caller-owned C string. Invalid UTF-8 is replaced, not rejected.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn from_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

/// Free a string produced by `to_c_string`. Null is ignored.
pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Draft field selector accepted by `product_session_set_field` and
/// `product_session_draft_field`: 0 = name, 1 = price, 2 = description.
pub(crate) fn field_from_raw(raw: u32) -> Option<Field> {
    match raw {
        0 => Some(Field::Name),
        1 => Some(Field::Price),
        2 => Some(Field::Description),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let path = to_c_string(req.path);
        let body = req.body.map_or(std::ptr::null_mut(), to_c_string);

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        }))
    }

    /// Release a request built by `from_core`. Null is ignored.
    pub(crate) fn free(req: *mut Self) {
        if req.is_null() {
            return;
        }
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize);
            let headers = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pending operations
// ---------------------------------------------------------------------------

/// Which remote interaction a pending request belongs to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiOperationKind {
    Refresh = 0,
    Create = 1,
    Update = 2,
    Delete = 3,
}

impl From<&Operation> for FfiOperationKind {
    fn from(op: &Operation) -> Self {
        match op {
            Operation::Refresh => FfiOperationKind::Refresh,
            Operation::Create => FfiOperationKind::Create,
            Operation::Update(_) => FfiOperationKind::Update,
            Operation::Delete(_) => FfiOperationKind::Delete,
        }
    }
}

/// A request the host must execute, paired with the operation to hand back
/// to `product_session_apply` together with the response.
#[repr(C)]
pub struct FfiPendingOperation {
    pub kind: FfiOperationKind,
    pub request: *mut FfiHttpRequest,
    pub operation: *mut FfiOperation,
}

impl FfiPendingOperation {
    pub(crate) fn from_core(pending: product_core::Pending) -> *mut Self {
        let kind = FfiOperationKind::from(&pending.operation);
        Box::into_raw(Box::new(FfiPendingOperation {
            kind,
            request: FfiHttpRequest::from_core(pending.request),
            operation: Box::into_raw(Box::new(FfiOperation {
                inner: pending.operation,
            })),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request.
/// A `status` of 0 reports that the request produced no response at all;
/// `body` may then carry a description of the transport failure.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// A single product exposed to C.
#[repr(C)]
pub struct FfiProduct {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub price: *mut c_char,
    pub description: *mut c_char,
}

impl FfiProduct {
    fn from_core(product: &Product) -> Self {
        FfiProduct {
            id: to_c_string(product.id.to_string()),
            name: to_c_string(product.name.clone()),
            price: to_c_string(product.price.clone()),
            description: to_c_string(product.description.clone()),
        }
    }

    fn free_fields(&self) {
        free_c_string(self.id);
        free_c_string(self.name);
        free_c_string(self.price);
        free_c_string(self.description);
    }
}

/// A snapshot of the session's product list.
#[repr(C)]
pub struct FfiProductList {
    pub items: *mut FfiProduct,
    pub len: u32,
}

impl FfiProductList {
    pub(crate) fn from_core(products: &[Product]) -> *mut Self {
        let len = products.len() as u32;
        let items = if products.is_empty() {
            std::ptr::null_mut()
        } else {
            let items: Box<[FfiProduct]> = products.iter().map(FfiProduct::from_core).collect();
            Box::into_raw(items) as *mut FfiProduct
        };
        Box::into_raw(Box::new(FfiProductList { items, len }))
    }

    pub(crate) fn free(list: *mut Self) {
        if list.is_null() {
            return;
        }
        let list = unsafe { Box::from_raw(list) };
        if !list.items.is_null() && list.len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize);
            let items = unsafe { Box::from_raw(slice) };
            for item in items.iter() {
                item.free_fields();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiApplyResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Http = 2,
    Decode = 3,
    Encode = 4,
    Panic = 5,
    NullArg = 6,
}

impl From<&NetworkError> for FfiErrorCode {
    fn from(err: &NetworkError) -> Self {
        match err {
            NetworkError::Transport(_) => FfiErrorCode::Transport,
            NetworkError::Status { .. } => FfiErrorCode::Http,
            NetworkError::Decode(_) => FfiErrorCode::Decode,
            NetworkError::Encode(_) => FfiErrorCode::Encode,
        }
    }
}

/// What a successful apply did.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiApplied {
    Nothing = 0,
    Refreshed = 1,
    Saved = 2,
    Deleted = 3,
}

/// Result envelope for `product_session_apply`.
///
/// On success `error_code` is `Ok` and `error_message` is null. When
/// `needs_refresh` is set the host should issue `product_session_refresh`.
/// On failure the session is unchanged, `error_message` is a C string and
/// `http_status` carries the server's status when there was one.
#[repr(C)]
pub struct FfiApplyResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub applied: FfiApplied,
    pub needs_refresh: bool,
}

impl FfiApplyResult {
    pub(crate) fn from_core(applied: Applied) -> *mut Self {
        let kind = match &applied {
            Applied::Refreshed(_) => FfiApplied::Refreshed,
            Applied::Saved(_) => FfiApplied::Saved,
            Applied::Deleted(_) => FfiApplied::Deleted,
        };
        Self::boxed(FfiErrorCode::Ok, None, 0, kind, applied.needs_refresh())
    }

    pub(crate) fn from_error(err: NetworkError) -> *mut Self {
        let code = FfiErrorCode::from(&err);
        let status = err.status().unwrap_or(0);
        Self::boxed(code, Some(err.to_string()), status, FfiApplied::Nothing, false)
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null argument: {name}");
        Self::boxed(FfiErrorCode::NullArg, Some(msg), 0, FfiApplied::Nothing, false)
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, Some(msg.to_string()), 0, FfiApplied::Nothing, false)
    }

    fn boxed(
        error_code: FfiErrorCode,
        message: Option<String>,
        http_status: u16,
        applied: FfiApplied,
        needs_refresh: bool,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiApplyResult {
            error_code,
            error_message: message.map_or(std::ptr::null_mut(), to_c_string),
            http_status,
            applied,
            needs_refresh,
        }))
    }
}
