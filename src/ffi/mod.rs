//! C ABI for mobile hosts. Rules cross the boundary as the same JSON array the
//! rules snapshot stores; results come back as JSON strings that callers release
//! with [`balance_string_free`].

use std::{
    ffi::{CStr, CString},
    os::raw::{c_char, c_int},
    ptr,
    sync::OnceLock,
};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    domain::RecurringRule,
    errors::{BalanceError, Result},
    schedule::{monthly_total, summarize, upcoming_payments, Summary, UpcomingPayment},
};

/// Semantic version of the Rust core (mirrors `Cargo.toml`).
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Semantic version of the FFI surface. Bumps when ABI/contract changes.
pub const FFI_VERSION: &str = "0.1.0";

/// Error categories surfaced across the FFI boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCategory {
    Ok = 0,
    Validation = 1,
    Persistence = 2,
    Internal = 3,
}

impl From<FfiErrorCategory> for c_int {
    fn from(value: FfiErrorCategory) -> Self {
        value as c_int
    }
}

pub fn classify_error(err: &BalanceError) -> FfiErrorCategory {
    match err {
        BalanceError::InvalidInput(_) | BalanceError::InvalidRef(_) | BalanceError::Serde(_) => {
            FfiErrorCategory::Validation
        }
        BalanceError::Io(_) | BalanceError::Persistence(_) => FfiErrorCategory::Persistence,
        BalanceError::Config(_) => FfiErrorCategory::Internal,
    }
}

#[derive(Serialize)]
struct FfiUpcoming<'a> {
    payments: Vec<UpcomingPayment<'a>>,
    summary: Summary,
}

/// Returns the core (Rust) semantic version as a C string.
#[no_mangle]
pub extern "C" fn balance_core_version() -> *const c_char {
    static CORE: OnceLock<CString> = OnceLock::new();
    CORE.get_or_init(|| CString::new(CORE_VERSION).unwrap_or_default())
        .as_ptr()
}

/// Returns the FFI interface semantic version as a C string.
#[no_mangle]
pub extern "C" fn balance_ffi_version() -> *const c_char {
    static FFI: OnceLock<CString> = OnceLock::new();
    FFI.get_or_init(|| CString::new(FFI_VERSION).unwrap_or_default())
        .as_ptr()
}

/// Computes upcoming payments for `rules_json` as of `from_iso` (`YYYY-MM-DD`).
///
/// Returns a JSON object `{ "payments": [...], "summary": {...} }`, or null with
/// `out_error` set.
#[no_mangle]
pub extern "C" fn balance_upcoming_json(
    rules_json: *const c_char,
    from_iso: *const c_char,
    horizon_days: u32,
    limit: u32,
    out_error: *mut *mut c_char,
) -> *mut c_char {
    clear_error(out_error);
    let outcome = (|| -> Result<String> {
        let rules = unsafe { parse_rules(rules_json)? };
        let from = unsafe { parse_date(from_iso)? };
        let payments = upcoming_payments(&rules, from, horizon_days, limit as usize);
        let summary = summarize(&payments);
        Ok(serde_json::to_string(&FfiUpcoming { payments, summary })?)
    })();
    match outcome {
        Ok(json) => CString::new(json)
            .map(CString::into_raw)
            .unwrap_or(ptr::null_mut()),
        Err(err) => {
            unsafe { write_error(out_error, &err) };
            ptr::null_mut()
        }
    }
}

/// Writes the monthly recurring total of `rules_json` to `out_total`.
///
/// Returns an [`FfiErrorCategory`] code; `0` means success.
#[no_mangle]
pub extern "C" fn balance_monthly_total(
    rules_json: *const c_char,
    out_total: *mut u64,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if out_total.is_null() {
        let err = BalanceError::InvalidInput("output pointer is null".into());
        unsafe { write_error(out_error, &err) };
        return classify_error(&err).into();
    }
    match unsafe { parse_rules(rules_json) } {
        Ok(rules) => {
            unsafe { *out_total = monthly_total(&rules) };
            FfiErrorCategory::Ok.into()
        }
        Err(err) => {
            unsafe { write_error(out_error, &err) };
            classify_error(&err).into()
        }
    }
}

/// Releases a string previously returned by this library.
#[no_mangle]
pub extern "C" fn balance_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(value));
    }
}

fn clear_error(out_error: *mut *mut c_char) {
    if out_error.is_null() {
        return;
    }
    unsafe {
        *out_error = ptr::null_mut();
    }
}

unsafe fn write_error(out_error: *mut *mut c_char, err: &BalanceError) {
    if out_error.is_null() {
        return;
    }
    if let Ok(cstring) = CString::new(err.to_string()) {
        *out_error = cstring.into_raw();
    }
}

unsafe fn c_string_argument(value: *const c_char) -> Result<String> {
    if value.is_null() {
        return Err(BalanceError::InvalidInput(
            "null string pointer received".into(),
        ));
    }
    CStr::from_ptr(value)
        .to_str()
        .map(|s| s.to_string())
        .map_err(|err| BalanceError::InvalidInput(err.to_string()))
}

unsafe fn parse_rules(value: *const c_char) -> Result<Vec<RecurringRule>> {
    let raw = c_string_argument(value)?;
    Ok(serde_json::from_str(&raw)?)
}

unsafe fn parse_date(value: *const c_char) -> Result<NaiveDate> {
    let raw = c_string_argument(value)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| BalanceError::InvalidInput(format!("invalid date `{raw}`: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = r#"[
        {"id":"00000000-0000-0000-0000-000000000001","name":"Rent","amount":1000,
         "frequency":"monthly","anchor_date":"2025-01-01","is_active":true},
        {"id":"00000000-0000-0000-0000-000000000002","name":"Lunch","amount":500,
         "frequency":"weekly","anchor_date":"2025-01-01","is_active":true}
    ]"#;

    #[test]
    fn exposes_versions() {
        assert!(!balance_core_version().is_null());
        assert!(!balance_ffi_version().is_null());
    }

    #[test]
    fn upcoming_json_round_trip() {
        let rules = CString::new(RULES).unwrap();
        let from = CString::new("2025-01-03").unwrap();
        let mut error: *mut c_char = ptr::null_mut();
        let result = balance_upcoming_json(rules.as_ptr(), from.as_ptr(), 7, 3, &mut error);
        assert!(error.is_null());
        assert!(!result.is_null());

        let json = unsafe { CStr::from_ptr(result) }.to_str().unwrap().to_string();
        balance_string_free(result);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["count"], 1);
        assert_eq!(value["summary"]["total_amount"], 500);
        assert_eq!(value["payments"][0]["date"], "2025-01-08");
        assert_eq!(value["payments"][0]["rule"]["name"], "Lunch");
    }

    #[test]
    fn invalid_date_sets_error() {
        let rules = CString::new(RULES).unwrap();
        let from = CString::new("January 3rd").unwrap();
        let mut error: *mut c_char = ptr::null_mut();
        let result = balance_upcoming_json(rules.as_ptr(), from.as_ptr(), 7, 3, &mut error);
        assert!(result.is_null());
        assert!(!error.is_null());
        balance_string_free(error);
    }

    #[test]
    fn monthly_total_reports_codes() {
        let rules = CString::new(RULES).unwrap();
        let mut total = 0u64;
        let code = balance_monthly_total(rules.as_ptr(), &mut total, ptr::null_mut());
        assert_eq!(code, 0);
        assert_eq!(total, 1000);

        let broken = CString::new("[{").unwrap();
        let mut error: *mut c_char = ptr::null_mut();
        let code = balance_monthly_total(broken.as_ptr(), &mut total, &mut error);
        assert_eq!(code, c_int::from(FfiErrorCategory::Validation));
        balance_string_free(error);
    }
}
