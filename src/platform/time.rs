//! Timers and clocks
//!
//! Browser builds use `setTimeout` and `Date.now()`; native builds use
//! tokio's timer, so `sleep` must be awaited inside a tokio runtime.

use std::time::Duration;

/// Wall clock in Unix milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Suspend the caller for `duration`
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    use wasm_bindgen::JsValue;

    // Round up so the caller never wakes before the deadline
    let ms = (duration.as_secs_f64() * 1000.0).ceil().min(i32::MAX as f64) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .ok()
        });
        if scheduled.is_none() {
            log::warn!("setTimeout unavailable, resolving immediately");
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Monotonic seconds since creation
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    #[cfg(target_arch = "wasm32")]
    origin_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    origin: tokio::time::Instant,
}

impl Stopwatch {
    #[cfg(target_arch = "wasm32")]
    pub fn start() -> Self {
        Self {
            origin_ms: js_sys::Date::now(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn start() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn elapsed_secs(&self) -> f64 {
        ((js_sys::Date::now() - self.origin_ms) / 1000.0).max(0.0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn elapsed_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}
