//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mini_shop_api::{
    ApiConfig, BaseUrl, HttpClient, Identity, Modal, Platform, PlatformError, SessionStore,
    Toast, UserId,
};

/// A platform double that records every interaction.
#[derive(Default)]
pub struct RecordingPlatform {
    codes: Mutex<VecDeque<String>>,
    pub login_code_calls: AtomicUsize,
    pub accept_modal: AtomicBool,
    modal_delay: Mutex<Option<Duration>>,
    sheet_choice: Mutex<Option<usize>>,
    fail_primitives: AtomicBool,
    pub modals: Mutex<Vec<Modal>>,
    pub toasts: Mutex<Vec<Toast>>,
    pub navigations: Mutex<Vec<String>>,
    pub calls: Mutex<Vec<String>>,
    pub clipboard: Mutex<Vec<String>>,
}

impl RecordingPlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues one-time login codes; an empty queue fails `login_code`.
    pub fn with_codes(codes: &[&str]) -> Arc<Self> {
        let platform = Self::default();
        platform
            .codes
            .lock()
            .unwrap()
            .extend(codes.iter().map(|c| (*c).to_string()));
        Arc::new(platform)
    }

    pub fn accepting(self: Arc<Self>) -> Arc<Self> {
        self.accept_modal.store(true, Ordering::SeqCst);
        self
    }

    pub fn slow_modal(self: Arc<Self>, delay: Duration) -> Arc<Self> {
        *self.modal_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn choosing(self: Arc<Self>, index: usize) -> Arc<Self> {
        *self.sheet_choice.lock().unwrap() = Some(index);
        self
    }

    pub fn failing(self: Arc<Self>) -> Arc<Self> {
        self.fail_primitives.store(true, Ordering::SeqCst);
        self
    }

    pub fn modal_count(&self) -> usize {
        self.modals.lock().unwrap().len()
    }

    pub fn toast_titles(&self) -> Vec<String> {
        self.toasts
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    fn primitive_result(&self) -> Result<(), PlatformError> {
        if self.fail_primitives.load(Ordering::SeqCst) {
            Err(PlatformError::Failed {
                message: "denied".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn login_code(&self) -> Result<String, PlatformError> {
        self.login_code_calls.fetch_add(1, Ordering::SeqCst);
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(PlatformError::Unavailable {
                capability: "login",
            })
    }

    async fn show_modal(&self, modal: &Modal) -> Result<bool, PlatformError> {
        self.modals.lock().unwrap().push(modal.clone());
        let delay = *self.modal_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.accept_modal.load(Ordering::SeqCst))
    }

    fn show_toast(&self, toast: &Toast) {
        self.toasts.lock().unwrap().push(toast.clone());
    }

    fn navigate_to(&self, route: &str) -> Result<(), PlatformError> {
        self.navigations.lock().unwrap().push(route.to_string());
        Ok(())
    }

    async fn show_action_sheet(&self, _items: &[String]) -> Result<usize, PlatformError> {
        let choice = *self.sheet_choice.lock().unwrap();
        choice.ok_or(PlatformError::Cancelled)
    }

    fn make_phone_call(&self, number: &str) -> Result<(), PlatformError> {
        self.calls.lock().unwrap().push(number.to_string());
        self.primitive_result()
    }

    fn set_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        self.clipboard.lock().unwrap().push(text.to_string());
        self.primitive_result()
    }
}

/// Creates a client pointed at a mock server.
pub fn create_client(base_url: &str, platform: Arc<RecordingPlatform>) -> HttpClient {
    let config = ApiConfig::builder()
        .base_url(BaseUrl::new(base_url).unwrap())
        .build()
        .unwrap();
    HttpClient::new(config, SessionStore::in_memory(), platform)
}

/// Stores a complete session as if the user had logged in before.
pub fn log_in(client: &HttpClient, token: &str) {
    client
        .session()
        .establish(
            token,
            &Identity::new(UserId::Number(1), Some("Ann".to_string()), None),
        )
        .unwrap();
}

/// Starts a server that advertises a 500-byte body, sends a few bytes of it
/// and closes the connection. Returns its base URL.
pub fn truncated_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\n\r\n{\"code\":-1,\"",
            );
            let _ = stream.flush();
        }
    });
    format!("http://{addr}")
}
