//! Lernova UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The UI itself is the web frontend; this layer only hosts it in native windows.

pub mod webview_app;
