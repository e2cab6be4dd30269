//! Window and webview shell using `wry` + `tao`.
//!
//! Architecture:
//! - Every application window owns one webview loading the frontend: the dev
//!   server in dev mode, otherwise `dist/` served via the `lernova://` protocol.
//! - Windows live in a [`WindowRegistry`] owned by the event loop. Close
//!   removes the entry; the app quits once the registry is empty (not on macOS).
//!   On macOS, re-activating the app with no windows opens a fresh one.
//! - Popup requests from a page open a new application window instead.
//! - Webview download callbacks feed the [`DownloadBridge`]; tracking happens
//!   off the UI thread.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder};
use tracing::{debug, error, info};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::app::App;
use crate::managers::window_registry::{WindowRegistry, WindowRegistryTrait};
use crate::platform::{self, LifecycleAction};
use crate::services::frontend_assets::{self, PROTOCOL};
use crate::types::errors::WindowError;
use crate::types::settings::parse_hex_color;

#[derive(Debug)]
enum UserEvent {
    /// A page asked for a new window (popup, `target=_blank`).
    OpenWindow(String),
    /// First page load started in this window; time to show it.
    ShowWindow(tao::window::WindowId),
}

struct ShellWindow {
    window: Window,
    _webview: WebView,
}

fn not_found() -> wry::http::Response<Cow<'static, [u8]>> {
    wry::http::Response::builder()
        .status(404)
        .body(Cow::Borrowed(&b"not found"[..]))
        .unwrap_or_else(|_| wry::http::Response::new(Cow::Borrowed(&b""[..])))
}

fn create_window(
    target: &EventLoopWindowTarget<UserEvent>,
    proxy: &EventLoopProxy<UserEvent>,
    app: &App,
) -> Result<ShellWindow, WindowError> {
    let settings = app.settings();

    // Hidden until the first page load so there is no blank flash.
    let window = WindowBuilder::new()
        .with_title(&settings.window.title)
        .with_inner_size(tao::dpi::LogicalSize::new(
            settings.window.width as f64,
            settings.window.height as f64,
        ))
        .with_visible(false)
        .build(target)
        .map_err(|e| WindowError::CreationFailed(e.to_string()))?;

    let tao_id = window.id();
    let dist_dir = PathBuf::from(&settings.frontend.dist_dir);
    let start_url = frontend_assets::start_url(&settings.frontend);
    let (r, g, b) = parse_hex_color(&settings.window.background_color).unwrap_or((255, 255, 255));

    let show_proxy = proxy.clone();
    let popup_proxy = proxy.clone();
    let started_bridge = Arc::clone(&app.downloads);
    let completed_bridge = Arc::clone(&app.downloads);

    let builder = WebViewBuilder::new()
        .with_custom_protocol(PROTOCOL.into(), move |_wv_id, request| {
            match frontend_assets::load_asset(&dist_dir, request.uri().path()) {
                Some((bytes, content_type)) => wry::http::Response::builder()
                    .header("Content-Type", content_type)
                    .body(Cow::Owned(bytes))
                    .unwrap_or_else(|_| not_found()),
                None => not_found(),
            }
        })
        .with_url(&start_url)
        .with_background_color((r, g, b, 255))
        .with_on_page_load_handler(move |event, url| {
            debug!(%url, started = matches!(event, PageLoadEvent::Started), "page load");
            let _ = show_proxy.send_event(UserEvent::ShowWindow(tao_id));
        })
        .with_new_window_req_handler(move |url, _features| {
            info!(%url, "new window requested");
            let _ = popup_proxy.send_event(UserEvent::OpenWindow(url));
            wry::NewWindowResponse::Deny
        })
        .with_download_started_handler(move |url, path| started_bridge.on_started(&url, path))
        .with_download_completed_handler(move |url, path, success| {
            completed_bridge.on_completed(&url, path, success)
        })
        .with_devtools(settings.window.devtools);

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .ok_or_else(|| WindowError::CreationFailed("GTK vbox unavailable".to_string()))?;
        builder
            .build_gtk(vbox)
            .map_err(|e| WindowError::CreationFailed(e.to_string()))?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder
        .build(&window)
        .map_err(|e| WindowError::CreationFailed(e.to_string()))?;

    info!(url = %start_url, "window created");
    Ok(ShellWindow {
        window,
        _webview: webview,
    })
}

// ─── Main entry point ───

/// Opens the first window and runs the event loop until the app quits.
pub fn run(app: App) -> Result<(), WindowError> {
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let mut windows: WindowRegistry<ShellWindow> = WindowRegistry::new();
    let first = create_window(&event_loop, &proxy, &app)?;
    windows.add(first);

    let mut app = Some(app);

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if let Some(id) = windows.find(|w| w.window.id() == window_id) {
                    let _ = windows.remove(&id);
                    debug!(%id, remaining = windows.len(), "window closed");
                }
                if platform::after_window_closed(windows.len()) == LifecycleAction::Quit {
                    if let Some(app) = app.take() {
                        app.shutdown();
                    }
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::Reopen {
                has_visible_windows,
                ..
            } => {
                if platform::on_reopen(windows.len(), has_visible_windows)
                    != LifecycleAction::OpenWindow
                {
                    return;
                }
                let Some(app) = app.as_ref() else { return };
                debug!("reopening a window after activation");
                match create_window(target, &proxy, app) {
                    Ok(w) => {
                        windows.add(w);
                    }
                    Err(e) => error!(error = %e, "failed to reopen window"),
                }
            }

            Event::UserEvent(UserEvent::ShowWindow(tao_id)) => {
                if let Some(id) = windows.find(|w| w.window.id() == tao_id) {
                    if let Some(w) = windows.get(&id) {
                        w.window.set_visible(true);
                    }
                }
            }

            Event::UserEvent(UserEvent::OpenWindow(url)) => {
                let Some(app) = app.as_ref() else { return };
                debug!(%url, "opening application window for popup request");
                match create_window(target, &proxy, app) {
                    Ok(w) => {
                        windows.add(w);
                    }
                    Err(e) => error!(error = %e, "failed to open window"),
                }
            }

            _ => {}
        }
    });
}
