//! Quick Switch - jump between windows with the Windows key
//!
//! Win+Shift+1..9 remembers the focused window in a slot, Win+1..9 brings
//! it back to the foreground.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(windows)]
use tracing::{error, info, warn};

#[cfg(windows)]
use quick_switch::domain::errors::QuickSwitchError;
#[cfg(windows)]
use quick_switch::infrastructure::{CompositionRoot, PlatformPorts};
#[cfg(windows)]
use quick_switch::log::{self, LogMode};
#[cfg(windows)]
use quick_switch::platform::win32::{
    self, GdiOverlaySurface, KeyboardHook, PostedNotifier, SingleInstance, TrayIcon,
    Win32Desktop,
};
#[cfg(windows)]
use quick_switch::shared::config::{Config, ConfigOrigin};

#[cfg(windows)]
fn main() {
    std::process::exit(run());
}

#[cfg(not(windows))]
fn main() {
    eprintln!("quick-switch only runs on Windows");
    std::process::exit(1);
}

/// Log, tell the user, and produce the process exit code
#[cfg(windows)]
fn fatal(context: &str, err: &QuickSwitchError) -> i32 {
    error!("{}: {}", context, err);
    win32::show_fatal_error(&format!("{}.\n\n{}", context, err));
    1
}

#[cfg(windows)]
fn run() -> i32 {
    let (config, origin) = Config::load();

    // Before logging: a second instance must not truncate the running one's log
    let instance = SingleInstance::acquire();
    let already_running = matches!(instance, Err(QuickSwitchError::AlreadyRunning));
    let mode = if already_running {
        LogMode::Append
    } else {
        LogMode::Fresh
    };
    let log_guard = log::init(&config.logging.level, mode);

    let _instance = match instance {
        Ok(instance) => Some(instance),
        Err(QuickSwitchError::AlreadyRunning) => {
            info!("Another instance is already running - exiting");
            return 0;
        }
        Err(e) => {
            warn!("Single-instance check failed: {}", e);
            None
        }
    };

    info!(
        log = ?log_guard.path(),
        "quick-switch {} starting",
        env!("CARGO_PKG_VERSION")
    );
    match &origin {
        ConfigOrigin::Defaults => info!("No config file found, using defaults"),
        ConfigOrigin::File(path) => info!("Loaded config from {}", path.display()),
        ConfigOrigin::Invalid(path, e) => {
            warn!("Ignoring config {}: {}; using defaults", path.display(), e)
        }
    }

    if let Err(e) = win32::enable_dpi_awareness() {
        warn!("Failed to enable DPI awareness: {}", e);
    }

    if let Err(e) = win32::register_window_classes() {
        return fatal("Could not register window classes", &e);
    }
    let host = match win32::create_host_window() {
        Ok(hwnd) => hwnd,
        Err(e) => {
            win32::unregister_window_classes();
            return fatal("Could not create the host window", &e);
        }
    };

    let ports = PlatformPorts {
        windows: Win32Desktop,
        keys: Win32Desktop,
        notifier: PostedNotifier::new(host),
        surface: GdiOverlaySurface,
    };
    let root = match CompositionRoot::new(&config, ports) {
        Ok(root) => root,
        Err(e) => {
            win32::destroy_window(host);
            win32::unregister_window_classes();
            return fatal("Could not start the timer service", &e);
        }
    };
    let (interceptor, host_controller, timers) = root.into_parts();
    win32::set_host_handler(host_controller);

    let hook = match KeyboardHook::install(interceptor) {
        Ok(hook) => hook,
        Err(e) => {
            win32::clear_host_handler();
            timers.shutdown();
            win32::destroy_window(host);
            win32::unregister_window_classes();
            return fatal("Could not install the keyboard hook", &e);
        }
    };

    let tray = match TrayIcon::add(host) {
        Ok(tray) => Some(tray),
        Err(e) => {
            warn!("Running without a tray icon: {}", e);
            None
        }
    };

    info!("Ready: Win+Shift+1..9 binds the focused window, Win+1..9 switches to it");
    let exit_code = win32::run_message_loop();

    info!("Shutting down");
    drop(hook);
    drop(tray);
    let discarded = win32::discard_overlay_requests(host);
    if discarded > 0 {
        info!(discarded, "Dropped overlay requests still queued at exit");
    }
    // Drops the overlay manager, which destroys any live overlay
    win32::clear_host_handler();
    timers.shutdown();
    win32::destroy_window(host);
    win32::unregister_window_classes();
    info!("Exited normally");

    exit_code
}
