//! Side effects the controllers need from their host.
//!
//! The GUI implements these on its `App`; tests use a recording shell.

use crate::message::UiCmd;
use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A transient user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Toast {
    pub level: ToastLevel,
    pub text:  String,
}

impl Toast {
    #[must_use]
    pub fn success(text: impl Into<String,>,) -> Self {
        Self {
            level: ToastLevel::Success,
            text:  text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String,>,) -> Self {
        Self {
            level: ToastLevel::Error,
            text:  text.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, toast: Toast,);

    fn success(&mut self, text: &str,) {
        self.notify(Toast::success(text,),);
    }

    fn error(&mut self, text: &str,) {
        self.notify(Toast::error(text,),);
    }
}

pub trait Navigator {
    fn navigate(&mut self, route: Route,);
}

/// Hands a command to the network runtime. Never blocks.
pub trait Dispatcher {
    fn dispatch(&mut self, cmd: UiCmd,);
}

pub trait Clipboard {
    /// # Errors
    /// Returns a reason when the platform clipboard is unavailable.
    fn copy(&mut self, text: &str,) -> Result<(), String,>;
}

/// Everything a screen controller may ask of its host.
pub trait Shell: Notifier + Navigator + Dispatcher {}

impl<T: Notifier + Navigator + Dispatcher,> Shell for T {}

/// A host that records every side effect instead of performing it.
///
/// Drives controllers headless, without a window.
#[derive(Debug, Clone, Default,)]
pub struct Recorder {
    pub toasts:   Vec<Toast,>,
    pub routes:   Vec<Route,>,
    pub commands: Vec<UiCmd,>,
    pub copied:   Vec<String,>,
    /// When set, clipboard writes fail with this reason.
    pub clipboard_error: Option<String,>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_toast(&self,) -> Option<&Toast,> {
        self.toasts.last()
    }

    #[must_use]
    pub fn last_route(&self,) -> Option<&Route,> {
        self.routes.last()
    }

    /// Takes the commands dispatched so far.
    pub fn drain_commands(&mut self,) -> Vec<UiCmd,> {
        std::mem::take(&mut self.commands,)
    }
}

impl Notifier for Recorder {
    fn notify(&mut self, toast: Toast,) {
        self.toasts.push(toast,);
    }
}

impl Navigator for Recorder {
    fn navigate(&mut self, route: Route,) {
        self.routes.push(route,);
    }
}

impl Dispatcher for Recorder {
    fn dispatch(&mut self, cmd: UiCmd,) {
        self.commands.push(cmd,);
    }
}

impl Clipboard for Recorder {
    fn copy(&mut self, text: &str,) -> Result<(), String,> {
        if let Some(reason,) = &self.clipboard_error {
            return Err(reason.clone(),);
        }
        self.copied.push(text.to_string(),);
        Ok((),)
    }
}
