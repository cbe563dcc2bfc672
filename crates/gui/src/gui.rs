//! KinoSwap egui app implementation.

use std::time::Duration;

use eframe::egui::{
    Align2, Area, Color32, Context, FontFamily, FontId, Frame, Id, Order, RichText, Theme,
    vec2,
};
use kinoswap_client::{ClientConfig, UiHandle};
use kinoswap_core::capability::{Clipboard, Dispatcher, Navigator, Notifier, Toast, ToastLevel};
use kinoswap_core::{ClientEvent, Route, UiCmd};
use log::{info, warn};
use tokio::sync::mpsc::error::TrySendError;

use crate::{EntryView, LobbyView, ResultsView, VotingView};

/// Seconds a toast stays on screen.
const TOAST_SECS: f64 = 3.0;
const TOAST_FONT: FontId = FontId::new(15.0, FontFamily::Proportional,);

/// App configuration parameters.
#[derive(Debug, Clone,)]
pub struct Config {
    pub client:      ClientConfig,
    /// Screen shown at start.
    pub start_route: Route,
}

/// The application state shared by all views.
///
/// Implements the host capabilities the screen controllers use.
pub struct App {
    pub config:    Config,
    handle:        UiHandle,
    toasts:        Vec<(Toast, f64,),>,
    pending_route: Option<Route,>,
    clipboard:     Option<String,>,
    now:           f64,
}

impl App {
    #[must_use]
    pub fn new(config: Config, handle: UiHandle,) -> Self {
        Self {
            config,
            handle,
            toasts: Vec::new(),
            pending_route: None,
            clipboard: None,
            now: 0.0,
        }
    }

    /// Next event from the network runtime. Returns `None` once a view asked
    /// to navigate, the rest is left for the next view.
    pub fn next_event(&mut self,) -> Option<ClientEvent,> {
        if self.pending_route.is_some() {
            return None;
        }
        self.handle.msg_rx.try_recv().ok()
    }

    pub fn take_route(&mut self,) -> Option<Route,> {
        self.pending_route.take()
    }

    fn begin_frame(&mut self, ctx: &Context,) {
        self.now = ctx.input(|i| i.time,);
        let now = self.now;
        self.toasts.retain(|(_, expires,)| *expires > now,);
    }

    fn end_frame(&mut self, ctx: &Context,) {
        if let Some(text,) = self.clipboard.take() {
            ctx.copy_text(text,);
        }
        if self.toasts.is_empty() {
            return;
        }

        Area::new(Id::new("toasts",),)
            .order(Order::Foreground,)
            .anchor(Align2::CENTER_BOTTOM, vec2(0.0, -24.0,),)
            .show(ctx, |ui| {
                for (toast, _,) in &self.toasts {
                    let fill = match toast.level {
                        | ToastLevel::Success => Color32::from_rgb(34, 120, 60,),
                        | ToastLevel::Error => Color32::from_rgb(160, 40, 40,),
                    };
                    Frame::default().fill(fill,).inner_margin(10.0,).show(ui, |ui| {
                        ui.label(
                            RichText::new(&toast.text,)
                                .font(TOAST_FONT,)
                                .color(Color32::WHITE,),
                        );
                    },);
                    ui.add_space(6.0,);
                }
            },);
        ctx.request_repaint_after(Duration::from_millis(250,),);
    }
}

impl Drop for App {
    fn drop(&mut self,) {
        let _ = self.handle.cmd_tx.try_send(UiCmd::Shutdown,);
    }
}

impl Notifier for App {
    fn notify(&mut self, toast: Toast,) {
        info!("toast: {}", toast.text);
        self.toasts.push((toast, self.now + TOAST_SECS,),);
    }
}

impl Navigator for App {
    fn navigate(&mut self, route: Route,) {
        info!("navigating to {route}");
        self.pending_route = Some(route,);
    }
}

impl Dispatcher for App {
    fn dispatch(&mut self, cmd: UiCmd,) {
        match self.handle.cmd_tx.try_send(cmd,) {
            | Ok((),) => {},
            | Err(TrySendError::Full(cmd,),) => warn!("command queue full, dropping {cmd}"),
            | Err(TrySendError::Closed(cmd,),) => warn!("runtime stopped, dropping {cmd}"),
        }
    }
}

impl Clipboard for App {
    fn copy(&mut self, text: &str,) -> Result<(), String,> {
        // written to the platform clipboard at the end of the frame
        self.clipboard = Some(text.to_string(),);
        Ok((),)
    }
}

/// Traits for UI views.
pub trait View {
    /// Process a view update.
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame, app: &mut App,);

    /// Returns the next view if any.
    fn next(
        &mut self,
        _ctx: &Context,
        _frame: &mut eframe::Frame,
        app: &mut App,
    ) -> Option<Box<dyn View,>,> {
        app.take_route().map(|route| view_for(&route, app,),)
    }
}

/// Builds the view of a route. Entering a view may dispatch its first
/// commands.
pub fn view_for(route: &Route, app: &mut App,) -> Box<dyn View,> {
    match route {
        | Route::Entry => Box::new(EntryView::new(),),
        | Route::Lobby { room, host, } => Box::new(LobbyView::new(room.clone(), *host, app,),),
        | Route::Voting { room, } => Box::new(VotingView::new(room.clone(), app,),),
        | Route::Results { room, } => Box::new(ResultsView::new(room.clone(),),),
    }
}

/// The UI main frame.
pub struct AppFrame {
    app:   App,
    panel: Box<dyn View,>,
}

impl AppFrame {
    /// Creates a new App instance.
    #[must_use]
    pub fn new(config: Config, handle: UiHandle, cc: &eframe::CreationContext<'_,>,) -> Self {
        cc.egui_ctx.set_theme(Theme::Dark,);

        info!("Creating new app with config: {config:?}");
        let route = config.start_route.clone();
        let mut app = App::new(config, handle,);
        let panel = view_for(&route, &mut app,);

        Self { app, panel, }
    }
}

impl eframe::App for AppFrame {
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame,) {
        self.app.begin_frame(ctx,);
        self.panel.update(ctx, frame, &mut self.app,);

        if let Some(panel,) = self.panel.next(ctx, frame, &mut self.app,) {
            self.panel = panel;
            self.panel.update(ctx, frame, &mut self.app,);
        }
        self.app.end_frame(ctx,);

        // events arrive from the network runtime without user input
        ctx.request_repaint_after(Duration::from_millis(100,),);
    }
}
