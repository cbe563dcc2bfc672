use eframe::egui::{
    Align, Button, CentralPanel, Context, Event, FontFamily, FontId, Key, RichText, TextEdit,
    vec2,
};
use kinoswap_core::entry::EntryState;
use kinoswap_core::room::CODE_LEN;

use crate::{App, View};

const TITLE_FONT: FontId = FontId::new(32.0, FontFamily::Proportional,);
const TEXT_FONT: FontId = FontId::new(16.0, FontFamily::Proportional,);
const CODE_FONT: FontId = FontId::new(28.0, FontFamily::Monospace,);

/// Landing view: create a room or type a six-digit code.
#[derive(Default,)]
pub struct EntryView {
    state:         EntryState,
    pending_focus: Option<usize,>,
}

impl EntryView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state:         EntryState::new(),
            pending_focus: Some(0,),
        }
    }

    fn code_cells(&mut self, ui: &mut eframe::egui::Ui,) {
        let mut any_focused = false;

        ui.horizontal(|ui| {
            for i in 0..CODE_LEN {
                let before = self.state.form().cell(i,);
                let mut value = before.clone();
                let resp = ui.add(
                    TextEdit::singleline(&mut value,)
                        .char_limit(1,)
                        .desired_width(32.0,)
                        .horizontal_align(Align::Center,)
                        .font(CODE_FONT,),
                );

                if self.pending_focus == Some(i,) {
                    resp.request_focus();
                    self.pending_focus = None;
                }

                let focus_before = self.state.form().focus();
                if resp.changed() {
                    self.state.form_mut().input(i, &value,);
                } else if resp.has_focus()
                    && before.is_empty()
                    && ui.input(|input| input.key_pressed(Key::Backspace,),)
                {
                    self.state.form_mut().backspace(i,);
                }
                if self.state.form().focus() != focus_before {
                    self.pending_focus = Some(self.state.form().focus(),);
                }
                any_focused |= resp.has_focus();
            }
        },);

        if any_focused {
            let pasted = ui.input(|input| {
                input.events.iter().find_map(|event| match event {
                    | Event::Paste(text,) => Some(text.clone(),),
                    | _ => None,
                },)
            },);
            if let Some(text,) = pasted {
                self.state.form_mut().paste(&text,);
                self.pending_focus = Some(self.state.form().focus(),);
            }
        }
    }
}

impl View for EntryView {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame, app: &mut App,) {
        while let Some(event,) = app.next_event() {
            self.state.handle(&event, app,);
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0,);
                ui.label(RichText::new("KinoSwap",).font(TITLE_FONT,),);
                ui.label(RichText::new("Выбирайте фильм вместе",).font(TEXT_FONT,),);
                ui.add_space(40.0,);

                let create = Button::new(RichText::new("Создать комнату",).font(TEXT_FONT,),);
                if ui
                    .add_enabled_ui(!self.state.is_busy(), |ui| {
                        ui.add_sized(vec2(220.0, 40.0,), create,)
                    },)
                    .inner
                    .clicked()
                {
                    self.state.create_room(app,);
                }

                ui.add_space(30.0,);
                ui.label(RichText::new("или введите код комнаты",).font(TEXT_FONT,),);
                ui.add_space(10.0,);

                self.code_cells(ui,);
                ui.add_space(10.0,);

                let join = Button::new(RichText::new("Присоединиться",).font(TEXT_FONT,),);
                let enter = ui.input(|input| input.key_pressed(Key::Enter,),);
                let clicked = ui
                    .add_enabled_ui(!self.state.is_join_disabled(), |ui| {
                        ui.add_sized(vec2(220.0, 40.0,), join,)
                    },)
                    .inner
                    .clicked();
                if clicked || (enter && !self.state.is_join_disabled()) {
                    self.state.join_room(app,);
                }

                if self.state.is_busy() {
                    ui.add_space(10.0,);
                    ui.spinner();
                }
            },);
        },);
    }
}
