use eframe::egui::{
    Button, CentralPanel, Color32, Context, FontFamily, FontId, RichText, TextEdit, vec2,
};
use kinoswap_core::RoomId;
use kinoswap_core::lobby::LobbyState;

use crate::{App, View};

const CODE_FONT: FontId = FontId::new(30.0, FontFamily::Monospace,);
const TEXT_FONT: FontId = FontId::new(16.0, FontFamily::Proportional,);
const BUTTON_SIZE: [f32; 2] = [240.0, 38.0,];

/// Lobby view.
pub struct LobbyView {
    state: LobbyState,
}

impl LobbyView {
    /// Creates the lobby and subscribes to the room events.
    #[must_use]
    pub fn new(room: RoomId, host: bool, app: &mut App,) -> Self {
        let mut state = LobbyState::new(room, host,);
        state.enter(app,);
        Self { state, }
    }
}

impl View for LobbyView {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame, app: &mut App,) {
        while let Some(event,) = app.next_event() {
            self.state.handle(&event, app,);
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0,);
                ui.label(RichText::new("Код комнаты",).font(TEXT_FONT,),);
                ui.horizontal(|ui| {
                    ui.add_space((ui.available_width() - 220.0).max(0.0,) / 2.0,);
                    ui.label(
                        RichText::new(self.state.room().display_code(),)
                            .font(CODE_FONT,)
                            .strong(),
                    );
                    if ui.button("📋",).on_hover_text("Скопировать код",).clicked() {
                        self.state.copy_code(app,);
                    }
                },);

                ui.add_space(20.0,);
                ui.label(
                    RichText::new(format!("Участников: {}", self.state.participants()),)
                        .font(TEXT_FONT,),
                );
                ui.label(
                    RichText::new(format!(
                        "Готовы: {} из {}",
                        self.state.ready_participants(),
                        self.state.participants()
                    ),)
                    .font(TEXT_FONT,),
                );

                ui.add_space(20.0,);
                let mut preferences = self.state.preferences().to_string();
                let edit = TextEdit::multiline(&mut preferences,)
                    .hint_text("Что хочется посмотреть? Жанр, настроение, год...",)
                    .desired_rows(4,)
                    .desired_width(320.0,)
                    .font(TEXT_FONT,);
                if ui.add_enabled(!self.state.is_ready(), edit,).changed() {
                    self.state.set_preferences(preferences,);
                }

                ui.add_space(16.0,);
                if self.state.is_ready() {
                    ui.label(
                        RichText::new("✔ Вы готовы",)
                            .font(TEXT_FONT,)
                            .color(Color32::LIGHT_GREEN,),
                    );
                } else {
                    let ready = Button::new(RichText::new("Я готов",).font(TEXT_FONT,),);
                    if ui.add_sized(vec2(BUTTON_SIZE[0], BUTTON_SIZE[1],), ready,).clicked() {
                        self.state.mark_ready(app,);
                    }
                }

                ui.add_space(10.0,);
                if self.state.is_host() {
                    let start =
                        Button::new(RichText::new("Начать голосование",).font(TEXT_FONT,),);
                    if ui.add_sized(vec2(BUTTON_SIZE[0], BUTTON_SIZE[1],), start,).clicked() {
                        self.state.start_voting(app,);
                    }
                } else {
                    ui.label(
                        RichText::new("Ожидаем, пока организатор начнёт голосование",)
                            .font(TEXT_FONT,)
                            .weak(),
                    );
                }

                ui.add_space(30.0,);
                if ui.button(RichText::new("Выйти",).font(TEXT_FONT,),).clicked() {
                    self.state.leave(app,);
                }
            },);
        },);
    }
}
