use eframe::egui::{CentralPanel, Context, FontFamily, FontId, Grid, RichText, ScrollArea};
use kinoswap_core::capability::{Dispatcher, Navigator};
use kinoswap_core::results::ResultsState;
use kinoswap_core::{RoomId, Route, UiCmd, text};

use crate::{App, View};

const TITLE_FONT: FontId = FontId::new(26.0, FontFamily::Proportional,);
const TEXT_FONT: FontId = FontId::new(16.0, FontFamily::Proportional,);

/// Completion view, waits for the room results.
pub struct ResultsView {
    state: ResultsState,
}

impl ResultsView {
    #[must_use]
    pub const fn new(room: RoomId,) -> Self {
        Self {
            state: ResultsState::new(room,),
        }
    }
}

impl View for ResultsView {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame, app: &mut App,) {
        while let Some(event,) = app.next_event() {
            self.state.handle(&event, app,);
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0,);
                ui.label(RichText::new(text::VOTING_COMPLETE,).font(TITLE_FONT,),);
                ui.add_space(16.0,);

                match self.state.results() {
                    | None => {
                        let waiting = if self.state.is_finished() {
                            "Загружаем результаты..."
                        } else {
                            text::WAITING_FOR_OTHERS
                        };
                        ui.label(RichText::new(waiting,).font(TEXT_FONT,),);
                        ui.spinner();
                    },
                    | Some(results,) => {
                        ScrollArea::vertical().max_height(360.0,).show(ui, |ui| {
                            Grid::new("room-results",).striped(true,).num_columns(2,).show(
                                ui,
                                |ui| {
                                    for result in results {
                                        let title = format!(
                                            "{} ({})",
                                            result.candidate.title, result.candidate.year
                                        );
                                        ui.label(RichText::new(title,).font(TEXT_FONT,),);
                                        ui.label(
                                            RichText::new(format!("❤ {}", result.likes),)
                                                .font(TEXT_FONT,),
                                        );
                                        ui.end_row();
                                    }
                                },
                            );
                        },);
                    },
                }

                ui.add_space(24.0,);
                if ui.button(RichText::new("Обновить",).font(TEXT_FONT,),).clicked() {
                    self.state.refresh(app,);
                }
                if ui.button(RichText::new("На главную",).font(TEXT_FONT,),).clicked() {
                    app.dispatch(UiCmd::Unsubscribe,);
                    app.navigate(Route::Entry,);
                }
            },);
        },);
    }
}
