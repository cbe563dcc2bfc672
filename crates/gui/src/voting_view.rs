use eframe::egui::{
    Align2, Button, CentralPanel, Color32, Context, FontFamily, FontId, Pos2, ProgressBar,
    Rect, Response, RichText, Sense, Shape, Stroke, Ui, vec2,
};
use eframe::egui::emath::Rot2;
use kinoswap_core::RoomId;
use kinoswap_core::candidate::Candidate;
use kinoswap_core::gesture::{CardPose, Point};
use kinoswap_core::voting::VotingSession;

use crate::{App, View};

const CARD_SIZE: [f32; 2] = [300.0, 420.0,];
const TITLE_FONT: FontId = FontId::new(24.0, FontFamily::Proportional,);
const TEXT_FONT: FontId = FontId::new(16.0, FontFamily::Proportional,);
const BADGE_FONT: FontId = FontId::new(20.0, FontFamily::Proportional,);

const CARD_FILL: Color32 = Color32::from_rgb(40, 44, 58,);
const CARD_BACK_FILL: Color32 = Color32::from_rgb(30, 32, 42,);
const APPROVE_COLOR: Color32 = Color32::from_rgb(70, 200, 110,);
const REJECT_COLOR: Color32 = Color32::from_rgb(230, 80, 80,);

fn point(pos: Pos2,) -> Point {
    Point::new(pos.x, pos.y,)
}

/// Voting view: one draggable card at a time.
pub struct VotingView {
    state: VotingSession,
}

impl VotingView {
    /// Creates the view and requests the candidates.
    #[must_use]
    pub fn new(room: RoomId, app: &mut App,) -> Self {
        let mut state = VotingSession::new(room,);
        state.enter(app,);
        Self { state, }
    }

    /// Feeds pointer input on the card into the gesture.
    fn track_pointer(
        &mut self,
        ui: &Ui,
        surface: Rect,
        card: &Response,
        app: &mut App,
    ) {
        let (released, hover,) = ui.input(|i| (i.pointer.any_released(), i.pointer.hover_pos(),),);

        if let Some(pos,) = card.interact_pointer_pos() {
            if self.state.is_dragging() {
                self.state.drag(point(pos,),);
            } else if !released {
                self.state.press(point(pos,),);
            }
        }

        if !self.state.is_dragging() {
            return;
        }
        if released {
            self.state.release(app,);
        } else if !hover.is_some_and(|pos| surface.contains(pos,),) {
            // pointer left the swipe area
            self.state.leave(app,);
        } else {
            ui.ctx().request_repaint();
        }
    }

    fn paint_card(&self, ui: &Ui, rect: Rect, candidate: &Candidate,) {
        let pose: CardPose = self.state.pose();
        let center = rect.center() + vec2(pose.offset.x, pose.offset.y,);
        let rot = Rot2::from_angle(pose.rotation_deg.to_radians(),);
        let half = rect.size() / 2.0;
        let corners = [
            vec2(-half.x, -half.y,),
            vec2(half.x, -half.y,),
            vec2(half.x, half.y,),
            vec2(-half.x, half.y,),
        ]
        .map(|corner| center + rot * corner,)
        .to_vec();

        let fade = |color: Color32| color.gamma_multiply(pose.opacity,);
        let fill = if self.state.is_flipped() { CARD_BACK_FILL } else { CARD_FILL };
        let painter = ui.painter();
        painter.add(Shape::convex_polygon(
            corners,
            fade(fill,),
            Stroke::new(1.0, fade(Color32::from_gray(90,),),),
        ),);

        let text_color = fade(Color32::WHITE,);
        let wrap = rect.width() - 32.0;
        let top = center - vec2(half.x - 16.0, half.y - 20.0,);

        if self.state.is_flipped() {
            let title = painter.layout(candidate.title.clone(), TEXT_FONT, text_color, wrap,);
            let title_height = title.size().y;
            painter.galley(top, title, text_color,);
            let body =
                painter.layout(candidate.description.clone(), TEXT_FONT, fade(Color32::LIGHT_GRAY,), wrap,);
            painter.galley(top + vec2(0.0, title_height + 12.0,), body, text_color,);
        } else {
            let title = painter.layout(candidate.title.clone(), TITLE_FONT, text_color, wrap,);
            let title_height = title.size().y;
            painter.galley(top, title, text_color,);

            let mut meta = candidate.year.to_string();
            if !candidate.duration.is_empty() {
                meta = format!("{meta} · {}", candidate.duration);
            }
            let lines = [
                meta,
                format!("★ {:.1}/10", candidate.rating()),
                candidate.genre_line(),
            ];
            let mut y = top.y + title_height + 16.0;
            for line in lines {
                let galley = painter.layout(line, TEXT_FONT, fade(Color32::LIGHT_GRAY,), wrap,);
                let height = galley.size().y;
                painter.galley(Pos2::new(top.x, y,), galley, text_color,);
                y += height + 8.0;
            }
            painter.text(
                center + vec2(0.0, half.y - 24.0,),
                Align2::CENTER_CENTER,
                "Нажмите, чтобы узнать больше",
                TEXT_FONT,
                fade(Color32::GRAY,),
            );
        }

        let hint = self.state.hint();
        if hint.approve {
            painter.text(
                center + vec2(-half.x + 20.0, -half.y - 16.0,),
                Align2::LEFT_CENTER,
                "НРАВИТСЯ",
                BADGE_FONT,
                APPROVE_COLOR,
            );
        }
        if hint.reject {
            painter.text(
                center + vec2(half.x - 20.0, -half.y - 16.0,),
                Align2::RIGHT_CENTER,
                "НЕ НРАВИТСЯ",
                BADGE_FONT,
                REJECT_COLOR,
            );
        }
    }
}

impl View for VotingView {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame, app: &mut App,) {
        while let Some(event,) = app.next_event() {
            self.state.handle(&event, app,);
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0,);

                if !self.state.is_loaded() {
                    ui.add_space(120.0,);
                    ui.spinner();
                    ui.label(RichText::new("Загружаем фильмы...",).font(TEXT_FONT,),);
                    if ui.button("Загрузить снова",).clicked() {
                        self.state.enter(app,);
                    }
                    if ui.button("Выйти из комнаты",).clicked() {
                        self.state.quit(app,);
                    }
                    return;
                }

                let progress = self.state.progress();
                ui.label(
                    RichText::new(format!("{} из {}", progress.position, progress.total),)
                        .font(TEXT_FONT,),
                );
                ui.add(ProgressBar::new(progress.fraction(),).desired_width(CARD_SIZE[0],),);
                ui.add_space(24.0,);

                let Some(candidate,) = self.state.current().cloned() else {
                    ui.label(RichText::new("Все фильмы оценены",).font(TEXT_FONT,),);
                    return;
                };

                let surface = ui.max_rect();
                let (rect, card,) =
                    ui.allocate_exact_size(vec2(CARD_SIZE[0], CARD_SIZE[1],), Sense::click_and_drag(),);
                self.track_pointer(ui, surface, &card, app,);
                self.paint_card(ui, rect, &candidate,);

                ui.add_space(24.0,);
                if self.state.is_flipped() {
                    if ui.button(RichText::new("Назад",).font(TEXT_FONT,),).clicked() {
                        self.state.hide_details();
                    }
                    ui.add_space(8.0,);
                }

                ui.horizontal(|ui| {
                    ui.add_space((ui.available_width() - 2.0 * 140.0 - 16.0).max(0.0,) / 2.0,);
                    let reject = Button::new(
                        RichText::new("✖ Не нравится",).font(TEXT_FONT,).color(REJECT_COLOR,),
                    );
                    if ui.add_sized(vec2(140.0, 40.0,), reject,).clicked() {
                        self.state.reject(app,);
                    }
                    ui.add_space(16.0,);
                    let approve = Button::new(
                        RichText::new("❤ Нравится",).font(TEXT_FONT,).color(APPROVE_COLOR,),
                    );
                    if ui.add_sized(vec2(140.0, 40.0,), approve,).clicked() {
                        self.state.approve(app,);
                    }
                },);

                ui.add_space(24.0,);
                if ui.button(RichText::new("Выйти из комнаты",).font(TEXT_FONT,),).clicked() {
                    self.state.quit(app,);
                }
            },);
        },);
    }
}
