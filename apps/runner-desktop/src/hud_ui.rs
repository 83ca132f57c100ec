use egui::{Align2, Color32, Context, RichText};
use runner_common::Rgb;
use runner_hud::{
    GameOverView, HudAction, HudView, Icon, MenuView, OverlayView, ShopView, VictoryView,
};

const ACCENT: Color32 = Color32::from_rgb(0, 229, 255);
const MAGENTA: Color32 = Color32::from_rgb(255, 64, 200);
const GOLD: Color32 = Color32::from_rgb(255, 214, 10);
const DIM: Color32 = Color32::from_rgb(90, 90, 110);
const PANEL: Color32 = Color32::from_rgba_premultiplied(8, 0, 20, 220);

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::ArrowUp => "⬆",
        Icon::Pulse => "💓",
        Icon::Plus => "➕",
        Icon::Shield => "🛡",
        Icon::Heart => "❤",
        Icon::Bolt => "⚡",
        Icon::Trophy => "🏆",
        Icon::Pin => "📍",
        Icon::Diamond => "💎",
        Icon::Rocket => "🚀",
        Icon::Play => "▶",
    }
}

fn color(c: Rgb) -> Color32 {
    let [r, g, b, _] = c.to_rgba8();
    Color32::from_rgb(r, g, b)
}

/// Draw `view` and return whatever the user clicked this frame.
pub fn draw(ctx: &Context, view: &HudView) -> Vec<HudAction> {
    let mut actions = Vec::new();
    match view {
        HudView::Menu(menu) => draw_menu(ctx, menu, &mut actions),
        HudView::Shop(shop) => draw_shop(ctx, shop, &mut actions),
        HudView::GameOver(over) => draw_game_over(ctx, over, &mut actions),
        HudView::Victory(win) => draw_victory(ctx, win, &mut actions),
        HudView::Playing(overlay) => draw_overlay(ctx, overlay),
    }
    actions
}

fn modal(ctx: &Context, id: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Window::new(id)
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(egui::Frame::window(&ctx.style()).fill(PANEL))
        .show(ctx, |ui| {
            ui.vertical_centered(add_contents);
        });
}

fn draw_menu(ctx: &Context, menu: &MenuView, actions: &mut Vec<HudAction>) {
    modal(ctx, "menu", |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(menu.title).size(56.0).strong().color(ACCENT));
            ui.label(RichText::new(menu.title_accent).size(56.0).strong().color(MAGENTA));
            ui.label(RichText::new(menu.badge).size(18.0).color(GOLD));
        });
        ui.add_space(24.0);
        let start = format!("{} {}", glyph(Icon::Play), menu.start_label);
        if ui.button(RichText::new(start).size(22.0)).clicked() {
            actions.push(HudAction::StartGame);
        }
        ui.add_space(12.0);
        ui.label(RichText::new(menu.controls_hint).small().color(DIM));
    });
}

fn draw_shop(ctx: &Context, shop: &ShopView, actions: &mut Vec<HudAction>) {
    modal(ctx, "shop", |ui| {
        ui.heading(RichText::new(shop.title).color(ACCENT).strong());
        ui.label(RichText::new(format!("AVAILABLE CREDITS: {}", shop.credits_text)).color(GOLD));
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            for offer in &shop.offers {
                ui.group(|ui| {
                    ui.set_width(180.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(glyph(offer.item.icon)).size(28.0));
                        ui.label(RichText::new(offer.item.name).strong());
                        ui.label(RichText::new(offer.item.description).small().color(DIM));
                        ui.add_space(8.0);
                        let label = format!("{} GEMS", offer.item.cost);
                        let button = egui::Button::new(RichText::new(label).color(if offer.affordable {
                            GOLD
                        } else {
                            DIM
                        }));
                        if ui.add_enabled(offer.affordable, button).clicked() {
                            actions.push(HudAction::BuyItem {
                                id: offer.item.id,
                                cost: offer.item.cost,
                            });
                        }
                    });
                });
            }
        });

        ui.add_space(16.0);
        let resume = format!("{} {}", shop.resume_label, glyph(Icon::Play));
        if ui.button(RichText::new(resume).size(18.0)).clicked() {
            actions.push(HudAction::CloseShop);
        }
    });
}

fn stat_row(ui: &mut egui::Ui, icon: Icon, label: &str, value: String) {
    ui.horizontal(|ui| {
        ui.label(format!("{} {label}", glyph(icon)));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value).strong());
        });
    });
}

fn draw_game_over(ctx: &Context, over: &GameOverView, actions: &mut Vec<HudAction>) {
    modal(ctx, "game_over", |ui| {
        ui.label(RichText::new(over.title).size(44.0).strong().color(MAGENTA));
        ui.add_space(12.0);
        ui.set_width(280.0);
        stat_row(
            ui,
            Icon::Trophy,
            over.level_label,
            format!("{} / {}", over.level, over.total_levels),
        );
        stat_row(ui, Icon::Diamond, over.gems_label, over.gems.to_string());
        stat_row(ui, Icon::Pin, over.distance_label, format!("{} LY", over.distance_ly));
        stat_row(ui, Icon::Bolt, over.score_label, over.score_text.clone());
        ui.add_space(16.0);
        if ui.button(RichText::new(over.retry_label).size(20.0)).clicked() {
            actions.push(HudAction::RestartGame);
        }
    });
}

fn draw_victory(ctx: &Context, win: &VictoryView, actions: &mut Vec<HudAction>) {
    modal(ctx, "victory", |ui| {
        ui.label(RichText::new(glyph(Icon::Rocket)).size(40.0));
        ui.label(RichText::new(win.title).size(36.0).strong().color(GOLD));
        ui.label(RichText::new(win.subtitle).italics().color(ACCENT));
        ui.add_space(12.0);
        ui.label(win.score_label);
        ui.label(RichText::new(&win.score_text).size(40.0).strong().color(GOLD));
        ui.set_width(280.0);
        stat_row(ui, Icon::Diamond, win.gems_label, win.gems.to_string());
        stat_row(ui, Icon::Pin, win.distance_label, format!("{} LY", win.distance_ly));
        ui.add_space(16.0);
        if ui.button(RichText::new(win.restart_label).size(20.0)).clicked() {
            actions.push(HudAction::RestartGame);
        }
    });
}

fn draw_overlay(ctx: &Context, overlay: &OverlayView) {
    egui::Area::new(egui::Id::new("hud_score"))
        .anchor(Align2::LEFT_TOP, [16.0, 16.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(&overlay.score_text).size(36.0).strong().color(ACCENT));
        });

    egui::Area::new(egui::Id::new("hud_hearts"))
        .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for &filled in &overlay.hearts {
                    let tint = if filled { MAGENTA } else { DIM };
                    ui.label(RichText::new(glyph(Icon::Heart)).size(24.0).color(tint));
                }
            });
        });

    egui::Area::new(egui::Id::new("hud_center"))
        .anchor(Align2::CENTER_TOP, [0.0, 16.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!(
                        "{} {} / {}",
                        overlay.sector_label, overlay.level, overlay.total_levels
                    ))
                    .color(DIM),
                );
                if overlay.shield_active {
                    let banner = format!("{} {}", glyph(Icon::Shield), overlay.shield_label);
                    ui.label(RichText::new(banner).strong().color(GOLD));
                }
                ui.horizontal(|ui| {
                    for tile in &overlay.letters {
                        let tint = if tile.collected { color(tile.color) } else { DIM };
                        ui.label(RichText::new(tile.letter.to_string()).size(28.0).strong().color(tint));
                    }
                });
            });
        });

    egui::Area::new(egui::Id::new("hud_speed"))
        .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .interactable(false)
        .show(ctx, |ui| {
            let text = format!(
                "{} {} {}%",
                glyph(Icon::Bolt),
                overlay.thrusters_label,
                overlay.thrusters_percent
            );
            ui.label(RichText::new(text).color(ACCENT));
        });
}
