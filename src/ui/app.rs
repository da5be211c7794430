//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use crate::net::{NetSync, SyncNotice, DEFAULT_PORT};
use crate::session::{GameMode, GameSession, MoveOutcome, UndoOutcome};
use crate::{Pos, Stone};

use super::board_view::BoardView;
use super::theme::*;

fn stone_name(stone: Stone) -> &'static str {
    match stone {
        Stone::Black => "Black",
        Stone::White => "White",
        Stone::Empty => "Empty",
    }
}

/// Main Gomoku application
pub struct GomokuApp {
    session: GameSession,
    net: Option<NetSync>,
    board_view: BoardView,
    chat_log: Vec<String>,
    chat_input: String,
    status: Option<String>,
    show_join_dialog: bool,
    join_addr: String,
    join_port: String,
}

impl Default for GomokuApp {
    fn default() -> Self {
        Self {
            session: GameSession::new(GameMode::Hotseat),
            net: None,
            board_view: BoardView::default(),
            chat_log: Vec::new(),
            chat_input: String::new(),
            status: None,
            show_join_dialog: false,
            join_addr: "127.0.0.1".to_string(),
            join_port: DEFAULT_PORT.to_string(),
        }
    }
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Drain pending network events into the session and the UI log
    fn pump_network(&mut self) {
        let Some(sync) = self.net.as_mut() else {
            return;
        };
        for notice in sync.pump(&mut self.session) {
            match notice {
                SyncNotice::Connected(peer) => {
                    self.status = Some(format!("Peer connected from {peer} — game on"));
                }
                SyncNotice::Disconnected => {
                    self.status = Some("Peer disconnected".to_string());
                }
                SyncNotice::Chat(text) => {
                    self.chat_log.push(format!("peer: {text}"));
                }
                SyncNotice::RemoteWin(winner) => {
                    self.status = Some(format!("{} wins! New game started.", stone_name(winner)));
                }
                SyncNotice::RemoteUndo => {
                    self.chat_log.push("peer took back a move".to_string());
                }
            }
        }
    }

    /// Apply a local click and mirror it to the peer if connected
    fn handle_board_click(&mut self, pos: Pos) {
        match self.session.try_local_move(pos.col as i32, pos.row as i32) {
            MoveOutcome::Applied => {
                if let Some(sync) = self.net.as_mut() {
                    sync.on_local_move(pos);
                }
                self.status = None;
            }
            MoveOutcome::Win(winner) => {
                if let Some(sync) = self.net.as_mut() {
                    sync.on_local_move(pos);
                }
                self.status = Some(format!("{} wins! New game started.", stone_name(winner)));
            }
            MoveOutcome::Rejected(e) => {
                self.status = Some(e.to_string());
            }
        }
    }

    fn undo_clicked(&mut self) {
        match self.session.undo() {
            UndoOutcome::Undone(_) => {
                if let Some(sync) = self.net.as_mut() {
                    sync.on_local_undo();
                }
                self.status = None;
            }
            UndoOutcome::Empty => {
                self.status = Some("No moves to undo".to_string());
            }
        }
    }

    fn new_hotseat_game(&mut self) {
        self.session = GameSession::new(GameMode::Hotseat);
        self.net = None;
        self.chat_log.clear();
        self.status = None;
    }

    fn host_game(&mut self) {
        match NetSync::host(DEFAULT_PORT) {
            Ok(sync) => {
                self.session = GameSession::new(GameMode::Network {
                    local_color: Stone::Black,
                });
                self.net = Some(sync);
                self.chat_log.clear();
                self.status = Some(format!(
                    "Hosting on port {DEFAULT_PORT} — waiting for a peer, you play Black"
                ));
            }
            Err(e) => {
                self.status = Some(format!("Host failed: {e}"));
            }
        }
    }

    fn connect_to_host(&mut self) {
        let port: u16 = match self.join_port.trim().parse() {
            Ok(p) if p >= 1024 => p,
            _ => {
                self.status = Some("Port must be in 1024-65535".to_string());
                return;
            }
        };
        // Blocks up to the connect timeout; no retry on failure.
        match NetSync::join(self.join_addr.trim(), port) {
            Ok(sync) => {
                self.session = GameSession::new(GameMode::Network {
                    local_color: Stone::White,
                });
                self.net = Some(sync);
                self.chat_log.clear();
                self.show_join_dialog = false;
                self.status = Some("Connected to host — you play White".to_string());
            }
            Err(e) => {
                self.status = Some(format!("Connection failed: {e}"));
            }
        }
    }

    fn send_chat(&mut self) {
        let text = self.chat_input.trim().to_string();
        if text.is_empty() {
            return;
        }
        if let Some(sync) = self.net.as_mut() {
            sync.send_chat(&text);
            self.chat_log.push(format!("you: {text}"));
        }
        self.chat_input.clear();
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (Hot-seat)").clicked() {
                        self.new_hotseat_game();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Host Network Game").clicked() {
                        self.host_game();
                        ui.close_menu();
                    }
                    if ui.button("Join Network Game...").clicked() {
                        self.show_join_dialog = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.undo_clicked();
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // Show current mode
                    let mode_text = match self.session.mode {
                        GameMode::Hotseat => "Hot-seat".to_string(),
                        GameMode::Network { local_color } => {
                            format!("Network — You: {}", stone_name(local_color))
                        }
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and network controls
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(300.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);

                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                if self.net.is_some() {
                    self.render_network_card(ui);
                    ui.add_space(10.0);
                }

                self.render_actions_card(ui);

                if let Some(msg) = self.status.clone() {
                    ui.add_space(10.0);
                    self.render_message_card(ui, &msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    /// Render title card
    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            // Logo stones
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("五子棋").size(11.0).color(TEXT_MUTED));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let is_black = self.session.current_turn == Stone::Black;
            let (stone_char, color_name, accent) = if is_black {
                ("●", "BLACK", egui::Color32::from_rgb(70, 70, 75))
            } else {
                ("○", "WHITE", egui::Color32::from_rgb(220, 220, 225))
            };

            ui.horizontal(|ui| {
                let stone_color = if is_black {
                    TEXT_PRIMARY
                } else {
                    egui::Color32::from_rgb(30, 30, 35)
                };

                // Stone circle background
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    stone_char,
                    egui::FontId::proportional(28.0),
                    stone_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(color_name).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = match self.session.mode {
                        GameMode::Hotseat => ("To move", STATUS_OK),
                        GameMode::Network { .. } => {
                            if self.session.is_local_turn() {
                                ("Your turn", STATUS_OK)
                            } else {
                                ("Waiting for peer", STATUS_WARN)
                            }
                        }
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    /// Render network status and chat card
    fn render_network_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("NETWORK").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let (status_text, status_color) = match self.net.as_ref() {
                Some(sync) if sync.is_connected() => ("Connected", STATUS_OK),
                Some(_) => ("Waiting / disconnected", STATUS_WARN),
                None => return,
            };
            ui.label(RichText::new(status_text).size(12.0).color(status_color));

            ui.add_space(8.0);
            egui::ScrollArea::vertical()
                .max_height(160.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.chat_log {
                        ui.label(RichText::new(line).size(11.0).color(TEXT_SECONDARY));
                    }
                });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.chat_input)
                        .desired_width(ui.available_width() - 50.0)
                        .hint_text("chat"),
                );
                let enter_pressed =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Send").clicked() || enter_pressed {
                    self.send_chat();
                }
            });
        });
    }

    /// Render actions card
    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn_frame = Frame::new()
                    .fill(BUTTON_BG)
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0);

                btn_frame.show(ui, |ui| {
                    if ui
                        .add(
                            egui::Label::new(RichText::new("↩ Undo").size(12.0).color(TEXT_PRIMARY))
                                .sense(egui::Sense::click()),
                        )
                        .clicked()
                    {
                        self.undo_clicked();
                    }
                });

                ui.add_space(4.0);

                if self.session.mode == GameMode::Hotseat {
                    btn_frame.show(ui, |ui| {
                        if ui
                            .add(
                                egui::Label::new(
                                    RichText::new("🔄 New Game").size(12.0).color(TEXT_PRIMARY),
                                )
                                .sense(egui::Sense::click()),
                            )
                            .clicked()
                        {
                            self.session.reset();
                            self.status = None;
                        }
                    });
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("Move #{}", self.session.move_count()))
                        .size(11.0)
                        .color(TEXT_SECONDARY),
                );
            });
        });
    }

    /// Render status message card
    fn render_message_card(&self, ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(14.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                });
            });
    }

    /// Render the join dialog
    fn render_join_dialog(&mut self, ctx: &Context) {
        if !self.show_join_dialog {
            return;
        }
        let mut open = true;
        let mut connect_clicked = false;
        egui::Window::new("Join Network Game")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Host IP:");
                    ui.text_edit_singleline(&mut self.join_addr);
                });
                ui.horizontal(|ui| {
                    ui.label("Port:");
                    ui.text_edit_singleline(&mut self.join_port);
                });
                ui.add_space(8.0);
                if ui.button("Connect").clicked() {
                    connect_clicked = true;
                }
            });
        self.show_join_dialog = open;
        if connect_clicked {
            self.connect_to_host();
        }
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let can_play = self.session.is_local_turn();
            let clicked = self.board_view.show(
                ui,
                &self.session.board,
                self.session.current_turn,
                self.session.last_move,
                can_play,
            );

            if let Some(pos) = clicked {
                self.handle_board_click(pos);
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        // Don't steal keys from the chat box or the join dialog
        if ctx.wants_keyboard_input() {
            return;
        }
        let (undo, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
            )
        });

        if undo {
            self.undo_clicked();
        }
        // N - New game (hot-seat only; a unilateral reset would desync a peer)
        if new_game && self.session.mode == GameMode::Hotseat {
            self.session.reset();
            self.status = None;
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Handle keyboard input
        self.handle_input(ctx);

        // Apply whatever the peer sent since the last frame
        self.pump_network();

        // Render UI
        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_join_dialog(ctx);
        self.render_board(ctx);

        // Keep pumping while a network session exists, even without
        // local input events
        if self.net.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
