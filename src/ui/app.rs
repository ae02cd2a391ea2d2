//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use crate::board::Stone;
use crate::config::{GameConfig, GameMode};
use crate::error::GameError;
use crate::rules::GameStatus;
use crate::storage::BoardStore;

use super::board_view::{BoardView, Overlay};
use super::game_state::GameState;
use super::theme::*;

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    config: GameConfig,
    store: BoardStore,
    show_debug: bool,
    show_storage: bool,
    save_name: String,
    saved_names: Vec<String>,
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            state: GameState::new(&config)?,
            board_view: BoardView::default(),
            store: BoardStore::new(&config.storage.save_dir),
            config,
            show_debug: false,
            show_storage: false,
            save_name: String::new(),
            saved_names: Vec::new(),
        })
    }

    fn refresh_saved_names(&mut self) {
        match self.store.list_boards() {
            Ok(names) => self.saved_names = names,
            Err(e) => self.state.message = Some(e.to_string()),
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (PvE - Black)").clicked() {
                        self.state.set_mode(GameMode::Pve, Stone::Black);
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvE - White)").clicked() {
                        self.state.set_mode(GameMode::Pve, Stone::White);
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.state.set_mode(GameMode::Pvp, self.state.human_side);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                    if ui.button("Redo").clicked() {
                        self.state.redo();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Saved Boards...").clicked() {
                        self.show_storage = true;
                        self.refresh_saved_names();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                    ui.checkbox(&mut self.config.ui.show_coordinates, "Coordinates");
                    ui.checkbox(&mut self.config.ui.highlight_last_move, "Last Move Marker");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let board = self.state.board();
                    let mode_text = match self.state.computer_side() {
                        Some(computer) => format!("PvE - You: {}", computer.opponent().name()),
                        None => "PvP - Hotseat".to_string(),
                    };
                    ui.label(format!(
                        "{mode_text}  |  {}x{}, {} to win",
                        board.rows(),
                        board.cols(),
                        board.win_length()
                    ));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);
                self.render_turn_card(ui);
                ui.add_space(10.0);
                self.render_timer_card(ui);
                ui.add_space(10.0);
                self.render_stats_card(ui);
                ui.add_space(10.0);
                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if self.state.game.is_game_over() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
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

    /// Clickable label styled as a button
    fn action_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> bool {
        let color = if enabled { TEXT_PRIMARY } else { TEXT_MUTED };
        let mut clicked = false;
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                let label = egui::Label::new(RichText::new(text).size(12.0).color(color))
                    .sense(egui::Sense::click());
                clicked = ui.add(label).clicked() && enabled;
            });
        clicked
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            let win_length = self.state.board().win_length();
            ui.label(RichText::new(format!("{win_length} in a row")).size(11.0).color(TEXT_MUTED));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let is_black = self.state.current_turn() == Stone::Black;
            let (stone_char, color_name, accent) = if is_black {
                ("●", "BLACK", egui::Color32::from_rgb(70, 70, 75))
            } else {
                ("○", "WHITE", egui::Color32::from_rgb(220, 220, 225))
            };

            ui.horizontal(|ui| {
                let stone_color = if is_black { TEXT_PRIMARY } else { egui::Color32::from_rgb(30, 30, 35) };

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

                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.game.is_game_over() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                    ui.label(
                        RichText::new(format!("Move #{}", self.state.game.history().len() + 1))
                            .size(11.0)
                            .color(TEXT_SECONDARY),
                    );
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 1.0 {
                    TIMER_NORMAL
                } else if secs < 3.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(24.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Running totals across games
    fn render_stats_card(&self, ui: &mut egui::Ui) {
        let stats = &self.state.stats;
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("STATISTICS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            let rows = [
                ("Games", stats.total_games.to_string()),
                ("Black wins", format!("{} ({:.0}%)", stats.black_wins, stats.black_win_rate())),
                ("White wins", format!("{} ({:.0}%)", stats.white_wins, stats.white_win_rate())),
                ("Draws", format!("{} ({:.0}%)", stats.draws, stats.draw_rate())),
            ];
            for (label, value) in rows {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(label).size(11.0).color(TEXT_SECONDARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(value).size(11.0).color(TEXT_PRIMARY));
                    });
                });
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            let idle = !self.state.is_ai_thinking();
            ui.horizontal(|ui| {
                if Self::action_button(ui, "Undo (U)", idle && self.state.game.can_undo()) {
                    self.state.undo();
                }
                if Self::action_button(ui, "Redo (R)", idle && self.state.game.can_redo()) {
                    self.state.redo();
                }
                if Self::action_button(ui, "New (N)", true) {
                    self.state.reset();
                }
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if self.state.mode == GameMode::Pvp
                    && Self::action_button(ui, "Hint (H)", !self.state.game.is_game_over())
                {
                    self.state.request_suggestion();
                }
                if Self::action_button(ui, "Saved Boards", idle) {
                    self.show_storage = true;
                    self.refresh_saved_names();
                }
            });
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = &self.state.last_ai_result else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                return;
            };
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!("{:?}", result.search_type))
                            .size(11.0)
                            .strong()
                            .color(TIMER_NORMAL),
                    );
                    ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                        ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                    });
                });
            });
            if let Some(pos) = result.best_move {
                ui.add_space(4.0);
                ui.label(RichText::new(format!("-> {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui) {
        let headline = match self.state.game.status() {
            GameStatus::Won(side) => format!("{} WINS!", side.name().to_uppercase()),
            GameStatus::Draw => "DRAW".to_string(),
            GameStatus::InProgress => return,
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(12.0);
                    if Self::action_button(ui, "New Game", true) {
                        self.state.reset();
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Save/load window
    fn render_storage_window(&mut self, ctx: &Context) {
        let mut open = self.show_storage;
        egui::Window::new("Saved Boards")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut self.save_name);
                    if ui.button("Save").clicked() {
                        let name = self.save_name.trim().to_string();
                        match self.store.save_board(&name, self.state.board()) {
                            Ok(()) => self.state.message = Some(format!("Saved '{name}'")),
                            Err(e) => self.state.message = Some(e.to_string()),
                        }
                        self.refresh_saved_names();
                    }
                });
                ui.separator();

                if self.saved_names.is_empty() {
                    ui.label(RichText::new("No saved boards").color(TEXT_MUTED));
                }
                let mut load = None;
                let mut delete = None;
                for name in &self.saved_names {
                    ui.horizontal(|ui| {
                        ui.label(name);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Delete").clicked() {
                                delete = Some(name.clone());
                            }
                            if ui.button("Load").clicked() {
                                load = Some(name.clone());
                            }
                        });
                    });
                }

                if let Some(name) = load {
                    match self.store.load_board(&name) {
                        Ok(board) => {
                            self.state.load_board(board);
                            self.state.message = Some(format!("Loaded '{name}'"));
                        }
                        Err(e) => self.state.message = Some(e.to_string()),
                    }
                }
                if let Some(name) = delete {
                    if let Err(e) = self.store.delete_board(&name) {
                        self.state.message = Some(e.to_string());
                    }
                    self.refresh_saved_names();
                }
            });
        self.show_storage = open;
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let winning_line = self.state.game.winning_line();
            let last_move = self
                .config
                .ui
                .highlight_last_move
                .then(|| self.state.game.last_move().map(|mv| mv.pos))
                .flatten();
            let overlay = Overlay {
                current_turn: self.state.current_turn(),
                last_move,
                suggested_move: self.state.suggested_move,
                winning_line: winning_line.as_deref(),
                accepts_input: !self.state.game.is_game_over()
                    && !self.state.is_ai_thinking()
                    && self.state.is_human_turn(),
                show_coordinates: self.config.ui.show_coordinates,
            };

            let clicked = self.board_view.show(ui, self.state.game.board(), &overlay);

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        // Typing a save name must not trigger shortcuts
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }
            if i.key_pressed(egui::Key::H) && self.state.mode == GameMode::Pvp {
                self.state.request_suggestion();
            }
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }
            if i.key_pressed(egui::Key::R) {
                self.state.redo();
            }
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();
        if self.state.is_ai_turn() && !self.state.is_ai_thinking() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);
        if self.show_storage {
            self.render_storage_window(ctx);
        }

        // Keep polling the worker and ticking the timer
        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        } else if !self.state.game.is_game_over() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
