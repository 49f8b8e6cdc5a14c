//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, CARD_COLUMNS};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // The dialog is modal: only closing it is allowed
        if model.is_dialog_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char('X') => {
                    drop(model);
                    self.close_dialog().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
                return Ok(());
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
                return Ok(());
            }
            _ => {}
        }

        let ui_state = model.get_ui_state().await;

        match ui_state.active_section {
            ActiveSection::Search => match key.code {
                KeyCode::Enter => {
                    drop(model);
                    // The fetch runs on its own task; Loading is already set
                    let _ = self.submit_search().await;
                }
                KeyCode::Esc => {
                    drop(model);
                    self.update_free_text(String::new()).await;
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                }
                KeyCode::Char(c)
                    if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    model.append_to_search(c).await;
                }
                _ => {}
            },
            ActiveSection::Category => {
                let category = match key.code {
                    KeyCode::Left | KeyCode::Up => Some(ui_state.category.prev()),
                    KeyCode::Right | KeyCode::Down => Some(ui_state.category.next()),
                    _ => None,
                };
                if let Some(category) = category {
                    drop(model);
                    let _ = self.update_category(category).await;
                    return Ok(());
                }
                self.handle_global_key(&model, key.code).await;
            }
            ActiveSection::Results => match key.code {
                KeyCode::Left => model.move_highlight(-1).await,
                KeyCode::Right => model.move_highlight(1).await,
                KeyCode::Up => model.move_highlight(-(CARD_COLUMNS as isize)).await,
                KeyCode::Down => model.move_highlight(CARD_COLUMNS as isize).await,
                KeyCode::Enter => {
                    drop(model);
                    self.open_highlighted_book().await;
                }
                code => self.handle_global_key(&model, code).await,
            },
        }
        Ok(())
    }

    /// Keys that work whenever the search box does not own the keyboard
    async fn handle_global_key(&self, model: &crate::model::AppModel, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Char('?') => {
                model.toggle_help_popup().await;
            }
            KeyCode::Char('/') | KeyCode::Char('g') | KeyCode::Char('G') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            _ => {}
        }
    }
}
