//! UI module for rendering the TUI

mod components;
mod confirmation;
mod forms;
mod history;
mod home;
mod layout;
mod login;
mod profile;
mod splash;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::{render_error_dialog, render_request_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.state.current_view == View::Splash {
        if let Some(splash_state) = &app.splash_state {
            splash::draw(frame, area, splash_state);
        }
        return;
    }

    if app.state.current_view.has_sidebar() {
        let (sidebar_area, main_area) = layout::create_layout(area);
        layout::draw_sidebar(frame, sidebar_area, app);
        match app.state.current_view {
            View::History => history::draw(frame, main_area, app),
            View::Profile => profile::draw(frame, main_area, app),
            _ => home::draw(frame, main_area, app),
        }
    } else {
        let main_area = layout::create_layout_no_sidebar(area);
        match app.state.current_view {
            View::SendMoney => forms::draw_send_money(frame, main_area, app),
            View::Confirmation => confirmation::draw(frame, main_area, app),
            _ => login::draw(frame, main_area, app),
        }
    }

    layout::draw_status_bar(frame, app);

    // Overlays, error dialog on top
    if !app.state.request_details.is_idle() {
        render_request_dialog(frame, &app.state.request_details);
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.errors.len());
    }
}
