//! Application setup and window creation.

use std::time::Duration;

use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;
use tracing::{error, info, warn};

use crate::domain::Catalogue;
use crate::models::GameModel;
use crate::ui::views::ChessBoardView;

/// What the window starts with
pub struct AppConfig {
    pub catalogue: Catalogue,
    pub opening: Option<String>,
    pub reply_delay: Duration,
}

/// Initialize and run the practice application
pub fn run(cx: &mut App, config: AppConfig) {
    gpui_component::init(cx);

    let AppConfig {
        catalogue,
        opening,
        reply_delay,
    } = config;

    let model = cx.new(|_| {
        let mut game = GameModel::new(catalogue, reply_delay);
        if let Some(id) = opening {
            if game.select_opening(&id) {
                game.start_practice();
            } else {
                warn!(%id, "unknown opening, starting in free play");
            }
        }
        game
    });

    let bounds = Bounds::centered(None, size(px(960.0), px(640.0)), cx);
    let opened = cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(model, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    );

    match opened {
        Ok(_) => info!("window opened"),
        Err(e) => {
            error!(error = %e, "failed to open window");
            cx.quit();
        }
    }
}
