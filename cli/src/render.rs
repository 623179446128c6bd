use floodfill_core as game;
use std::fmt::Write;

/// Text rendering of a view. Region cells use the upper-case symbol, the rest lower-case.
pub(crate) fn board(view: &game::BoardView, ansi: bool) -> String {
    let mut out = String::new();
    for row in 0..view.size {
        for col in 0..view.size {
            let coords = (row, col);
            let color = view.color_at(coords);
            let symbol = if view.in_region(coords) {
                color.symbol()
            } else {
                color.symbol().to_ascii_lowercase()
            };
            if ansi {
                let (r, g, b) = color.rgb();
                let _ = write!(out, "\x1b[48;2;{r};{g};{b}m\x1b[30m{symbol} \x1b[0m");
            } else {
                out.push(symbol);
                out.push(' ');
            }
        }
        out.truncate(out.trim_end_matches(' ').len());
        out.push('\n');
    }
    out
}

pub(crate) fn status(view: &game::BoardView) -> String {
    let mut line = format!(
        "Moves: {}/{}  Filled: {:.1}%",
        view.moves,
        view.move_limit,
        view.filled_percent()
    );
    match (view.state, view.score) {
        (game::EngineState::Won, Some(score)) => {
            let _ = write!(line, "  WON, score {score}");
        }
        (game::EngineState::Lost, Some(score)) => {
            let _ = write!(line, "  LOST, score {score}");
        }
        _ => {}
    }
    line
}

pub(crate) fn palette(current: game::Color) -> String {
    game::Color::PALETTE
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let marker = if *color == current { "*" } else { "" };
            format!("{}:{}({}){marker}", i + 1, color.name(), color.symbol())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
