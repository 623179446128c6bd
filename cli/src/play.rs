use anyhow::Context;
use chrono::{DateTime, Utc};
use floodfill_core as game;
use std::io::{BufRead, Write};

use crate::host::{Host, ResultSink};
use crate::render;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Input {
    Pick(game::Color),
    Hint,
    Help,
    Quit,
}

/// Parses one line of player input: a palette number `1..=6`, a color name or hex code, or a
/// command word.
pub(crate) fn parse_input(line: &str) -> game::Result<Input> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "hint" | "?" => return Ok(Input::Hint),
        "help" | "h" => return Ok(Input::Help),
        "quit" | "q" | "exit" => return Ok(Input::Quit),
        _ => {}
    }

    if let Ok(number) = line.parse::<usize>() {
        let index = number.checked_sub(1).ok_or(game::GameError::InvalidColor)?;
        return game::Color::from_index(index).map(Input::Pick);
    }

    line.parse().map(Input::Pick)
}

pub(crate) struct PlayOptions {
    pub user_id: i64,
    pub ansi: bool,
}

/// Relays picks from `input` until the game ends, the player quits, or input runs out.
pub(crate) fn run<S, R, W>(
    host: &mut Host<S>,
    options: &PlayOptions,
    mut input: R,
    output: &mut W,
    mut clock: impl FnMut() -> DateTime<Utc>,
) -> anyhow::Result<()>
where
    S: ResultSink,
    R: BufRead,
    W: Write,
{
    let user_id = options.user_id;
    show(host, options, output)?;

    let mut line = String::new();
    loop {
        line.clear();
        write!(output, "> ")?;
        output.flush()?;
        if input.read_line(&mut line).context("Could not read input")? == 0 {
            log::debug!("input closed, leaving game");
            host.leave(user_id);
            return Ok(());
        }

        let engine = &session(host, user_id)?.engine;
        match parse_input(&line) {
            Ok(Input::Quit) => {
                writeln!(output, "Giving up.")?;
                host.leave(user_id);
                return Ok(());
            }
            Ok(Input::Help) => {
                writeln!(output, "Pick a color by number, name or hex code.")?;
                writeln!(output, "{}", render::palette(engine.region_color()))?;
                writeln!(output, "{} moves left.", engine.moves_left())?;
                writeln!(output, "Other commands: hint, quit")?;
            }
            Ok(Input::Hint) => match game::greedy_choice(engine) {
                Some(color) => writeln!(output, "Hint: try {color}")?,
                None => writeln!(output, "No moves left.")?,
            },
            Ok(Input::Pick(color)) => {
                let (outcome, ack) = host.pick(user_id, color, clock())?;
                if !outcome.has_update() {
                    writeln!(output, "Region is already {color}, pick another color.")?;
                    continue;
                }
                show(host, options, output)?;
                if let Some(ack) = ack {
                    writeln!(output, "{}", ack.message)?;
                    writeln!(
                        output,
                        "Balance: {:.4}  Level: {}",
                        ack.new_balance, ack.new_level
                    )?;
                    return Ok(());
                }
            }
            Err(err) => {
                log::debug!("rejected input {:?}: {err}", line.trim());
                writeln!(output, "{err}: {:?}", line.trim())?;
            }
        }
    }
}

fn session<S: ResultSink>(host: &Host<S>, user_id: i64) -> anyhow::Result<&game::Session> {
    Ok(host
        .session(user_id)
        .ok_or(game::GameError::UnknownSession)?)
}

fn show<S: ResultSink, W: Write>(
    host: &Host<S>,
    options: &PlayOptions,
    output: &mut W,
) -> anyhow::Result<()> {
    let view = session(host, options.user_id)?.engine.view();
    write!(output, "{}", render::board(&view, options.ansi))?;
    writeln!(output, "{}", render::status(&view))?;
    if view.state.is_playing() {
        writeln!(output, "{}", render::palette(view.region_color))?;
    }
    Ok(())
}
