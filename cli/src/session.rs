use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use gridsweep_core::{Board, GameOutcome};

use crate::config::{Difficulty, MAX_SIDE, MIN_SIDE};
use crate::error::InputError;
use crate::input::{Command, MenuChoice, parse_number, parse_yes_no};
use crate::render::{LEGEND, render_board, render_status};

/// How a single game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEnd {
    Won,
    Lost,
    Quit,
}

/// Terminal conversation with the player over any line-based reader and writer.
pub struct Session<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    /// Writes `message` and reads one line, `None` once the input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Runs the difficulty menu until a valid board is chosen, `None` at end of input.
    pub fn choose_difficulty(&mut self) -> io::Result<Option<Difficulty>> {
        loop {
            let Some(line) = self.prompt(
                "Choose difficulty (1: beginner 9x9/10, 2: intermediate 16x16/40, \
                 3: expert 16x30/99, 4: custom): ",
            )?
            else {
                return Ok(None);
            };

            let choice = match MenuChoice::parse(&line) {
                Ok(choice) => choice,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };

            match choice {
                MenuChoice::Preset(difficulty) => return Ok(Some(difficulty)),
                MenuChoice::Custom => match self.custom_difficulty()? {
                    None => return Ok(None),
                    Some(Ok(difficulty)) => return Ok(Some(difficulty)),
                    Some(Err(err)) => writeln!(self.output, "{err}")?,
                },
            }
        }
    }

    fn custom_difficulty(&mut self) -> io::Result<Option<Result<Difficulty, InputError>>> {
        let Some(rows) = self.prompt(&format!("Rows ({MIN_SIDE}-{MAX_SIDE}): "))? else {
            return Ok(None);
        };
        let Some(cols) = self.prompt(&format!("Columns ({MIN_SIDE}-{MAX_SIDE}): "))? else {
            return Ok(None);
        };

        let (rows, cols) = match parse_number(&rows)
            .and_then(|rows| Ok((rows, parse_number(&cols)?)))
            .and_then(|(rows, cols)| Difficulty::check_size(rows, cols))
        {
            Ok(size) => size,
            Err(err) => return Ok(Some(Err(err))),
        };

        let max = i64::from(rows) * i64::from(cols) - 1;
        let Some(hazards) = self.prompt(&format!("Hazards (at most {max}): "))? else {
            return Ok(None);
        };

        Ok(Some(parse_number(&hazards).and_then(|hazards| {
            Difficulty::custom(rows.into(), cols.into(), hazards)
        })))
    }

    /// Plays `board` until it is won, lost or the player quits.
    pub fn play(&mut self, mut board: Board) -> io::Result<GameEnd> {
        let (rows, cols) = board.size();
        self.clear()?;
        writeln!(
            self.output,
            "Board: {rows}x{cols}, hazards: {}",
            board.total_hazards()
        )?;
        writeln!(self.output, "{LEGEND}")?;

        let mut notice: Option<&str> = None;
        let mut first_turn = true;

        while !board.is_finished() {
            if !first_turn {
                self.clear()?;
            }
            first_turn = false;

            write!(self.output, "{}", render_board(&board, false))?;
            writeln!(self.output, "{}", render_status(&board))?;
            if let Some(notice) = notice.take() {
                writeln!(self.output, "{notice}")?;
            }

            let command = loop {
                let Some(line) = self.prompt("Command (r/f <row> <col>, q): ")? else {
                    log::info!("Input closed, leaving game");
                    return Ok(GameEnd::Quit);
                };
                match Command::parse(&line).and_then(|command| command.check_bounds(board.size()))
                {
                    Ok(command) => break command,
                    Err(err) => writeln!(self.output, "{err}")?,
                }
            };

            match command {
                Command::Quit => {
                    writeln!(self.output, "Game quit.")?;
                    return Ok(GameEnd::Quit);
                }
                Command::Reveal(row, col) => {
                    let outcome = board.reveal(row, col);
                    log::debug!("Reveal ({row}, {col}): {outcome:?}");
                    if !outcome.has_update() {
                        notice = Some("That cell is already revealed or flagged.");
                    }
                }
                Command::Flag(row, col) => {
                    let outcome = board.toggle_flag(row, col);
                    log::debug!("Flag ({row}, {col}): {outcome:?}");
                    if !outcome.has_update() {
                        notice = Some("Revealed cells cannot be flagged.");
                    }
                }
            }
        }

        self.clear()?;
        write!(self.output, "{}", render_board(&board, true))?;
        let end = match board.outcome() {
            GameOutcome::Won => {
                writeln!(self.output, "Congratulations! You win!")?;
                GameEnd::Won
            }
            GameOutcome::Lost | GameOutcome::InProgress => {
                writeln!(self.output, "Game over!")?;
                GameEnd::Lost
            }
        };
        log::info!("Game finished: {end:?}");
        Ok(end)
    }

    /// Asks whether to start another game; end of input counts as no.
    pub fn ask_play_again(&mut self) -> io::Result<bool> {
        loop {
            let Some(line) = self.prompt("\nPlay again? (y/n): ")? else {
                return Ok(false);
            };
            match parse_yes_no(&line) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    pub fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.output, "Thanks for playing!")
    }
}
