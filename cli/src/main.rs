use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use desmina_core::{
    Game, GameConfig, MineLayoutGenerator, RandomLayoutGenerator, RevealOutcome, parse_selection,
    MAX_GRID_SIZE, MIN_GRID_SIZE,
};
use rand::Rng;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut stdin.lock(), &mut stdout.lock())
}

/// Runs one full session over the given channels: greeting, setup prompts,
/// the turn loop, and the final verdict. A closed input channel ends the
/// session quietly at any prompt.
fn run(input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    writeln!(output, "Welcome to Minesweeper!")?;

    let Some(config) = prompt_config(input, output)? else {
        return Ok(());
    };

    let seed = rand::rng().random();
    log::debug!("seeding mine layout generator with {seed}");
    let layout = RandomLayoutGenerator::new(seed).generate(config);
    let mut game = Game::new(layout);

    render_board(&game, output)?;
    play(&mut game, input, output)
}

/// Collects grid size and mine count, re-prompting until both are in range.
/// Returns `None` when the input channel closes.
fn prompt_config(input: &mut impl BufRead, output: &mut impl Write) -> Result<Option<GameConfig>> {
    let size = loop {
        let prompt = "Enter the size of the grid (e.g., 4 for a 4x4 grid): ";
        let Some(line) = prompt_line(input, output, prompt)? else {
            return Ok(None);
        };
        match line.trim().parse() {
            Ok(size) if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) => break size,
            _ => writeln!(
                output,
                "Incorrect input. Please enter a number between {MIN_GRID_SIZE} and {MAX_GRID_SIZE}."
            )?,
        }
    };

    let max_mines = GameConfig::max_mines(size);
    let mines = loop {
        let prompt =
            format!("Enter the number of mines to place on the grid (maximum is {max_mines}): ");
        let Some(line) = prompt_line(input, output, &prompt)? else {
            return Ok(None);
        };
        match line.trim().parse() {
            Ok(mines) if (1..=max_mines).contains(&mines) => break mines,
            _ => writeln!(
                output,
                "Incorrect input. Please enter a number between 1 and {max_mines}."
            )?,
        }
    };

    // The prompts enforce the same ranges the config validates.
    Ok(Some(GameConfig::new(size, mines)?))
}

/// The turn loop: read a selection, reject anything the parser or the live
/// grid refuses, feed the rest to the engine, and re-render after updates.
fn play(game: &mut Game, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    while !game.is_finished() {
        let Some(line) = prompt_line(input, output, "Select a square to reveal (e.g., A1): ")?
        else {
            return Ok(());
        };

        let Ok((row, col)) = parse_selection(line.trim()) else {
            writeln!(output, "Incorrect input. Please enter a valid square (e.g., A1).")?;
            continue;
        };

        // The selection grammar reaches up to J10; a smaller grid rejects the
        // excess here, before the engine sees it.
        if row >= game.size() || col >= game.size() {
            writeln!(output, "Incorrect input. Please enter a valid square (e.g., A1).")?;
            continue;
        }

        match game.select((row, col))? {
            RevealOutcome::HitMine => {
                writeln!(output, "Oh no, you detonated a mine! Game over.")?;
            }
            RevealOutcome::Won => {
                render_board(game, output)?;
                writeln!(output, "Congratulations, you have won the game!")?;
            }
            outcome if outcome.has_update() => render_board(game, output)?,
            _ => {}
        }
    }

    Ok(())
}

/// Writes the prompt without a trailing newline and reads one line back.
/// `None` means the input channel closed.
fn prompt_line(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading player input")?;
    Ok((read > 0).then_some(line))
}

fn render_board(game: &Game, output: &mut impl Write) -> Result<()> {
    for line in board_lines(game) {
        writeln!(output, "{line}")?;
    }
    Ok(())
}

/// Formats the board for the terminal: a 1-based column header, then one line
/// per row labeled `A`, `B`, ... with space-separated cell symbols.
fn board_lines(game: &Game) -> Vec<String> {
    let size = game.size();
    let mut lines = Vec::with_capacity(size as usize + 1);

    let header: Vec<String> = (1..=size).map(|col| col.to_string()).collect();
    lines.push(format!("  {}", header.join(" ")));

    for row in 0..size {
        let symbols: Vec<String> = (0..size)
            .map(|col| game.cell_at((row, col)).symbol().to_string())
            .collect();
        lines.push(format!("{} {}", (b'A' + row) as char, symbols.join(" ")));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use desmina_core::{Coord, Coord2, GameState, MineLayout};
    use std::io::Cursor;

    fn game_with_mines(size: Coord, mines: &[Coord2]) -> Game {
        Game::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn transcript(output: Vec<u8>) -> String {
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn board_lines_use_the_prompt_format() {
        let mut game = game_with_mines(3, &[(0, 0), (1, 1)]);
        game.select((0, 1)).unwrap();
        game.select((2, 0)).unwrap();

        let lines = board_lines(&game);

        assert_eq!(lines[0], "  1 2 3");
        assert_eq!(lines[1], "A   2  ");
        assert_eq!(lines[2], "B      ");
        assert_eq!(lines[3], "C 1    ");
    }

    #[test]
    fn play_reports_a_detonated_mine() {
        let mut game = game_with_mines(3, &[(0, 0)]);
        let mut output = Vec::new();

        play(&mut game, &mut Cursor::new(&b"A1\n"[..]), &mut output).unwrap();

        assert_eq!(game.state(), GameState::Lost);
        assert!(transcript(output).contains("Oh no, you detonated a mine! Game over."));
    }

    #[test]
    fn play_congratulates_a_win() {
        let mut game = game_with_mines(3, &[(0, 0)]);
        let mut output = Vec::new();

        play(&mut game, &mut Cursor::new(&b"C3\n"[..]), &mut output).unwrap();

        assert_eq!(game.state(), GameState::Won);
        assert!(transcript(output).contains("Congratulations, you have won the game!"));
    }

    #[test]
    fn play_rejects_selections_outside_the_live_grid() {
        let mut game = game_with_mines(3, &[(0, 0)]);
        let mut output = Vec::new();

        play(&mut game, &mut Cursor::new(&b"J10\nxyz\nC3\n"[..]), &mut output).unwrap();

        let transcript = transcript(output);
        assert_eq!(
            transcript
                .matches("Incorrect input. Please enter a valid square (e.g., A1).")
                .count(),
            2
        );
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn run_reprompts_until_the_setup_is_valid() {
        let mut output = Vec::new();

        // Size 99 and "abc" are rejected, 3 accepted; mine counts 0 and 9 are
        // rejected (a 3x3 grid caps at 3), 2 accepted. End of input quits at
        // the first selection prompt.
        run(
            &mut Cursor::new(&b"99\nabc\n3\n0\n9\n2\n"[..]),
            &mut output,
        )
        .unwrap();

        let transcript = transcript(output);
        assert!(transcript.contains("Welcome to Minesweeper!"));
        assert_eq!(
            transcript
                .matches("Incorrect input. Please enter a number between 3 and 10.")
                .count(),
            2
        );
        assert_eq!(
            transcript
                .matches("Incorrect input. Please enter a number between 1 and 3.")
                .count(),
            2
        );
        assert!(transcript.contains("  1 2 3"));
        assert!(transcript.contains("Select a square to reveal (e.g., A1): "));
    }
}
