use std::path::PathBuf;

use cellmate::board::{Board, CellIndex, Coords, Team};
use clap::{Parser, Subcommand};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays a random-mover game from the standard position (DEFAULT)
    Play {
        /// Seed for the random mover, for reproducible games
        #[arg(short, long)]
        seed: Option<u64>,
        /// Maximum number of plies before the game is called off
        #[arg(short, long, default_value_t = 200)]
        max_plies: u32,
        /// Does not print the board after every move
        #[arg(long)]
        no_board: bool,
    },
    /// Prints a position and, optionally, the legal targets of a cell
    Show {
        /// File containing a board in row-string format
        #[arg(short, long)]
        position: Option<PathBuf>,
        /// Cell to list legal targets for, e.g. e2
        cell: Option<String>,
    },
}

pub fn main() {
    let args = Arguments::parse();
    env_logger::init();

    match args.command.unwrap_or(Command::Play {
        seed: None,
        max_plies: 200,
        no_board: false,
    }) {
        Command::Play {
            seed,
            max_plies,
            no_board,
        } => play(seed, max_plies, !no_board),
        Command::Show { position, cell } => show(position, cell),
    }
}

fn play(seed: Option<u64>, max_plies: u32, show_board: bool) {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut board = Board::standard();
    let mut team = Team::White;

    if show_board {
        println!("{board}");
    }
    for ply in 1..=max_plies {
        if board.is_checkmate(team) {
            println!("checkmate, {} wins", team.opponent());
            return;
        }
        if board.is_stalemate(team) {
            println!("stalemate");
            return;
        }

        let mut moves: Vec<(CellIndex, CellIndex)> = Vec::new();
        for from in board.team_cells(team) {
            for to in board.legal_targets(from) {
                moves.push((from, to));
            }
        }
        let Some(&(from, to)) = moves.choose(&mut rng) else {
            return;
        };
        let actions = board.perform_action(from, to).unwrap();
        log::info!(
            "ply {ply}: {team} plays {} -> {} ({} actions)",
            cell_name(&board, from),
            cell_name(&board, to),
            actions.len()
        );
        if show_board {
            println!("{board}");
        }
        team = team.opponent();
    }
    println!("game called off after {max_plies} plies");
}

fn show(position: Option<PathBuf>, cell: Option<String>) {
    let mut board = match position {
        Some(path) => {
            let text = std::fs::read_to_string(&path).unwrap_or_else(|err| {
                eprintln!("cannot read {}: {err}", path.display());
                std::process::exit(1);
            });
            let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
            match Board::from_rows(&rows) {
                Ok(board) => board,
                Err(err) => {
                    eprintln!("bad position: {err}");
                    std::process::exit(1);
                }
            }
        }
        None => Board::standard(),
    };

    println!("{board}");
    if let Some(name) = cell {
        let Some(index) = parse_cell(&board, &name) else {
            eprintln!("no such cell: {name}");
            std::process::exit(1);
        };
        let targets = board.legal_targets(index);
        if targets.is_empty() {
            println!("no legal targets for {name}");
        } else {
            let names: Vec<String> = targets
                .iter()
                .map(|&target| cell_name(&board, target))
                .collect();
            println!("legal targets of {name}: {}", names.join(" "));
        }
    }
}

/// Parses algebraic cell names (`a1` is the bottom-left corner from
/// team 0's point of view).
fn parse_cell(board: &Board, name: &str) -> Option<CellIndex> {
    let mut chars = name.chars();
    let file = chars.next()?.to_ascii_lowercase();
    let x = file as i16 - 'a' as i16;
    let rank: i16 = chars.as_str().parse().ok()?;
    let y = board.height() as i16 - rank;
    board.cell_index(Coords::new(x, y))
}

fn cell_name(board: &Board, index: CellIndex) -> String {
    let at = board.coords(index);
    format!(
        "{}{}",
        (b'a' + at.x as u8) as char,
        board.height() as i16 - at.y
    )
}
