//! Place N queens on an N x N board so that no two attack each other.
//!
//! Every row owns a logic variable holding the column of its queen. The
//! search unifies the next row with each safe column in turn and retracts
//! that binding before it tries the next column.
//!
//! Usage: `cargo run --example n_queens -- [board size] [solutions to show]`

use std::env;
use std::process;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trail_unify::prelude::*;

struct Board {
    rows: Vec<Term>,
    columns: Vec<Term>,
}

impl Board {
    fn new(store: &mut Store, size: usize) -> Result<Self> {
        let rows = store.vars(size);
        let columns = (0..size)
            .map(|c| store.value(c as i64))
            .collect::<Result<Vec<_>>>()?;
        Ok(Board { rows, columns })
    }

    fn column_of(&self, store: &Store, row: usize) -> Option<i64> {
        store.try_value(self.rows[row]).and_then(Scalar::as_int)
    }

    fn is_safe(&self, store: &Store, row: usize, col: i64) -> bool {
        (0..row).all(|r| match self.column_of(store, r) {
            Some(c) => c != col && (c - col).unsigned_abs() as usize != row - r,
            None => true,
        })
    }

    /// Hands every complete placement to `found` until it returns `false`.
    fn place(&self, store: &mut Store, row: usize, found: &mut dyn FnMut(&[i64]) -> bool) -> bool {
        if row == self.rows.len() {
            let placement: Vec<i64> = (0..row).filter_map(|r| self.column_of(store, r)).collect();
            return found(&placement);
        }
        for (col, &column) in self.columns.iter().enumerate() {
            if !self.is_safe(store, row, col as i64) {
                continue;
            }
            let keep_going = store
                .unify_then(self.rows[row], column, |s| self.place(s, row + 1, found))
                .unwrap_or(true);
            if !keep_going {
                return false;
            }
        }
        true
    }
}

fn digits(n: usize) -> usize {
    n.to_string().len()
}

/// Render a placement with column letters on top and the queen's
/// column number at the end of each row.
fn layout(placement: &[i64]) -> String {
    let size = placement.len();
    let width = digits(size);
    let headers: Vec<String> = (0..size)
        .map(|c| char::from(b'a' + (c % 26) as u8).to_string())
        .collect();
    let mut out = format!("{}{}  col#\n", " ".repeat(width + 3), headers.join("  "));
    for (row, &col) in placement.iter().enumerate() {
        let col = col as usize;
        out.push_str(&format!(
            "{:>width$}) {} Q {} ({})\n",
            row + 1,
            " . ".repeat(col),
            " . ".repeat(size - col - 1),
            col + 1,
            width = width,
        ));
    }
    out
}

fn positive(raw: &str) -> Option<usize> {
    raw.trim().parse().ok().filter(|&n| n > 0)
}

fn parse_arg(args: &[String], index: usize, default: usize) -> usize {
    match args.get(index) {
        None => default,
        Some(raw) => positive(raw).unwrap_or_else(|| {
            eprintln!("expected a positive number, got {:?}", raw);
            process::exit(2);
        }),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let size = parse_arg(&args, 0, 8);
    let wanted = parse_arg(&args, 1, 1);

    let mut store = Store::with_config(Config::from_env());
    let board = match Board::new(&mut store, size) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let mut shown = 0;
    board.place(&mut store, 0, &mut |placement| {
        shown += 1;
        println!("\n{}.\n{}", shown, layout(placement));
        shown < wanted
    });

    if shown == 0 {
        println!("No placement of {} queens exists.", size);
    }
    info!(size, shown, trail = store.trail_len(), "search finished");
}
